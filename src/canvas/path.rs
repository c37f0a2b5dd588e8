//! Path building in user space. Curves are flattened to polylines at build
//! time; the canvas applies the current transform when filling or stroking.

use std::f32::consts::TAU;

const QUAD_SEGMENTS: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct Subpath {
    pub points: Vec<(f32, f32)>,
    pub closed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Path {
    subpaths: Vec<Subpath>,
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.points.len() < 2)
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.subpaths.push(Subpath {
            points: vec![(x, y)],
            closed: false,
        });
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.push_point(x, y);
        self
    }

    /// Quadratic Bézier from the current point through control `(cx, cy)`.
    pub fn quadratic_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        let (x0, y0) = self.current_point().unwrap_or((cx, cy));
        for i in 1..=QUAD_SEGMENTS {
            let t = i as f32 / QUAD_SEGMENTS as f32;
            let u = 1.0 - t;
            let px = u * u * x0 + 2.0 * u * t * cx + t * t * x;
            let py = u * u * y0 + 2.0 * u * t * cy + t * t * y;
            self.push_point(px, py);
        }
        self
    }

    /// Circular arc, canvas semantics: sweeps from `start` to `end`, going
    /// counterclockwise when `ccw` is set. A connecting line is added from
    /// the current point to the arc start when one exists.
    pub fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32, ccw: bool) -> &mut Self {
        self.ellipse(cx, cy, radius, radius, 0.0, start, end, ccw)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        rotation: f32,
        start: f32,
        end: f32,
        ccw: bool,
    ) -> &mut Self {
        let mut sweep = end - start;
        if ccw {
            if sweep > 0.0 {
                sweep -= TAU;
            }
        } else if sweep < 0.0 {
            sweep += TAU;
        }
        sweep = sweep.clamp(-TAU, TAU);

        let max_r = rx.abs().max(ry.abs());
        let segments = ((max_r * sweep.abs() / 2.0) as usize).clamp(8, 128);
        let (rot_sin, rot_cos) = rotation.sin_cos();

        for i in 0..=segments {
            let angle = start + sweep * (i as f32 / segments as f32);
            let (sin, cos) = angle.sin_cos();
            let ex = rx * cos;
            let ey = ry * sin;
            let px = cx + ex * rot_cos - ey * rot_sin;
            let py = cy + ex * rot_sin + ey * rot_cos;
            if i == 0 {
                // Connect from the current point, HTML-canvas style.
                if self.current_point().is_some() {
                    self.push_point(px, py);
                } else {
                    self.move_to(px, py);
                }
            } else {
                self.push_point(px, py);
            }
        }
        self
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.move_to(x, y);
        self.push_point(x + w, y);
        self.push_point(x + w, y + h);
        self.push_point(x, y + h);
        self.close()
    }

    pub fn close(&mut self) -> &mut Self {
        if let Some(sub) = self.subpaths.last_mut() {
            sub.closed = true;
        }
        self
    }

    fn current_point(&self) -> Option<(f32, f32)> {
        self.subpaths.last().and_then(|s| s.points.last().copied())
    }

    fn push_point(&mut self, x: f32, y: f32) {
        match self.subpaths.last_mut() {
            Some(sub) if !sub.closed => sub.points.push((x, y)),
            // lineTo with no open subpath behaves like moveTo.
            _ => {
                self.move_to(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_move_line_builds_one_subpath() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0);
        assert_eq!(p.subpaths().len(), 1);
        assert_eq!(p.subpaths()[0].points.len(), 3);
        assert!(!p.subpaths()[0].closed);
    }

    #[test]
    fn test_line_without_move_starts_subpath() {
        let mut p = Path::new();
        p.line_to(5.0, 5.0);
        assert_eq!(p.subpaths().len(), 1);
        assert_eq!(p.subpaths()[0].points, vec![(5.0, 5.0)]);
    }

    #[test]
    fn test_quadratic_ends_on_endpoint() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0).quadratic_to(5.0, 10.0, 10.0, 0.0);
        let last = *p.subpaths()[0].points.last().unwrap();
        assert!((last.0 - 10.0).abs() < 1e-4);
        assert!(last.1.abs() < 1e-4);
        // The curve's apex sits at half the control height.
        let apex = p.subpaths()[0]
            .points
            .iter()
            .map(|&(_, y)| y)
            .fold(f32::MIN, f32::max);
        assert!((apex - 5.0).abs() < 0.1);
    }

    #[test]
    fn test_full_circle_arc_closes_on_itself() {
        let mut p = Path::new();
        p.arc(0.0, 0.0, 10.0, 0.0, TAU, false);
        let pts = &p.subpaths()[0].points;
        let first = pts.first().unwrap();
        let last = pts.last().unwrap();
        assert!((first.0 - last.0).abs() < 1e-3);
        assert!((first.1 - last.1).abs() < 1e-3);
        for &(x, y) in pts {
            assert!(((x * x + y * y).sqrt() - 10.0).abs() < 0.05);
        }
    }

    #[test]
    fn test_ccw_half_arc_goes_through_top() {
        // arc(0, π, ccw) is the upper semicircle in canvas coordinates.
        let mut p = Path::new();
        p.arc(0.0, 0.0, 10.0, 0.0, PI, true);
        let min_y = p.subpaths()[0]
            .points
            .iter()
            .map(|&(_, y)| y)
            .fold(f32::MAX, f32::min);
        assert!((min_y + 10.0).abs() < 0.1);
    }

    #[test]
    fn test_arc_connects_from_current_point() {
        let mut p = Path::new();
        p.move_to(-20.0, 0.0).arc(0.0, 0.0, 10.0, 0.0, PI, false);
        let pts = &p.subpaths()[0].points;
        assert_eq!(pts[0], (-20.0, 0.0));
        assert!((pts[1].0 - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_rect_is_closed() {
        let mut p = Path::new();
        p.rect(1.0, 2.0, 3.0, 4.0);
        let sub = &p.subpaths()[0];
        assert!(sub.closed);
        assert_eq!(sub.points.len(), 4);
    }

    #[test]
    fn test_ellipse_respects_radii() {
        let mut p = Path::new();
        p.ellipse(0.0, 0.0, 20.0, 5.0, 0.0, 0.0, TAU, false);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for &(x, y) in &p.subpaths()[0].points {
            max_x = max_x.max(x.abs());
            max_y = max_y.max(y.abs());
        }
        assert!((max_x - 20.0).abs() < 0.1);
        assert!((max_y - 5.0).abs() < 0.1);
    }
}

//! Colors and paint sources: solid fills plus linear and radial gradients
//! sampled per pixel in user space.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// `0xRRGGBB`, fully opaque.
    pub const fn hex(rgb: u32) -> Self {
        Color {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Color { a, ..self }
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Source-over composite of `self` onto `dst` (straight alpha).
    pub fn over(self, dst: Color) -> Color {
        let sa = self.a.clamp(0.0, 1.0);
        if sa >= 1.0 {
            return self;
        }
        if sa <= 0.0 {
            return dst;
        }
        let da = dst.a * (1.0 - sa);
        let out_a = sa + da;
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }
        Color {
            r: (self.r * sa + dst.r * da) / out_a,
            g: (self.g * sa + dst.g * da) / out_a,
            b: (self.b * sa + dst.b * da) / out_a,
            a: out_a,
        }
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    pub offset: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        stops: Vec<Stop>,
    },
    Radial {
        x0: f32,
        y0: f32,
        r0: f32,
        x1: f32,
        y1: f32,
        r1: f32,
        stops: Vec<Stop>,
    },
}

impl Paint {
    pub fn linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Paint::Linear {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }

    pub fn radial(x0: f32, y0: f32, r0: f32, x1: f32, y1: f32, r1: f32) -> Self {
        Paint::Radial {
            x0,
            y0,
            r0,
            x1,
            y1,
            r1,
            stops: Vec::new(),
        }
    }

    pub fn add_stop(&mut self, offset: f32, color: Color) -> &mut Self {
        match self {
            Paint::Solid(_) => {}
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => {
                stops.push(Stop { offset, color });
                stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
            }
        }
        self
    }

    /// Sample the paint at a user-space point.
    pub fn sample(&self, x: f32, y: f32) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear {
                x0,
                y0,
                x1,
                y1,
                stops,
            } => {
                let dx = x1 - x0;
                let dy = y1 - y0;
                let len_sq = dx * dx + dy * dy;
                let t = if len_sq <= 0.0 {
                    0.0
                } else {
                    ((x - x0) * dx + (y - y0) * dy) / len_sq
                };
                sample_stops(stops, t)
            }
            Paint::Radial {
                x1,
                y1,
                r0,
                r1,
                stops,
                ..
            } => {
                let dist = ((x - x1).powi(2) + (y - y1).powi(2)).sqrt();
                let span = r1 - r0;
                let t = if span.abs() <= f32::EPSILON {
                    1.0
                } else {
                    (dist - r0) / span
                };
                sample_stops(stops, t)
            }
        }
    }

    /// True when sampling is position-independent, letting fills skip the
    /// per-pixel inverse transform.
    pub fn is_solid(&self) -> bool {
        matches!(self, Paint::Solid(_))
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

fn sample_stops(stops: &[Stop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.offset {
            let span = hi.offset - lo.offset;
            let local = if span <= f32::EPSILON {
                1.0
            } else {
                (t - lo.offset) / span
            };
            return lo.color.lerp(hi.color, local);
        }
    }
    stops.last().map(|s| s.color).unwrap_or(Color::TRANSPARENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_unpacks_channels() {
        let c = Color::hex(0x1A237E);
        assert!((c.r - 0x1A as f32 / 255.0).abs() < 1e-6);
        assert!((c.g - 0x23 as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 0x7E as f32 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_over_opaque_background() {
        let out = Color::rgb(1.0, 0.0, 0.0).with_alpha(0.5).over(Color::BLACK);
        assert!((out.r - 0.5).abs() < 1e-6);
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn test_linear_gradient_midpoint() {
        let mut g = Paint::linear(0.0, 0.0, 0.0, 100.0);
        g.add_stop(0.0, Color::BLACK);
        g.add_stop(1.0, Color::WHITE);
        let mid = g.sample(50.0, 50.0);
        assert!((mid.r - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_linear_gradient_clamps_outside_axis() {
        let mut g = Paint::linear(0.0, 0.0, 0.0, 10.0);
        g.add_stop(0.0, Color::BLACK);
        g.add_stop(1.0, Color::WHITE);
        assert_eq!(g.sample(0.0, -50.0), Color::BLACK);
        assert_eq!(g.sample(0.0, 50.0), Color::WHITE);
    }

    #[test]
    fn test_gradient_with_interior_stops() {
        let mut g = Paint::linear(0.0, 0.0, 10.0, 0.0);
        g.add_stop(0.0, Color::BLACK);
        g.add_stop(0.5, Color::rgb(1.0, 0.0, 0.0));
        g.add_stop(1.0, Color::WHITE);
        let c = g.sample(2.5, 0.0);
        assert!((c.r - 0.5).abs() < 1e-4);
        assert!(c.g.abs() < 1e-4);
    }

    #[test]
    fn test_radial_gradient_center_and_edge() {
        let mut g = Paint::radial(0.0, 0.0, 0.0, 0.0, 0.0, 10.0);
        g.add_stop(0.0, Color::WHITE);
        g.add_stop(1.0, Color::WHITE.with_alpha(0.0));
        assert_eq!(g.sample(0.0, 0.0).a, 1.0);
        assert!(g.sample(10.0, 0.0).a.abs() < 1e-6);
        let half = g.sample(5.0, 0.0);
        assert!((half.a - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_empty_gradient_is_transparent() {
        let g = Paint::linear(0.0, 0.0, 1.0, 0.0);
        assert_eq!(g.sample(0.5, 0.0), Color::TRANSPARENT);
    }
}

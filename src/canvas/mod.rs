//! Software 2D drawing surface.
//!
//! An RGBA pixel buffer with the immediate-mode contract the scenes draw
//! against: rectangle and path fills (nonzero winding), polyline strokes,
//! linear/radial gradients, global alpha, and a save/restore transform stack
//! (translate, rotate, scale). Everything rasterizes on the CPU; the terminal
//! renderer downsamples the result into half-block cells.

pub mod paint;
pub mod path;
pub mod transform;

pub use paint::{Color, Paint};
pub use path::Path;
pub use transform::Transform;

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Transform,
    alpha: f32,
}

impl DrawState {
    const DEFAULT: DrawState = DrawState {
        transform: Transform::IDENTITY,
        alpha: 1.0,
    };
}

pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
            state: DrawState::DEFAULT,
            stack: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::BLACK; width * height];
        self.state = DrawState::DEFAULT;
        self.stack.clear();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Start a fresh frame: every pixel set to `color`, transform stack and
    /// global alpha reset.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.state = DrawState::DEFAULT;
        self.stack.clear();
    }

    // ── Transform stack ──────────────────────────────────────────────

    pub fn save(&mut self) {
        self.stack.push(self.state);
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.state.transform = self.state.transform.then(&Transform::translation(tx, ty));
    }

    pub fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform.then(&Transform::rotation(angle));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform = self.state.transform.then(&Transform::scaling(sx, sy));
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn alpha(&self) -> f32 {
        self.state.alpha
    }

    // ── Filling ──────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
        // Negative extents select the same rectangle, canvas-style.
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        if self.state.transform.is_identity() {
            self.fill_rect_axis_aligned(x, y, w, h, paint);
            return;
        }
        let mut path = Path::new();
        path.rect(x, y, w, h);
        self.fill_path(&path, paint);
    }

    pub fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let transform = self.state.transform;
        let polygons: Vec<Vec<(f32, f32)>> = path
            .subpaths()
            .iter()
            .filter(|sub| sub.points.len() >= 3)
            .map(|sub| {
                sub.points
                    .iter()
                    .map(|&(px, py)| transform.apply(px, py))
                    .collect()
            })
            .collect();
        let inverse = self.inverse_for(paint, &transform);
        self.rasterize(&polygons, paint, inverse);
    }

    // ── Stroking ─────────────────────────────────────────────────────

    pub fn stroke_path(&mut self, path: &Path, paint: &Paint, line_width: f32) {
        let transform = self.state.transform;
        let scale = transform.determinant().abs().sqrt();
        let half = (line_width * scale).max(1.0) / 2.0;
        let inverse = self.inverse_for(paint, &transform);

        for sub in path.subpaths() {
            if sub.points.len() < 2 {
                continue;
            }
            let device: Vec<(f32, f32)> = sub
                .points
                .iter()
                .map(|&(px, py)| transform.apply(px, py))
                .collect();

            let mut segments: Vec<((f32, f32), (f32, f32))> =
                device.windows(2).map(|w| (w[0], w[1])).collect();
            if sub.closed {
                segments.push((*device.last().unwrap_or(&device[0]), device[0]));
            }

            for &(p, q) in &segments {
                let dx = q.0 - p.0;
                let dy = q.1 - p.1;
                let len = (dx * dx + dy * dy).sqrt();
                if len < 1e-6 {
                    continue;
                }
                let nx = -dy / len * half;
                let ny = dx / len * half;
                let quad = vec![
                    (p.0 + nx, p.1 + ny),
                    (q.0 + nx, q.1 + ny),
                    (q.0 - nx, q.1 - ny),
                    (p.0 - nx, p.1 - ny),
                ];
                self.rasterize(&[quad], paint, inverse);
            }

            // Round the joints so thick strokes don't show seams.
            if half > 1.0 && segments.len() > 1 {
                let joints = if sub.closed {
                    device.as_slice()
                } else {
                    &device[1..device.len() - 1]
                };
                for &(jx, jy) in joints {
                    let disc = disc_polygon(jx, jy, half);
                    self.rasterize(&[disc], paint, inverse);
                }
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn inverse_for(&self, paint: &Paint, transform: &Transform) -> Option<Transform> {
        if paint.is_solid() {
            None
        } else {
            transform.invert()
        }
    }

    fn fill_rect_axis_aligned(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
        let alpha = self.state.alpha;
        let x0 = (x.max(0.0)) as usize;
        let y0 = (y.max(0.0)) as usize;
        let x1 = ((x + w).min(self.width as f32).max(0.0)).ceil() as usize;
        let y1 = ((y + h).min(self.height as f32).max(0.0)).ceil() as usize;
        for py in y0..y1.min(self.height) {
            for px in x0..x1.min(self.width) {
                let color = paint.sample(px as f32 + 0.5, py as f32 + 0.5);
                self.blend(px, py, color, alpha);
            }
        }
    }

    /// Nonzero-winding scanline fill over device-space polygons. Subpaths are
    /// implicitly closed, matching canvas fill semantics.
    fn rasterize(&mut self, polygons: &[Vec<(f32, f32)>], paint: &Paint, inverse: Option<Transform>) {
        let alpha = self.state.alpha;
        let mut edges: Vec<(f32, f32, f32, f32)> = Vec::new();
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;

        for poly in polygons {
            if poly.len() < 3 {
                continue;
            }
            for i in 0..poly.len() {
                let (x0, y0) = poly[i];
                let (x1, y1) = poly[(i + 1) % poly.len()];
                if !x0.is_finite() || !y0.is_finite() || !x1.is_finite() || !y1.is_finite() {
                    continue;
                }
                if (y0 - y1).abs() > 1e-9 {
                    edges.push((x0, y0, x1, y1));
                }
                min_y = min_y.min(y0).min(y1);
                max_y = max_y.max(y0).max(y1);
            }
        }
        if edges.is_empty() {
            return;
        }

        let row_start = min_y.floor().max(0.0) as usize;
        let row_end = (max_y.ceil().min(self.height as f32)).max(0.0) as usize;
        let mut crossings: Vec<(f32, i32)> = Vec::new();

        for py in row_start..row_end {
            let yc = py as f32 + 0.5;
            crossings.clear();
            for &(x0, y0, x1, y1) in &edges {
                let dir = if y0 <= yc && y1 > yc {
                    1
                } else if y1 <= yc && y0 > yc {
                    -1
                } else {
                    continue;
                };
                let x = x0 + (yc - y0) * (x1 - x0) / (y1 - y0);
                crossings.push((x, dir));
            }
            if crossings.is_empty() {
                continue;
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for i in 0..crossings.len() {
                let was_inside = winding != 0;
                winding += crossings[i].1;
                let now_inside = winding != 0;
                if !was_inside && now_inside {
                    // span opens at crossings[i].0; it closes at the next
                    // crossing where the winding returns to zero.
                    let span_start = crossings[i].0;
                    let mut w = winding;
                    let mut j = i + 1;
                    while j < crossings.len() && w != 0 {
                        w += crossings[j].1;
                        j += 1;
                    }
                    if w == 0 {
                        let span_end = crossings[j - 1].0;
                        self.fill_span(py, span_start, span_end, paint, inverse, alpha);
                    }
                }
            }
        }
    }

    fn fill_span(
        &mut self,
        py: usize,
        span_start: f32,
        span_end: f32,
        paint: &Paint,
        inverse: Option<Transform>,
        alpha: f32,
    ) {
        let start = (span_start - 0.5).ceil().max(0.0) as usize;
        let end_f = (span_end - 0.5).floor();
        if end_f < 0.0 {
            return;
        }
        let end = (end_f as usize).min(self.width.saturating_sub(1));
        for px in start..=end {
            let color = match inverse {
                Some(inv) => {
                    let (ux, uy) = inv.apply(px as f32 + 0.5, py as f32 + 0.5);
                    paint.sample(ux, uy)
                }
                None => paint.sample(px as f32 + 0.5, py as f32 + 0.5),
            };
            self.blend(px, py, color, alpha);
        }
    }

    fn blend(&mut self, x: usize, y: usize, color: Color, alpha: f32) {
        let a = color.a * alpha;
        if a <= 0.0 || x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.pixels[idx] = color.with_alpha(a).over(self.pixels[idx]);
    }
}

fn disc_polygon(cx: f32, cy: f32, radius: f32) -> Vec<(f32, f32)> {
    const SIDES: usize = 12;
    (0..SIDES)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / SIDES as f32;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

//! Terminal presentation.
//!
//! Owns the crossterm lifecycle (raw mode, alternate screen, cursor) and the
//! software canvas. Every frame the canvas is box-averaged down to one color
//! per half cell and printed as '▀' with 24-bit foreground/background pairs,
//! so each terminal cell carries two vertically stacked pixels.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color as TermColor, Colors, Print, ResetColor, SetColors, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::canvas::{Canvas, Color};

/// Logical canvas height in pixels. The width follows the terminal's aspect
/// ratio (a cell is roughly 1:2), so scene proportions hold on any terminal
/// size.
const LOGICAL_HEIGHT: f32 = 540.0;

pub struct TerminalRenderer {
    out: BufWriter<Stdout>,
    cols: u16,
    rows: u16,
    canvas: Canvas,
}

impl TerminalRenderer {
    pub fn new() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let (width, height) = canvas_dimensions(cols, rows);
        Ok(TerminalRenderer {
            out: BufWriter::new(io::stdout()),
            cols,
            rows,
            canvas: Canvas::new(width, height),
        })
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn get_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn manual_resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        self.cols = cols;
        self.rows = rows;
        let (width, height) = canvas_dimensions(cols, rows);
        self.canvas.resize(width, height);
        execute!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    /// Canvas dimensions in scene pixels; (0, 0) while the terminal reports a
    /// degenerate size.
    pub fn canvas_size(&self) -> (f32, f32) {
        self.canvas.size()
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn begin_frame(&mut self) {
        self.canvas.clear(Color::BLACK);
    }

    /// Downsample the canvas into half-block cells and queue the full frame.
    pub fn present(&mut self) -> io::Result<()> {
        if self.canvas.width() == 0 || self.canvas.height() == 0 {
            return Ok(());
        }
        let mut last: Option<(TermColor, TermColor)> = None;
        for cy in 0..self.rows {
            queue!(self.out, cursor::MoveTo(0, cy))?;
            for cx in 0..self.cols {
                let (top, bottom) = cell_colors(&self.canvas, self.cols, self.rows, cx, cy);
                let fg = to_term_color(top);
                let bg = to_term_color(bottom);
                if last != Some((fg, bg)) {
                    queue!(self.out, SetColors(Colors::new(fg, bg)))?;
                    last = Some((fg, bg));
                }
                queue!(self.out, Print('▀'))?;
            }
        }
        Ok(())
    }

    /// Overlay text on top of the presented frame, black-backed so it stays
    /// readable over any scene.
    pub fn render_line_colored(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        color: TermColor,
    ) -> io::Result<()> {
        if y >= self.rows {
            return Ok(());
        }
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetColors(Colors::new(color, TermColor::Black)),
            Print(text),
        )?;
        Ok(())
    }

    /// Centered variant for banners.
    pub fn render_line_centered(&mut self, y: u16, text: &str, color: TermColor) -> io::Result<()> {
        let x = (self.cols as usize).saturating_sub(text.chars().count()) / 2;
        self.render_line_colored(x as u16, y, text, color)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(TermColor::Reset))?;
        self.out.flush()
    }
}

fn to_term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb { r, g, b }
}

fn canvas_dimensions(cols: u16, rows: u16) -> (usize, usize) {
    if cols == 0 || rows == 0 {
        return (0, 0);
    }
    let aspect = cols as f32 / (rows as f32 * 2.0);
    let width = (LOGICAL_HEIGHT * aspect).round().max(1.0) as usize;
    (width, LOGICAL_HEIGHT as usize)
}

/// Average canvas colors for the top and bottom halves of one terminal cell.
pub(crate) fn cell_colors(canvas: &Canvas, cols: u16, rows: u16, cx: u16, cy: u16) -> (Color, Color) {
    let half_rows = rows as usize * 2;
    let top = half_block_average(canvas, cols, half_rows, cx as usize, cy as usize * 2);
    let bottom = half_block_average(canvas, cols, half_rows, cx as usize, cy as usize * 2 + 1);
    (top, bottom)
}

fn half_block_average(canvas: &Canvas, cols: u16, half_rows: usize, cx: usize, hy: usize) -> Color {
    let (w, h) = (canvas.width(), canvas.height());
    if w == 0 || h == 0 || cols == 0 || half_rows == 0 {
        return Color::BLACK;
    }
    let x0 = (cx * w / cols as usize).min(w - 1);
    let x1 = (((cx + 1) * w) / cols as usize).clamp(x0 + 1, w);
    let y0 = (hy * h / half_rows).min(h - 1);
    let y1 = (((hy + 1) * h) / half_rows).clamp(y0 + 1, h);

    let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
    let mut count = 0.0f32;
    for y in y0..y1 {
        for x in x0..x1 {
            let p = canvas.pixel(x, y);
            r += p.r;
            g += p.g;
            b += p.b;
            count += 1.0;
        }
    }
    Color::rgb(r / count, g / count, b / count)
}

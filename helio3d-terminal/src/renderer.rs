/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use helio3d_core::{Color, DrawOp, ScreenVertex};

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Software raster surface that blits pipeline draw ops into a character
/// and color grid. Ops land in submission order, so back-to-front input
/// gives painter's-algorithm occlusion without a depth buffer.
pub struct AsciiSurface {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::BLACK; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for i in 0..self.char_buffer.len() {
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::BLACK;
        }
    }

    pub fn blit(&mut self, ops: &[DrawOp]) {
        for op in ops {
            match op {
                DrawOp::Triangle(verts) => self.fill_triangle(verts),
                DrawOp::Line { a, b, color } => {
                    self.draw_line(a.x, a.y, b.x, b.y, *color);
                }
                DrawOp::Point { pos, color } => {
                    self.plot(pos.x as i32, pos.y as i32, *color);
                }
            }
        }
    }

    /// Scanline fill over the bounding box with barycentric membership and
    /// per-pixel color interpolation.
    fn fill_triangle(&mut self, verts: &[ScreenVertex; 3]) {
        if verts.iter().all(|v| v.color.a == 0) {
            return;
        }
        let (v0, v1, v2) = (verts[0], verts[1], verts[2]);

        let min_x = (v0.pos.x.min(v1.pos.x).min(v2.pos.x).floor() as i32).max(0);
        let max_x = (v0.pos.x.max(v1.pos.x).max(v2.pos.x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.pos.y.min(v1.pos.y).min(v2.pos.y).floor() as i32).max(0);
        let max_y =
            (v0.pos.y.max(v1.pos.y).max(v2.pos.y).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric(
                    (v0.pos.x, v0.pos.y),
                    (v1.pos.x, v1.pos.y),
                    (v2.pos.x, v2.pos.y),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let color = Color::new(
                            mix(v0.color.r, v1.color.r, v2.color.r, w0, w1, w2),
                            mix(v0.color.g, v1.color.g, v2.color.g, w0, w1, w2),
                            mix(v0.color.b, v1.color.b, v2.color.b, w0, w1, w2),
                            mix(v0.color.a, v1.color.a, v2.color.a, w0, w1, w2),
                        );
                        self.plot(x, y, color);
                    }
                }
            }
        }
    }

    /// DDA line draw.
    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());
        if steps < 1.0 {
            self.plot(x0 as i32, y0 as i32, color);
            return;
        }
        let x_inc = dx / steps;
        let y_inc = dy / steps;
        let mut x = x0;
        let mut y = y0;
        for _ in 0..=steps as usize {
            self.plot(x as i32, y as i32, color);
            x += x_inc;
            y += y_inc;
        }
    }

    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if color.a == 0 {
            return;
        }
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = ramp_char(color);
        self.color_buffer[idx] = color;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];
                let color = self.color_buffer[idx];

                writer.queue(SetForegroundColor(TermColor::Rgb {
                    r: color.r,
                    g: color.g,
                    b: color.b,
                }))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn cell(&self, x: usize, y: usize) -> (char, Color) {
        let idx = y * self.width + x;
        (self.char_buffer[idx], self.color_buffer[idx])
    }
}

/// Ramp selection by perceived luminance, scaled by alpha so fading
/// entities dim out.
fn ramp_char(color: Color) -> char {
    let luma = 0.299 * color.r as f32 + 0.587 * color.g as f32 + 0.114 * color.b as f32;
    let brightness = (luma / 255.0) * (color.a as f32 / 255.0);
    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

fn mix(c0: u8, c1: u8, c2: u8, w0: f32, w1: f32, w2: f32) -> u8 {
    let value = w0 * c0 as f32 + w1 * c1 as f32 + w2 * c2 as f32;
    value.clamp(0.0, 255.0) as u8
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio3d_core::Vec2;

    #[test]
    fn test_point_plots_cell() {
        let mut surface = AsciiSurface::new(10, 10);
        surface.blit(&[DrawOp::Point {
            pos: Vec2::new(3.0, 4.0),
            color: Color::WHITE,
        }]);
        let (c, color) = surface.cell(3, 4);
        assert_eq!(c, '@');
        assert_eq!(color, Color::WHITE);
    }

    #[test]
    fn test_zero_alpha_is_invisible() {
        let mut surface = AsciiSurface::new(10, 10);
        surface.blit(&[DrawOp::Point {
            pos: Vec2::new(3.0, 4.0),
            color: Color::WHITE.with_alpha(0),
        }]);
        assert_eq!(surface.cell(3, 4).0, ' ');
    }

    #[test]
    fn test_line_endpoints_covered() {
        let mut surface = AsciiSurface::new(20, 20);
        surface.blit(&[DrawOp::Line {
            a: Vec2::new(1.0, 1.0),
            b: Vec2::new(10.0, 5.0),
            color: Color::CYAN,
        }]);
        assert_ne!(surface.cell(1, 1).0, ' ');
        assert_ne!(surface.cell(10, 5).0, ' ');
    }

    #[test]
    fn test_triangle_fills_interior() {
        let mut surface = AsciiSurface::new(20, 20);
        let verts = [
            ScreenVertex::new(Vec2::new(2.0, 2.0), Color::WHITE),
            ScreenVertex::new(Vec2::new(16.0, 2.0), Color::WHITE),
            ScreenVertex::new(Vec2::new(2.0, 16.0), Color::WHITE),
        ];
        surface.blit(&[DrawOp::Triangle(verts)]);
        assert_ne!(surface.cell(5, 5).0, ' ');
        // Far corner outside the hypotenuse stays empty.
        assert_eq!(surface.cell(18, 18).0, ' ');
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut surface = AsciiSurface::new(5, 5);
        surface.blit(&[DrawOp::Point {
            pos: Vec2::new(-3.0, 99.0),
            color: Color::RED,
        }]);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(surface.cell(x, y).0, ' ');
            }
        }
    }

    #[test]
    fn test_later_ops_overwrite_earlier() {
        let mut surface = AsciiSurface::new(10, 10);
        surface.blit(&[
            DrawOp::Point {
                pos: Vec2::new(2.0, 2.0),
                color: Color::RED,
            },
            DrawOp::Point {
                pos: Vec2::new(2.0, 2.0),
                color: Color::BLUE,
            },
        ]);
        assert_eq!(surface.cell(2, 2).1, Color::BLUE);
    }
}

/// ASCII plotter for the engine's polyline snapshots
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::RenderList;

/// Renders polylines into a character grid, one Bresenham line per
/// polyline edge, then flushes the grid to a terminal writer.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Plot every polyline of a viewport snapshot.
    pub fn render(&mut self, snapshot: &RenderList) {
        for (polylines, rgb) in snapshot {
            let color = Color::Rgb {
                r: (rgb[0].clamp(0.0, 1.0) * 255.0) as u8,
                g: (rgb[1].clamp(0.0, 1.0) * 255.0) as u8,
                b: (rgb[2].clamp(0.0, 1.0) * 255.0) as u8,
            };
            for polyline in polylines {
                if polyline.len() == 1 {
                    let p = polyline[0];
                    self.plot(p.x as i64, p.y as i64, '+', color);
                }
                for pair in polyline.windows(2) {
                    self.plot_line((pair[0].x, pair[0].y), (pair[1].x, pair[1].y), color);
                }
            }
        }
    }

    fn plot_line(&mut self, a: (f64, f64), b: (f64, f64), color: Color) {
        let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
        let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let glyph = line_glyph(x1 - x0, y1 - y0);
        loop {
            self.plot(x0, y0, glyph, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x0 += sx;
            }
            if doubled <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, glyph: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = glyph;
        self.color_buffer[idx] = color;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        writer.flush()
    }
}

/// Pick a character matching the rough slope of the line.
fn line_glyph(dx: i64, dy: i64) -> char {
    if dx == 0 && dy == 0 {
        return '+';
    }
    if dy.abs() > 2 * dx.abs() {
        '|'
    } else if dx.abs() > 2 * dy.abs() {
        '-'
    } else if (dx > 0) == (dy > 0) {
        // Screen rows grow downward.
        '\\'
    } else {
        '/'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_horizontal_line_fills_row() {
        let mut renderer = AsciiRenderer::new(10, 3);
        let snapshot = vec![(
            vec![vec![Point2::new(0.0, 1.0), Point2::new(9.0, 1.0)]],
            [1.0, 0.0, 0.0],
        )];
        renderer.render(&snapshot);
        for x in 0..10 {
            assert_eq!(renderer.char_buffer[10 + x], '-');
        }
        assert_eq!(renderer.char_buffer[0], ' ');
    }

    #[test]
    fn test_points_outside_grid_are_ignored() {
        let mut renderer = AsciiRenderer::new(4, 4);
        let snapshot = vec![(
            vec![vec![Point2::new(-50.0, -50.0), Point2::new(-40.0, -50.0)]],
            [0.0, 0.0, 0.0],
        )];
        renderer.render(&snapshot);
        assert!(renderer.char_buffer.iter().all(|&c| c == ' '));
    }

    #[test]
    fn test_clear_resets_the_grid() {
        let mut renderer = AsciiRenderer::new(4, 4);
        let snapshot = vec![(
            vec![vec![Point2::new(0.0, 0.0), Point2::new(3.0, 3.0)]],
            [0.0, 1.0, 0.0],
        )];
        renderer.render(&snapshot);
        assert!(renderer.char_buffer.iter().any(|&c| c != ' '));
        renderer.clear();
        assert!(renderer.char_buffer.iter().all(|&c| c == ' '));
    }
}

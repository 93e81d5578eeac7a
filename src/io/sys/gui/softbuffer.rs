//! CPU rendering for the GUI, which should work nearly everywhere a window can be opened.

use fontdue::{Font, FontSettings};
use rayon::prelude::*;
use winit::window::Window;

use crate::{
    io::{
        fmt::{Cell, Color, Formatted},
        Screen, XY,
    },
    Error, Result,
};

use super::GuiRenderer;

/// Linear RGB in `0.0..=1.0`.
fn color_f32(c: Color) -> (f32, f32, f32) {
    let (h, s, v): (f32, f32, f32) = match c {
        Color::Rgb(r, g, b) => return (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0),
        Color::Black => (0.0, 0.0, 0.05),
        Color::Red => (0.0, 1.0, 0.75),
        Color::Green => (120.0, 1.0, 0.75),
        Color::Yellow => (60.0, 1.0, 0.75),
        Color::Blue => (240.0, 0.7, 0.75),
        Color::Magenta => (300.0, 1.0, 0.75),
        Color::Cyan => (180.0, 1.0, 0.75),
        Color::White => (0.0, 0.0, 0.75),
        Color::BrightBlack => (0.0, 0.0, 0.5),
        Color::BrightRed => (0.0, 1.0, 1.0),
        Color::BrightGreen => (120.0, 1.0, 1.0),
        Color::BrightYellow => (60.0, 1.0, 1.0),
        Color::BrightBlue => (240.0, 1.0, 1.0),
        Color::BrightMagenta => (300.0, 1.0, 1.0),
        Color::BrightCyan => (180.0, 1.0, 1.0),
        Color::BrightWhite => (0.0, 0.0, 1.0),
    };

    // https://en.wikipedia.org/wiki/HSL_and_HSV#HSV_to_RGB
    let c = s * v;
    let h_ = h / 60.0;
    let x = c * (1.0 - (h_ % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h_ as usize {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    (r1 + m, g1 + m, b1 + m)
}

fn pack(r: f32, g: f32, b: f32) -> u32 {
    let byte = |f: f32| (f.clamp(0.0, 1.0) * 255.0).round() as u32;
    (byte(r) << 16) | (byte(g) << 8) | byte(b)
}

fn color_u32(c: Color) -> u32 {
    let (r, g, b) = color_f32(c);
    pack(r, g, b)
}

/// `opacity` of the way from `bg` to `fg`.
fn color_of(fg: Color, bg: Color, opacity: f32) -> u32 {
    let (fr, fg_, fb) = color_f32(fg);
    let (br, bg_, bb) = color_f32(bg);
    let lerp = |from: f32, to: f32| from + (to - from) * opacity;
    pack(lerp(br, fr), lerp(bg_, fg_), lerp(bb, fb))
}

pub struct SoftbufferRenderer {
    /// the font size, in whatever units fontdue likes
    scale: f32,
    regular: Font,
    /// the bolded font (all the metrics are based on unbolded)
    bold: Font,
    /// the total size of one character in the font
    ch_sz: XY,
    /// how many pixels down from the top the character baseline is
    line_baseline: i32,
    /// first pixel row of the underline
    underline_top: usize,
}

impl SoftbufferRenderer {
    /// Render one row of cells into `width * ch_sz.y()` pixels, with `left` pixels of margin.
    fn render_row(&self, cells: &[Cell], width: usize, left: usize) -> Vec<u32> {
        let XY(cw, chh) = self.ch_sz;
        let mut out = vec![color_u32(Color::Black); width * chh];
        for (i, cell) in cells.iter().enumerate() {
            let fmt = cell.get_fmt();
            let (fg, bg) = (color_u32(fmt.fg), color_u32(fmt.bg));
            let x0 = left + i * cw;

            // block elements are drawn exactly, so the avatars don't get seams between cells
            let split = match cell.ch {
                '▀' => Some(chh / 2),
                '▄' => Some(chh - chh / 2),
                '█' => Some(chh),
                _ => None,
            };
            if let Some(split) = split {
                let (top, bottom) = if cell.ch == '▄' { (bg, fg) } else { (fg, bg) };
                for py in 0..chh {
                    let color = if py < split { top } else { bottom };
                    out[py * width + x0..py * width + x0 + cw].fill(color);
                }
                continue;
            }

            // select bold or normal font (this is really how we do bold)
            let font = if fmt.bold { &self.bold } else { &self.regular };
            let (metrics, raster) = font.rasterize(cell.ch, self.scale);
            // where the top left of the raster lands, relative to the cell
            let gx0 = metrics.xmin;
            let gy0 = self.line_baseline - metrics.height as i32 - metrics.ymin;
            for py in 0..chh {
                let dest = &mut out[py * width + x0..py * width + x0 + cw];
                if fmt.underline && py >= self.underline_top {
                    dest.fill(fg);
                    continue;
                }
                let gy = py as i32 - gy0;
                for (px, pixel) in dest.iter_mut().enumerate() {
                    let gx = px as i32 - gx0;
                    let inside = gx >= 0 && gy >= 0 && (gx as usize) < metrics.width && (gy as usize) < metrics.height;
                    *pixel = if inside {
                        let coverage = raster[gy as usize * metrics.width + gx as usize];
                        color_of(fmt.fg, fmt.bg, coverage as f32 / 255.0)
                    } else {
                        bg
                    };
                }
            }
        }
        out
    }
}

impl GuiRenderer for SoftbufferRenderer {
    fn new(regular: Vec<u8>, bold: Vec<u8>, scale: f32) -> Result<Self> {
        let settings = || FontSettings {
            scale,
            ..Default::default()
        };
        let regular = Font::from_bytes(regular, settings()).map_err(Error::from)?;
        let bold = Font::from_bytes(bold, settings()).map_err(Error::from)?;

        let line_met = regular
            .horizontal_line_metrics(scale)
            .ok_or("font has no horizontal line metrics")?;
        // +2 for rounding the ascent down and the descent up
        let height = line_met.new_line_size.ceil() as usize + 2;
        let width = regular.metrics('m', scale).width.max(1);
        let underline_top = height.saturating_sub(regular.metrics('_', scale).height.max(1));

        Ok(Self {
            scale,
            regular,
            bold,
            ch_sz: XY(width, height),
            line_baseline: line_met.ascent.ceil() as i32 + 1,
            underline_top,
        })
    }

    fn char_size(&self) -> XY {
        self.ch_sz
    }

    fn render(&self, window: &Window, screen: &Screen) -> Result<()> {
        let window_sz = XY(window.inner_size().width as usize, window.inner_size().height as usize);
        if window_sz.area() == 0 {
            // minimized
            return Ok(());
        }
        let max = window_sz / self.ch_sz;
        let grid = XY(screen.size().x().min(max.x()), screen.size().y().min(max.y()));
        let margin = (window_sz - grid * self.ch_sz) / 2;

        let rows: Vec<Vec<u32>> = (0..grid.y())
            .into_par_iter()
            .map(|y| self.render_row(&screen[y][..grid.x()], window_sz.x(), margin.x()))
            .collect();

        let background = color_u32(Color::Black);
        let mut buffer = Vec::with_capacity(window_sz.area());
        buffer.resize(window_sz.x() * margin.y(), background);
        for row in rows {
            buffer.extend(row);
        }
        buffer.resize(window_sz.area(), background);

        // SAFETY: the window outlives the context, which is dropped at the end of this function
        let mut gc = unsafe { softbuffer::GraphicsContext::new(window, window) }
            .map_err(|e| Error::from(format!("softbuffer: {}", e)))?;
        gc.set_buffer(&buffer, window_sz.x() as u16, window_sz.y() as u16);
        Ok(())
    }
}

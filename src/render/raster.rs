//! RGBA snapshots of the in-memory surfaces.

use image::{Rgba, RgbaImage};
use kurbo::Point;

use crate::color::{
    DEFAULT_COLOR,
    parse::{Rgb8, parse_rgb},
};

use super::{
    glyphs::{ADVANCE, GLYPH_COLS, GLYPH_ROWS, glyph, lit},
    matrix::MatrixRenderer,
    split_flap::SplitFlapRenderer,
    text::TextRenderer,
};

const FLAP_FACE: Rgb8 = Rgb8::new(0x22, 0x22, 0x22);

fn rgb(color: &str) -> Rgb8 {
    parse_rgb(color)
        .or_else(|_| parse_rgb(DEFAULT_COLOR))
        .unwrap_or(Rgb8::new(0xff, 0x33, 0x00))
}

fn blend(fg: Rgb8, bg: Rgb8, alpha: f64) -> Rgba<u8> {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f64::from(f) * a + f64::from(b) * (1.0 - a)).round() as u8;
    Rgba([mix(fg.r, bg.r), mix(fg.g, bg.g), mix(fg.b, bg.b), 255])
}

fn fill_rect(img: &mut RgbaImage, x0: f64, y0: f64, w: f64, h: f64, px: Rgba<u8>) {
    let (iw, ih) = (f64::from(img.width()), f64::from(img.height()));
    let xs = x0.round().max(0.0);
    let ys = y0.round().max(0.0);
    let xe = (x0 + w).round().min(iw);
    let ye = (y0 + h).round().min(ih);
    if xs >= xe || ys >= ye {
        return;
    }
    for y in ys as u32..ye as u32 {
        for x in xs as u32..xe as u32 {
            img.put_pixel(x, y, px);
        }
    }
}

fn draw_glyph(img: &mut RgbaImage, c: char, origin: Point, dot: f64, px: Rgba<u8>) {
    let g = glyph(c);
    for row in 0..GLYPH_ROWS {
        for col in 0..GLYPH_COLS {
            if lit(&g, row, col) {
                let x = origin.x + col as f64 * dot;
                let y = origin.y + row as f64 * dot;
                fill_rect(img, x, y, dot, dot, px);
            }
        }
    }
}

fn canvas(width: f64, height: f64, bg: Rgb8) -> RgbaImage {
    let w = width.ceil().max(1.0) as u32;
    let h = height.ceil().max(1.0) as u32;
    RgbaImage::from_pixel(w, h, Rgba([bg.r, bg.g, bg.b, 255]))
}

impl TextRenderer {
    /// One glyph dot is `charWidth / 6` pixels; the block sits one dot below the top.
    pub fn rasterize(&self) -> RgbaImage {
        let config = self.config();
        let block = self.block();
        let dot = (config.char_width / ADVANCE as f64).max(1.0);
        let bg = rgb(block.background.as_deref().unwrap_or(&config.background));
        let mut img = canvas(config.width, dot * (GLYPH_ROWS + 2) as f64, bg);
        if !block.visible {
            return img;
        }
        for (i, el) in block.chars.iter().enumerate() {
            if el.hidden {
                continue;
            }
            let origin = block.transform * Point::new(i as f64 * config.char_width, dot);
            let px = blend(rgb(&el.color), bg, block.opacity);
            draw_glyph(&mut img, el.ch, origin, dot, px);
        }
        img
    }
}

impl MatrixRenderer {
    /// Each dot is a `dotPitch` square with a one-pixel gap when the pitch allows.
    pub fn rasterize(&self) -> RgbaImage {
        let config = self.config();
        let pitch = config.dot_pitch.max(1.0);
        let bg = rgb(&config.background);
        let mut img = canvas(config.cols as f64 * pitch, config.rows as f64 * pitch, bg);
        let size = if pitch >= 3.0 { pitch - 1.0 } else { pitch };
        for row in 0..config.rows {
            for col in 0..config.cols {
                let Some(el) = self.dot(row, col) else { continue };
                let px = blend(rgb(&el.color), bg, 1.0);
                fill_rect(&mut img, col as f64 * pitch, row as f64 * pitch, size, size, px);
            }
        }
        img
    }
}

impl SplitFlapRenderer {
    /// Cells are `charWidth` wide with a dark face; glyphs use `charWidth / 6` dots.
    pub fn rasterize(&self) -> RgbaImage {
        let config = self.config();
        let cw = config.char_width;
        let dot = (cw / ADVANCE as f64).max(1.0);
        let height = dot * (GLYPH_ROWS + 4) as f64;
        let bg = rgb(&config.background);
        let mut img = canvas(self.cells().len() as f64 * cw, height, bg);
        let face = blend(FLAP_FACE, bg, 1.0);
        for (i, cell) in self.cells().iter().enumerate() {
            let x = i as f64 * cw;
            fill_rect(&mut img, x + 1.0, 0.0, cw - 2.0, height, face);
            if self.is_visible() {
                let origin = Point::new(x + (cw - GLYPH_COLS as f64 * dot) / 2.0, dot * 2.0);
                let px = blend(rgb(&cell.color), FLAP_FACE, 1.0);
                draw_glyph(&mut img, cell.current, origin, dot, px);
            }
        }
        img
    }
}

impl TextRenderer {
    /// Visible characters, hidden ones as spaces.
    pub fn ascii(&self) -> String {
        let block = self.block();
        if !block.visible {
            return String::new();
        }
        block
            .chars
            .iter()
            .map(|c| if c.hidden { ' ' } else { c.ch })
            .collect()
    }
}

impl MatrixRenderer {
    /// One line per row: `#` lit, `.` dark.
    pub fn ascii(&self) -> String {
        (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| match self.dot(row, col) {
                        Some(d) if d.on => '#',
                        _ => '.',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SplitFlapRenderer {
    pub fn ascii(&self) -> String {
        format!("[{}]", self.current_text())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

use crate::font::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, LabelFont, glyph_bits};
use ab_glyph::PxScale;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use inference::DetectionRecord;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const BOX_THICKNESS: i32 = 3;
/// Label tag sits this many pixels above the box's top edge.
const LABEL_OFFSET: i32 = 25;
const FONT_SIZE: f32 = 20.0;
/// Pixel size of one bitmap glyph cell.
const BUILTIN_SCALE: i32 = 2;
const BUILTIN_PADDING: i32 = 2;

/// Draws detection boxes and label tags.
pub struct Annotator {
    font: LabelFont,
}

impl Annotator {
    pub fn new(font: LabelFont) -> Self {
        Self { font }
    }

    /// Look up a TrueType font, preferring `font_path`, falling back to bitmap glyphs.
    pub fn load(font_path: Option<&str>) -> Self {
        Self::new(LabelFont::discover(font_path))
    }

    pub fn builtin() -> Self {
        Self::new(LabelFont::Builtin)
    }

    /// Return a copy of `image` with every detection drawn on it.
    #[tracing::instrument(name = "annotate", skip_all, fields(detections = detections.len()))]
    pub fn annotate(&self, image: &RgbImage, detections: &[DetectionRecord]) -> RgbImage {
        let mut canvas = image.clone();

        for det in detections {
            let x1 = det.x1().round() as i32;
            let y1 = det.y1().round() as i32;
            let x2 = det.x2().round() as i32;
            let y2 = det.y2().round() as i32;

            draw_box(&mut canvas, x1, y1, x2, y2);
            self.draw_label(&mut canvas, x1, y1 - LABEL_OFFSET, &det.label());
        }

        canvas
    }

    fn draw_label(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str) {
        match &self.font {
            LabelFont::TrueType(font) => {
                let scale = PxScale::from(FONT_SIZE);
                let (width, height) = text_size(scale, font, text);
                fill(canvas, x, y, width as i32, height as i32, BOX_COLOR);
                draw_text_mut(canvas, TEXT_COLOR, x, y, scale, font, text);
            }
            LabelFont::Builtin => {
                let chars = text.chars().count() as i32;
                let width = chars * GLYPH_ADVANCE as i32 * BUILTIN_SCALE + 2 * BUILTIN_PADDING;
                let height = GLYPH_HEIGHT as i32 * BUILTIN_SCALE + 2 * BUILTIN_PADDING;
                fill(canvas, x, y, width, height, BOX_COLOR);
                draw_bitmap_text(
                    canvas,
                    x + BUILTIN_PADDING,
                    y + BUILTIN_PADDING,
                    text,
                    TEXT_COLOR,
                );
            }
        }
    }
}

/// Outline drawn inward from the box edges, like a stroked rectangle.
fn draw_box(canvas: &mut RgbImage, x1: i32, y1: i32, x2: i32, y2: i32) {
    for i in 0..BOX_THICKNESS {
        let width = x2 - x1 + 1 - 2 * i;
        let height = y2 - y1 + 1 - 2 * i;
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at(x1 + i, y1 + i).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }
}

fn fill(canvas: &mut RgbImage, x: i32, y: i32, width: i32, height: i32, color: Rgb<u8>) {
    if width <= 0 || height <= 0 {
        return;
    }
    draw_filled_rect_mut(
        canvas,
        Rect::at(x, y).of_size(width as u32, height as u32),
        color,
    );
}

fn draw_bitmap_text(canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);
    let mut pen_x = x;

    for ch in text.chars() {
        if let Some(rows) = glyph_bits(ch) {
            for (row, pattern) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (pattern >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    let cell_x = pen_x + col as i32 * BUILTIN_SCALE;
                    let cell_y = y + row as i32 * BUILTIN_SCALE;
                    for dy in 0..BUILTIN_SCALE {
                        for dx in 0..BUILTIN_SCALE {
                            let (px, py) = (cell_x + dx, cell_y + dy);
                            if px >= 0 && px < width && py >= 0 && py < height {
                                canvas.put_pixel(px as u32, py as u32, color);
                            }
                        }
                    }
                }
            }
        }
        pen_x += GLYPH_ADVANCE as i32 * BUILTIN_SCALE;
    }
}

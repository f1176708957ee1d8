//! Draws detection overlays: one hollow rectangle per bounding box plus a
//! `category: score` label, on a copy of the source image.

use std::sync::LazyLock;

use ab_glyph::{FontRef, PxScale};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::models::Detection;

static FONT: LazyLock<FontRef<'static>> = LazyLock::new(|| {
    FontRef::try_from_slice(include_bytes!("../assets/DejaVuSans.ttf"))
        .expect("embedded font is valid")
});

const LABEL_HEIGHT: f32 = 16.0;

/// Fixed palette cycled by category; distinct enough side by side.
const PALETTE: [Rgb<u8>; 8] = [
    Rgb([230, 57, 70]),   // red
    Rgb([46, 204, 113]),  // green
    Rgb([52, 152, 219]),  // blue
    Rgb([241, 196, 15]),  // yellow
    Rgb([155, 89, 182]),  // purple
    Rgb([230, 126, 34]),  // orange
    Rgb([26, 188, 156]),  // teal
    Rgb([233, 30, 99]),   // pink
];

/// Deterministic color per category: an FNV-1a fold of the label bytes
/// indexes the palette, so the same category renders the same color in
/// every pane and on every call.
pub fn category_color(category: &str) -> Rgb<u8> {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in category.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}

/// Renders detections onto a copy of `image`; the input is never mutated,
/// so the same decoded image can feed two independent overlays.
///
/// Boxes are clamped to the image bounds before drawing (the backend's
/// coordinates are taken on trust); boxes that clamp to zero size are
/// skipped. Pure function of its inputs: identical inputs yield
/// pixel-identical output.
pub fn draw_detections(image: &DynamicImage, detections: &[Detection]) -> RgbImage {
    let mut canvas = image.to_rgb8();
    let (img_w, img_h) = (canvas.width(), canvas.height());
    let scale = PxScale::from(LABEL_HEIGHT);

    for det in detections {
        let (x, y, w, h) = det.bounding_box.clamped_xywh(img_w, img_h);
        if w == 0 || h == 0 {
            continue;
        }
        let color = category_color(&det.category);
        draw_hollow_rect_mut(&mut canvas, Rect::at(x, y).of_size(w, h), color);

        // Label above the box when it fits, else inside the top edge.
        let label_y = if y >= LABEL_HEIGHT as i32 {
            y - LABEL_HEIGHT as i32
        } else {
            y + 1
        };
        draw_text_mut(&mut canvas, color, x, label_y, scale, &*FONT, &det.label());
    }
    canvas
}

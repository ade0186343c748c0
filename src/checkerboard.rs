//! Paint helpers: the checkerboard shown behind translucent colors, slider
//! thumbs, and the conversion from [`crate::Color`] to a paint color.

use floem::context::PaintCx;
use floem::kurbo::{Circle, Point, Rect, Stroke};
use floem::peniko::Color;
use floem_renderer::Renderer;

use crate::constants;

const LIGHT: Color = Color::rgb8(255, 255, 255);
const DARK: Color = Color::rgb8(204, 204, 204);

/// Paint color for `rgb` with optional alpha (`None` is opaque).
pub(crate) fn paint_color(rgb: [u8; 3], alpha: Option<f64>) -> Color {
    let a = alpha.map_or(255, |a| (a.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color::rgba8(rgb[0], rgb[1], rgb[2], a)
}

pub(crate) fn swatch_color(color: &crate::Color) -> Color {
    paint_color(color.rgb(), color.alpha())
}

/// Paint a checkerboard into `rect`, one row of dark cells at a time.
#[cfg_attr(not(feature = "alpha"), allow(dead_code))]
pub(crate) fn paint_checkerboard(cx: &mut PaintCx, rect: Rect) {
    let cell = constants::CHECKER_CELL;
    cx.fill(&rect, LIGHT, 0.0);
    let mut y = rect.y0;
    let mut odd_row = false;
    while y < rect.y1 {
        let y1 = (y + cell).min(rect.y1);
        let mut x = rect.x0 + if odd_row { 0.0 } else { cell };
        while x < rect.x1 {
            cx.fill(&Rect::new(x, y, (x + cell).min(rect.x1), y1), DARK, 0.0);
            x += 2.0 * cell;
        }
        odd_row = !odd_row;
        y = y1;
    }
}

/// Slider thumb: a white ring between two faint dark rings.
pub(crate) fn paint_thumb(cx: &mut PaintCx, center: Point) {
    let radius = constants::THUMB_RADIUS;
    let shadow = Color::rgba8(0, 0, 0, 80);
    cx.stroke(&Circle::new(center, radius), shadow, &Stroke::new(1.0));
    cx.stroke(&Circle::new(center, radius - 1.5), Color::WHITE, &Stroke::new(2.0));
    cx.stroke(&Circle::new(center, radius - 3.0), shadow, &Stroke::new(1.0));
}

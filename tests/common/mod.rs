//! Shared helpers for the ColorBox integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use floem_colorbox::{Color, ColorBox, ColorBoxConfig, GeometryFrame, Palette};

/// Gradient surface as measured inside a 352px wide ColorBox.
pub const GRADIENT: GeometryFrame = GeometryFrame {
    left: 22.0,
    top: 90.0,
    width: 308.0,
    height: 116.0,
};

/// Hue slider track, one pixel per degree.
pub const HUE_TRACK: GeometryFrame = GeometryFrame {
    left: 0.0,
    top: 0.0,
    width: 360.0,
    height: 12.0,
};

/// Alpha slider track, same width as the hue track.
pub const ALPHA_TRACK: GeometryFrame = GeometryFrame {
    left: 0.0,
    top: 20.0,
    width: 360.0,
    height: 12.0,
};

pub fn primaries() -> Palette {
    Palette::new()
        .with("red", "#ff0000")
        .with("blue", "#0000ff")
        .with("yellow", "yellow")
}

/// A ColorBox whose `on_change` calls are recorded.
pub fn recorded(config: ColorBoxConfig) -> (ColorBox, Rc<RefCell<Vec<Color>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let cb = ColorBox::new(config).on_change(move |c| sink.borrow_mut().push(c.clone()));
    (cb, calls)
}

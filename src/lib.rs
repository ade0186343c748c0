//! # floem-colorbox
//!
//! A ColorBox widget for [Floem](https://github.com/lapce/floem): a
//! saturation/value gradient, hue slider, optional alpha slider, HEX/R/G/B
//! inputs and a row of named palette swatches.
//!
//! The widget logic lives in plain types that do not need a window:
//! [`Color`] parses and formats every supported notation, [`ColorBoxState`]
//! decides when edits are emitted, and [`ColorBox`] wires the state to an
//! `on_change` callback.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_colorbox::{color_box, ColorBoxConfig, Palette};
//!
//! let config = ColorBoxConfig::uncontrolled("#830A0A7D")
//!     .with_palette(Palette::new().with("red", "#ff0000").with("blue", "#0000ff"));
//! let (_handle, view) = color_box(config, |color| println!("{}", color.hex()));
//! // Use `view` in your Floem view tree.
//! ```

mod color;
mod config;
mod error;
mod geometry;
mod gesture;
mod keywords;
mod math;
mod palette;
mod state;

#[cfg(feature = "alpha")]
mod alpha_slider;
mod checkerboard;
mod color_box;
mod constants;
mod gradient;
mod hue_slider;
mod inputs;
mod palette_view;

pub use color::{Color, ColorChange, ColorFormat, ColorInput, Css};
pub use color_box::{color_box, ColorBoxHandle};
pub use config::ColorBoxConfig;
pub use error::ColorError;
pub use geometry::{
    alpha_from_unit, hue_from_unit, pixel_to_unit_1d, pixel_to_unit_2d,
    saturation_value_from_unit, thumb_percent, unit_from_alpha, unit_from_hue,
    unit_from_saturation_value, unit_to_pixel_1d, unit_to_pixel_2d, Axis, GeometryFrame,
};
pub use gesture::{
    Coordinate, GestureController, GestureOutcome, GestureState, PointerEvent, Surface,
    PRIMARY_BUTTON,
};
pub use math::{hsl_to_rgb, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv};
pub use palette::Palette;
pub use state::{ColorBox, ColorBoxState, CommitMode, TextField, ValueMode};

//! Sizes and colors shared by the ColorBox views.

use floem::peniko::Color;

/// Saturation/value gradient height
pub const GRADIENT_HEIGHT: f32 = 116.0;

/// Hue and alpha track height
pub const SLIDER_HEIGHT: f32 = 12.0;

/// Gradient cursor radius
pub const CURSOR_RADIUS: f64 = 6.0;

/// Slider thumbs are inset by their radius so both ends stay reachable
pub const THUMB_RADIUS: f64 = 6.0;

/// Corner radius of the gradient, inputs, swatches and buttons
pub const RADIUS: f32 = 3.0;

/// Space between rows and between inputs
pub const GAP: f32 = 6.0;

/// Panel padding
pub const PADDING: f32 = 8.0;

/// Width of the R, G and B inputs
pub const CHANNEL_INPUT_WIDTH: f32 = 34.0;

/// Width of the HEX input
pub const HEX_INPUT_WIDTH: f32 = 72.0;

/// Input text size
pub const INPUT_FONT: f32 = 11.0;

/// Size of the labels under the inputs
pub const LABEL_FONT: f32 = 10.0;

/// Palette swatch edge
pub const SWATCH_SIZE: f32 = 18.0;

/// Edge of the current-color preview square
pub const PREVIEW_SIZE: f32 = 28.0;

/// Checkerboard cell size behind translucent colors
pub const CHECKER_CELL: f64 = 4.0;

/// Panel fill
pub const PANEL_BACKGROUND: Color = Color::rgb8(242, 242, 242);

/// Default border of inputs, swatches and the preview
pub const BORDER: Color = Color::rgb8(200, 200, 200);

/// Border of an input holding text that does not parse
pub const INVALID_BORDER: Color = Color::rgb8(220, 38, 38);

/// Secondary text and disabled labels
pub const MUTED_TEXT: Color = Color::rgb8(120, 120, 120);

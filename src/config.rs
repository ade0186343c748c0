//! Construction-time options for a ColorBox.

use serde::{Deserialize, Serialize};

use crate::color::ColorInput;
use crate::error::ColorError;
use crate::palette::Palette;
use crate::state::ValueMode;

/// Options for [`color_box`](crate::color_box) and [`ColorBoxState`](crate::ColorBoxState).
///
/// Loadable from `{ "value" | "defaultValue", "palette", "deferred" }`:
///
/// ```
/// use floem_colorbox::ColorBoxConfig;
///
/// let config: ColorBoxConfig = serde_json::from_str(
///     r##"{ "defaultValue": "#830A0A7D", "palette": { "red": "#ff0000" } }"##,
/// ).unwrap();
/// assert!(!config.deferred);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig", into = "RawConfig")]
pub struct ColorBoxConfig {
    pub source: ValueMode,
    pub palette: Palette,
    /// Buffer edits until the "Set" button is pressed.
    pub deferred: bool,
}

impl ColorBoxConfig {
    /// The embedding application owns the value.
    pub fn controlled(value: impl Into<ColorInput>) -> Self {
        Self {
            source: ValueMode::Controlled(value.into()),
            ..Self::default()
        }
    }

    /// The ColorBox owns the value, starting from `default`.
    pub fn uncontrolled(default: impl Into<ColorInput>) -> Self {
        Self {
            source: ValueMode::Uncontrolled {
                default: Some(default.into()),
            },
            ..Self::default()
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn deferred(mut self, deferred: bool) -> Self {
        self.deferred = deferred;
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<ColorInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<ColorInput>,
    palette: Palette,
    deferred: bool,
}

impl TryFrom<RawConfig> for ColorBoxConfig {
    type Error = ColorError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let source = match (raw.value, raw.default_value) {
            (Some(_), Some(_)) => return Err(ColorError::ConflictingValueSource),
            (Some(value), None) => ValueMode::Controlled(value),
            (None, default) => ValueMode::Uncontrolled { default },
        };
        Ok(Self {
            source,
            palette: raw.palette,
            deferred: raw.deferred,
        })
    }
}

impl From<ColorBoxConfig> for RawConfig {
    fn from(config: ColorBoxConfig) -> Self {
        let (value, default_value) = match config.source {
            ValueMode::Controlled(value) => (Some(value), None),
            ValueMode::Uncontrolled { default } => (None, default),
        };
        Self {
            value,
            default_value,
            palette: config.palette,
            deferred: config.deferred,
        }
    }
}

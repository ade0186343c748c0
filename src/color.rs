//! Color: the canonical color record exchanged by the ColorBox.
//!
//! A [`Color`] is built once from any supported notation and never mutated:
//! every edit goes through [`Color::update`] and yields a new record whose
//! fields (hex, packed value, RGB, HSV, HSL, CSS descriptor, name) are all
//! recomputed from the edited channel.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::keywords;
use crate::math;

/// The notation a color was originally supplied in.
///
/// Decides how the color echoes itself back (see [`Color::format`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#RRGGBB`, `#RGB`, `#RRGGBBAA`, `#RGBA`, with or without `#`.
    Hex,
    /// `rgb()`/`rgba()` strings, RGB arrays and objects.
    Rgb,
    /// `hsv()`/`hsva()` strings and HSV objects.
    Hsv,
    /// `hsl()`/`hsla()` strings and HSL objects.
    Hsl,
    /// A CSS color keyword such as `darkblue`.
    Plain,
    /// A packed integer (`0xRRGGBB` or `0xRRGGBBAA`).
    Integer,
}

/// Style descriptor ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Css {
    pub background_color: String,
}

/// Anything the ColorBox accepts as a color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    /// Hex, CSS keyword, CSS function, or palette key.
    Text(String),
    /// Packed integer; values above `0xFFFFFF` are read as `0xRRGGBBAA`.
    Integer(u32),
    /// `[r, g, b]` or `[r, g, b, a]` with channels in 0–255 and alpha in 0–1.
    Channels(Vec<f64>),
    /// An already-built color, re-normalized on parse.
    Color(Box<Color>),
    Hsv {
        hsv: [f64; 3],
        #[serde(default)]
        alpha: Option<f64>,
    },
    Hsl {
        hsl: [f64; 3],
        #[serde(default)]
        alpha: Option<f64>,
    },
    Rgb {
        rgb: [u8; 3],
        #[serde(default)]
        alpha: Option<f64>,
    },
}

impl From<&str> for ColorInput {
    fn from(s: &str) -> Self {
        ColorInput::Text(s.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(s: String) -> Self {
        ColorInput::Text(s)
    }
}

impl From<u32> for ColorInput {
    fn from(v: u32) -> Self {
        ColorInput::Integer(v)
    }
}

impl From<[u8; 3]> for ColorInput {
    fn from(rgb: [u8; 3]) -> Self {
        ColorInput::Rgb { rgb, alpha: None }
    }
}

impl From<[u8; 4]> for ColorInput {
    fn from(rgba: [u8; 4]) -> Self {
        ColorInput::Rgb {
            rgb: [rgba[0], rgba[1], rgba[2]],
            alpha: Some(rgba[3] as f64 / 255.0),
        }
    }
}

impl From<Color> for ColorInput {
    fn from(c: Color) -> Self {
        ColorInput::Color(Box::new(c))
    }
}

/// A change to exactly one axis of a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorChange {
    /// Hue in degrees (0–359).
    Hue(u16),
    /// HSV saturation in percent.
    Saturation(u16),
    /// HSV value in percent.
    Value(u16),
    /// Both gradient axes at once: HSV saturation and value in percent.
    SaturationValue(u16, u16),
    /// HSL lightness in percent.
    Lightness(u16),
    Red(u8),
    Green(u8),
    Blue(u8),
    /// `None` drops the alpha channel; `Some(0.0)` is fully transparent.
    Alpha(Option<f64>),
}

/// The canonical color record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    raw: ColorInput,
    name: Option<String>,
    css: Css,
    value: u32,
    format: ColorFormat,
    hex: String,
    alpha: Option<f64>,
    rgb: [u8; 3],
    hsv: [u16; 3],
    hsl: [u16; 3],
}

impl Default for Color {
    fn default() -> Self {
        Self::build(
            [128, 128, 128],
            None,
            None,
            ColorInput::Text("#808080".to_string()),
            ColorFormat::Hex,
        )
    }
}

impl Color {
    /// The representation the caller supplied (or the edited color rendered
    /// in [`Color::notation`] after an edit).
    pub fn raw(&self) -> &ColorInput {
        &self.raw
    }
    /// Palette key or CSS keyword naming this color, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn css(&self) -> &Css {
        &self.css
    }
    /// Packed `0xRRGGBB`, or `0xRRGGBBAA` when alpha is present.
    pub fn value(&self) -> u32 {
        self.value
    }
    /// The notation the color was supplied in.
    pub fn notation(&self) -> ColorFormat {
        self.format
    }
    /// Uppercase hex digits without `#` (6, or 8 with alpha).
    pub fn hex(&self) -> &str {
        &self.hex
    }
    /// Alpha in 0.0–1.0, or `None` when the source carried no alpha channel.
    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }
    /// `[hue, saturation%, value%]`.
    pub fn hsv(&self) -> [u16; 3] {
        self.hsv
    }
    /// `[hue, saturation%, lightness%]`.
    pub fn hsl(&self) -> [u16; 3] {
        self.hsl
    }

    /// True when both colors paint the same pixels (same RGB and alpha).
    pub fn same_color(&self, other: &Color) -> bool {
        self.rgb == other.rgb && self.alpha == other.alpha
    }

    /// RGB of this color's hue at full saturation and value.
    pub fn hue_rgb(&self) -> [u8; 3] {
        math::hsv_to_rgb([self.hsv[0], 100, 100])
    }

    pub(crate) fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub(crate) fn with_raw(mut self, raw: ColorInput) -> Self {
        self.raw = raw;
        self
    }

    fn build(
        rgb: [u8; 3],
        alpha: Option<f64>,
        hsv: Option<[u16; 3]>,
        raw: ColorInput,
        format: ColorFormat,
    ) -> Self {
        let alpha = alpha.map(|a| a.clamp(0.0, 1.0));
        let packed = (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32;
        let (hex, value) = match alpha {
            Some(a) => {
                let a8 = math::channel_to_u8(a);
                (
                    format!("{:02X}{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2], a8),
                    packed << 8 | a8 as u32,
                )
            }
            None => (format!("{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]), packed),
        };
        let opaque = alpha.map_or(true, |a| a == 1.0);
        let name = if opaque {
            keywords::name_of(rgb).map(str::to_string)
        } else {
            None
        };
        let background_color = match (alpha, format, name.as_deref()) {
            (None, ColorFormat::Plain, Some(keyword)) => keyword.to_string(),
            (None, _, _) => format!("#{hex}"),
            (Some(a), _, _) => {
                format!("rgba({}, {}, {}, {})", rgb[0], rgb[1], rgb[2], format_alpha(a))
            }
        };
        Self {
            raw,
            name,
            css: Css { background_color },
            value,
            format,
            hex,
            alpha,
            rgb,
            hsv: hsv.unwrap_or_else(|| math::rgb_to_hsv(rgb)),
            hsl: math::rgb_to_hsl(rgb),
        }
    }

    /// Create from 0–255 RGB values. `alpha` stays `None` for opaque-by-omission.
    pub fn from_rgb(rgb: [u8; 3], alpha: Option<f64>) -> Self {
        Self::build(rgb, alpha, None, ColorInput::Rgb { rgb, alpha }, ColorFormat::Rgb)
    }

    /// Create from `[hue, saturation%, value%]`.
    ///
    /// The HSV triple is kept as given so the hue of a gray is not lost.
    pub fn from_hsv(hsv: [u16; 3], alpha: Option<f64>) -> Self {
        let hsv = clamp_hsx(hsv);
        let raw = ColorInput::Hsv {
            hsv: [hsv[0] as f64, hsv[1] as f64, hsv[2] as f64],
            alpha,
        };
        Self::build(math::hsv_to_rgb(hsv), alpha, Some(hsv), raw, ColorFormat::Hsv)
    }

    /// Create from `[hue, saturation%, lightness%]`.
    pub fn from_hsl(hsl: [u16; 3], alpha: Option<f64>) -> Self {
        let hsl = clamp_hsx(hsl);
        let raw = ColorInput::Hsl {
            hsl: [hsl[0] as f64, hsl[1] as f64, hsl[2] as f64],
            alpha,
        };
        Self::build(math::hsl_to_rgb(hsl), alpha, None, raw, ColorFormat::Hsl)
    }

    /// Parse a hex string (with or without `#`; 3, 4, 6 or 8 digits).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = math::normalize_hex(hex)
            .ok_or_else(|| ColorError::InvalidColorFormat(hex.to_string()))?;
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let parsed = (|| -> Result<([u8; 3], Option<f64>), std::num::ParseIntError> {
            let rgb = [byte(0)?, byte(2)?, byte(4)?];
            let alpha = if digits.len() == 8 {
                Some(byte(6)? as f64 / 255.0)
            } else {
                None
            };
            Ok((rgb, alpha))
        })();
        let (rgb, alpha) = parsed.map_err(|_| ColorError::InvalidColorFormat(hex.to_string()))?;
        Ok(Self::build(
            rgb,
            alpha,
            None,
            ColorInput::Text(hex.to_string()),
            ColorFormat::Hex,
        ))
    }

    /// Parse any supported notation. Palette keys are resolved by
    /// [`Palette::parse`](crate::Palette::parse).
    pub fn parse(input: impl Into<ColorInput>) -> Result<Self, ColorError> {
        let input = input.into();
        match &input {
            ColorInput::Text(s) => parse_text(s),
            ColorInput::Integer(v) => Ok(from_integer(*v)),
            ColorInput::Channels(channels) => from_channels(channels),
            ColorInput::Color(c) => renormalize(c.as_ref().clone()),
            ColorInput::Rgb { rgb, alpha } => {
                let alpha = checked_alpha(*alpha, "rgb")?;
                Ok(Self::from_rgb(*rgb, alpha))
            }
            ColorInput::Hsv { hsv, alpha } => {
                let alpha = checked_alpha(*alpha, "hsv")?;
                let hsv = checked_hsx(*hsv, "hsv")?;
                Ok(Self::from_hsv(hsv, alpha).with_raw(input.clone()))
            }
            ColorInput::Hsl { hsl, alpha } => {
                let alpha = checked_alpha(*alpha, "hsl")?;
                let hsl = checked_hsx(*hsl, "hsl")?;
                Ok(Self::from_hsl(hsl, alpha).with_raw(input.clone()))
            }
        }
    }

    /// Render into the requested notation.
    ///
    /// Hex digits keep the caller's letter case only when `notation` is the
    /// color's own notation and the color has not been edited since parsing.
    pub fn format(&self, notation: ColorFormat) -> String {
        let [r, g, b] = self.rgb;
        match notation {
            ColorFormat::Hex => {
                if self.format == ColorFormat::Hex {
                    if let ColorInput::Text(raw) = &self.raw {
                        let digits = raw.trim().trim_start_matches('#');
                        if (digits.len() == 6 || digits.len() == 8)
                            && digits.eq_ignore_ascii_case(&self.hex)
                        {
                            return format!("#{digits}");
                        }
                    }
                }
                format!("#{}", self.hex)
            }
            ColorFormat::Rgb => match self.alpha {
                Some(a) => format!("rgba({r}, {g}, {b}, {})", format_alpha(a)),
                None => format!("rgb({r}, {g}, {b})"),
            },
            ColorFormat::Hsv => {
                let [h, s, v] = self.hsv;
                match self.alpha {
                    Some(a) => format!("hsva({h}, {s}%, {v}%, {})", format_alpha(a)),
                    None => format!("hsv({h}, {s}%, {v}%)"),
                }
            }
            ColorFormat::Hsl => {
                let [h, s, l] = self.hsl;
                match self.alpha {
                    Some(a) => format!("hsla({h}, {s}%, {l}%, {})", format_alpha(a)),
                    None => format!("hsl({h}, {s}%, {l}%)"),
                }
            }
            ColorFormat::Plain => {
                if self.alpha.is_none() {
                    if let ColorInput::Text(raw) = &self.raw {
                        if self.format == ColorFormat::Plain
                            && keywords::rgb_of(raw.trim()) == Some(self.rgb)
                        {
                            return raw.trim().to_string();
                        }
                    }
                    if let Some(keyword) = keywords::name_of(self.rgb) {
                        return keyword.to_string();
                    }
                }
                format!("#{}", self.hex)
            }
            ColorFormat::Integer => self.value.to_string(),
        }
    }

    /// Apply a change to one axis and recompute every dependent field.
    ///
    /// A change that leaves the axis at its current value returns an identical
    /// clone.
    pub fn update(&self, change: ColorChange) -> Color {
        let [h, s, v] = self.hsv;
        let [r, g, b] = self.rgb;
        match change {
            ColorChange::Hue(hue) => {
                let hue = hue % 360;
                if hue == h {
                    return self.clone();
                }
                self.rebuild(None, self.alpha, Some([hue, s, v]))
            }
            ColorChange::Saturation(sat) => self.update(ColorChange::SaturationValue(sat, v)),
            ColorChange::Value(val) => self.update(ColorChange::SaturationValue(s, val)),
            ColorChange::SaturationValue(sat, val) => {
                let (sat, val) = (sat.min(100), val.min(100));
                if sat == s && val == v {
                    return self.clone();
                }
                self.rebuild(None, self.alpha, Some([h, sat, val]))
            }
            ColorChange::Lightness(light) => {
                let [hh, ss, ll] = self.hsl;
                let light = light.min(100);
                if light == ll {
                    return self.clone();
                }
                let rgb = math::hsl_to_rgb([hh, ss, light]);
                self.rebuild(Some(rgb), self.alpha, None)
            }
            ColorChange::Red(red) if red != r => self.rebuild(Some([red, g, b]), self.alpha, None),
            ColorChange::Green(green) if green != g => {
                self.rebuild(Some([r, green, b]), self.alpha, None)
            }
            ColorChange::Blue(blue) if blue != b => {
                self.rebuild(Some([r, g, blue]), self.alpha, None)
            }
            ColorChange::Red(_) | ColorChange::Green(_) | ColorChange::Blue(_) => self.clone(),
            ColorChange::Alpha(alpha) => {
                let alpha = alpha.map(|a| if a.is_nan() { 1.0 } else { a.clamp(0.0, 1.0) });
                if alpha == self.alpha {
                    return self.clone();
                }
                self.rebuild(Some(self.rgb), alpha, Some(self.hsv))
            }
        }
    }

    /// Rebuild after an edit. `rgb: None` derives RGB from `hsv`.
    fn rebuild(&self, rgb: Option<[u8; 3]>, alpha: Option<f64>, hsv: Option<[u16; 3]>) -> Color {
        let rgb = match (rgb, hsv) {
            (Some(rgb), _) => rgb,
            (None, Some(hsv)) => math::hsv_to_rgb(hsv),
            (None, None) => self.rgb,
        };
        let mut format = self.format;
        if format == ColorFormat::Plain
            && (alpha.is_some() || keywords::name_of(rgb).is_none())
        {
            format = ColorFormat::Hex;
        }
        let placeholder = ColorInput::Text(String::new());
        let edited = Self::build(rgb, alpha, hsv, placeholder, format);
        let raw = match format {
            ColorFormat::Integer => ColorInput::Integer(edited.value),
            _ => ColorInput::Text(edited.format(format)),
        };
        edited.with_raw(raw)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(self.format))
    }
}

/// Alpha rendered with at most two decimals (`0.49`, `1`, `0`).
fn format_alpha(a: f64) -> String {
    let rounded = (a * 100.0).round() / 100.0;
    format!("{rounded}")
}

fn clamp_hsx(hsx: [u16; 3]) -> [u16; 3] {
    [hsx[0] % 360, hsx[1].min(100), hsx[2].min(100)]
}

fn checked_alpha(alpha: Option<f64>, what: &str) -> Result<Option<f64>, ColorError> {
    match alpha {
        Some(a) if !(0.0..=1.0).contains(&a) => Err(ColorError::InvalidColorFormat(format!(
            "{what} alpha {a} outside 0..=1"
        ))),
        other => Ok(other),
    }
}

fn checked_hsx(hsx: [f64; 3], what: &str) -> Result<[u16; 3], ColorError> {
    let [h, a, b] = hsx;
    if !h.is_finite() || !(0.0..=100.0).contains(&a) || !(0.0..=100.0).contains(&b) {
        return Err(ColorError::InvalidColorFormat(format!(
            "{what} components out of range: {hsx:?}"
        )));
    }
    Ok([math::round_hue(h), a.round() as u16, b.round() as u16])
}

fn from_integer(v: u32) -> Color {
    let (rgb, alpha) = if v > 0xFF_FFFF {
        let [r, g, b, a] = v.to_be_bytes();
        ([r, g, b], Some(a as f64 / 255.0))
    } else {
        let [_, r, g, b] = v.to_be_bytes();
        ([r, g, b], None)
    };
    Color::build(rgb, alpha, None, ColorInput::Integer(v), ColorFormat::Integer)
}

fn from_channels(channels: &[f64]) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidColorFormat(format!("rgb channels {channels:?}"));
    if channels.len() != 3 && channels.len() != 4 {
        return Err(invalid());
    }
    let mut rgb = [0u8; 3];
    for (slot, c) in rgb.iter_mut().zip(channels) {
        if !(0.0..=255.0).contains(c) {
            return Err(invalid());
        }
        *slot = c.round() as u8;
    }
    let alpha = checked_alpha(channels.get(3).copied(), "rgb")?;
    Ok(Color::build(
        rgb,
        alpha,
        None,
        ColorInput::Channels(channels.to_vec()),
        ColorFormat::Rgb,
    ))
}

fn renormalize(c: Color) -> Result<Color, ColorError> {
    let fresh = Color::from_hex(&c.hex)?;
    let name = c.name.clone().or_else(|| fresh.name.clone());
    let mut out = Color::build(fresh.rgb, fresh.alpha, None, c.raw, c.format);
    out.name = name;
    Ok(out)
}

fn parse_text(text: &str) -> Result<Color, ColorError> {
    let s = text.trim();
    let invalid = || ColorError::InvalidColorFormat(text.to_string());
    if s.is_empty() {
        return Err(invalid());
    }
    if s.starts_with('#') {
        return Color::from_hex(s).map(|c| c.with_raw(ColorInput::Text(text.to_string())));
    }
    if let Some(open) = s.find('(') {
        let args = s[open + 1..].strip_suffix(')').ok_or_else(invalid)?;
        let func = s[..open].trim().to_ascii_lowercase();
        let color = parse_function(&func, args).map_err(|_| invalid())?;
        return Ok(color.with_raw(ColorInput::Text(text.to_string())));
    }
    if let Some(rgb) = keywords::rgb_of(s) {
        return Ok(Color::build(
            rgb,
            None,
            None,
            ColorInput::Text(text.to_string()),
            ColorFormat::Plain,
        ));
    }
    Color::from_hex(s).map_err(|_| invalid())
}

/// One numeric argument of a CSS color function.
struct Arg {
    value: f64,
    percent: bool,
}

fn parse_args(args: &str) -> Option<Vec<Arg>> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            let (t, percent) = match t.strip_suffix('%') {
                Some(rest) => (rest, true),
                None => (t.strip_suffix("deg").unwrap_or(t), false),
            };
            let value = t.parse::<f64>().ok().filter(|v| v.is_finite())?;
            Some(Arg { value, percent })
        })
        .collect()
}

fn alpha_arg(arg: Option<&Arg>) -> Result<Option<f64>, ()> {
    match arg {
        None => Ok(None),
        Some(a) => {
            let v = if a.percent { a.value / 100.0 } else { a.value };
            if (0.0..=1.0).contains(&v) {
                Ok(Some(v))
            } else {
                Err(())
            }
        }
    }
}

fn parse_function(func: &str, args: &str) -> Result<Color, ()> {
    let args = parse_args(args).ok_or(())?;
    if args.len() != 3 && args.len() != 4 {
        return Err(());
    }
    let alpha = alpha_arg(args.get(3))?;
    match func {
        "rgb" | "rgba" => {
            let mut rgb = [0u8; 3];
            for (slot, a) in rgb.iter_mut().zip(&args) {
                let v = if a.percent { a.value * 2.55 } else { a.value };
                if !(0.0..=255.0).contains(&v) {
                    return Err(());
                }
                *slot = v.round() as u8;
            }
            Ok(Color::from_rgb(rgb, alpha))
        }
        "hsv" | "hsva" | "hsl" | "hsla" => {
            let hsx = [args[0].value, args[1].value, args[2].value];
            let hsx = checked_hsx(hsx, func).map_err(|_| ())?;
            if func.starts_with("hsv") {
                Ok(Color::from_hsv(hsx, alpha))
            } else {
                Ok(Color::from_hsl(hsx, alpha))
            }
        }
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgba_hex_with_alpha() {
        let c = Color::parse("#830A0A7D").unwrap();
        assert_eq!(c.rgb(), [131, 10, 10]);
        assert_eq!(c.hex(), "830A0A7D");
        let alpha = c.alpha().unwrap();
        assert!((alpha - 0.49).abs() < 0.005, "alpha = {alpha}");
        assert_eq!(c.notation(), ColorFormat::Hex);
        assert_eq!(c.value(), 0x830A0A7D);
        assert_eq!(c.name(), None);
    }

    #[test]
    fn hex_without_alpha_leaves_alpha_undefined() {
        let c = Color::parse("#830A0A").unwrap();
        assert_eq!(c.alpha(), None);
        assert_eq!(c.hex(), "830A0A");
        assert_eq!(c.value(), 0x830A0A);
        assert_eq!(c.css().background_color, "#830A0A");
    }

    #[test]
    fn explicit_full_opacity_is_kept() {
        let c = Color::parse("#FF0000FF").unwrap();
        assert_eq!(c.alpha(), Some(1.0));
        assert_eq!(c.hex(), "FF0000FF");
        assert_eq!(c.name(), Some("red"));
    }

    #[test]
    fn shorthand_hex_expands() {
        let c = Color::parse("F0A").unwrap();
        assert_eq!(c.hex(), "FF00AA");
        let c = Color::parse("#F0A8").unwrap();
        assert_eq!(c.hex(), "FF00AA88");
        assert_eq!(c.rgb(), [255, 0, 170]);
    }

    #[test]
    fn rejects_bad_hex_lengths() {
        for bad in ["#12345", "#1234567", "#12", "", "   ", "#GGG"] {
            assert!(
                matches!(Color::parse(bad), Err(ColorError::InvalidColorFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn parses_keywords_case_insensitively() {
        let c = Color::parse("darkBlue").unwrap();
        assert_eq!(c.rgb(), [0, 0, 139]);
        assert_eq!(c.notation(), ColorFormat::Plain);
        assert_eq!(c.name(), Some("darkblue"));
        assert_eq!(c.css().background_color, "darkblue");
        assert_eq!(c.raw(), &ColorInput::Text("darkBlue".into()));
    }

    #[test]
    fn red_keyword_matches_expected_payload() {
        let c = Color::parse("red").unwrap();
        assert_eq!(c.value(), 16711680);
        assert_eq!(c.hex(), "FF0000");
        assert_eq!(c.alpha(), None);
        assert_eq!(c.rgb(), [255, 0, 0]);
        assert_eq!(c.hsv(), [0, 100, 100]);
        assert_eq!(c.hsl(), [0, 100, 50]);
        assert_eq!(c.css().background_color, "red");
    }

    #[test]
    fn parses_css_functions() {
        let c = Color::parse("rgb(255, 0, 81)").unwrap();
        assert_eq!(c.rgb(), [255, 0, 81]);
        assert_eq!(c.notation(), ColorFormat::Rgb);

        let c = Color::parse("rgba(10, 20, 30, 0.5)").unwrap();
        assert_eq!(c.alpha(), Some(0.5));

        let c = Color::parse("hsl(120 100% 25%)").unwrap();
        assert_eq!(c.rgb(), [0, 128, 0]);
        assert_eq!(c.notation(), ColorFormat::Hsl);

        let c = Color::parse("hsv(0, 0%, 100%)").unwrap();
        assert_eq!(c.rgb(), [255, 255, 255]);
        assert_eq!(c.name(), Some("white"));

        assert!(Color::parse("rgb(256, 0, 0)").is_err());
        assert!(Color::parse("rgb(1, 2)").is_err());
        assert!(Color::parse("lab(50 0 0)").is_err());
        assert!(Color::parse("rgb(1, 2, 3").is_err());
    }

    #[test]
    fn parses_structured_inputs() {
        let c = Color::parse([0u8, 0, 255]).unwrap();
        assert_eq!(c.name(), Some("blue"));
        assert_eq!(c.notation(), ColorFormat::Rgb);

        let c = Color::parse(ColorInput::Channels(vec![255.0, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(c.alpha(), Some(0.0));
        assert_eq!(c.hex(), "FF000000");

        let c = Color::parse(ColorInput::Hsv {
            hsv: [240.0, 100.0, 100.0],
            alpha: None,
        })
        .unwrap();
        assert_eq!(c.rgb(), [0, 0, 255]);

        assert!(Color::parse(ColorInput::Channels(vec![1.0, 2.0])).is_err());
        assert!(Color::parse(ColorInput::Rgb {
            rgb: [0, 0, 0],
            alpha: Some(1.5)
        })
        .is_err());
    }

    #[test]
    fn parses_integers() {
        let c = Color::parse(0xFF0000u32).unwrap();
        assert_eq!(c.rgb(), [255, 0, 0]);
        assert_eq!(c.alpha(), None);
        assert_eq!(c.notation(), ColorFormat::Integer);
        assert_eq!(c.format(ColorFormat::Integer), "16711680");

        let c = Color::parse(0x830A0A7Du32).unwrap();
        assert_eq!(c.hex(), "830A0A7D");
    }

    #[test]
    fn renormalizes_inconsistent_color_records() {
        let red = Color::parse("red").unwrap();
        let mut tampered = red.clone();
        tampered.hsl = [0, 100, 51];
        let c = Color::parse(tampered).unwrap();
        assert_eq!(c.hsl(), [0, 100, 50]);
        assert_eq!(c.name(), Some("red"));
        assert_eq!(c.raw(), &ColorInput::Text("red".into()));
    }

    #[test]
    fn format_preserves_hex_case_until_edited() {
        let c = Color::parse("#ff00aa").unwrap();
        assert_eq!(c.format(ColorFormat::Hex), "#ff00aa");
        assert_eq!(c.to_string(), "#ff00aa");
        let edited = c.update(ColorChange::Red(0));
        assert_eq!(edited.format(ColorFormat::Hex), "#0000AA");
    }

    #[test]
    fn format_renders_each_notation() {
        let c = Color::parse("#830A0A7D").unwrap();
        assert_eq!(c.format(ColorFormat::Rgb), "rgba(131, 10, 10, 0.49)");
        assert_eq!(c.format(ColorFormat::Hsv), "hsva(0, 92%, 51%, 0.49)");
        assert_eq!(c.format(ColorFormat::Plain), "#830A0A7D");
        let c = Color::parse("darkBlue").unwrap();
        assert_eq!(c.format(ColorFormat::Plain), "darkBlue");
        assert_eq!(c.format(ColorFormat::Hsl), "hsl(240, 100%, 27%)");
        assert_eq!(c.format(ColorFormat::Hex), "#00008B");
    }

    #[test]
    fn update_recomputes_dependent_fields() {
        let c = Color::parse("#FF0000").unwrap();
        let blue = c.update(ColorChange::Hue(240));
        assert_eq!(blue.rgb(), [0, 0, 255]);
        assert_eq!(blue.hex(), "0000FF");
        assert_eq!(blue.name(), Some("blue"));
        assert_eq!(blue.raw(), &ColorInput::Text("#0000FF".into()));
        // input untouched
        assert_eq!(c.rgb(), [255, 0, 0]);
    }

    #[test]
    fn update_keeps_hue_through_gray() {
        let c = Color::parse("#FF0000").unwrap();
        let gray = c.update(ColorChange::Saturation(0));
        assert_eq!(gray.rgb(), [255, 255, 255]);
        assert_eq!(gray.hsv()[0], 0);
        let c = Color::parse("#0000FF").unwrap();
        let back = c
            .update(ColorChange::Saturation(0))
            .update(ColorChange::Saturation(100));
        assert_eq!(back.rgb(), [0, 0, 255]);
    }

    #[test]
    fn update_with_no_change_is_identity() {
        let c = Color::parse("#830A0A7D").unwrap();
        let [h, s, v] = c.hsv();
        let [r, g, b] = c.rgb();
        for change in [
            ColorChange::Hue(h),
            ColorChange::Saturation(s),
            ColorChange::Value(v),
            ColorChange::SaturationValue(s, v),
            ColorChange::Lightness(c.hsl()[2]),
            ColorChange::Red(r),
            ColorChange::Green(g),
            ColorChange::Blue(b),
            ColorChange::Alpha(c.alpha()),
        ] {
            assert_eq!(c.update(change), c, "{change:?} changed the color");
        }
    }

    #[test]
    fn alpha_zero_is_not_absent_alpha() {
        let c = Color::parse("#FF0000").unwrap();
        let clear = c.update(ColorChange::Alpha(Some(0.0)));
        assert_eq!(clear.alpha(), Some(0.0));
        assert_eq!(clear.hex(), "FF000000");
        assert_eq!(clear.name(), None);
        let opaque = clear.update(ColorChange::Alpha(None));
        assert_eq!(opaque.hex(), "FF0000");
    }

    #[test]
    fn plain_format_falls_back_to_hex_when_edited_off_keyword() {
        let c = Color::parse("red").unwrap();
        let edited = c.update(ColorChange::Green(1));
        assert_eq!(edited.notation(), ColorFormat::Hex);
        assert_eq!(edited.raw(), &ColorInput::Text("#FF0100".into()));
        let white = c.update(ColorChange::SaturationValue(0, 100));
        assert_eq!(white.notation(), ColorFormat::Plain);
        assert_eq!(white.raw(), &ColorInput::Text("white".into()));
    }

    #[test]
    fn serializes_exactly_the_payload_fields() {
        let c = Color::parse("red").unwrap();
        let json = serde_json::to_value(&c).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["alpha", "css", "format", "hex", "hsl", "hsv", "name", "raw", "rgb", "value"]
        );
        assert_eq!(json["css"]["backgroundColor"], "red");
        assert_eq!(json["format"], "plain");
        assert!(json["alpha"].is_null());
    }

    #[test]
    fn color_input_deserializes_every_notation() {
        let inputs: Vec<ColorInput> = serde_json::from_str(
            r##"["#ff0000", 255, [0, 255, 0], {"hsv": [240, 100, 100]}, {"rgb": [1, 2, 3], "alpha": 0.5}]"##,
        )
        .unwrap();
        assert_eq!(inputs[0], ColorInput::Text("#ff0000".into()));
        assert_eq!(inputs[1], ColorInput::Integer(255));
        assert_eq!(inputs[2], ColorInput::Channels(vec![0.0, 255.0, 0.0]));
        assert!(matches!(inputs[3], ColorInput::Hsv { .. }));
        assert_eq!(
            inputs[4],
            ColorInput::Rgb {
                rgb: [1, 2, 3],
                alpha: Some(0.5)
            }
        );
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_round_trips_through_float_hsv(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let hex = format!("{r:02X}{g:02X}{b:02X}");
                let c = Color::parse(hex.as_str()).unwrap();
                let [cr, cg, cb] = c.rgb();
                let (h, s, v) = math::rgb_to_hsv_f64(cr as f64 / 255.0, cg as f64 / 255.0, cb as f64 / 255.0);
                let (rr, gg, bb) = math::hsv_to_rgb_f64(h, s, v);
                let back = Color::from_rgb(
                    [math::channel_to_u8(rr), math::channel_to_u8(gg), math::channel_to_u8(bb)],
                    None,
                );
                prop_assert_eq!(back.hex(), hex.as_str());
            }

            #[test]
            fn alpha_byte_round_trips(a in any::<u8>()) {
                let hex = format!("#102030{a:02X}");
                let c = Color::parse(hex.as_str()).unwrap();
                prop_assert_eq!(&c.hex()[6..], &hex[7..]);
                prop_assert_eq!(c.value() & 0xFF, a as u32);
            }

            #[test]
            fn noop_update_is_identity(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let c = Color::from_rgb([r, g, b], None);
                prop_assert_eq!(c.update(ColorChange::Hue(c.hsv()[0])), c.clone());
                prop_assert_eq!(c.update(ColorChange::Red(r)), c.clone());
                prop_assert_eq!(c.update(ColorChange::Alpha(None)), c);
            }
        }
    }
}

//! Color math: direct conversions between RGB, HSV and HSL.
//!
//! The `*_f64` functions work on unrounded values (hue in degrees, the other
//! components as fractions in 0.0–1.0) and are exact inverses of each other up
//! to float error. The integer functions apply the display rounding policy:
//! hue to the nearest degree (360 wraps to 0), percentages to the nearest
//! integer, RGB channels rounded and clamped to 0–255.

/// HSV → RGB. Hue in degrees, saturation and value in 0.0–1.0.
/// Returns channels in 0.0–1.0.
pub(crate) fn hsv_to_rgb_f64(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = (h / 60.0).rem_euclid(6.0);
    let i = h6.floor() as u32;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// RGB → HSV. Channels in 0.0–1.0. Returns hue in degrees, s and v in 0.0–1.0.
pub(crate) fn rgb_to_hsv_f64(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) * 60.0
    } else if max == g {
        ((b - r) / delta + 2.0) * 60.0
    } else {
        ((r - g) / delta + 4.0) * 60.0
    };

    (h, s, v)
}

/// HSL → HSV. Saturations and lightness in 0.0–1.0; hue passes through.
pub(crate) fn hsl_to_hsv_f64(h: f64, s_hsl: f64, l: f64) -> (f64, f64, f64) {
    let v = l + s_hsl * l.min(1.0 - l);
    let s_hsv = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };
    (h, s_hsv, v)
}

/// HSV → HSL. Saturations and lightness in 0.0–1.0; hue passes through.
pub(crate) fn hsv_to_hsl_f64(h: f64, s_hsv: f64, v: f64) -> (f64, f64, f64) {
    let l = v * (1.0 - s_hsv / 2.0);
    let s_hsl = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (v - l) / l.min(1.0 - l)
    };
    (h, s_hsl, l)
}

/// Rounds a 0.0–1.0 channel to 0–255.
pub(crate) fn channel_to_u8(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Rounds a hue in degrees to the nearest integer in 0..360.
pub(crate) fn round_hue(h: f64) -> u16 {
    (h.round() as i64).rem_euclid(360) as u16
}

/// Rounds a 0.0–1.0 fraction to an integer percentage in 0..=100.
pub(crate) fn round_percent(f: f64) -> u16 {
    (f * 100.0).round().clamp(0.0, 100.0) as u16
}

fn unit_rgb(rgb: [u8; 3]) -> (f64, f64, f64) {
    (
        rgb[0] as f64 / 255.0,
        rgb[1] as f64 / 255.0,
        rgb[2] as f64 / 255.0,
    )
}

/// RGB → rounded `[hue, saturation%, value%]`.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u16; 3] {
    let (r, g, b) = unit_rgb(rgb);
    let (h, s, v) = rgb_to_hsv_f64(r, g, b);
    [round_hue(h), round_percent(s), round_percent(v)]
}

/// Rounded `[hue, saturation%, value%]` → RGB.
pub fn hsv_to_rgb(hsv: [u16; 3]) -> [u8; 3] {
    let (r, g, b) = hsv_to_rgb_f64(
        hsv[0] as f64,
        hsv[1].min(100) as f64 / 100.0,
        hsv[2].min(100) as f64 / 100.0,
    );
    [channel_to_u8(r), channel_to_u8(g), channel_to_u8(b)]
}

/// RGB → rounded `[hue, saturation%, lightness%]`.
pub fn rgb_to_hsl(rgb: [u8; 3]) -> [u16; 3] {
    let (r, g, b) = unit_rgb(rgb);
    let (h, s, v) = rgb_to_hsv_f64(r, g, b);
    let (_, s_hsl, l) = hsv_to_hsl_f64(h, s, v);
    [round_hue(h), round_percent(s_hsl), round_percent(l)]
}

/// Rounded `[hue, saturation%, lightness%]` → RGB.
pub fn hsl_to_rgb(hsl: [u16; 3]) -> [u8; 3] {
    let (h, s, v) = hsl_to_hsv_f64(
        hsl[0] as f64,
        hsl[1].min(100) as f64 / 100.0,
        hsl[2].min(100) as f64 / 100.0,
    );
    let (r, g, b) = hsv_to_rgb_f64(h, s, v);
    [channel_to_u8(r), channel_to_u8(g), channel_to_u8(b)]
}

/// Expand and uppercase a hex string (with or without `#`).
///
/// Accepts 3, 4, 6 or 8 digits. Shorthand expands by digit duplication, so the
/// result is always 6 or 8 chars. Returns `None` for anything else.
pub(crate) fn normalize_hex(hex: &str) -> Option<String> {
    let stripped = hex.strip_prefix('#').unwrap_or(hex);
    if stripped.is_empty() || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match stripped.len() {
        3 | 4 => {
            let mut out = String::with_capacity(stripped.len() * 2);
            for c in stripped.chars() {
                out.push(c);
                out.push(c);
            }
            Some(out.to_ascii_uppercase())
        }
        6 | 8 => Some(stripped.to_ascii_uppercase()),
        _ => None,
    }
}

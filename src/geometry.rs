//! Geometry mapper: pointer positions ↔ normalized surface coordinates.
//!
//! Forward mappings clamp to the frame and return fractions in 0.0–1.0. The
//! inverse mappings place the gradient cursor and slider thumbs, and agree
//! with the forward mappings exactly at the edges (0 ↔ left/top edge,
//! 1 ↔ right/bottom edge). A zero-sized frame maps everything to 0.

use floem::kurbo::Point;

use crate::error::ColorError;

/// Measured bounding box of an interactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl GeometryFrame {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A frame at the origin, for views that receive pointer positions in
    /// their own coordinate space.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Reports a frame that cannot be mapped onto.
    pub fn validate(&self) -> Result<(), ColorError> {
        let usable = |d: f64| d.is_finite() && d > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(ColorError::DegenerateGeometry {
                width: self.width,
                height: self.height,
            })
        }
    }

    fn extent(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Horizontal => (self.left, self.width),
            Axis::Vertical => (self.top, self.height),
        }
    }
}

/// Direction of a 1D slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

fn fraction(pos: f64, start: f64, len: f64) -> f64 {
    if !(len.is_finite() && len > 0.0) {
        return 0.0;
    }
    let t = (pos - start) / len;
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Pointer → `(u, v)`, each clamped to 0.0–1.0.
pub fn pixel_to_unit_2d(pointer: Point, frame: &GeometryFrame) -> (f64, f64) {
    if let Err(err) = frame.validate() {
        tracing::trace!(%err, "mapping pointer onto degenerate frame");
    }
    (
        fraction(pointer.x, frame.left, frame.width),
        fraction(pointer.y, frame.top, frame.height),
    )
}

/// Pointer → `t` along `axis`, clamped to 0.0–1.0.
pub fn pixel_to_unit_1d(pointer: Point, frame: &GeometryFrame, axis: Axis) -> f64 {
    let (start, len) = frame.extent(axis);
    let pos = match axis {
        Axis::Horizontal => pointer.x,
        Axis::Vertical => pointer.y,
    };
    fraction(pos, start, len)
}

/// `(u, v)` → pointer position inside `frame`.
pub fn unit_to_pixel_2d(u: f64, v: f64, frame: &GeometryFrame) -> Point {
    Point::new(
        frame.left + u.clamp(0.0, 1.0) * frame.width.max(0.0),
        frame.top + v.clamp(0.0, 1.0) * frame.height.max(0.0),
    )
}

/// `t` → offset along `axis`, in the same coordinate space as the frame.
pub fn unit_to_pixel_1d(t: f64, frame: &GeometryFrame, axis: Axis) -> f64 {
    let (start, len) = frame.extent(axis);
    start + t.clamp(0.0, 1.0) * len.max(0.0)
}

/// Gradient coordinates → HSV `(saturation%, value%)`. Top is full value.
pub fn saturation_value_from_unit(u: f64, v: f64) -> (u16, u16) {
    let s = (u.clamp(0.0, 1.0) * 100.0).round() as u16;
    let val = ((1.0 - v.clamp(0.0, 1.0)) * 100.0).round() as u16;
    (s, val)
}

/// HSV `(saturation%, value%)` → gradient coordinates.
pub fn unit_from_saturation_value(s: u16, v: u16) -> (f64, f64) {
    (
        s.min(100) as f64 / 100.0,
        1.0 - v.min(100) as f64 / 100.0,
    )
}

/// Hue slider position → hue in degrees. The right edge stays at 359 so the
/// thumb does not jump back to the left.
pub fn hue_from_unit(t: f64) -> u16 {
    ((t.clamp(0.0, 1.0) * 360.0).round() as u16).min(359)
}

pub fn unit_from_hue(h: u16) -> f64 {
    (h % 360) as f64 / 360.0
}

/// Alpha slider position → alpha. Position 0 is fully transparent.
pub fn alpha_from_unit(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Alpha → slider position. A color without alpha sits at the opaque end.
pub fn unit_from_alpha(alpha: Option<f64>) -> f64 {
    alpha.unwrap_or(1.0).clamp(0.0, 1.0)
}

/// Slider fill / thumb offset as a whole percentage.
pub fn thumb_percent(t: f64) -> u16 {
    (t.clamp(0.0, 1.0) * 100.0).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> GeometryFrame {
        GeometryFrame::new(22.0, 90.0, 308.0, 116.0)
    }

    #[test]
    fn maps_inside_points_proportionally() {
        let (u, v) = pixel_to_unit_2d(Point::new(22.0 + 77.0, 90.0 + 29.0), &frame());
        assert!((u - 0.25).abs() < 1e-12);
        assert!((v - 0.25).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside_points_on_every_side() {
        let f = frame();
        assert_eq!(pixel_to_unit_2d(Point::new(-500.0, -600.0), &f), (0.0, 0.0));
        assert_eq!(pixel_to_unit_2d(Point::new(1000.0, 1000.0), &f), (1.0, 1.0));
        assert_eq!(pixel_to_unit_2d(Point::new(25.0, 42.0), &f).1, 0.0);
        assert_eq!(pixel_to_unit_1d(Point::new(9999.0, 0.0), &f, Axis::Horizontal), 1.0);
        assert_eq!(pixel_to_unit_1d(Point::new(0.0, -1.0), &f, Axis::Vertical), 0.0);
    }

    #[test]
    fn degenerate_frame_maps_to_zero() {
        let f = GeometryFrame::new(10.0, 10.0, 0.0, 0.0);
        assert!(matches!(
            f.validate(),
            Err(ColorError::DegenerateGeometry { .. })
        ));
        assert_eq!(pixel_to_unit_2d(Point::new(50.0, 50.0), &f), (0.0, 0.0));
        assert_eq!(pixel_to_unit_1d(Point::new(50.0, 50.0), &f, Axis::Horizontal), 0.0);
        assert!(frame().validate().is_ok());
    }

    #[test]
    fn inverse_hits_edges_exactly() {
        let f = frame();
        assert_eq!(unit_to_pixel_2d(0.0, 0.0, &f), Point::new(22.0, 90.0));
        assert_eq!(unit_to_pixel_2d(1.0, 1.0, &f), Point::new(330.0, 206.0));
        assert_eq!(unit_to_pixel_1d(1.0, &f, Axis::Horizontal), 330.0);
        assert_eq!(
            pixel_to_unit_1d(Point::new(330.0, 0.0), &f, Axis::Horizontal),
            1.0
        );
    }

    #[test]
    fn gradient_top_is_full_value() {
        assert_eq!(saturation_value_from_unit(0.0, 0.0), (0, 100));
        assert_eq!(saturation_value_from_unit(1.0, 1.0), (100, 0));
        assert_eq!(unit_from_saturation_value(92, 51), (0.92, 1.0 - 0.51));
    }

    #[test]
    fn hue_and_alpha_mappings() {
        assert_eq!(hue_from_unit(0.0), 0);
        assert_eq!(hue_from_unit(0.5), 180);
        assert_eq!(hue_from_unit(1.0), 359);
        assert_eq!(alpha_from_unit(0.0), 0.0);
        assert_eq!(unit_from_alpha(None), 1.0);
        assert_eq!(thumb_percent(unit_from_alpha(Some(125.0 / 255.0))), 49);
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn outputs_never_leave_unit_square(x in -1e6f64..1e6, y in -1e6f64..1e6) {
                let f = GeometryFrame::new(22.0, 90.0, 308.0, 116.0);
                let (u, v) = pixel_to_unit_2d(Point::new(x, y), &f);
                prop_assert!((0.0..=1.0).contains(&u));
                prop_assert!((0.0..=1.0).contains(&v));
            }

            #[test]
            fn forward_inverts_inverse(t in 0.0f64..=1.0) {
                let f = GeometryFrame::new(0.0, 0.0, 256.0, 10.0);
                let x = unit_to_pixel_1d(t, &f, Axis::Horizontal);
                let back = pixel_to_unit_1d(Point::new(x, 0.0), &f, Axis::Horizontal);
                prop_assert!((back - t).abs() < 1e-12);
            }

            #[test]
            fn alpha_percent_tracks_alpha_byte(a in any::<u8>()) {
                let percent = thumb_percent(unit_from_alpha(Some(a as f64 / 255.0)));
                prop_assert!(percent <= 100);
                let expected = (a as f64 * 100.0 / 255.0).round() as u16;
                prop_assert_eq!(percent, expected);
                if a == 0 { prop_assert_eq!(percent, 0); }
                if a == 255 { prop_assert_eq!(percent, 100); }
            }
        }
    }
}

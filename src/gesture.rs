//! Gesture controller: one `Idle → Dragging → Idle` machine per surface.
//!
//! The controller only tracks the drag and turns pointer positions into
//! surface coordinates; deciding what a coordinate means for the color, and
//! whether to emit, is up to [`ColorBoxState`](crate::ColorBoxState).

use floem::kurbo::Point;

use crate::error::ColorError;
use crate::geometry::{self, Axis, GeometryFrame};

/// Bit set in [`PointerEvent::buttons`] while the primary button is held.
pub const PRIMARY_BUTTON: u8 = 1;

/// A pointer event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Position in the same coordinate space as the surface's frame.
    pub position: Option<Point>,
    /// Pressed-buttons bitmask.
    pub buttons: u8,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Some(Point::new(x, y)),
            buttons: 0,
        }
    }

    /// An event that carries no coordinates.
    pub fn without_position() -> Self {
        Self::default()
    }

    /// The same event with the primary button held.
    pub fn pressed(mut self) -> Self {
        self.buttons |= PRIMARY_BUTTON;
        self
    }

    pub fn primary_pressed(&self) -> bool {
        self.buttons & PRIMARY_BUTTON != 0
    }

    /// The event's position, if it is usable.
    pub fn position(&self) -> Result<Point, ColorError> {
        match self.position {
            None => Err(ColorError::MalformedGestureEvent("missing coordinates")),
            Some(p) if !(p.x.is_finite() && p.y.is_finite()) => {
                Err(ColorError::MalformedGestureEvent("non-finite coordinates"))
            }
            Some(p) => Ok(p),
        }
    }
}

/// The interactive surfaces of a ColorBox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// 2D saturation/value gradient.
    Gradient,
    /// 1D hue slider.
    Hue,
    /// 1D alpha slider.
    Alpha,
}

impl Surface {
    /// Surfaces that emit continuously while dragged in immediate mode.
    /// Sliders emit on release only.
    pub fn emits_while_dragging(self) -> bool {
        matches!(self, Surface::Gradient)
    }
}

/// A normalized position on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coordinate {
    Plane { u: f64, v: f64 },
    Line(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// `frame` is captured at pointer-down and reused for the whole drag.
    Dragging {
        frame: GeometryFrame,
        last: Option<Coordinate>,
        /// Set by the first accepted move.
        moved: bool,
    },
}

/// What a pointer event did to the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// No state change.
    Ignored,
    /// Drag began; carries the initial coordinate if the event had one.
    Started(Option<Coordinate>),
    Moved(Coordinate),
    /// Drag finished; carries the final coordinate, if any was ever seen.
    /// Without a move in between, this is the pointer-down coordinate.
    Released(Option<Coordinate>),
}

#[derive(Debug, Clone)]
pub struct GestureController {
    surface: Surface,
    axis: Axis,
    state: GestureState,
}

impl GestureController {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            axis: Axis::Horizontal,
            state: GestureState::Idle,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Back to `Idle`, dropping any drag in progress.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    fn map(&self, event: &PointerEvent, frame: &GeometryFrame) -> Option<Coordinate> {
        let pos = match event.position() {
            Ok(pos) => pos,
            Err(err) => {
                tracing::trace!(surface = ?self.surface, %err, "ignoring pointer position");
                return None;
            }
        };
        Some(match self.surface {
            Surface::Gradient => {
                let (u, v) = geometry::pixel_to_unit_2d(pos, frame);
                Coordinate::Plane { u, v }
            }
            Surface::Hue | Surface::Alpha => {
                Coordinate::Line(geometry::pixel_to_unit_1d(pos, frame, self.axis))
            }
        })
    }

    pub fn pointer_down(&mut self, event: &PointerEvent, frame: GeometryFrame) -> GestureOutcome {
        let coord = self.map(event, &frame);
        self.state = GestureState::Dragging {
            frame,
            last: coord,
            moved: false,
        };
        tracing::trace!(surface = ?self.surface, ?coord, "drag started");
        GestureOutcome::Started(coord)
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> GestureOutcome {
        let GestureState::Dragging { frame, .. } = self.state else {
            return GestureOutcome::Ignored;
        };
        if !event.primary_pressed() {
            return GestureOutcome::Ignored;
        }
        match self.map(event, &frame) {
            Some(coord) => {
                self.state = GestureState::Dragging {
                    frame,
                    last: Some(coord),
                    moved: true,
                };
                GestureOutcome::Moved(coord)
            }
            None => GestureOutcome::Ignored,
        }
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> GestureOutcome {
        let GestureState::Dragging { frame, last, moved } = self.state else {
            return GestureOutcome::Ignored;
        };
        // a press-and-release keeps the press position
        let coord = if moved {
            self.map(event, &frame).or(last)
        } else {
            last
        };
        self.state = GestureState::Idle;
        tracing::trace!(surface = ?self.surface, ?coord, "drag released");
        GestureOutcome::Released(coord)
    }
}

//! Saturation/value gradient.
//!
//! Horizontal axis is saturation, vertical axis is value (top = 100%). The
//! surface is painted as three layers: the pure hue, a white → transparent
//! horizontal gradient and a transparent → black vertical gradient.

use floem::kurbo::{Circle, Point, Rect, Shape, Stroke};
use floem::peniko::{Color, Gradient};
use floem::reactive::{create_effect, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::checkerboard;
use crate::color_box::Shared;
use crate::constants;
use crate::geometry::{self, GeometryFrame};
use crate::gesture::{PointerEvent, Surface};

struct GradientUpdate {
    hue: [u8; 3],
    unit: (f64, f64),
}

pub(crate) struct SaturationValueGradient {
    id: ViewId,
    shared: Shared,
    held: bool,
    hue: [u8; 3],
    /// Cursor position in unit coordinates.
    unit: (f64, f64),
    size: floem::taffy::prelude::Size<f32>,
}

pub(crate) fn gradient(shared: Shared) -> SaturationValueGradient {
    let id = ViewId::new();

    let tracked = shared.clone();
    create_effect(move |_| {
        tracked.tick.get();
        let update = tracked.with(|state| {
            let [_, s, v] = state.color().hsv();
            GradientUpdate {
                hue: state.gradient_hue_rgb(),
                unit: geometry::unit_from_saturation_value(s, v),
            }
        });
        id.update_state(update);
    });

    let (hue, unit) = shared.with(|state| {
        let [_, s, v] = state.color().hsv();
        (
            state.gradient_hue_rgb(),
            geometry::unit_from_saturation_value(s, v),
        )
    });

    SaturationValueGradient {
        id,
        shared,
        held: false,
        hue,
        unit,
        size: Default::default(),
    }
    .style(|s| {
        s.width_full()
            .height(constants::GRADIENT_HEIGHT)
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl SaturationValueGradient {
    fn frame(&self) -> GeometryFrame {
        GeometryFrame::from_size(self.size.width as f64, self.size.height as f64)
    }
}

impl View for SaturationValueGradient {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<GradientUpdate>() {
            self.hue = update.hue;
            self.unit = update.unit;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                let frame = self.frame();
                let pointer = PointerEvent::at(e.pos.x, e.pos.y).pressed();
                self.shared
                    .run(|state| state.pointer_down(Surface::Gradient, pointer, frame));
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if !self.held {
                    return EventPropagation::Continue;
                }
                let pointer = PointerEvent::at(e.pos.x, e.pos.y).pressed();
                self.shared
                    .run(|state| state.pointer_move(Surface::Gradient, pointer));
                EventPropagation::Stop
            }
            Event::PointerUp(e) => {
                if self.held {
                    self.held = false;
                    let pointer = PointerEvent::at(e.pos.x, e.pos.y);
                    self.shared
                        .run(|state| state.pointer_up(Surface::Gradient, pointer));
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                if self.held {
                    self.held = false;
                    self.shared.run(|state| {
                        state.pointer_up(Surface::Gradient, PointerEvent::without_position())
                    });
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let frame = self.frame();
        if frame.validate().is_err() {
            return;
        }
        let (w, h) = (frame.width, frame.height);
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        cx.fill(&rect, checkerboard::paint_color(self.hue, None), 0.0);
        // Gradients go through a BezPath; vello's Rect fast path is solid-only.
        let path = rect.to_path(0.1);
        let whites = Gradient::new_linear((0.0, 0.0), (w, 0.0))
            .with_stops([Color::rgba8(255, 255, 255, 255), Color::rgba8(255, 255, 255, 0)]);
        cx.fill(&path, &whites, 0.0);
        let blacks = Gradient::new_linear((0.0, 0.0), (0.0, h))
            .with_stops([Color::rgba8(0, 0, 0, 0), Color::rgba8(0, 0, 0, 255)]);
        cx.fill(&path, &blacks, 0.0);
        cx.restore();

        cx.stroke(&rrect, Color::rgba8(0, 0, 0, 40), &Stroke::new(1.0));

        let (u, v) = self.unit;
        let center: Point = geometry::unit_to_pixel_2d(u, v, &frame);
        let outer = Circle::new(center, constants::CURSOR_RADIUS + 1.0);
        cx.stroke(&outer, Color::rgba8(0, 0, 0, 80), &Stroke::new(1.0));
        let ring = Circle::new(center, constants::CURSOR_RADIUS);
        cx.stroke(&ring, Color::WHITE, &Stroke::new(2.0));
    }
}

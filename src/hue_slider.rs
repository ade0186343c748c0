//! Horizontal hue slider (0° at the left, 359° at the right).

use floem::kurbo::{Point, Rect, Shape, Stroke};
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
use crate::geometry::{self, Axis, GeometryFrame};
use crate::gesture::{PointerEvent, Surface};
use crate::math;

/// Rainbow stops every 60°, wrapping back to red.
fn hue_stops() -> [Color; 7] {
    [0u16, 60, 120, 180, 240, 300, 0]
        .map(|h| checkerboard::paint_color(math::hsv_to_rgb([h, 100, 100]), None))
}

struct HueUpdate(f64);

pub(crate) struct HueSlider {
    id: ViewId,
    shared: Shared,
    held: bool,
    /// Thumb position, 0.0–1.0.
    position: f64,
    size: floem::taffy::prelude::Size<f32>,
}

pub(crate) fn hue_slider(shared: Shared) -> HueSlider {
    let id = ViewId::new();

    let tracked = shared.clone();
    create_effect(move |_| {
        tracked.tick.get();
        let t = tracked.with(|state| state.hue_unit());
        id.update_state(HueUpdate(t));
    });

    let position = shared.with(|state| state.hue_unit());
    HueSlider {
        id,
        shared,
        held: false,
        position,
        size: Default::default(),
    }
    .style(|s| {
        s.width_full()
            .height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

/// Track inset by the thumb radius at both ends.
pub(crate) fn track_frame(size: floem::taffy::prelude::Size<f32>) -> GeometryFrame {
    let r = constants::THUMB_RADIUS;
    GeometryFrame::new(r, 0.0, size.width as f64 - 2.0 * r, size.height as f64)
}

impl View for HueSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<HueUpdate>() {
            self.position = update.0;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                let frame = track_frame(self.size);
                let pointer = PointerEvent::at(e.pos.x, e.pos.y).pressed();
                self.shared
                    .run(|state| state.pointer_down(Surface::Hue, pointer, frame));
                EventPropagation::Stop
            }
            Event::PointerMove(e) if self.held => {
                let pointer = PointerEvent::at(e.pos.x, e.pos.y).pressed();
                self.shared.run(|state| state.pointer_move(Surface::Hue, pointer));
                EventPropagation::Stop
            }
            Event::PointerUp(e) if self.held => {
                self.held = false;
                let pointer = PointerEvent::at(e.pos.x, e.pos.y);
                self.shared.run(|state| state.pointer_up(Surface::Hue, pointer));
                EventPropagation::Continue
            }
            Event::FocusLost if self.held => {
                self.held = false;
                self.shared
                    .run(|state| state.pointer_up(Surface::Hue, PointerEvent::without_position()));
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
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        let frame = track_frame(self.size);
        let (x0, x1) = (frame.left, frame.left + frame.width.max(0.0));
        let rainbow = Gradient::new_linear((x0, h / 2.0), (x1, h / 2.0)).with_stops(hue_stops());
        cx.fill(&rrect.to_path(0.1), &rainbow, 0.0);
        cx.stroke(&rrect, Color::rgba8(0, 0, 0, 40), &Stroke::new(1.0));

        let x = geometry::unit_to_pixel_1d(self.position, &frame, Axis::Horizontal);
        checkerboard::paint_thumb(cx, Point::new(x, h / 2.0));
    }
}

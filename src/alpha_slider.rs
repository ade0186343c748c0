//! Alpha slider: checkerboard under a transparent (left) → opaque (right)
//! ramp of the current color.

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
use crate::geometry::{self, Axis};
use crate::gesture::{PointerEvent, Surface};
use crate::hue_slider::track_frame;

struct AlphaUpdate {
    position: f64,
    rgb: [u8; 3],
}

pub(crate) struct AlphaSlider {
    id: ViewId,
    shared: Shared,
    held: bool,
    position: f64,
    rgb: [u8; 3],
    size: floem::taffy::prelude::Size<f32>,
}

pub(crate) fn alpha_slider(shared: Shared) -> AlphaSlider {
    let id = ViewId::new();

    let tracked = shared.clone();
    create_effect(move |_| {
        tracked.tick.get();
        let update = tracked.with(|state| AlphaUpdate {
            position: state.alpha_unit(),
            rgb: state.color().rgb(),
        });
        id.update_state(update);
    });

    let (position, rgb) = shared.with(|state| (state.alpha_unit(), state.color().rgb()));
    AlphaSlider {
        id,
        shared,
        held: false,
        position,
        rgb,
        size: Default::default(),
    }
    .style(|s| {
        s.width_full()
            .height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl AlphaSlider {
    fn release(&mut self, pointer: PointerEvent) {
        if self.held {
            self.held = false;
            self.shared
                .run(|state| state.pointer_up(Surface::Alpha, pointer));
        }
    }
}

impl View for AlphaSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<AlphaUpdate>() {
            self.position = update.position;
            self.rgb = update.rgb;
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
                    .run(|state| state.pointer_down(Surface::Alpha, pointer, frame));
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if !self.held {
                    return EventPropagation::Continue;
                }
                let pointer = PointerEvent::at(e.pos.x, e.pos.y).pressed();
                self.shared
                    .run(|state| state.pointer_move(Surface::Alpha, pointer));
                EventPropagation::Stop
            }
            Event::PointerUp(e) => {
                self.release(PointerEvent::at(e.pos.x, e.pos.y));
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.release(PointerEvent::without_position());
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

        cx.save();
        cx.clip(&rrect);
        checkerboard::paint_checkerboard(cx, rect);
        let [r, g, b] = self.rgb;
        let ramp = Gradient::new_linear((frame.left, h / 2.0), (frame.left + frame.width, h / 2.0))
            .with_stops([Color::rgba8(r, g, b, 0), Color::rgba8(r, g, b, 255)]);
        cx.fill(&rect.to_path(0.1), &ramp, 0.0);
        cx.restore();

        cx.stroke(&rrect, Color::rgba8(0, 0, 0, 40), &Stroke::new(1.0));

        let x = geometry::unit_to_pixel_1d(self.position, &frame, Axis::Horizontal);
        checkerboard::paint_thumb(cx, Point::new(x, h / 2.0));
    }
}

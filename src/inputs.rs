//! HEX and R/G/B text inputs.
//!
//! Typing only records a draft. Enter or focus loss confirms it; text that
//! does not parse keeps its draft and gets a red border.

use floem::event::{Event, EventListener, EventPropagation};
use floem::keyboard::{Key, NamedKey};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color_box::Shared;
use crate::constants;
use crate::state::TextField;

fn is_enter(event: &Event) -> bool {
    match event {
        Event::KeyDown(ke) => ke.key.logical_key == Key::Named(NamedKey::Enter),
        _ => false,
    }
}

/// A labeled input bound to one [`TextField`] of the ColorBox state.
pub(crate) fn field_input(shared: Shared, field: TextField) -> impl IntoView {
    let (initial, initially_invalid) =
        shared.with(|state| (state.text_value(field), state.is_invalid(field)));
    let text = RwSignal::new(initial);
    let invalid = RwSignal::new(initially_invalid);

    // State → text
    let tracked = shared.clone();
    create_effect(move |_| {
        tracked.tick.get();
        let (value, bad) =
            tracked.with(|state| (state.text_value(field), state.is_invalid(field)));
        if text.get_untracked() != value {
            text.set(value);
        }
        if invalid.get_untracked() != bad {
            invalid.set(bad);
        }
    });

    // Keystrokes → draft
    let drafting = shared.clone();
    create_effect(move |_| {
        let typed = text.get();
        let unchanged = drafting.with(|state| state.text_value(field) == typed);
        if !unchanged {
            drafting.edit(|state| state.edit_text(field, &typed));
            invalid.set(false);
        }
    });

    let confirm = move || shared.run(|state| state.confirm_text(field));
    let confirm_on_enter = confirm.clone();

    let width = match field {
        TextField::Hex => constants::HEX_INPUT_WIDTH,
        _ => constants::CHANNEL_INPUT_WIDTH,
    };

    v_stack((
        text_input(text)
            .style(move |s| {
                let border = if invalid.get() {
                    constants::INVALID_BORDER
                } else {
                    constants::BORDER
                };
                s.width(width)
                    .padding(2.0)
                    .font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .background(Color::WHITE)
                    .border(1.0)
                    .border_color(border)
                    .border_radius(constants::RADIUS)
            })
            .on_event_stop(EventListener::FocusLost, move |_| confirm())
            .on_event(EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    confirm_on_enter();
                    return EventPropagation::Stop;
                }
                EventPropagation::Continue
            }),
        label(move || field.label()).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(constants::MUTED_TEXT)
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

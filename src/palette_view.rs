//! Row of palette swatches. Clicking one commits its color.

use floem::event::EventListener;
use floem::prelude::*;
use floem::reactive::SignalGet;

use crate::checkerboard;
use crate::color_box::Shared;
use crate::constants;

pub(crate) fn palette_view(shared: Shared) -> impl IntoView {
    let swatches: Vec<(String, floem::peniko::Color)> = shared.with(|state| {
        state
            .palette()
            .swatches()
            .map(|(name, color)| (name.to_string(), checkerboard::swatch_color(color)))
            .collect()
    });
    let empty_palette = swatches.is_empty();

    h_stack_from_iter(swatches.into_iter().map(move |(name, fill)| {
        let selected = shared.clone();
        let clicked = shared.clone();
        let key = name.clone();
        empty()
            .style(move |s| {
                selected.tick.get();
                let active = selected.with(|state| state.color().name() == Some(key.as_str()));
                s.size(constants::SWATCH_SIZE, constants::SWATCH_SIZE)
                    .border_radius(constants::RADIUS)
                    .border(if active { 2.0 } else { 1.0 })
                    .border_color(if active {
                        Color::rgb8(60, 60, 60)
                    } else {
                        constants::BORDER
                    })
                    .background(fill)
                    .cursor(floem::style::CursorStyle::Pointer)
            })
            .on_event_stop(EventListener::Click, move |_| {
                clicked.select(&name);
            })
    }))
    .style(move |s| {
        s.flex_wrap(floem::taffy::FlexWrap::Wrap)
            .gap(constants::GAP / 2.0)
            .apply_if(empty_palette, |s| s.hide())
    })
}

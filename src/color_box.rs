//! The ColorBox panel: gradient, sliders, inputs, "Set" button and palette.
//!
//! Every sub-view shares one [`ColorBoxState`] behind an `Rc<RefCell<_>>`.
//! State operations run with the borrow held; `tick` is bumped and
//! `on_change` is called only after it is released, so a callback may call
//! back into the [`ColorBoxHandle`].

use std::cell::RefCell;
use std::rc::Rc;

use floem::event::EventListener;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};

#[cfg(feature = "alpha")]
use crate::alpha_slider::alpha_slider;
use crate::checkerboard;
use crate::color::ColorInput;
use crate::config::ColorBoxConfig;
use crate::constants;
use crate::error::ColorError;
use crate::gradient::gradient;
use crate::hue_slider::hue_slider;
use crate::inputs::field_input;
use crate::palette_view::palette_view;
use crate::state::{ColorBoxState, CommitMode, TextField};

#[derive(Clone)]
pub(crate) struct Shared {
    state: Rc<RefCell<ColorBoxState>>,
    on_change: Rc<dyn Fn(&crate::Color)>,
    /// Bumped after every state change; views re-read their snapshot.
    pub(crate) tick: RwSignal<u64>,
}

impl Shared {
    fn new(state: ColorBoxState, on_change: impl Fn(&crate::Color) + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            on_change: Rc::new(on_change),
            tick: RwSignal::new(0),
        }
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&ColorBoxState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Mutate without re-rendering; for changes only the caller displays.
    pub(crate) fn edit(&self, f: impl FnOnce(&mut ColorBoxState)) {
        f(&mut self.state.borrow_mut());
    }

    /// Run an operation, re-render, then report its emission.
    pub(crate) fn run(&self, f: impl FnOnce(&mut ColorBoxState) -> Option<crate::Color>) {
        let emitted = f(&mut self.state.borrow_mut());
        self.tick.update(|t| *t += 1);
        if let Some(color) = emitted {
            (self.on_change)(&color);
        }
    }

    pub(crate) fn select(&self, name: &str) {
        self.run(|state| match state.select_palette(name) {
            Ok(color) => Some(color),
            Err(err) => {
                tracing::debug!(%err, "palette selection failed");
                None
            }
        });
    }
}

/// Drives a mounted ColorBox from the embedding application.
#[derive(Clone)]
pub struct ColorBoxHandle {
    shared: Shared,
}

impl ColorBoxHandle {
    /// Push a new external value. In controlled mode this is the only way
    /// the displayed color changes.
    pub fn set_value(&self, input: impl Into<ColorInput>) -> Result<(), ColorError> {
        let result = self.shared.state.borrow_mut().set_value(input);
        self.shared.tick.update(|t| *t += 1);
        result
    }

    /// The color currently displayed.
    pub fn color(&self) -> crate::Color {
        self.shared.with(|state| state.color().clone())
    }

    /// Same as pressing "Set".
    pub fn commit(&self) {
        self.shared.run(ColorBoxState::commit);
    }
}

fn preview_swatch(shared: Shared) -> impl IntoView {
    let fill = shared.clone();
    let name = shared;
    h_stack((
        container(empty().style(move |s| {
            fill.tick.get();
            let color = fill.with(|state| checkerboard::swatch_color(state.color()));
            s.size_full().background(color)
        }))
        .style(|s| {
            s.size(constants::PREVIEW_SIZE, constants::PREVIEW_SIZE)
                .border(1.0)
                .border_color(constants::BORDER)
                .border_radius(constants::RADIUS)
                .background(Color::WHITE)
        }),
        label(move || {
            name.tick.get();
            name.with(|state| state.color().name().unwrap_or_default().to_string())
        })
        .style(|s| s.font_size(constants::INPUT_FONT).color(constants::MUTED_TEXT)),
    ))
    .style(|s| s.items_center().gap(constants::GAP))
}

fn set_button(shared: Shared) -> impl IntoView {
    let pending = shared.clone();
    label(|| "Set")
        .style(move |s| {
            pending.tick.get();
            let enabled = pending.with(ColorBoxState::has_pending);
            s.padding_horiz(10.0)
                .padding_vert(3.0)
                .font_size(constants::INPUT_FONT)
                .border(1.0)
                .border_color(constants::BORDER)
                .border_radius(constants::RADIUS)
                .background(Color::WHITE)
                .cursor(floem::style::CursorStyle::Pointer)
                .apply_if(!enabled, |s| s.color(constants::MUTED_TEXT))
                .hover(|s| s.background(Color::rgb8(230, 230, 230)))
        })
        .on_event_stop(EventListener::Click, move |_| {
            shared.run(ColorBoxState::commit);
        })
}

/// Creates a ColorBox view and the handle that drives it.
///
/// `on_change` receives every emitted color: each change in immediate mode,
/// each "Set" in deferred mode, and every palette click.
pub fn color_box(
    config: ColorBoxConfig,
    on_change: impl Fn(&crate::Color) + 'static,
) -> (ColorBoxHandle, impl IntoView) {
    let state = ColorBoxState::new(config);
    let deferred = state.commit_mode() == CommitMode::Deferred;
    let shared = Shared::new(state, on_change);
    let handle = ColorBoxHandle {
        shared: shared.clone(),
    };

    let inputs = h_stack_from_iter(
        TextField::ALL
            .into_iter()
            .map(|field| field_input(shared.clone(), field)),
    )
    .style(|s| s.gap(constants::GAP / 2.0).items_start().justify_center());

    let view = v_stack((
        gradient(shared.clone()),
        hue_slider(shared.clone()),
        #[cfg(feature = "alpha")]
        alpha_slider(shared.clone()),
        h_stack((
            preview_swatch(shared.clone()),
            empty().style(|s| s.flex_grow(1.0)),
            set_button(shared.clone()).style(move |s| s.apply_if(!deferred, |s| s.hide())),
        ))
        .style(|s| s.items_center()),
        inputs,
        palette_view(shared),
    ))
    .style(|s| {
        s.gap(constants::GAP)
            .padding(constants::PADDING)
            .size_full()
            .background(constants::PANEL_BACKGROUND)
    });

    (handle, view)
}

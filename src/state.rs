//! Value state machine: owns the ColorBox's color and decides when to emit.
//!
//! Every operation returns the color it emitted, if any. The caller (the
//! [`ColorBox`] wrapper or the Floem views) forwards emissions to the
//! embedding application's `on_change` once the state is no longer borrowed.

use std::fmt;

use floem::kurbo::Point;

use crate::color::{Color, ColorChange, ColorInput};
use crate::config::ColorBoxConfig;
use crate::error::ColorError;
use crate::geometry::{self, GeometryFrame};
use crate::gesture::{Coordinate, GestureController, GestureOutcome, PointerEvent, Surface};
use crate::palette::Palette;

/// Who owns the current color.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueMode {
    /// The embedding application owns the value; emissions are proposals and
    /// the displayed color changes only through [`ColorBoxState::set_value`].
    Controlled(ColorInput),
    /// The ColorBox owns the value, seeded from `default`.
    Uncontrolled { default: Option<ColorInput> },
}

impl Default for ValueMode {
    fn default() -> Self {
        ValueMode::Uncontrolled { default: None }
    }
}

/// When edits reach `on_change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitMode {
    /// Emit on every discrete change, and continuously during gradient drags.
    #[default]
    Immediate,
    /// Buffer edits and drag previews until [`ColorBoxState::commit`].
    Deferred,
}

/// The text inputs of a ColorBox, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Hex,
    Red,
    Green,
    Blue,
}

impl TextField {
    pub const ALL: [TextField; 4] = [TextField::Hex, TextField::Red, TextField::Green, TextField::Blue];

    pub fn label(self) -> &'static str {
        match self {
            TextField::Hex => "HEX",
            TextField::Red => "R",
            TextField::Green => "G",
            TextField::Blue => "B",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default)]
struct Drafts {
    text: [Option<String>; 4],
    invalid: [bool; 4],
}

impl Drafts {
    fn is_empty(&self) -> bool {
        self.text.iter().all(Option::is_none)
    }

    fn clear(&mut self) {
        *self = Drafts::default();
    }
}

#[derive(Debug)]
pub struct ColorBoxState {
    controlled: bool,
    commit: CommitMode,
    palette: Palette,
    current: Color,
    /// Drag preview or deferred draft, shown instead of `current`.
    preview: Option<Color>,
    drafts: Drafts,
    gradient: GestureController,
    hue: GestureController,
    alpha: GestureController,
    last_emitted: Option<Color>,
}

impl ColorBoxState {
    /// Builds the state. An initial value that does not parse falls back to
    /// the default color.
    pub fn new(config: ColorBoxConfig) -> Self {
        let ColorBoxConfig {
            source,
            palette,
            deferred,
        } = config;
        let commit = if deferred {
            CommitMode::Deferred
        } else {
            CommitMode::Immediate
        };
        let (controlled, seed) = match source {
            ValueMode::Controlled(input) => (true, Some(input)),
            ValueMode::Uncontrolled { default } => (false, default),
        };
        let current = match seed.map(|input| palette.parse(input)) {
            Some(Ok(color)) => color,
            Some(Err(err)) => {
                tracing::warn!(%err, "initial color does not parse, using default");
                palette.annotate(Color::default())
            }
            None => palette.annotate(Color::default()),
        };
        Self {
            controlled,
            commit,
            palette,
            current,
            preview: None,
            drafts: Drafts::default(),
            gradient: GestureController::new(Surface::Gradient),
            hue: GestureController::new(Surface::Hue),
            alpha: GestureController::new(Surface::Alpha),
            last_emitted: None,
        }
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    pub fn commit_mode(&self) -> CommitMode {
        self.commit
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The color every sub-widget renders: the preview if one exists,
    /// otherwise the committed color.
    pub fn color(&self) -> &Color {
        self.preview.as_ref().unwrap_or(&self.current)
    }

    /// The committed color (the external value in controlled mode).
    pub fn committed(&self) -> &Color {
        &self.current
    }

    /// True while a deferred edit or preview awaits [`commit`](Self::commit).
    pub fn has_pending(&self) -> bool {
        self.preview.is_some() || !self.drafts.is_empty()
    }

    pub fn is_dragging(&self, surface: Surface) -> bool {
        self.controller(surface).is_dragging()
    }

    fn controller(&self, surface: Surface) -> &GestureController {
        match surface {
            Surface::Gradient => &self.gradient,
            Surface::Hue => &self.hue,
            Surface::Alpha => &self.alpha,
        }
    }

    fn controller_mut(&mut self, surface: Surface) -> &mut GestureController {
        match surface {
            Surface::Gradient => &mut self.gradient,
            Surface::Hue => &mut self.hue,
            Surface::Alpha => &mut self.alpha,
        }
    }

    fn any_dragging(&self) -> bool {
        self.gradient.is_dragging() || self.hue.is_dragging() || self.alpha.is_dragging()
    }

    /// Drop drags, drafts and previews so every widget resyncs from `current`.
    fn discard_pending(&mut self) {
        self.preview = None;
        self.drafts.clear();
        self.gradient.reset();
        self.hue.reset();
        self.alpha.reset();
    }

    fn emit(&mut self, color: Color) -> Option<Color> {
        tracing::trace!(hex = color.hex(), name = ?color.name(), "emit");
        if !self.controlled {
            self.current = color.clone();
        }
        self.last_emitted = Some(color.clone());
        Some(color)
    }

    /// Replace the external value (controlled) or re-seed the default
    /// (uncontrolled).
    ///
    /// A new color discards any drag, draft or preview. The echo of a color
    /// this state just emitted is adopted without interrupting a drag. Input
    /// that does not parse leaves everything as it was.
    pub fn set_value(&mut self, input: impl Into<ColorInput>) -> Result<(), ColorError> {
        let color = match self.palette.parse(input) {
            Ok(color) => color,
            Err(err) => {
                tracing::debug!(%err, "rejected external value");
                return Err(err);
            }
        };
        if color == self.current {
            return Ok(());
        }
        let echo = self
            .last_emitted
            .as_ref()
            .is_some_and(|sent| sent.same_color(&color));
        if echo && self.any_dragging() {
            self.current = color;
            return Ok(());
        }
        tracing::debug!(hex = color.hex(), "external value changed, resyncing");
        self.current = color;
        self.discard_pending();
        Ok(())
    }

    fn apply(&self, surface: Surface, coord: Coordinate) -> Color {
        let base = self.color();
        let next = match (surface, coord) {
            (Surface::Gradient, Coordinate::Plane { u, v }) => {
                let (s, val) = geometry::saturation_value_from_unit(u, v);
                base.update(ColorChange::SaturationValue(s, val))
            }
            (Surface::Hue, Coordinate::Line(t)) => {
                base.update(ColorChange::Hue(geometry::hue_from_unit(t)))
            }
            (Surface::Alpha, Coordinate::Line(t)) => {
                let a = geometry::alpha_from_unit(t);
                // the opaque end leaves an alpha-less color alpha-less
                if base.alpha().is_none() && a >= 1.0 {
                    base.clone()
                } else {
                    base.update(ColorChange::Alpha(Some(a)))
                }
            }
            _ => base.clone(),
        };
        self.palette.annotate(next)
    }

    /// Starts a drag on `surface`. The press position only moves the
    /// preview; moves and the release are what emit.
    pub fn pointer_down(
        &mut self,
        surface: Surface,
        event: PointerEvent,
        frame: GeometryFrame,
    ) -> Option<Color> {
        if let GestureOutcome::Started(Some(coord)) =
            self.controller_mut(surface).pointer_down(&event, frame)
        {
            self.preview = Some(self.apply(surface, coord));
        }
        None
    }

    pub fn pointer_move(&mut self, surface: Surface, event: PointerEvent) -> Option<Color> {
        match self.controller_mut(surface).pointer_move(&event) {
            GestureOutcome::Moved(coord) => self.drag_to(surface, coord),
            _ => None,
        }
    }

    pub fn pointer_up(&mut self, surface: Surface, event: PointerEvent) -> Option<Color> {
        let GestureOutcome::Released(coord) = self.controller_mut(surface).pointer_up(&event)
        else {
            return None;
        };
        let last = match coord {
            Some(coord) => self.apply(surface, coord),
            None => self.color().clone(),
        };
        match self.commit {
            CommitMode::Immediate => {
                self.preview = None;
                self.emit(last)
            }
            CommitMode::Deferred => {
                self.preview = Some(last);
                None
            }
        }
    }

    fn drag_to(&mut self, surface: Surface, coord: Coordinate) -> Option<Color> {
        let next = self.apply(surface, coord);
        self.preview = Some(next.clone());
        if self.commit == CommitMode::Immediate && surface.emits_while_dragging() {
            self.emit(next)
        } else {
            None
        }
    }

    /// Text shown in `field`: the draft if one exists, else the displayed color.
    pub fn text_value(&self, field: TextField) -> String {
        match &self.drafts.text[field.index()] {
            Some(draft) => draft.clone(),
            None => self.color_text(field),
        }
    }

    fn color_text(&self, field: TextField) -> String {
        let color = self.color();
        let [r, g, b] = color.rgb();
        match field {
            TextField::Hex => color.hex().to_string(),
            TextField::Red => r.to_string(),
            TextField::Green => g.to_string(),
            TextField::Blue => b.to_string(),
        }
    }

    pub fn is_invalid(&self, field: TextField) -> bool {
        self.drafts.invalid[field.index()]
    }

    /// Record what the user typed. Never emits.
    pub fn edit_text(&mut self, field: TextField, text: &str) {
        let i = field.index();
        self.drafts.invalid[i] = false;
        if text == self.color_text(field) {
            self.drafts.text[i] = None;
        } else {
            self.drafts.text[i] = Some(text.to_string());
        }
    }

    fn parse_field(&self, field: TextField, text: &str) -> Result<Color, ColorError> {
        let text = text.trim();
        let channel = |change: fn(u8) -> ColorChange| -> Result<Color, ColorError> {
            let n = text
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| ColorError::InvalidColorFormat(text.to_string()))?;
            let c = self.color().update(change(n.clamp(0.0, 255.0).round() as u8));
            Ok(self.palette.annotate(c))
        };
        match field {
            TextField::Hex => {
                let looks_hex = !text.is_empty() && text.chars().all(|c| c.is_ascii_hexdigit());
                if looks_hex {
                    self.palette.parse(format!("#{text}"))
                } else {
                    self.palette.parse(text)
                }
            }
            TextField::Red => channel(ColorChange::Red),
            TextField::Green => channel(ColorChange::Green),
            TextField::Blue => channel(ColorChange::Blue),
        }
    }

    /// Fold the draft of `field` into the preview. `false` if it did not parse.
    fn fold_draft(&mut self, field: TextField) -> bool {
        let i = field.index();
        let Some(text) = self.drafts.text[i].clone() else {
            return true;
        };
        match self.parse_field(field, &text) {
            Ok(color) => {
                self.drafts.text[i] = None;
                self.drafts.invalid[i] = false;
                self.preview = Some(color);
                true
            }
            Err(err) => {
                tracing::debug!(field = field.label(), %err, "rejected text input");
                self.drafts.invalid[i] = true;
                false
            }
        }
    }

    /// Enter or focus loss on `field`. Emits in immediate mode; in deferred
    /// mode only the preview changes.
    pub fn confirm_text(&mut self, field: TextField) -> Option<Color> {
        if self.drafts.text[field.index()].is_none() || !self.fold_draft(field) {
            return None;
        }
        match self.commit {
            CommitMode::Immediate => {
                let color = self.preview.take()?;
                self.emit(color)
            }
            CommitMode::Deferred => None,
        }
    }

    /// The explicit commit action: fold every pending draft and emit the
    /// result once. Nothing pending emits nothing.
    pub fn commit(&mut self) -> Option<Color> {
        for field in TextField::ALL {
            self.fold_draft(field);
        }
        let color = self.preview.take()?;
        self.emit(color)
    }

    /// Palette clicks commit immediately in every mode.
    pub fn select_palette(&mut self, name: &str) -> Result<Color, ColorError> {
        let color = self.palette.color(name)?;
        self.discard_pending();
        self.emit(color.clone());
        Ok(color)
    }

    /// Gradient cursor position for the displayed color inside `frame`.
    pub fn gradient_cursor(&self, frame: &GeometryFrame) -> Point {
        let [_, s, v] = self.color().hsv();
        let (u, v) = geometry::unit_from_saturation_value(s, v);
        geometry::unit_to_pixel_2d(u, v, frame)
    }

    /// Background of the gradient: the displayed hue at full saturation/value.
    pub fn gradient_hue_rgb(&self) -> [u8; 3] {
        self.color().hue_rgb()
    }

    pub fn hue_unit(&self) -> f64 {
        geometry::unit_from_hue(self.color().hsv()[0])
    }

    pub fn alpha_unit(&self) -> f64 {
        geometry::unit_from_alpha(self.color().alpha())
    }

    /// Hue slider fill and thumb offset in percent.
    pub fn hue_percent(&self) -> u16 {
        geometry::thumb_percent(self.hue_unit())
    }

    /// Alpha slider fill and thumb offset in percent.
    pub fn alpha_percent(&self) -> u16 {
        geometry::thumb_percent(self.alpha_unit())
    }
}

/// A [`ColorBoxState`] wired to an `on_change` callback.
pub struct ColorBox {
    state: ColorBoxState,
    on_change: Option<Box<dyn FnMut(&Color)>>,
}

impl fmt::Debug for ColorBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorBox")
            .field("state", &self.state)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl ColorBox {
    pub fn new(config: ColorBoxConfig) -> Self {
        Self {
            state: ColorBoxState::new(config),
            on_change: None,
        }
    }

    pub fn on_change(mut self, f: impl FnMut(&Color) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn state(&self) -> &ColorBoxState {
        &self.state
    }

    fn dispatch(&mut self, emitted: Option<Color>) {
        if let (Some(color), Some(cb)) = (emitted, self.on_change.as_mut()) {
            cb(&color);
        }
    }

    pub fn set_value(&mut self, input: impl Into<ColorInput>) -> Result<(), ColorError> {
        self.state.set_value(input)
    }

    pub fn pointer_down(&mut self, surface: Surface, event: PointerEvent, frame: GeometryFrame) {
        let emitted = self.state.pointer_down(surface, event, frame);
        self.dispatch(emitted);
    }

    pub fn pointer_move(&mut self, surface: Surface, event: PointerEvent) {
        let emitted = self.state.pointer_move(surface, event);
        self.dispatch(emitted);
    }

    pub fn pointer_up(&mut self, surface: Surface, event: PointerEvent) {
        let emitted = self.state.pointer_up(surface, event);
        self.dispatch(emitted);
    }

    pub fn edit_text(&mut self, field: TextField, text: &str) {
        self.state.edit_text(field, text);
    }

    pub fn confirm_text(&mut self, field: TextField) {
        let emitted = self.state.confirm_text(field);
        self.dispatch(emitted);
    }

    pub fn commit(&mut self) {
        let emitted = self.state.commit();
        self.dispatch(emitted);
    }

    pub fn select_palette(&mut self, name: &str) -> Result<(), ColorError> {
        let color = self.state.select_palette(name)?;
        self.dispatch(Some(color));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> GeometryFrame {
        GeometryFrame::new(22.0, 90.0, 308.0, 116.0)
    }

    fn uncontrolled(default: &str) -> ColorBoxState {
        ColorBoxState::new(ColorBoxConfig::uncontrolled(default))
    }

    #[test]
    fn seeds_from_default_value() {
        let state = uncontrolled("#830A0A7D");
        assert_eq!(state.text_value(TextField::Hex), "830A0A7D");
        assert_eq!(state.text_value(TextField::Red), "131");
        assert_eq!(state.text_value(TextField::Green), "10");
        assert_eq!(state.text_value(TextField::Blue), "10");
        assert_eq!(state.gradient_hue_rgb(), [255, 0, 0]);
        assert_eq!(state.hue_percent(), 0);
        assert_eq!(state.alpha_percent(), 49);
    }

    #[test]
    fn unparseable_seed_falls_back_to_default_color() {
        let state = uncontrolled("#12345");
        assert_eq!(state.color().hex(), "808080");
        let state = ColorBoxState::new(ColorBoxConfig::default());
        assert_eq!(state.color().name(), Some("gray"));
    }

    #[test]
    fn gradient_cursor_follows_saturation_and_value() {
        let state = uncontrolled("#830A0A");
        let p = state.gradient_cursor(&GeometryFrame::from_size(308.0, 116.0));
        assert!((p.x - 308.0 * 0.92).abs() < 1e-9);
        assert!((p.y - 116.0 * 0.49).abs() < 1e-9);
    }

    #[test]
    fn pointer_down_without_position_arms_drag_silently() {
        let mut state = uncontrolled("#7A0E30");
        assert_eq!(state.pointer_down(Surface::Gradient, PointerEvent::without_position(), frame()), None);
        assert!(state.is_dragging(Surface::Gradient));
        assert_eq!(state.color().hex(), "7A0E30");
    }

    #[test]
    fn pointer_down_with_position_only_previews() {
        let mut state = uncontrolled("#7A0E30");
        let emitted = state.pointer_down(Surface::Gradient, PointerEvent::at(22.0, 90.0).pressed(), frame());
        assert_eq!(emitted, None);
        assert_eq!(state.color().hex(), "FFFFFF");
        assert_eq!(state.committed().hex(), "7A0E30");

        let moved = state.pointer_move(Surface::Gradient, PointerEvent::at(330.0, 206.0).pressed());
        assert_eq!(moved.map(|c| c.hex().to_string()).as_deref(), Some("000000"));
    }

    #[test]
    fn slider_moves_preview_and_release_emits_once() {
        let mut state = uncontrolled("red");
        let f = GeometryFrame::from_size(360.0, 16.0);
        assert_eq!(state.pointer_down(Surface::Hue, PointerEvent::at(120.0, 8.0).pressed(), f), None);
        assert_eq!(state.color().rgb(), [0, 255, 0]);
        assert_eq!(state.committed().rgb(), [255, 0, 0]);
        assert_eq!(state.pointer_move(Surface::Hue, PointerEvent::at(240.0, 8.0).pressed()), None);
        let emitted = state.pointer_up(Surface::Hue, PointerEvent::without_position()).unwrap();
        assert_eq!(emitted.name(), Some("blue"));
        assert_eq!(state.pointer_up(Surface::Hue, PointerEvent::without_position()), None);
    }

    #[test]
    fn alpha_slider_edges() {
        let mut state = uncontrolled("red");
        let f = GeometryFrame::from_size(100.0, 16.0);
        state.pointer_down(Surface::Alpha, PointerEvent::at(500.0, 8.0).pressed(), f);
        let opaque = state.pointer_up(Surface::Alpha, PointerEvent::without_position()).unwrap();
        assert_eq!(opaque.alpha(), None);
        assert_eq!(opaque.name(), Some("red"));

        state.pointer_down(Surface::Alpha, PointerEvent::at(-5.0, 8.0).pressed(), f);
        let clear = state.pointer_up(Surface::Alpha, PointerEvent::without_position()).unwrap();
        assert_eq!(clear.alpha(), Some(0.0));
        assert_eq!(clear.hex(), "FF000000");
        assert_eq!(state.alpha_percent(), 0);
    }

    #[test]
    fn deferred_drag_waits_for_commit() {
        let mut state = ColorBoxState::new(ColorBoxConfig::uncontrolled("red").deferred(true));
        state.pointer_down(Surface::Gradient, PointerEvent::at(22.0, 90.0).pressed(), frame());
        assert_eq!(state.pointer_up(Surface::Gradient, PointerEvent::without_position()), None);
        assert!(state.has_pending());
        assert_eq!(state.color().name(), Some("white"));
        assert_eq!(state.committed().name(), Some("red"));
        assert_eq!(state.commit().and_then(|c| c.name().map(str::to_string)).as_deref(), Some("white"));
        assert_eq!(state.commit(), None);
    }

    #[test]
    fn invalid_text_keeps_color_and_flags_field() {
        let mut state = uncontrolled("red");
        state.edit_text(TextField::Hex, "12345");
        assert_eq!(state.confirm_text(TextField::Hex), None);
        assert!(state.is_invalid(TextField::Hex));
        assert_eq!(state.text_value(TextField::Hex), "12345");
        assert_eq!(state.color().hex(), "FF0000");
        state.edit_text(TextField::Hex, "00F");
        assert!(!state.is_invalid(TextField::Hex));
        let blue = state.confirm_text(TextField::Hex).unwrap();
        assert_eq!(blue.name(), Some("blue"));
        assert_eq!(state.text_value(TextField::Hex), "0000FF");
    }

    #[test]
    fn channel_fields_clamp_like_number_inputs() {
        let mut state = uncontrolled("black");
        state.edit_text(TextField::Red, "300");
        let c = state.confirm_text(TextField::Red).unwrap();
        assert_eq!(c.rgb(), [255, 0, 0]);
        state.edit_text(TextField::Green, "abc");
        assert_eq!(state.confirm_text(TextField::Green), None);
        assert!(state.is_invalid(TextField::Green));
    }

    #[test]
    fn editing_back_to_current_text_clears_draft() {
        let mut state = uncontrolled("red");
        state.edit_text(TextField::Red, "12");
        assert!(state.has_pending());
        state.edit_text(TextField::Red, "255");
        assert!(!state.has_pending());
        assert_eq!(state.confirm_text(TextField::Red), None);
    }

    #[test]
    fn controlled_mode_only_proposes() {
        let mut state = ColorBoxState::new(ColorBoxConfig::controlled("darkblue"));
        let emitted = state.select_palette("red");
        assert!(matches!(emitted, Err(ColorError::UnknownPaletteEntry(_))));
        state.edit_text(TextField::Hex, "FF0000");
        let proposal = state.confirm_text(TextField::Hex).unwrap();
        assert_eq!(proposal.name(), Some("red"));
        assert_eq!(state.color().name(), Some("darkblue"));
        state.set_value("red").unwrap();
        assert_eq!(state.color().name(), Some("red"));
    }

    #[test]
    fn external_change_discards_drag_and_drafts() {
        let mut state = ColorBoxState::new(ColorBoxConfig::controlled("red").deferred(true));
        state.edit_text(TextField::Blue, "200");
        state.pointer_down(Surface::Gradient, PointerEvent::at(100.0, 100.0).pressed(), frame());
        assert!(state.has_pending());
        state.set_value("#00FF00").unwrap();
        assert!(!state.has_pending());
        assert!(!state.is_dragging(Surface::Gradient));
        assert_eq!(state.text_value(TextField::Blue), "0");
        assert_eq!(state.pointer_move(Surface::Gradient, PointerEvent::at(50.0, 50.0).pressed()), None);
        assert_eq!(state.pointer_up(Surface::Gradient, PointerEvent::at(50.0, 50.0)), None);
    }

    #[test]
    fn echo_of_emitted_value_keeps_drag_alive() {
        let mut state = ColorBoxState::new(ColorBoxConfig::controlled("red"));
        state.pointer_down(Surface::Gradient, PointerEvent::without_position().pressed(), frame());
        let sent = state
            .pointer_move(Surface::Gradient, PointerEvent::at(22.0, 90.0).pressed())
            .unwrap();
        state.set_value(sent).unwrap();
        assert!(state.is_dragging(Surface::Gradient));
        assert_eq!(state.committed().name(), Some("white"));
    }

    #[test]
    fn debug_output_names_both_types() {
        let cb = ColorBox::new(ColorBoxConfig::uncontrolled("red")).on_change(|_| {});
        let out = format!("{cb:?}");
        assert!(out.starts_with("ColorBox {"));
        assert!(out.contains("ColorBoxState"));
        assert!(out.contains("on_change: true"));
    }

    #[test]
    fn rejected_external_value_changes_nothing() {
        let mut state = ColorBoxState::new(ColorBoxConfig::controlled("red"));
        assert!(state.set_value("nope").is_err());
        assert_eq!(state.color().name(), Some("red"));
    }
}

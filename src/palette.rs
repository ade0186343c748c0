//! Palette: an ordered mapping from swatch name to color notation.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::{Color, ColorInput};
use crate::error::ColorError;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    input: ColorInput,
    /// `None` when `input` does not parse; such entries get no swatch.
    color: Option<Color>,
}

/// Named swatches offered next to the picker, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    entries: Vec<Entry>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. An entry whose color does not parse is kept (so a
    /// lookup can report it) but never rendered.
    pub fn with(mut self, name: impl Into<String>, input: impl Into<ColorInput>) -> Self {
        self.push(name.into(), input.into());
        self
    }

    fn push(&mut self, name: String, input: ColorInput) {
        let color = match Color::parse(input.clone()) {
            Ok(c) => Some(c.with_name(Some(name.clone())).with_raw(input.clone())),
            Err(err) => {
                tracing::warn!(%name, %err, "palette entry does not parse");
                None
            }
        };
        self.entries.retain(|e| e.name != name);
        self.entries.push(Entry { name, input, color });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that parse, in order, as `(name, color)`.
    pub fn swatches(&self) -> impl Iterator<Item = (&str, &Color)> {
        self.entries
            .iter()
            .filter_map(|e| e.color.as_ref().map(|c| (e.name.as_str(), c)))
    }

    /// The color of the entry called `name`, named after the entry and with
    /// `raw` set to the entry's notation.
    pub fn color(&self, name: &str) -> Result<Color, ColorError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ColorError::UnknownPaletteEntry(name.to_string()))?;
        entry
            .color
            .clone()
            .ok_or_else(|| ColorError::InvalidColorFormat(format!("{:?}", entry.input)))
    }

    /// Parse `input`, resolving palette keys first, then naming the result
    /// after a matching palette entry if there is one.
    pub fn parse(&self, input: impl Into<ColorInput>) -> Result<Color, ColorError> {
        let input = input.into();
        if let ColorInput::Text(key) = &input {
            if self.entries.iter().any(|e| &e.name == key) {
                return self.color(key);
            }
        }
        Color::parse(input).map(|c| self.annotate(c))
    }

    /// Rename `color` after the first palette entry painting the same pixels.
    ///
    /// Colors matching no entry keep their current name.
    pub fn annotate(&self, color: Color) -> Color {
        let matching = self
            .swatches()
            .find(|(_, c)| c.same_color(&color))
            .map(|(name, _)| name.to_string());
        match matching {
            Some(name) => color.with_name(Some(name)),
            None => color,
        }
    }
}

impl<K: Into<String>, V: Into<ColorInput>> FromIterator<(K, V)> for Palette {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut palette = Palette::new();
        for (name, input) in iter {
            palette.push(name.into(), input.into());
        }
        palette
    }
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(&e.name, &e.input)?;
        }
        map.end()
    }
}

struct PaletteVisitor;

impl<'de> Visitor<'de> for PaletteVisitor {
    type Value = Palette;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from swatch name to color")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Palette, A::Error> {
        let mut palette = Palette::new();
        while let Some((name, input)) = access.next_entry::<String, ColorInput>()? {
            palette.push(name, input);
        }
        Ok(palette)
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PaletteVisitor)
    }
}

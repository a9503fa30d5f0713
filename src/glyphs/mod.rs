//! The BQN glyph table.
//!
//! One static entry per glyph: the literal to insert, the key that
//! produces it after the mod key, a paired closer for delimiters, a short
//! hint and a documentation link. Every entry carries the [`TokenClass`]
//! the tokenizer gives it, so the glyph bar and the code view agree.

mod table;

use serde::Serialize;

use crate::highlight::TokenClass;

pub use table::GLYPHS;

/// Where the full keyboard layout is documented.
pub const KEYMAP_URL: &str = "https://mlochbaum.github.io/BQN/keymap.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Glyph {
    /// Text inserted for this glyph.
    pub glyph: &'static str,
    /// Key that produces the glyph after the mod key, if any.
    pub key: Option<char>,
    /// Closing delimiter used when wrapping a selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paren: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
    #[serde(rename = "type")]
    pub class: TokenClass,
}

impl Glyph {
    pub(crate) const fn new(glyph: &'static str, key: Option<char>, class: TokenClass) -> Self {
        Self {
            glyph,
            key,
            paren: None,
            hint: None,
            help: None,
            class,
        }
    }

    pub(crate) const fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub(crate) const fn help(mut self, url: &'static str) -> Self {
        self.help = Some(url);
        self
    }

    pub(crate) const fn paren(mut self, closing: &'static str) -> Self {
        self.paren = Some(closing);
        self
    }

    /// Tooltip text: the hint, then the key sequence that types the glyph.
    pub fn hint_text(&self) -> Option<String> {
        let hint = self.hint?;
        Some(match self.key {
            Some(key) => format!("{hint}\n\\{key}"),
            None => hint.to_string(),
        })
    }

    /// Whether the glyph bar shows this entry.
    ///
    /// Keyless entries are plain ASCII and only shown with `show_extra`.
    pub fn visible(&self, show_extra: bool) -> bool {
        self.class != TokenClass::Unused && (show_extra || self.key.is_some())
    }
}

/// The glyph typed by `key` after the mod key.
pub fn by_key(key: char) -> Option<&'static Glyph> {
    GLYPHS.iter().find(|glyph| glyph.key == Some(key))
}

/// The entry whose literal is `literal`.
pub fn by_literal(literal: &str) -> Option<&'static Glyph> {
    GLYPHS.iter().find(|glyph| glyph.glyph == literal)
}

/// The entry for a typed character.
pub fn by_char(ch: char) -> Option<&'static Glyph> {
    let mut buf = [0; 4];
    by_literal(ch.encode_utf8(&mut buf))
}

/// Entries shown in the glyph bar, in table order.
pub fn visible(show_extra: bool) -> impl Iterator<Item = &'static Glyph> {
    GLYPHS.iter().filter(move |glyph| glyph.visible(show_extra))
}

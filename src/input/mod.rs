//! Keys, key bindings and the glyph input mode.
//!
//! Keys are named the way browsers name `KeyboardEvent.key`, so saved key
//! bindings read the same everywhere: a printable key is its character,
//! other keys are `Enter`, `Tab`, `Escape` and so on.

mod keymap;
mod terminal;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glyphs::{self, Glyph};

pub use keymap::{KeyAction, KeyBind};
pub use terminal::key_press_from_event;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error("no key in binding: {0}")]
    MissingKey(String),
    #[error("more than one key in binding: {0}")]
    MultipleKeys(String),
    #[error("unknown key action: {0}")]
    UnknownAction(String),
}

/// Keys that only modify other keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Shift,
    Control,
    Alt,
    AltGraph,
    CapsLock,
    Fn,
    FnLock,
    Meta,
    NumLock,
    ScrollLock,
    Symbol,
    SymbolLock,
    Hyper,
    Super,
}

impl ModifierKey {
    pub const ALL: [Self; 14] = [
        Self::Shift,
        Self::Control,
        Self::Alt,
        Self::AltGraph,
        Self::CapsLock,
        Self::Fn,
        Self::FnLock,
        Self::Meta,
        Self::NumLock,
        Self::ScrollLock,
        Self::Symbol,
        Self::SymbolLock,
        Self::Hyper,
        Self::Super,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Shift => "Shift",
            Self::Control => "Control",
            Self::Alt => "Alt",
            Self::AltGraph => "AltGraph",
            Self::CapsLock => "CapsLock",
            Self::Fn => "Fn",
            Self::FnLock => "FnLock",
            Self::Meta => "Meta",
            Self::NumLock => "NumLock",
            Self::ScrollLock => "ScrollLock",
            Self::Symbol => "Symbol",
            Self::SymbolLock => "SymbolLock",
            Self::Hyper => "Hyper",
            Self::Super => "Super",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
    Modifier(ModifierKey),
}

impl Key {
    pub const fn is_modifier(&self) -> bool {
        matches!(self, Self::Modifier(_))
    }

    /// The character this key types, if any.
    pub const fn char(&self) -> Option<char> {
        match self {
            Self::Char(ch) => Some(*ch),
            _ => None,
        }
    }

    fn named(name: &str) -> Option<Self> {
        let key = match name {
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Escape" => Self::Escape,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Insert" => Self::Insert,
            _ => {
                if let Some(modifier) = ModifierKey::ALL.into_iter().find(|m| m.name() == name) {
                    return Some(Self::Modifier(modifier));
                }
                let number = name.strip_prefix('F')?.parse::<u8>().ok()?;
                return (1..=24).contains(&number).then_some(Self::F(number));
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{ch}"),
            Self::Enter => f.write_str("Enter"),
            Self::Tab => f.write_str("Tab"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Delete => f.write_str("Delete"),
            Self::Escape => f.write_str("Escape"),
            Self::Left => f.write_str("ArrowLeft"),
            Self::Right => f.write_str("ArrowRight"),
            Self::Up => f.write_str("ArrowUp"),
            Self::Down => f.write_str("ArrowDown"),
            Self::Home => f.write_str("Home"),
            Self::End => f.write_str("End"),
            Self::PageUp => f.write_str("PageUp"),
            Self::PageDown => f.write_str("PageDown"),
            Self::Insert => f.write_str("Insert"),
            Self::F(number) => write!(f, "F{number}"),
            Self::Modifier(modifier) => f.write_str(modifier.name()),
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(ch));
        }
        Self::named(s).ok_or_else(|| KeyParseError::UnknownKey(s.to_string()))
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// One key press with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: false,
                alt: false,
                shift: false,
                meta: false,
            },
        }
    }

    pub const fn char(ch: char) -> Self {
        Self::new(Key::Char(ch))
    }

    #[must_use]
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    #[must_use]
    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    #[must_use]
    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    #[must_use]
    pub const fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }
}

impl FromStr for KeyPress {
    type Err = KeyParseError;

    /// Parse `ctrl+shift+s` style notation. A lone `+` is the plus key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "+" {
            return Ok(Self::char('+'));
        }
        let mut modifiers = Modifiers::default();
        let mut key = None;
        for part in s.split('+') {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                _ => {
                    if key.is_some() {
                        return Err(KeyParseError::MultipleKeys(s.to_string()));
                    }
                    let parsed = match part {
                        "space" => Key::Char(' '),
                        "plus" => Key::Char('+'),
                        _ => part.parse()?,
                    };
                    key = Some(parsed);
                }
            }
        }
        let key = key.ok_or_else(|| KeyParseError::MissingKey(s.to_string()))?;
        Ok(Self { key, modifiers })
    }
}

/// Parse a whitespace-separated list of key presses.
pub fn parse_key_sequence(input: &str) -> Result<Vec<KeyPress>, KeyParseError> {
    input.split_whitespace().map(str::parse).collect()
}

/// How the mod key behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModKeyBehavior {
    /// The mod key applies to the next key only.
    #[default]
    Momentary,
    /// The mod key latches until pressed again.
    Toggle,
}

/// Whether the next key is read as a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    GlyphPending,
}

impl InputMode {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::GlyphPending)
    }

    /// The mod key was pressed. Returns the next mode and whether the press
    /// was consumed.
    ///
    /// A second press while a momentary mod is pending is not consumed; it
    /// goes on to [`InputMode::on_key`] like any other key.
    pub const fn on_mod_key(self, behavior: ModKeyBehavior) -> (Self, bool) {
        match (self, behavior) {
            (Self::Normal, _) => (Self::GlyphPending, true),
            (Self::GlyphPending, ModKeyBehavior::Toggle) => (Self::Normal, true),
            (Self::GlyphPending, ModKeyBehavior::Momentary) => (Self::GlyphPending, false),
        }
    }

    /// Any other key was pressed. Returns the next mode and the glyph the
    /// key types, if the mode is pending and the key has one.
    ///
    /// A momentary mod ends on the first key that is not a modifier,
    /// whether or not it matched a glyph.
    pub fn on_key(self, key: &Key, behavior: ModKeyBehavior) -> (Self, Option<&'static Glyph>) {
        if self == Self::Normal {
            return (self, None);
        }
        let next = match behavior {
            ModKeyBehavior::Momentary if !key.is_modifier() => Self::Normal,
            _ => Self::GlyphPending,
        };
        (next, key.char().and_then(glyphs::by_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Key names ---

    #[test]
    fn test_single_character_keys() {
        assert_eq!("x".parse::<Key>(), Ok(Key::Char('x')));
        assert_eq!("𝕩".parse::<Key>(), Ok(Key::Char('𝕩')));
        assert_eq!(Key::Char('\\').to_string(), "\\");
    }

    #[test]
    fn test_named_keys_round_trip_through_names() {
        for name in ["Enter", "Escape", "ArrowLeft", "F12", "Shift", "AltGraph"] {
            let key: Key = name.parse().unwrap();
            assert_eq!(key.to_string(), name);
        }
    }

    #[test]
    fn test_unknown_key_name_is_an_error() {
        assert_eq!(
            "Hyperspace".parse::<Key>(),
            Err(KeyParseError::UnknownKey("Hyperspace".to_string()))
        );
        assert!("F99".parse::<Key>().is_err());
    }

    #[test]
    fn test_key_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Key::Enter).unwrap(), "\"Enter\"");
        let key: Key = serde_json::from_str("\"s\"").unwrap();
        assert_eq!(key, Key::Char('s'));
    }

    // --- Key press notation ---

    #[test]
    fn test_parse_key_press_with_modifiers() {
        let press: KeyPress = "ctrl+/".parse().unwrap();
        assert_eq!(press, KeyPress::char('/').ctrl());
        let press: KeyPress = "shift+Enter".parse().unwrap();
        assert_eq!(press, KeyPress::new(Key::Enter).shift());
    }

    #[test]
    fn test_parse_key_press_plain_letters() {
        assert_eq!("s".parse::<KeyPress>(), Ok(KeyPress::char('s')));
        assert_eq!("ctrl+s".parse::<KeyPress>(), Ok(KeyPress::char('s').ctrl()));
        assert_eq!("+".parse::<KeyPress>(), Ok(KeyPress::char('+')));
        assert_eq!("space".parse::<KeyPress>(), Ok(KeyPress::char(' ')));
    }

    #[test]
    fn test_parse_key_press_errors() {
        assert!(matches!(
            "ctrl+".parse::<KeyPress>(),
            Err(KeyParseError::UnknownKey(_) | KeyParseError::MissingKey(_))
        ));
        assert_eq!(
            "x+y".parse::<KeyPress>(),
            Err(KeyParseError::MultipleKeys("x+y".to_string()))
        );
    }

    #[test]
    fn test_parse_key_sequence() {
        let keys = parse_key_sequence("\\ x shift+Tab").unwrap();
        assert_eq!(
            keys,
            vec![
                KeyPress::char('\\'),
                KeyPress::char('x'),
                KeyPress::new(Key::Tab).shift(),
            ]
        );
    }

    // --- Input mode ---

    #[test]
    fn test_momentary_mod_applies_to_one_key() {
        let (mode, captured) = InputMode::Normal.on_mod_key(ModKeyBehavior::Momentary);
        assert!(captured);
        assert_eq!(mode, InputMode::GlyphPending);

        let (mode, glyph) = mode.on_key(&Key::Char('x'), ModKeyBehavior::Momentary);
        assert_eq!(mode, InputMode::Normal);
        assert_eq!(glyph.map(|glyph| glyph.glyph), Some("𝕩"));

        let (_, glyph) = mode.on_key(&Key::Char('x'), ModKeyBehavior::Momentary);
        assert!(glyph.is_none());
    }

    #[test]
    fn test_momentary_mod_resets_on_unmapped_key() {
        let (mode, glyph) = InputMode::GlyphPending.on_key(&Key::Enter, ModKeyBehavior::Momentary);
        assert_eq!(mode, InputMode::Normal);
        assert!(glyph.is_none());
    }

    #[test]
    fn test_momentary_mod_survives_modifier_keys() {
        let shift = Key::Modifier(ModifierKey::Shift);
        let (mode, glyph) = InputMode::GlyphPending.on_key(&shift, ModKeyBehavior::Momentary);
        assert_eq!(mode, InputMode::GlyphPending);
        assert!(glyph.is_none());
    }

    #[test]
    fn test_momentary_double_press_is_not_captured() {
        let (mode, captured) = InputMode::GlyphPending.on_mod_key(ModKeyBehavior::Momentary);
        assert!(!captured);
        let (mode, glyph) = mode.on_key(&Key::Char('\\'), ModKeyBehavior::Momentary);
        assert_eq!(mode, InputMode::Normal);
        assert!(glyph.is_none());
    }

    #[test]
    fn test_toggle_mod_latches() {
        let behavior = ModKeyBehavior::Toggle;
        let (mode, _) = InputMode::Normal.on_mod_key(behavior);
        let (mode, first) = mode.on_key(&Key::Char('w'), behavior);
        let (mode, second) = mode.on_key(&Key::Char('q'), behavior);
        assert_eq!(first.map(|glyph| glyph.glyph), Some("𝕨"));
        assert_eq!(second.map(|glyph| glyph.glyph), Some("⌽"));
        assert!(mode.is_pending());

        let (mode, captured) = mode.on_mod_key(behavior);
        assert!(captured);
        assert_eq!(mode, InputMode::Normal);
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Key, KeyParseError, KeyPress, Modifiers};

/// Editor actions that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyAction {
    GlyphMod,
    Run,
    Save,
    Open,
    OpenInput,
    CommentLine,
    FoldOutputs,
    FoldGlyphs,
}

impl KeyAction {
    pub const ALL: [Self; 8] = [
        Self::GlyphMod,
        Self::Run,
        Self::Save,
        Self::Open,
        Self::OpenInput,
        Self::CommentLine,
        Self::FoldOutputs,
        Self::FoldGlyphs,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::GlyphMod => "glyphMod",
            Self::Run => "run",
            Self::Save => "save",
            Self::Open => "open",
            Self::OpenInput => "openInput",
            Self::CommentLine => "commentLine",
            Self::FoldOutputs => "foldOutputs",
            Self::FoldGlyphs => "foldGlyphs",
        }
    }

    /// The binding used when the settings do not override it.
    pub const fn default_bind(self) -> Option<KeyBind> {
        let bind = match self {
            Self::GlyphMod => KeyBind::new(Key::Char('\\')),
            Self::Run => KeyBind::new(Key::Enter).shift(),
            Self::Save => KeyBind::new(Key::Char('s')).ctrl(),
            Self::Open => KeyBind::new(Key::Char('o')).ctrl(),
            Self::OpenInput => KeyBind::new(Key::Char('i')).ctrl(),
            Self::CommentLine => KeyBind::new(Key::Char('/')).ctrl(),
            Self::FoldOutputs => KeyBind::new(Key::Escape),
            Self::FoldGlyphs => return None,
        };
        Some(bind)
    }
}

impl FromStr for KeyAction {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| KeyParseError::UnknownAction(s.to_string()))
    }
}

/// A key plus the exact set of modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBind {
    pub key: Key,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ctrl: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub alt: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub shift: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub meta: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl KeyBind {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    #[must_use]
    pub const fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub const fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    const fn modifiers(&self) -> Modifiers {
        Modifiers {
            ctrl: self.ctrl,
            alt: self.alt,
            shift: self.shift,
            meta: self.meta,
        }
    }

    /// Same key, and exactly the same modifiers held.
    pub fn matches(&self, press: &KeyPress) -> bool {
        self.key == press.key && self.modifiers() == press.modifiers
    }
}

impl From<KeyPress> for KeyBind {
    fn from(press: KeyPress) -> Self {
        Self {
            key: press.key,
            ctrl: press.modifiers.ctrl,
            alt: press.modifiers.alt,
            shift: press.modifiers.shift,
            meta: press.modifiers.meta,
        }
    }
}

impl FromStr for KeyBind {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<KeyPress>().map(Self::from)
    }
}

impl fmt::Display for KeyBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (held, name) in [
            (self.ctrl, "ctrl"),
            (self.alt, "alt"),
            (self.shift, "shift"),
            (self.meta, "meta"),
        ] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        match self.key {
            Key::Char(' ') => f.write_str("space"),
            Key::Char('+') if self.modifiers() != Modifiers::default() => f.write_str("plus"),
            key => write!(f, "{key}"),
        }
    }
}

//! User settings.
//!
//! Settings are a fixed tree of typed fields. Each boolean can also be named
//! by a [`SettingKey`], which is how the command line and the key handler
//! address them. Saved settings only need to hold what differs from the
//! defaults: missing fields fall back when loading.

mod store;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{KeyAction, KeyBind, KeyPress, ModKeyBehavior};

pub use store::{FlushDebouncer, JsonFileStore, MemoryStore, Persisted, Store, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlyphSettings {
    /// Show the glyph bar.
    pub show: bool,
    /// The mod key latches instead of applying to one key.
    pub mod_toggle: bool,
    /// Highlight the glyph bar while the mod key is active.
    pub mod_highlight: bool,
    /// Show key hints on glyphs while the mod key is active.
    pub mod_hints: bool,
    /// Also show glyphs that are plain ASCII.
    pub show_extra: bool,
}

impl Default for GlyphSettings {
    fn default() -> Self {
        Self {
            show: true,
            mod_toggle: false,
            mod_highlight: false,
            mod_hints: true,
            show_extra: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputSettings {
    pub show: bool,
    /// Keep earlier outputs when running again.
    pub persist: bool,
    pub wrap: bool,
    pub multimedia: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            show: true,
            persist: false,
            wrap: false,
            multimedia: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    pub line_numbers: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub glyphs: GlyphSettings,
    pub output: OutputSettings,
    pub editor: EditorSettings,
    /// Bindings that differ from [`KeyAction::default_bind`]. `None`
    /// unbinds the action.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub key_binds: BTreeMap<KeyAction, Option<KeyBind>>,
}

impl Settings {
    /// The key bound to `action`, if any.
    pub fn key_bind(&self, action: KeyAction) -> Option<KeyBind> {
        self.key_binds
            .get(&action)
            .copied()
            .unwrap_or_else(|| action.default_bind())
    }

    /// Bind `action` to `bind`, or unbind it with `None`.
    pub fn set_key_bind(&mut self, action: KeyAction, bind: Option<KeyBind>) {
        if bind == action.default_bind() {
            self.key_binds.remove(&action);
        } else {
            self.key_binds.insert(action, bind);
        }
    }

    /// The first action, in [`KeyAction::ALL`] order, bound to `press`.
    pub fn action_for(&self, press: &KeyPress) -> Option<KeyAction> {
        KeyAction::ALL.into_iter().find(|&action| {
            self.key_bind(action)
                .is_some_and(|bind| bind.matches(press))
        })
    }

    pub const fn mod_key_behavior(&self) -> ModKeyBehavior {
        if self.glyphs.mod_toggle {
            ModKeyBehavior::Toggle
        } else {
            ModKeyBehavior::Momentary
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingError {
    #[error("unknown setting: {0}")]
    UnknownSetting(String),
}

/// One boolean setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    GlyphsShow,
    GlyphsModToggle,
    GlyphsModHighlight,
    GlyphsModHints,
    GlyphsShowExtra,
    OutputShow,
    OutputPersist,
    OutputWrap,
    OutputMultimedia,
    EditorLineNumbers,
}

impl SettingKey {
    pub const ALL: [Self; 10] = [
        Self::GlyphsShow,
        Self::GlyphsModToggle,
        Self::GlyphsModHighlight,
        Self::GlyphsModHints,
        Self::GlyphsShowExtra,
        Self::OutputShow,
        Self::OutputPersist,
        Self::OutputWrap,
        Self::OutputMultimedia,
        Self::EditorLineNumbers,
    ];

    /// Dotted path matching the serialized layout, e.g. `glyphs.modToggle`.
    pub const fn path(self) -> &'static str {
        match self {
            Self::GlyphsShow => "glyphs.show",
            Self::GlyphsModToggle => "glyphs.modToggle",
            Self::GlyphsModHighlight => "glyphs.modHighlight",
            Self::GlyphsModHints => "glyphs.modHints",
            Self::GlyphsShowExtra => "glyphs.showExtra",
            Self::OutputShow => "output.show",
            Self::OutputPersist => "output.persist",
            Self::OutputWrap => "output.wrap",
            Self::OutputMultimedia => "output.multimedia",
            Self::EditorLineNumbers => "editor.lineNumbers",
        }
    }

    const fn field(self, settings: &mut Settings) -> &mut bool {
        match self {
            Self::GlyphsShow => &mut settings.glyphs.show,
            Self::GlyphsModToggle => &mut settings.glyphs.mod_toggle,
            Self::GlyphsModHighlight => &mut settings.glyphs.mod_highlight,
            Self::GlyphsModHints => &mut settings.glyphs.mod_hints,
            Self::GlyphsShowExtra => &mut settings.glyphs.show_extra,
            Self::OutputShow => &mut settings.output.show,
            Self::OutputPersist => &mut settings.output.persist,
            Self::OutputWrap => &mut settings.output.wrap,
            Self::OutputMultimedia => &mut settings.output.multimedia,
            Self::EditorLineNumbers => &mut settings.editor.line_numbers,
        }
    }

    pub const fn get(self, settings: &Settings) -> bool {
        match self {
            Self::GlyphsShow => settings.glyphs.show,
            Self::GlyphsModToggle => settings.glyphs.mod_toggle,
            Self::GlyphsModHighlight => settings.glyphs.mod_highlight,
            Self::GlyphsModHints => settings.glyphs.mod_hints,
            Self::GlyphsShowExtra => settings.glyphs.show_extra,
            Self::OutputShow => settings.output.show,
            Self::OutputPersist => settings.output.persist,
            Self::OutputWrap => settings.output.wrap,
            Self::OutputMultimedia => settings.output.multimedia,
            Self::EditorLineNumbers => settings.editor.line_numbers,
        }
    }

    pub const fn set(self, settings: &mut Settings, value: bool) {
        *self.field(settings) = value;
    }

    /// Flip the setting and return its new value.
    pub const fn toggle(self, settings: &mut Settings) -> bool {
        let field = self.field(settings);
        *field = !*field;
        *field
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for SettingKey {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.path() == s)
            .ok_or_else(|| SettingError::UnknownSetting(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn test_defaults_match_editor_defaults() {
        let settings = Settings::default();
        assert!(settings.glyphs.show);
        assert!(!settings.glyphs.mod_toggle);
        assert!(settings.glyphs.mod_hints);
        assert!(settings.output.show);
        assert!(settings.output.multimedia);
        assert!(!settings.output.persist);
        assert!(!settings.editor.line_numbers);
        assert!(settings.key_binds.is_empty());
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"glyphs":{"modToggle":true},"output":{"persist":true}}"#)
                .unwrap();
        assert!(settings.glyphs.mod_toggle);
        assert!(settings.glyphs.show);
        assert!(settings.output.persist);
        assert!(settings.output.show);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["glyphs"]["showExtra"], false);
        assert_eq!(json["editor"]["lineNumbers"], false);
        assert!(json.get("keyBinds").is_none());
    }

    #[test]
    fn test_setting_key_paths_parse_back() {
        for key in SettingKey::ALL {
            assert_eq!(key.path().parse::<SettingKey>(), Ok(key));
        }
        assert_eq!(
            "glyphs.nope".parse::<SettingKey>(),
            Err(SettingError::UnknownSetting("glyphs.nope".to_string()))
        );
    }

    #[test]
    fn test_setting_key_paths_follow_json_layout() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        for key in SettingKey::ALL {
            let (group, field) = key.path().split_once('.').unwrap();
            assert_eq!(json[group][field], key.get(&Settings::default()), "{key}");
        }
    }

    #[test]
    fn test_toggle_and_set() {
        let mut settings = Settings::default();
        assert!(!SettingKey::OutputShow.toggle(&mut settings));
        assert!(!settings.output.show);
        SettingKey::EditorLineNumbers.set(&mut settings, true);
        assert!(settings.editor.line_numbers);
    }

    #[test]
    fn test_key_bind_override_and_unbind() {
        let mut settings = Settings::default();
        let run = KeyBind::new(Key::F(5));
        settings.set_key_bind(KeyAction::Run, Some(run));
        assert_eq!(settings.key_bind(KeyAction::Run), Some(run));

        settings.set_key_bind(KeyAction::Save, None);
        assert_eq!(settings.key_bind(KeyAction::Save), None);

        settings.set_key_bind(KeyAction::Run, KeyAction::Run.default_bind());
        assert!(!settings.key_binds.contains_key(&KeyAction::Run));
    }

    #[test]
    fn test_action_for_press() {
        let settings = Settings::default();
        assert_eq!(
            settings.action_for(&KeyPress::char('/').ctrl()),
            Some(KeyAction::CommentLine)
        );
        assert_eq!(
            settings.action_for(&KeyPress::char('\\')),
            Some(KeyAction::GlyphMod)
        );
        assert_eq!(settings.action_for(&KeyPress::char('/')), None);
    }

    #[test]
    fn test_key_binds_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.set_key_bind(KeyAction::FoldGlyphs, Some(KeyBind::new(Key::F(2))));
        settings.set_key_bind(KeyAction::Open, None);
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
        assert!(json.contains(r#""foldGlyphs":{"key":"F2"}"#));
        assert!(json.contains(r#""open":null"#));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::highlight::HighlightBackground;
use crate::settings::Settings;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    /// The highlight background to force, or `None` to detect it.
    pub const fn background(self) -> Option<HighlightBackground> {
        match self {
            Self::Auto => None,
            Self::Light => Some(HighlightBackground::Light),
            Self::Dark => Some(HighlightBackground::Dark),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub mod_toggle: bool,
    pub show_extra: bool,
    pub line_numbers: bool,
    pub theme: Option<ThemeMode>,
    /// Settings file to use instead of the default one.
    pub store: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            mod_toggle: self.mod_toggle || other.mod_toggle,
            show_extra: self.show_extra || other.show_extra,
            line_numbers: self.line_numbers || other.line_numbers,
            theme: other.theme.or(self.theme),
            store: other.store.clone().or_else(|| self.store.clone()),
        }
    }

    /// Switch on the settings these flags ask for. Flags only ever turn
    /// settings on; saved settings that are already on stay on.
    pub const fn apply_to(&self, settings: &mut Settings) {
        if self.mod_toggle {
            settings.glyphs.mod_toggle = true;
        }
        if self.show_extra {
            settings.glyphs.show_extra = true;
        }
        if self.line_numbers {
            settings.editor.line_numbers = true;
        }
    }

    /// The settings file these flags point at.
    pub fn store_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(default_store_path)
    }
}

pub fn global_config_path() -> PathBuf {
    config_dir().map_or_else(local_override_path, |dir| dir.join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".bqnpadrc")
}

/// Where settings are saved unless `--store` says otherwise.
pub fn default_store_path() -> PathBuf {
    config_dir().map_or_else(
        || PathBuf::from(".bqnpad-settings.json"),
        |dir| dir.join("settings.json"),
    )
}

fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("bqnpad"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("bqnpad"),
            );
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("bqnpad"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".config").join("bqnpad"));
        }
    }

    None
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# bqnpad defaults (saved with --save)".to_string());
    if flags.mod_toggle {
        lines.push("--mod-toggle".to_string());
    }
    if flags.show_extra {
        lines.push("--show-extra".to_string());
    }
    if flags.line_numbers {
        lines.push("--line-numbers".to_string());
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.name()));
    }
    if let Some(store) = &flags.store {
        lines.push(format!("--store {}", store.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--mod-toggle" {
            flags.mod_toggle = true;
        } else if token == "--show-extra" {
            flags.show_extra = true;
        } else if token == "--line-numbers" {
            flags.line_numbers = true;
        } else if token == "--theme" {
            if let Some(next) = tokens.get(i + 1) {
                flags.theme = parse_theme(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = parse_theme(value);
        } else if token == "--store" {
            if let Some(next) = tokens.get(i + 1) {
                flags.store = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--store=") {
            flags.store = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "bqnpad".to_string(),
            "--mod-toggle".to_string(),
            "--theme".to_string(),
            "dark".to_string(),
            "--store=settings.json".to_string(),
            "highlight".to_string(),
            "prog.bqn".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.mod_toggle);
        assert!(!flags.show_extra);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.store, Some(PathBuf::from("settings.json")));
    }

    #[test]
    fn test_unknown_theme_is_dropped() {
        let flags = parse_flag_tokens(&["--theme=sepia".to_string()]);
        assert_eq!(flags.theme, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            mod_toggle: true,
            theme: Some(ThemeMode::Light),
            store: Some(PathBuf::from("file.json")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            show_extra: true,
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.mod_toggle);
        assert!(merged.show_extra);
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.store, Some(PathBuf::from("file.json")));
    }

    #[test]
    fn test_apply_to_only_turns_settings_on() {
        let mut settings = Settings::default();
        settings.editor.line_numbers = true;
        let flags = ConfigFlags {
            mod_toggle: true,
            ..ConfigFlags::default()
        };
        flags.apply_to(&mut settings);
        assert!(settings.glyphs.mod_toggle);
        assert!(settings.editor.line_numbers);
        assert!(!settings.glyphs.show_extra);
    }

    #[test]
    fn test_theme_background() {
        assert_eq!(ThemeMode::Auto.background(), None);
        assert_eq!(ThemeMode::Light.background(), Some(HighlightBackground::Light));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".bqnpadrc");
        let flags = ConfigFlags {
            mod_toggle: true,
            show_extra: true,
            line_numbers: true,
            theme: Some(ThemeMode::Dark),
            store: Some(PathBuf::from("my-settings.json")),
        };

        save_config_flags(&path, &flags).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# bqnpad defaults"));
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }
}

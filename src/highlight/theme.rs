//! Token colors.
//!
//! Uses ANSI and 256-color indexes so the palette follows the terminal's
//! own theme. A light background gets darker variants.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use ratatui::style::{Color, Modifier, Style};

use super::TokenClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BackgroundMode {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<HighlightBackground>>> = OnceLock::new();

/// The override stays usable after a panic while it was held.
fn background_override() -> MutexGuard<'static, Option<HighlightBackground>> {
    BACKGROUND_OVERRIDE
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Force a background mode, or `None` to detect it from `COLORFGBG`.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    *background_override() = mode;
}

pub fn is_light_background() -> bool {
    background_mode() == BackgroundMode::Light
}

pub(super) fn background_mode() -> BackgroundMode {
    if let Some(mode) = *background_override() {
        return match mode {
            HighlightBackground::Light => BackgroundMode::Light,
            HighlightBackground::Dark => BackgroundMode::Dark,
        };
    }
    background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return BackgroundMode::Dark;
    };

    if bg >= 7 {
        BackgroundMode::Light
    } else {
        BackgroundMode::Dark
    }
}

/// Style for a token class on the current background.
///
/// Unclassified text and values keep the terminal's default style.
pub fn style_for_class(class: Option<TokenClass>) -> Style {
    palette(class, background_mode())
}

pub(super) fn palette(class: Option<TokenClass>, mode: BackgroundMode) -> Style {
    let light = mode == BackgroundMode::Light;
    let fg = |dark: Color, light_color: Color| {
        Style::default().fg(if light { light_color } else { dark })
    };
    let Some(class) = class else {
        return Style::default();
    };
    match class {
        TokenClass::Function => fg(Color::Green, Color::Indexed(28)),
        TokenClass::Modifier => fg(Color::Magenta, Color::Indexed(90)),
        TokenClass::Modifier2 => fg(Color::Yellow, Color::Indexed(130)),
        TokenClass::Assignment | TokenClass::Separator => fg(Color::Blue, Color::Indexed(25)),
        TokenClass::Head => fg(Color::LightYellow, Color::Indexed(94)),
        TokenClass::Brace => fg(Color::LightMagenta, Color::Indexed(127)),
        TokenClass::Paren | TokenClass::Bracket | TokenClass::Ligature => {
            fg(Color::Indexed(250), Color::Indexed(240))
        }
        TokenClass::Nothing => {
            fg(Color::DarkGray, Color::Indexed(245)).add_modifier(Modifier::DIM)
        }
        TokenClass::Number => fg(Color::LightRed, Color::Indexed(124)),
        TokenClass::String => fg(Color::Cyan, Color::Indexed(24)),
        TokenClass::Comment => {
            fg(Color::Indexed(245), Color::Indexed(242)).add_modifier(Modifier::ITALIC)
        }
        TokenClass::Unused => fg(Color::Red, Color::Indexed(160)),
        TokenClass::Value | TokenClass::Newline => Style::default(),
    }
}

/// Map a ratatui color onto the equivalent crossterm color.
pub(super) const fn terminal_color(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as Term;
    match color {
        Color::Reset => Term::Reset,
        Color::Black => Term::Black,
        Color::Red => Term::DarkRed,
        Color::Green => Term::DarkGreen,
        Color::Yellow => Term::DarkYellow,
        Color::Blue => Term::DarkBlue,
        Color::Magenta => Term::DarkMagenta,
        Color::Cyan => Term::DarkCyan,
        Color::Gray => Term::Grey,
        Color::DarkGray => Term::DarkGrey,
        Color::LightRed => Term::Red,
        Color::LightGreen => Term::Green,
        Color::LightYellow => Term::Yellow,
        Color::LightBlue => Term::Blue,
        Color::LightMagenta => Term::Magenta,
        Color::LightCyan => Term::Cyan,
        Color::White => Term::White,
        Color::Rgb(r, g, b) => Term::Rgb { r, g, b },
        Color::Indexed(index) => Term::AnsiValue(index),
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use super::{Key, KeyPress, ModifierKey, Modifiers};

/// Convert a terminal key event into a [`KeyPress`].
///
/// Releases and keys with no counterpart (media keys, `Null`) give `None`.
/// `BackTab` arrives as Tab with Shift held.
pub fn key_press_from_event(event: &KeyEvent) -> Option<KeyPress> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let mut modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        meta: event
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
    };

    let key = match event.code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers.shift = true;
            Key::Tab
        }
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(number) => Key::F(number),
        KeyCode::CapsLock => Key::Modifier(ModifierKey::CapsLock),
        KeyCode::ScrollLock => Key::Modifier(ModifierKey::ScrollLock),
        KeyCode::NumLock => Key::Modifier(ModifierKey::NumLock),
        KeyCode::Modifier(code) => Key::Modifier(modifier_key(code)),
        _ => return None,
    };

    Some(KeyPress { key, modifiers })
}

const fn modifier_key(code: ModifierKeyCode) -> ModifierKey {
    match code {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => ModifierKey::Shift,
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => ModifierKey::Control,
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => ModifierKey::Alt,
        ModifierKeyCode::LeftSuper | ModifierKeyCode::RightSuper => ModifierKey::Super,
        ModifierKeyCode::LeftHyper | ModifierKeyCode::RightHyper => ModifierKey::Hyper,
        ModifierKeyCode::LeftMeta | ModifierKeyCode::RightMeta => ModifierKey::Meta,
        ModifierKeyCode::IsoLevel3Shift | ModifierKeyCode::IsoLevel5Shift => ModifierKey::AltGraph,
    }
}

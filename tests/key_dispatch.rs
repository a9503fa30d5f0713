use bqnpad::app::{Model, handle_key, press_key};
use bqnpad::editor::Selection;
use bqnpad::glyphs::GLYPHS;
use bqnpad::input::{InputMode, KeyPress, key_press_from_event};
use bqnpad::prelude::{Message, update};
use bqnpad::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn press_event(model: Model, code: KeyCode, modifiers: KeyModifiers) -> Model {
    let press = key_press_from_event(&KeyEvent::new(code, modifiers)).unwrap();
    press_key(model, &press)
}

#[test]
fn test_every_keyed_glyph_is_typed_after_mod_key() {
    for glyph in GLYPHS {
        let Some(key) = glyph.key else {
            continue;
        };
        let model = Model::new("", Settings::default());
        let model = press_key(model, &KeyPress::char('\\'));
        let model = press_key(model, &KeyPress::char(key));
        assert_eq!(model.code().as_deref(), Some(glyph.glyph), "key {key:?}");
        assert_eq!(model.input_mode, InputMode::Normal);
    }
}

#[test]
fn test_terminal_events_drive_the_editor() {
    let model = Model::new("a\nb", Settings::default());
    let model = update(model, Message::Select(Selection::from_anchor(0, 3)));

    let model = press_event(model, KeyCode::Tab, KeyModifiers::NONE);
    assert_eq!(model.code().as_deref(), Some("  a\n  b"));

    let model = press_event(model, KeyCode::BackTab, KeyModifiers::SHIFT);
    assert_eq!(model.code().as_deref(), Some("a\nb"));

    let model = press_event(model, KeyCode::Char('/'), KeyModifiers::CONTROL);
    assert_eq!(model.code().as_deref(), Some("#a\n#b"));
}

#[test]
fn test_mod_key_from_terminal_event() {
    let model = Model::new("", Settings::default());
    let model = press_event(model, KeyCode::Char('\\'), KeyModifiers::NONE);
    assert!(model.input_mode.is_pending());
    let model = press_event(model, KeyCode::Char('['), KeyModifiers::NONE);
    assert_eq!(model.code().as_deref(), Some("←"));
}

#[test]
fn test_dispatch_does_not_touch_the_model() {
    let model = Model::new("x", Settings::default());
    let dispatch = handle_key(&model, &KeyPress::char('\\'));
    assert!(dispatch.captured);
    assert_eq!(model.input_mode, InputMode::Normal);
    assert_eq!(model.code().as_deref(), Some("x"));
}

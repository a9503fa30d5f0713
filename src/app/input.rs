use crate::app::{Message, Model, update};
use crate::editor::BlockTransform;
use crate::glyphs;
use crate::input::{Key, KeyAction, KeyPress};

/// What a key press turns into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDispatch {
    pub messages: Vec<Message>,
    /// The press was handled here and the host must not type it.
    pub captured: bool,
}

impl KeyDispatch {
    fn captured(messages: Vec<Message>) -> Self {
        Self {
            messages,
            captured: true,
        }
    }

    fn pass(messages: Vec<Message>) -> Self {
        Self {
            messages,
            captured: false,
        }
    }
}

/// Decide what a key press does.
///
/// Bindings come first, then the glyph mod, then Tab handling, then
/// wrapping a selection in a typed bracket. Anything else passes through.
pub fn handle_key(model: &Model, press: &KeyPress) -> KeyDispatch {
    let behavior = model.settings.mod_key_behavior();
    let mut mode = model.input_mode;
    let mut messages = Vec::new();

    match model.settings.action_for(press) {
        Some(KeyAction::GlyphMod) => {
            let (next, captured) = mode.on_mod_key(behavior);
            if captured {
                return KeyDispatch::captured(vec![Message::SetInputMode(next)]);
            }
        }
        Some(action) => return KeyDispatch::captured(vec![action.into()]),
        None => {}
    }

    if mode.is_pending() {
        let (next, glyph) = mode.on_key(&press.key, behavior);
        if next != mode {
            messages.push(Message::SetInputMode(next));
            mode = next;
        }
        if let Some(glyph) = glyph {
            messages.push(Message::Insert {
                text: glyph.glyph.to_string(),
                closing: glyph.paren.map(str::to_string),
            });
            return KeyDispatch::captured(messages);
        }
    }
    tracing::trace!(?mode, key = %press.key, "key not read as a glyph");

    let Some(selection) = model.selection() else {
        return KeyDispatch::pass(messages);
    };
    let plain = !press.modifiers.ctrl && !press.modifiers.alt && !press.modifiers.meta;

    match press.key {
        Key::Tab if plain => {
            messages.push(if selection.is_empty() {
                Message::Insert {
                    text: crate::editor::INDENT.to_string(),
                    closing: None,
                }
            } else if press.modifiers.shift {
                Message::Transform(BlockTransform::Outdent)
            } else {
                Message::Transform(BlockTransform::Indent)
            });
            KeyDispatch::captured(messages)
        }
        Key::Char(ch) if plain && !selection.is_empty() => {
            match glyphs::by_char(ch).and_then(|glyph| glyph.paren) {
                Some(closing) => {
                    messages.push(Message::Insert {
                        text: ch.to_string(),
                        closing: Some(closing.to_string()),
                    });
                    KeyDispatch::captured(messages)
                }
                None => KeyDispatch::pass(messages),
            }
        }
        _ => KeyDispatch::pass(messages),
    }
}

/// What a plain text widget does with a press nobody captured.
fn default_action(press: &KeyPress) -> Option<Message> {
    if press.modifiers.ctrl || press.modifiers.alt || press.modifiers.meta {
        return None;
    }
    let text = match press.key {
        Key::Char(ch) => ch.to_string(),
        Key::Enter => "\n".to_string(),
        Key::Backspace => return Some(Message::DeleteBack),
        Key::Delete => return Some(Message::DeleteForward),
        Key::Left => return Some(Message::MoveLeft),
        Key::Right => return Some(Message::MoveRight),
        _ => return None,
    };
    Some(Message::Insert {
        text,
        closing: None,
    })
}

/// Handle a key press end to end: dispatch it, then type it if nothing
/// captured it.
pub fn press_key(model: Model, press: &KeyPress) -> Model {
    let dispatch = handle_key(&model, press);
    let mut model = dispatch.messages.into_iter().fold(model, update);
    if !dispatch.captured
        && let Some(msg) = default_action(press)
    {
        model = update(model, msg);
    }
    model
}

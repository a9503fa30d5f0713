use crate::app::{Effect, Model};
use crate::editor::{BlockTransform, EditorBuffer, Selection};
use crate::input::{InputMode, KeyAction, KeyBind};
use crate::runtime::{InputFile, Output};
use crate::settings::{SettingKey, Settings};

/// All possible events and actions in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Code
    /// Mount the editor on a document
    Mount(String),
    /// Insert text at the selection, wrapping it in `closing` if given
    Insert {
        text: String,
        closing: Option<String>,
    },
    /// Indent, outdent or comment the selected lines
    Transform(BlockTransform),
    /// Replace the whole document
    SetCode(String),
    Select(Selection),
    DeleteBack,
    DeleteForward,
    MoveLeft,
    MoveRight,

    // Input
    SetInputMode(InputMode),

    // Settings
    ToggleSetting(SettingKey),
    SetSetting(SettingKey, bool),
    SetKeyBind(KeyAction, Option<KeyBind>),
    /// Replace all settings, e.g. after loading them
    LoadSettings(Settings),
    ResetSettings,

    // Outputs
    /// Results of a run
    Outputs(Vec<Output>),
    ClearOutputs,
    SetInputFile(Option<InputFile>),

    // Actions
    Run,
    Save,
    /// The code was written out
    Saved,
    Open,
    OpenInput,
}

impl From<KeyAction> for Message {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::GlyphMod => Self::SetInputMode(InputMode::GlyphPending),
            KeyAction::Run => Self::Run,
            KeyAction::Save => Self::Save,
            KeyAction::Open => Self::Open,
            KeyAction::OpenInput => Self::OpenInput,
            KeyAction::CommentLine => Self::Transform(BlockTransform::ToggleComment),
            KeyAction::FoldOutputs => Self::ToggleSetting(SettingKey::OutputShow),
            KeyAction::FoldGlyphs => Self::ToggleSetting(SettingKey::GlyphsShow),
        }
    }
}

/// Pure function that updates the model based on a message.
///
/// No side effects occur here; anything that needs the outside world is
/// queued as an [`Effect`].
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Code
        Message::Mount(code) => {
            model.editor = Some(EditorBuffer::from_text(&code));
        }
        Message::Insert { text, closing } => {
            edit(&mut model, |buffer| !buffer.insert(&text, closing.as_deref()).is_noop());
        }
        Message::Transform(transform) => {
            edit(&mut model, |buffer| !buffer.transform(transform).is_noop());
        }
        Message::SetCode(code) => {
            edit(&mut model, |buffer| {
                buffer.replace_all(&code);
                true
            });
        }
        Message::Select(selection) => {
            if let Some(buffer) = model.editor.as_mut() {
                buffer.set_selection(selection);
            }
        }
        Message::DeleteBack => edit(&mut model, EditorBuffer::delete_back),
        Message::DeleteForward => edit(&mut model, EditorBuffer::delete_forward),
        Message::MoveLeft => {
            if let Some(buffer) = model.editor.as_mut() {
                buffer.move_left();
            }
        }
        Message::MoveRight => {
            if let Some(buffer) = model.editor.as_mut() {
                buffer.move_right();
            }
        }

        // Input
        Message::SetInputMode(mode) => {
            model.input_mode = mode;
        }

        // Settings
        Message::ToggleSetting(key) => {
            key.toggle(&mut model.settings);
            settings_changed(&mut model);
        }
        Message::SetSetting(key, value) => {
            if key.get(&model.settings) != value {
                key.set(&mut model.settings, value);
                settings_changed(&mut model);
            }
        }
        Message::SetKeyBind(action, bind) => {
            model.settings.set_key_bind(action, bind);
            settings_changed(&mut model);
        }
        Message::LoadSettings(settings) => {
            model.settings = settings;
        }
        Message::ResetSettings => {
            model.settings = Settings::default();
            settings_changed(&mut model);
        }

        // Outputs
        Message::Outputs(outputs) => {
            model.outputs.append(outputs);
        }
        Message::ClearOutputs => {
            model.outputs.clear();
        }
        Message::SetInputFile(file) => {
            model.input_file = file;
        }

        // Actions
        Message::Run => {
            if !model.settings.output.persist {
                model.outputs.clear();
            }
            model.push_effect(Effect::Run);
        }
        Message::Save => model.push_effect(Effect::Save),
        Message::Saved => {
            if let Some(buffer) = model.editor.as_mut() {
                buffer.mark_clean();
            }
        }
        Message::Open => model.push_effect(Effect::Open),
        Message::OpenInput => model.push_effect(Effect::OpenInput),
    }
    model
}

/// Apply a change to the editor, if mounted. `change` reports whether the
/// text changed.
fn edit(model: &mut Model, change: impl FnOnce(&mut EditorBuffer) -> bool) {
    let Some(buffer) = model.editor.as_mut() else {
        tracing::trace!("edit ignored, editor not mounted");
        return;
    };
    if change(buffer) {
        model.push_effect(Effect::CodeChanged);
    }
}

fn settings_changed(model: &mut Model) {
    model.push_effect(Effect::SettingsChanged);
}

use std::mem;

use crate::editor::{EditorBuffer, Selection};
use crate::input::InputMode;
use crate::runtime::{InputFile, OutputLog};
use crate::settings::Settings;

/// Work the model cannot do itself. The host drains these after each
/// update with [`Model::take_effects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Evaluate the code and send back [`super::Message::Outputs`].
    Run,
    /// Write the code somewhere and send back [`super::Message::Saved`].
    Save,
    /// Pick a file and send back [`super::Message::SetCode`].
    Open,
    /// Pick an input file and send back [`super::Message::SetInputFile`].
    OpenInput,
    /// Settings changed and should be persisted.
    SettingsChanged,
    /// The code changed.
    CodeChanged,
}

/// The complete editor state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// The code editor, once it is mounted.
    pub editor: Option<EditorBuffer>,
    pub settings: Settings,
    pub input_mode: InputMode,
    /// File served to `•GetLine`.
    pub input_file: Option<InputFile>,
    pub outputs: OutputLog,
    effects: Vec<Effect>,
}

impl Model {
    /// A model with the editor mounted on `code`.
    pub fn new(code: &str, settings: Settings) -> Self {
        Self {
            editor: Some(EditorBuffer::from_text(code)),
            settings,
            ..Self::default()
        }
    }

    pub fn code(&self) -> Option<String> {
        self.editor.as_ref().map(EditorBuffer::text)
    }

    pub fn selection(&self) -> Option<Selection> {
        self.editor.as_ref().map(EditorBuffer::selection)
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        mem::take(&mut self.effects)
    }

    /// Queue an effect, dropping repeats of one still queued.
    pub(super) fn push_effect(&mut self, effect: Effect) {
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }
}

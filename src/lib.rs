// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. glyphs::Glyph)
    clippy::module_name_repetitions
)]

//! # bqnpad
//!
//! The editing core of an editor for BQN source.
//!
//! bqnpad works purely on text and selections:
//! - Glyph-aware tokenization for syntax highlighting
//! - Block transforms (indent, outdent, comment toggle) that keep the
//!   cursor where the user left it
//! - Glyph input through a prefix key, with delimiter wrapping
//!
//! ## Architecture
//!
//! The application layer follows The Elm Architecture (TEA):
//! - **Model**: editor buffer, settings, input mode and outputs
//! - **Message**: edits, settings changes and actions
//! - **Update**: pure state transitions
//! - **Effects**: work the host performs (run, save, open)
//!
//! ## Modules
//!
//! - [`highlight`]: Tokenizer and highlighter output
//! - [`glyphs`]: Static glyph table
//! - [`editor`]: Selections, block transforms and insertion
//! - [`input`]: Keys, key bindings and the glyph input mode
//! - [`settings`]: Typed settings and persistence
//! - [`runtime`]: Boundary to the language runtime
//! - [`app`]: Application model and key dispatch
//! - [`config`]: rc-file defaults for the command line

pub mod app;
pub mod config;
pub mod editor;
pub mod glyphs;
pub mod highlight;
pub mod input;
pub mod runtime;
pub mod settings;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{Message, Model, update};
    pub use crate::editor::{BlockTransform, Edit, EditorBuffer, Selection};
    pub use crate::highlight::{Token, TokenClass, tokenize};
}

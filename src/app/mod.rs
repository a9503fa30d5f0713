//! Editor state and key handling.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`Effect`]: Work queued for the host, drained with [`Model::take_effects`]

mod input;
mod model;
mod update;

pub use input::{KeyDispatch, handle_key, press_key};
pub use model::{Effect, Model};
pub use update::{Message, update};

use crate::runtime::{self, Runtime};

/// Carry out [`Effect::Run`]: evaluate the code and record its outputs.
pub fn run_code<R: Runtime + ?Sized>(model: Model, runtime: &mut R) -> Model {
    let Some(code) = model.code() else {
        return model;
    };
    let outputs = runtime::run(runtime, &code, model.input_file.as_ref());
    update(model, Message::Outputs(outputs))
}

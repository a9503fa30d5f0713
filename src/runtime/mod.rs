//! The boundary between the editor and a BQN interpreter.
//!
//! The editor never evaluates code itself. A [`Runtime`] does, and gets a
//! [`SystemValues`] for the system values that touch the editor: reading
//! lines from the attached input file, the audio sample rate, and `•Show`.

mod output;

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use output::{Output, OutputLog};

/// Default `•SampleRate`.
pub const DEFAULT_SAMPLE_RATE: f64 = 8000.0;

/// Upper bound (exclusive) for `•SetSampleRate`.
const SAMPLE_RATE_LIMIT: f64 = 4_294_967_296.0;

/// A BQN value as far as the editor needs to see it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Char(char),
    Array { shape: Vec<usize>, data: Vec<Value> },
    Function,
    Modifier,
    Namespace,
}

impl Value {
    /// A list of characters.
    pub fn string(text: &str) -> Self {
        let data: Vec<Self> = text.chars().map(Self::Char).collect();
        Self::Array {
            shape: vec![data.len()],
            data,
        }
    }

    /// The text of a character list, or `None` for anything else.
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::Array { shape, data } if shape.len() == 1 => data
                .iter()
                .map(|value| match value {
                    Self::Char(ch) => Some(*ch),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A file attached to the session, served line by line to `•GetLine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFile {
    pub content: String,
    pub file_name: String,
}

impl InputFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_name: file_name.into(),
        }
    }

    /// The lines of the file. A trailing newline does not add an empty line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.content.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }
}

/// System values for one evaluation.
#[derive(Debug, Clone)]
pub struct SystemValues {
    lines: Vec<String>,
    next_line: usize,
    sample_rate: f64,
    shown: Vec<Value>,
}

impl SystemValues {
    pub fn new(input: Option<&InputFile>) -> Self {
        Self {
            lines: input.map(InputFile::lines).unwrap_or_default(),
            next_line: 0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            shown: Vec::new(),
        }
    }

    /// `•GetLine`: the next input line, or the null character once the
    /// input is exhausted.
    pub fn get_line(&mut self) -> Value {
        match self.lines.get(self.next_line) {
            Some(line) => {
                self.next_line += 1;
                Value::string(line)
            }
            None => Value::Char('\0'),
        }
    }

    pub const fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// `•SetSampleRate`: checks the range, then rounds to a whole number
    /// of hertz.
    pub fn set_sample_rate(&mut self, value: &Value) -> Result<f64, EvalError> {
        let &Value::Number(rate) = value else {
            return Err(EvalError::new("•SetSampleRate: 𝕩 must be a number"));
        };
        if !(1.0..SAMPLE_RATE_LIMIT).contains(&rate) {
            return Err(EvalError::new(
                "•SetSampleRate: 𝕩 must be between 1 and 4294967295",
            ));
        }
        self.sample_rate = rate.round();
        Ok(self.sample_rate)
    }

    /// `•Show`: record a value to print before the result.
    pub fn show(&mut self, value: Value) {
        self.shown.push(value);
    }

    pub fn shown(&self) -> &[Value] {
        &self.shown
    }
}

/// A BQN interpreter.
pub trait Runtime {
    /// Evaluate a program. `Ok(None)` means there is no result to print.
    fn evaluate(
        &mut self,
        source: &str,
        system: &mut SystemValues,
    ) -> Result<Option<Value>, EvalError>;

    fn format(&self, value: &Value) -> String;

    fn format_error(&self, error: &EvalError) -> String {
        format!("Error: {}", error.message)
    }
}

/// Evaluate `source` and collect what it printed.
///
/// Shown values come first, then the result. A failed run gives the shown
/// values and a single error output. Ids are left at zero for the
/// [`OutputLog`] to assign.
pub fn run<R: Runtime + ?Sized>(
    runtime: &mut R,
    source: &str,
    input: Option<&InputFile>,
) -> Vec<Output> {
    let mut system = SystemValues::new(input);
    let started = Instant::now();
    let result = runtime.evaluate(source, &mut system);
    let delay = started.elapsed();

    let mut outputs: Vec<Output> = system
        .shown()
        .iter()
        .map(|value| Output::text(runtime.format(value), delay))
        .collect();
    match result {
        Ok(Some(value)) => outputs.push(Output::text(runtime.format(&value), delay)),
        Ok(None) => {}
        Err(err) => {
            tracing::debug!(error = %err, "evaluation failed");
            outputs.push(Output::error(runtime.format_error(&err), delay));
        }
    }
    tracing::debug!(outputs = outputs.len(), ?delay, "evaluated");
    outputs
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n < 0.0 { "¯∞" } else { "∞" })
            }
            Self::Number(n) if *n < 0.0 => write!(f, "¯{}", -n),
            Self::Number(n) => write!(f, "{n}"),
            Self::Char('\0') => f.write_str("@"),
            Self::Char(ch) => write!(f, "'{ch}'"),
            value @ Self::Array { shape, data } => match value.as_string() {
                Some(text) => write!(f, "\"{text}\""),
                None if shape.len() == 1 => {
                    f.write_str("⟨")?;
                    for (i, item) in data.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{item}")?;
                    }
                    f.write_str("⟩")
                }
                None => {
                    let shape: Vec<String> = shape.iter().map(ToString::to_string).collect();
                    write!(f, "<array {}>", shape.join("‿"))
                }
            },
            Self::Function => f.write_str("<function>"),
            Self::Modifier => f.write_str("<modifier>"),
            Self::Namespace => f.write_str("{namespace}"),
        }
    }
}

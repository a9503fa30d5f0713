use std::time::Duration;

/// One printed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub id: u64,
    pub text: String,
    pub error: bool,
    /// How long the evaluation that produced it took.
    pub delay: Duration,
}

impl Output {
    pub const fn text(text: String, delay: Duration) -> Self {
        Self {
            id: 0,
            text,
            error: false,
            delay,
        }
    }

    pub const fn error(text: String, delay: Duration) -> Self {
        Self {
            id: 0,
            text,
            error: true,
            delay,
        }
    }
}

/// Outputs across runs, newest last. Ids keep increasing across clears so a
/// view can key on them.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    outputs: Vec<Output>,
    next_id: u64,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, outputs: impl IntoIterator<Item = Output>) {
        for mut output in outputs {
            output.id = self.next_id;
            self.next_id += 1;
            self.outputs.push(output);
        }
    }

    pub fn clear(&mut self) {
        self.outputs.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }

    pub fn last(&self) -> Option<&Output> {
        self.outputs.last()
    }

    pub const fn len(&self) -> usize {
        self.outputs.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

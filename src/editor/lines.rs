use super::{Edit, Selection};

/// Start offset and length of every `\n`-separated line, in characters.
///
/// Built fresh for each operation from the buffer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    lens: Vec<usize>,
}

impl LineIndex {
    pub fn new(buffer: &str) -> Self {
        let mut starts = Vec::new();
        let mut lens = Vec::new();
        let mut offset = 0;
        for line in buffer.split('\n') {
            let len = line.chars().count();
            starts.push(offset);
            lens.push(len);
            offset += len + 1;
        }
        Self { starts, lens }
    }

    /// Number of lines; an empty buffer has one.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn start(&self, line: usize) -> usize {
        self.starts[line]
    }

    /// Offset just past the last character of `line`.
    pub fn end(&self, line: usize) -> usize {
        self.starts[line] + self.lens[line]
    }

    pub fn line_len(&self, line: usize) -> usize {
        self.lens[line]
    }

    /// The first line whose end is at or after `offset`.
    ///
    /// Offsets past the buffer land on the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        (0..self.len())
            .find(|&line| offset <= self.end(line))
            .unwrap_or(self.len() - 1)
    }
}

/// Rewrites a block of lines.
///
/// Must return exactly as many lines as it receives.
pub trait LineTransform {
    fn transform(&self, lines: &[&str]) -> Vec<String>;
}

impl<F> LineTransform for F
where
    F: Fn(&[&str]) -> Vec<String>,
{
    fn transform(&self, lines: &[&str]) -> Vec<String> {
        self(lines)
    }
}

/// Run `transform` over every line the selection touches.
///
/// Each selection end moves with the length change of its own line and stays
/// inside that line. The direction is kept. A transform that changes the
/// number of lines is refused and produces an unchanged edit, as does one
/// that leaves every line as it was.
pub fn apply_block_transform(
    buffer: &str,
    selection: Selection,
    transform: &impl LineTransform,
) -> Edit {
    let total = buffer.chars().count();
    let selection = selection.clamp(total);
    let index = LineIndex::new(buffer);
    let lines: Vec<&str> = buffer.split('\n').collect();

    let start_line = index.line_of(selection.start);
    let end_line = index.line_of(selection.end);
    let start_local = selection.start - index.start(start_line);
    let end_local = selection.end - index.start(end_line);

    let block = &lines[start_line..=end_line];
    let replaced = transform.transform(block);
    if replaced.len() != block.len() {
        tracing::warn!(
            expected = block.len(),
            got = replaced.len(),
            "line transform changed the line count; ignoring it"
        );
        return Edit::unchanged(selection);
    }
    if replaced.iter().zip(block).all(|(new, old)| new.as_str() == *old) {
        return Edit::unchanged(selection);
    }

    let new_lens: Vec<usize> = replaced.iter().map(|line| line.chars().count()).collect();
    let last = new_lens.len() - 1;
    let shift = |local: usize, block_line: usize| {
        let old_len = index.line_len(start_line + block_line);
        let new_len = new_lens[block_line];
        let moved = (local + new_len).saturating_sub(old_len);
        moved.min(new_len)
    };
    let new_start_local = shift(start_local, 0);
    let new_end_local = shift(end_local, last);

    let block_start = index.start(start_line);
    let last_line_start = block_start + new_lens[..last].iter().map(|len| len + 1).sum::<usize>();

    let edit = Edit {
        range: block_start..index.end(end_line),
        text: replaced.join("\n"),
        selection: Selection::new(
            block_start + new_start_local,
            last_line_start + new_end_local,
            selection.direction,
        ),
    };
    tracing::debug!(
        start_line,
        end_line,
        selection = ?edit.selection,
        "applied block transform"
    );
    edit
}

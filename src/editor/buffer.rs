use ropey::Rope;

use super::{BlockTransform, Edit, Selection, insert};

/// A text buffer backed by a rope, with a selection.
///
/// Stands in for the host's text widget: it owns the text and selection
/// and commits each [`Edit`] as one step. All offsets count characters.
#[derive(Clone)]
pub struct EditorBuffer {
    rope: Rope,
    selection: Selection,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.set_selection(selection);
        self
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Move the selection; out-of-range ends are pulled into the buffer.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.len_chars());
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(line.trim_end_matches('\n').to_string())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn selected_text(&self) -> String {
        self.rope
            .slice(self.selection.start..self.selection.end)
            .to_string()
    }

    /// Commit an edit: splice the text, then take its selection.
    pub fn apply(&mut self, edit: &Edit) {
        if !edit.is_noop() {
            let len = self.len_chars();
            let start = edit.range.start.min(len);
            let end = edit.range.end.clamp(start, len);
            self.rope.remove(start..end);
            self.rope.insert(start, &edit.text);
            self.dirty = true;
        }
        self.set_selection(edit.selection);
    }

    /// Insert at the selection, wrapping it when `closing` is given.
    pub fn insert(&mut self, literal: &str, closing: Option<&str>) -> Edit {
        let edit = insert(&self.text(), self.selection, literal, closing);
        self.apply(&edit);
        edit
    }

    /// Run a block transform over the lines the selection touches.
    pub fn transform(&mut self, transform: BlockTransform) -> Edit {
        let edit = transform.apply(&self.text(), self.selection);
        self.apply(&edit);
        edit
    }

    /// Replace the whole text and put the caret at the start.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.selection = Selection::caret(0);
        self.dirty = true;
    }

    /// Delete the selection, or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        let sel = self.selection;
        if sel.is_empty() && sel.start == 0 {
            return false;
        }
        let start = if sel.is_empty() { sel.start - 1 } else { sel.start };
        self.delete_range(start, sel.end);
        true
    }

    /// Delete the selection, or the character at the caret (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let sel = self.selection;
        if sel.is_empty() && sel.end >= self.len_chars() {
            return false;
        }
        let end = if sel.is_empty() { sel.end + 1 } else { sel.end };
        self.delete_range(sel.start, end);
        true
    }

    /// Collapse the selection and move the caret one character left.
    pub fn move_left(&mut self) {
        let sel = self.selection;
        let caret = if sel.is_empty() {
            sel.start.saturating_sub(1)
        } else {
            sel.start
        };
        self.selection = Selection::caret(caret);
    }

    /// Collapse the selection and move the caret one character right.
    pub fn move_right(&mut self) {
        let sel = self.selection;
        let caret = if sel.is_empty() {
            (sel.end + 1).min(self.len_chars())
        } else {
            sel.end
        };
        self.selection = Selection::caret(caret);
    }

    // --- Private helpers ---

    fn delete_range(&mut self, start: usize, end: usize) {
        self.apply(&Edit {
            range: start..end,
            text: String::new(),
            selection: Selection::caret(start),
        });
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}

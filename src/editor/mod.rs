//! Text editing on a flat buffer plus a selection.
//!
//! Every operation takes the buffer and selection by reference and returns
//! an [`Edit`]: one splice and the selection that goes with it. The host
//! commits both together, so nothing ever sees half an edit.
//!
//! Offsets count characters (Unicode scalar values).

mod buffer;
mod insert;
mod lines;
mod transform;

use std::ops::Range;

use serde::{Deserialize, Serialize};

pub use buffer::EditorBuffer;
pub use insert::insert;
pub use lines::{LineIndex, LineTransform, apply_block_transform};
pub use transform::{
    INDENT, indent, indent_lines, outdent, outdent_lines, toggle_comment, toggle_comment_lines,
};

/// Which end of a selection the caret sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionDirection {
    Forward,
    Backward,
    #[default]
    None,
}

/// A selected range of the buffer, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub direction: SelectionDirection,
}

impl Selection {
    /// A collapsed selection at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            direction: SelectionDirection::None,
        }
    }

    /// Build a selection, swapping the ends if `start > end`.
    pub const fn new(start: usize, end: usize, direction: SelectionDirection) -> Self {
        if start <= end {
            Self {
                start,
                end,
                direction,
            }
        } else {
            Self {
                start: end,
                end: start,
                direction,
            }
        }
    }

    /// Selection from an anchor to the caret, direction included.
    pub const fn from_anchor(anchor: usize, head: usize) -> Self {
        if anchor == head {
            Self::caret(head)
        } else if anchor < head {
            Self::new(anchor, head, SelectionDirection::Forward)
        } else {
            Self::new(head, anchor, SelectionDirection::Backward)
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Offset of the caret end.
    pub const fn head(&self) -> usize {
        match self.direction {
            SelectionDirection::Backward => self.start,
            SelectionDirection::Forward | SelectionDirection::None => self.end,
        }
    }

    /// Pull both ends into `[0, len]`.
    #[must_use]
    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len), self.direction)
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// One atomic change: replace `range` with `text`, then select `selection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Character range of the old buffer being replaced.
    pub range: Range<usize>,
    pub text: String,
    /// Selection in the new buffer.
    pub selection: Selection,
}

impl Edit {
    /// An edit that leaves the buffer alone and keeps `selection`.
    pub const fn unchanged(selection: Selection) -> Self {
        Self {
            range: selection.start..selection.start,
            text: String::new(),
            selection,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.range.is_empty() && self.text.is_empty()
    }

    /// The buffer after this edit.
    pub fn apply(&self, buffer: &str) -> String {
        let start = char_to_byte(buffer, self.range.start);
        let end = char_to_byte(buffer, self.range.end.max(self.range.start));
        let mut out = String::with_capacity(buffer.len() - (end - start) + self.text.len());
        out.push_str(&buffer[..start]);
        out.push_str(&self.text);
        out.push_str(&buffer[end..]);
        out
    }
}

/// Byte offset of the `index`th character, or `text.len()` past the end.
pub(crate) fn char_to_byte(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(byte, _)| byte)
}

/// The line-based edits the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockTransform {
    Indent,
    Outdent,
    ToggleComment,
}

impl BlockTransform {
    pub fn apply(self, buffer: &str, selection: Selection) -> Edit {
        match self {
            Self::Indent => indent(buffer, selection),
            Self::Outdent => outdent(buffer, selection),
            Self::ToggleComment => toggle_comment(buffer, selection),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Indent => "indent",
            Self::Outdent => "outdent",
            Self::ToggleComment => "comment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_new_orders_ends() {
        let sel = Selection::new(5, 2, SelectionDirection::Backward);
        assert_eq!((sel.start, sel.end), (2, 5));
        assert_eq!(sel.direction, SelectionDirection::Backward);
    }

    #[test]
    fn test_selection_from_anchor() {
        let back = Selection::from_anchor(4, 1);
        assert_eq!(back, Selection::new(1, 4, SelectionDirection::Backward));
        assert_eq!(back.head(), 1);
        assert_eq!(Selection::from_anchor(3, 3), Selection::caret(3));
        assert_eq!(Selection::from_anchor(1, 4).head(), 4);
    }

    #[test]
    fn test_selection_clamp() {
        let sel = Selection::new(3, 40, SelectionDirection::Forward).clamp(10);
        assert_eq!(sel, Selection::new(3, 10, SelectionDirection::Forward));
    }

    #[test]
    fn test_edit_apply_counts_characters() {
        let edit = Edit {
            range: 1..2,
            text: "⟨𝕩⟩".to_string(),
            selection: Selection::caret(4),
        };
        assert_eq!(edit.apply("a𝕩b"), "a⟨𝕩⟩b");
    }

    #[test]
    fn test_edit_apply_past_end_appends() {
        let edit = Edit {
            range: 9..9,
            text: "!".to_string(),
            selection: Selection::caret(4),
        };
        assert_eq!(edit.apply("abc"), "abc!");
    }

    #[test]
    fn test_unchanged_edit_is_noop() {
        let edit = Edit::unchanged(Selection::caret(2));
        assert!(edit.is_noop());
        assert_eq!(edit.apply("abc"), "abc");
    }

    #[test]
    fn test_block_transform_dispatch() {
        let edit = BlockTransform::Indent.apply("a", Selection::caret(0));
        assert_eq!(edit.apply("a"), "  a");
        let edit = BlockTransform::ToggleComment.apply("a", Selection::caret(0));
        assert_eq!(edit.apply("a"), "#a");
    }
}

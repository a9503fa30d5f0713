use super::{Edit, Selection};

/// Insert `literal` at the selection.
///
/// With a non-empty selection and a `closing` delimiter the selected text is
/// wrapped, and the whole wrapped text ends up selected with the old
/// direction. Otherwise the selection is replaced by `literal` and the caret
/// lands right after it.
pub fn insert(buffer: &str, selection: Selection, literal: &str, closing: Option<&str>) -> Edit {
    let selection = selection.clamp(buffer.chars().count());

    let edit = match closing {
        Some(closing) if !selection.is_empty() => {
            let selected: String = buffer
                .chars()
                .skip(selection.start)
                .take(selection.len())
                .collect();
            let text = format!("{literal}{selected}{closing}");
            let end = selection.start + text.chars().count();
            Edit {
                range: selection.range(),
                text,
                selection: Selection::new(selection.start, end, selection.direction),
            }
        }
        _ => Edit {
            range: selection.range(),
            text: literal.to_string(),
            selection: Selection::caret(selection.start + literal.chars().count()),
        },
    };
    tracing::trace!(literal, wrapped = closing.is_some(), "insert");
    edit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::SelectionDirection;

    #[test]
    fn test_insert_into_empty_buffer() {
        let edit = insert("", Selection::caret(0), "ab", None);
        assert_eq!(edit.apply(""), "ab");
        assert_eq!(edit.selection, Selection::caret(2));
    }

    #[test]
    fn test_insert_astral_glyph_moves_caret_by_one() {
        let edit = insert("ab", Selection::caret(1), "𝕩", None);
        assert_eq!(edit.apply("ab"), "a𝕩b");
        assert_eq!(edit.selection, Selection::caret(2));
    }

    #[test]
    fn test_insert_wraps_selection() {
        let buffer = "x←abc";
        let sel = Selection::new(2, 5, SelectionDirection::Backward);
        let edit = insert(buffer, sel, "⟨", Some("⟩"));
        assert_eq!(edit.apply(buffer), "x←⟨abc⟩");
        assert_eq!(edit.selection, Selection::new(2, 7, SelectionDirection::Backward));
    }

    #[test]
    fn test_insert_closing_with_caret_inserts_literal_only() {
        let edit = insert("ab", Selection::caret(1), "(", Some(")"));
        assert_eq!(edit.apply("ab"), "a(b");
        assert_eq!(edit.selection, Selection::caret(2));
    }

    #[test]
    fn test_insert_without_closing_replaces_selection() {
        let buffer = "abcd";
        let sel = Selection::new(1, 3, SelectionDirection::Forward);
        let edit = insert(buffer, sel, "×", None);
        assert_eq!(edit.apply(buffer), "a×d");
        assert_eq!(edit.selection, Selection::caret(2));
    }

    #[test]
    fn test_insert_clamps_selection() {
        let edit = insert("ab", Selection::caret(10), "!", None);
        assert_eq!(edit.apply("ab"), "ab!");
        assert_eq!(edit.selection, Selection::caret(3));
    }
}

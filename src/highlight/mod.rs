//! Syntax highlighting for BQN source.
//!
//! [`tokenize`] splits source into classified runs. The rest of the module
//! turns those runs into something a view can draw: ratatui lines, HTML
//! spans or ANSI text.

mod render;
mod rules;
mod theme;

pub use render::{highlight_lines, to_ansi, to_html};
pub use theme::{HighlightBackground, is_light_background, set_background_mode, style_for_class};

use serde::Serialize;

/// Lexical class of a token.
///
/// The set is closed; every glyph in [`crate::glyphs::GLYPHS`] carries one
/// of these so the glyph bar and the code view style glyphs alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Function,
    Modifier,
    Modifier2,
    Assignment,
    Separator,
    Value,
    Paren,
    Brace,
    Ligature,
    Head,
    Bracket,
    Nothing,
    Number,
    Comment,
    String,
    Newline,
    Unused,
}

impl TokenClass {
    /// Stable lowercase name, as used in serialized tokens.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Modifier => "modifier",
            Self::Modifier2 => "modifier2",
            Self::Assignment => "assignment",
            Self::Separator => "separator",
            Self::Value => "value",
            Self::Paren => "paren",
            Self::Brace => "brace",
            Self::Ligature => "ligature",
            Self::Head => "head",
            Self::Bracket => "bracket",
            Self::Nothing => "nothing",
            Self::Number => "number",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Newline => "newline",
            Self::Unused => "unused",
        }
    }

    /// CSS class for HTML rendering, e.g. `syn-function`.
    pub fn css_class(self) -> String {
        format!("syn-{}", self.name())
    }
}

/// A maximal run of source text sharing one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The source text of the run (never empty).
    pub content: String,
    /// The class, or `None` for whitespace and unrecognized characters.
    pub class: Option<TokenClass>,
}

impl Token {
    pub fn new(content: impl Into<String>, class: Option<TokenClass>) -> Self {
        Self {
            content: content.into(),
            class,
        }
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Split `source` into classified tokens.
///
/// Never fails: anything no rule recognizes becomes a single-character
/// token with no class. Concatenating the contents gives back `source`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let rules = rules::rules();
    let mut raw = Vec::new();
    let mut pos = 0;

    'scan: while pos < source.len() {
        let rest = &source[pos..];
        for rule in rules {
            if let Some(len) = rule.match_len(rest) {
                raw.push(Token::new(&rest[..len], rule.class));
                pos += len;
                continue 'scan;
            }
        }

        let len = rest.chars().next().map_or(rest.len(), char::len_utf8);
        raw.push(Token::new(&rest[..len], None));
        pos += len;
    }

    let merged = merge(raw);
    tracing::trace!(bytes = source.len(), tokens = merged.len(), "tokenized");
    merged
}

/// Join adjacent tokens of the same class. Newlines stay one per token.
pub fn merge(tokens: impl IntoIterator<Item = Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::new();
    for token in tokens {
        match merged.last_mut() {
            Some(last) if last.class == token.class && token.class != Some(TokenClass::Newline) => {
                last.content.push_str(&token.content);
            }
            _ => merged.push(token),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(tokens: &[Token]) -> Vec<(&str, Option<TokenClass>)> {
        tokens
            .iter()
            .map(|token| (token.content.as_str(), token.class))
            .collect()
    }

    #[test]
    fn test_tokenize_empty_input_is_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_simple_addition() {
        let tokens = tokenize("3+4");
        assert_eq!(
            classes(&tokens),
            vec![
                ("3", Some(TokenClass::Number)),
                ("+", Some(TokenClass::Function)),
                ("4", Some(TokenClass::Number)),
            ]
        );
    }

    #[test]
    fn test_tokenize_merges_adjacent_functions() {
        let tokens = tokenize("+-×");
        assert_eq!(classes(&tokens), vec![("+-×", Some(TokenClass::Function))]);
    }

    #[test]
    fn test_tokenize_keeps_newlines_separate() {
        let tokens = tokenize("a\n\nb");
        assert_eq!(
            classes(&tokens),
            vec![
                ("a", Some(TokenClass::Value)),
                ("\n", Some(TokenClass::Newline)),
                ("\n", Some(TokenClass::Newline)),
                ("b", Some(TokenClass::Value)),
            ]
        );
    }

    #[test]
    fn test_whitespace_run_stops_at_newline() {
        let tokens = tokenize("a  \n b");
        assert_eq!(
            classes(&tokens),
            vec![
                ("a", Some(TokenClass::Value)),
                ("  ", None),
                ("\n", Some(TokenClass::Newline)),
                (" ", None),
                ("b", Some(TokenClass::Value)),
            ]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let tokens = tokenize("x # note ← 1\ny");
        assert_eq!(
            classes(&tokens),
            vec![
                ("x", Some(TokenClass::Value)),
                (" ", None),
                ("# note ← 1", Some(TokenClass::Comment)),
                ("\n", Some(TokenClass::Newline)),
                ("y", Some(TokenClass::Value)),
            ]
        );
    }

    #[test]
    fn test_assignment_and_block() {
        let tokens = tokenize("F←{𝕨+𝕩}");
        assert_eq!(
            classes(&tokens),
            vec![
                ("F", Some(TokenClass::Function)),
                ("←", Some(TokenClass::Assignment)),
                ("{", Some(TokenClass::Brace)),
                ("𝕨", Some(TokenClass::Value)),
                ("+", Some(TokenClass::Function)),
                ("𝕩", Some(TokenClass::Value)),
                ("}", Some(TokenClass::Brace)),
            ]
        );
    }

    #[test]
    fn test_role_functions_are_functions() {
        let tokens = tokenize("𝕊𝕩");
        assert_eq!(
            classes(&tokens),
            vec![("𝕊", Some(TokenClass::Function)), ("𝕩", Some(TokenClass::Value))]
        );
    }

    #[test]
    fn test_modifier_names() {
        let tokens = tokenize("_m _d_ _𝕣 _𝕣_ 𝕣");
        let kinds: Vec<_> = tokens.iter().filter_map(|token| token.class).collect();
        assert_eq!(
            kinds,
            vec![
                TokenClass::Modifier,
                TokenClass::Modifier2,
                TokenClass::Modifier,
                TokenClass::Modifier2,
                TokenClass::Value,
            ]
        );
    }

    #[test]
    fn test_system_names_take_case_class() {
        let tokens = tokenize("•Show •name");
        assert_eq!(
            classes(&tokens),
            vec![
                ("•Show", Some(TokenClass::Function)),
                (" ", None),
                ("•name", Some(TokenClass::Value)),
            ]
        );
    }

    #[test]
    fn test_numbers_use_high_minus() {
        let tokens = tokenize("¯1.5e¯3 ∞ ¯π 2E4");
        let numbers: Vec<_> = tokens
            .iter()
            .filter(|token| token.class == Some(TokenClass::Number))
            .map(|token| token.content.as_str())
            .collect();
        assert_eq!(numbers, vec!["¯1.5e¯3", "∞", "¯π", "2E4"]);
    }

    #[test]
    fn test_ascii_minus_is_a_function() {
        let tokens = tokenize("-3");
        assert_eq!(
            classes(&tokens),
            vec![("-", Some(TokenClass::Function)), ("3", Some(TokenClass::Number))]
        );
    }

    #[test]
    fn test_strings_and_characters() {
        let tokens = tokenize("\"a b\"‿'c'");
        assert_eq!(
            classes(&tokens),
            vec![
                ("\"a b\"", Some(TokenClass::String)),
                ("‿", Some(TokenClass::Ligature)),
                ("'c'", Some(TokenClass::String)),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = tokenize("x←\"abc\ndef");
        assert_eq!(
            tokens.last().map(|token| (token.content.as_str(), token.class)),
            Some(("\"abc\ndef", Some(TokenClass::String)))
        );
    }

    #[test]
    fn test_null_character_merges_with_string() {
        let tokens = tokenize("@'a'");
        assert_eq!(classes(&tokens), vec![("@'a'", Some(TokenClass::String))]);
    }

    #[test]
    fn test_list_syntax() {
        let tokens = tokenize("⟨1,2⋄·⟩");
        assert_eq!(
            classes(&tokens),
            vec![
                ("⟨", Some(TokenClass::Bracket)),
                ("1", Some(TokenClass::Number)),
                (",", Some(TokenClass::Separator)),
                ("2", Some(TokenClass::Number)),
                ("⋄", Some(TokenClass::Separator)),
                ("·", Some(TokenClass::Nothing)),
                ("⟩", Some(TokenClass::Bracket)),
            ]
        );
    }

    #[test]
    fn test_unknown_character_merges_with_whitespace() {
        let tokens = tokenize("a \u{7} b");
        assert_eq!(
            classes(&tokens),
            vec![
                ("a", Some(TokenClass::Value)),
                (" \u{7} ", None),
                ("b", Some(TokenClass::Value)),
            ]
        );
    }

    #[test]
    fn test_lone_system_dot_is_unclassified() {
        let tokens = tokenize("•");
        assert_eq!(classes(&tokens), vec![("•", None)]);
    }

    #[test]
    fn test_token_class_names_are_css_friendly() {
        assert_eq!(TokenClass::Modifier2.css_class(), "syn-modifier2");
        assert_eq!(TokenClass::Newline.name(), "newline");
        let json = serde_json::to_string(&tokenize("1")).unwrap();
        assert_eq!(json, r#"[{"content":"1","class":"number"}]"#);
    }

    #[test]
    fn test_char_len_counts_astral_glyphs_once() {
        let tokens = tokenize("𝕩");
        assert_eq!(tokens[0].char_len(), 1);
    }
}

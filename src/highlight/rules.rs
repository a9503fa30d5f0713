//! Ordered classification rules for the tokenizer.
//!
//! Order matters: the generic name and number patterns come last so they
//! never shadow the glyph sets.

use std::sync::OnceLock;

use regex::Regex;

use super::TokenClass;

pub const FUNCTIONS: &str = "+-×÷⋆√⌊⌈|¬∧∨<>≠=≤≥≡≢⊣⊢⥊∾≍⋈↑↓↕«»⌽⍉/⍋⍒⊏⊑⊐⊒∊⍷⊔!";
pub const MODIFIERS: &str = "˙˜˘¨⌜⁼´˝`";
pub const MODIFIERS_2: &str = "∘○⊸⟜⌾⊘◶⎉⚇⍟⎊";
pub const ROLE_FUNCTIONS: &str = "𝕎𝕏𝔽𝔾𝕊";
pub const ROLE_VALUES: &str = "𝕨𝕩𝕗𝕘𝕤";
pub const NOTHING: &str = "·";
pub const NULL: &str = "@";
pub const ASSIGNMENTS: &str = "←⇐↩";
pub const SEPARATORS: &str = "⋄,";
pub const PARENS: &str = "()";
pub const BRACES: &str = "{}";
pub const HEADS: &str = ";:?";
pub const BRACKETS: &str = "⟨⟩[]";
pub const LIGATURES: &str = "‿";

enum Matcher {
    /// Any single character of the set.
    Chars(&'static str),
    /// A pattern anchored with `^`.
    Pattern(Regex),
}

pub struct Rule {
    matcher: Matcher,
    pub class: Option<TokenClass>,
}

impl Rule {
    const fn chars(set: &'static str, class: TokenClass) -> Self {
        Self {
            matcher: Matcher::Chars(set),
            class: Some(class),
        }
    }

    fn pattern(pattern: &str, class: Option<TokenClass>) -> Self {
        let regex = Regex::new(pattern).expect("tokenizer pattern is valid");
        Self {
            matcher: Matcher::Pattern(regex),
            class,
        }
    }

    /// Byte length of this rule's match at the start of `rest`.
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        match &self.matcher {
            Matcher::Chars(set) => {
                let ch = rest.chars().next()?;
                set.contains(ch).then(|| ch.len_utf8())
            }
            Matcher::Pattern(regex) => regex
                .find(rest)
                .map(|found| found.end())
                .filter(|&len| len > 0),
        }
    }
}

pub fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::chars("\n", TokenClass::Newline),
            Rule::pattern(r"^[^\S\n]+", None),
            Rule::pattern(r"^#[^\n]*", Some(TokenClass::Comment)),
            Rule::chars(FUNCTIONS, TokenClass::Function),
            Rule::chars(MODIFIERS, TokenClass::Modifier),
            Rule::chars(MODIFIERS_2, TokenClass::Modifier2),
            Rule::chars(ROLE_FUNCTIONS, TokenClass::Function),
            Rule::chars(ROLE_VALUES, TokenClass::Value),
            Rule::chars(NOTHING, TokenClass::Nothing),
            Rule::chars(NULL, TokenClass::String),
            Rule::chars(ASSIGNMENTS, TokenClass::Assignment),
            Rule::chars(SEPARATORS, TokenClass::Separator),
            Rule::chars(PARENS, TokenClass::Paren),
            Rule::chars(BRACES, TokenClass::Brace),
            Rule::chars(HEADS, TokenClass::Head),
            Rule::chars(BRACKETS, TokenClass::Bracket),
            Rule::chars(LIGATURES, TokenClass::Ligature),
            Rule::pattern(r#"^"[^"]*"?"#, Some(TokenClass::String)),
            Rule::pattern(r"^'[^']*'?", Some(TokenClass::String)),
            Rule::pattern(r"^_𝕣_", Some(TokenClass::Modifier2)),
            Rule::pattern(r"^_𝕣", Some(TokenClass::Modifier)),
            Rule::pattern(r"^𝕣", Some(TokenClass::Value)),
            Rule::pattern(r"^•?_[a-zA-Z0-9_]+_", Some(TokenClass::Modifier2)),
            Rule::pattern(r"^•?_[a-zA-Z0-9_]+", Some(TokenClass::Modifier)),
            Rule::pattern(r"^•?[A-Z][a-zA-Z0-9_]*", Some(TokenClass::Function)),
            Rule::pattern(r"^•?[a-z][a-zA-Z0-9_]*", Some(TokenClass::Value)),
            Rule::pattern(
                r"^¯?(?:∞|(?:π|[0-9]+(?:\.[0-9]+)?)(?:[eE]¯?[0-9]+)?)",
                Some(TokenClass::Number),
            ),
        ]
    })
}

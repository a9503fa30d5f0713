use std::fmt::Write as _;

use crossterm::style::{Attribute, Attributes, ContentStyle, StyledContent};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::{style_for_class, terminal_color};
use super::{Token, TokenClass};

/// Lay tokens out as styled lines, one per source line.
///
/// Multi-line tokens (an unterminated string) are split at each newline and
/// keep their style on every line they touch.
pub fn highlight_lines(tokens: &[Token]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for token in tokens {
        if token.class == Some(TokenClass::Newline) {
            lines.push(Line::from(std::mem::take(&mut current)));
            continue;
        }
        let style = style_for_class(token.class);
        let mut parts = token.content.split('\n');
        if let Some(first) = parts.next() {
            push_span(&mut current, first, style);
        }
        for part in parts {
            lines.push(Line::from(std::mem::take(&mut current)));
            push_span(&mut current, part, style);
        }
    }

    lines.push(Line::from(current));
    lines
}

fn push_span(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if !text.is_empty() {
        spans.push(Span::styled(text.to_string(), style));
    }
}

/// Render tokens as HTML spans with `syn-<class>` classes.
pub fn to_html(tokens: &[Token]) -> String {
    let mut html = String::new();
    for token in tokens {
        match token.class {
            None | Some(TokenClass::Newline) => html.push_str(&escape_html(&token.content)),
            Some(class) => {
                let _ = write!(
                    html,
                    "<span class=\"{}\">{}</span>",
                    class.css_class(),
                    escape_html(&token.content)
                );
            }
        }
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render tokens as ANSI-styled text for a terminal.
pub fn to_ansi(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let style = style_for_class(token.class);
        if style == Style::default() {
            out.push_str(&token.content);
            continue;
        }
        let styled = StyledContent::new(content_style(style), token.content.as_str());
        let _ = write!(out, "{styled}");
    }
    out
}

fn content_style(style: Style) -> ContentStyle {
    let mut attributes = Attributes::default();
    if style.add_modifier.contains(Modifier::BOLD) {
        attributes.set(Attribute::Bold);
    }
    if style.add_modifier.contains(Modifier::DIM) {
        attributes.set(Attribute::Dim);
    }
    if style.add_modifier.contains(Modifier::ITALIC) {
        attributes.set(Attribute::Italic);
    }
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.map(terminal_color);
    content.background_color = style.bg.map(terminal_color);
    content.attributes = attributes;
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::tokenize;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_lines_splits_on_newlines() {
        let lines = highlight_lines(&tokenize("a←1\n\nb"));
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["a←1", "", "b"]);
    }

    #[test]
    fn test_highlight_lines_trailing_newline_gives_empty_line() {
        let lines = highlight_lines(&tokenize("x\n"));
        assert_eq!(lines.len(), 2);
        assert!(lines[1].spans.is_empty());
    }

    #[test]
    fn test_highlight_lines_splits_multiline_string() {
        let lines = highlight_lines(&tokenize("\"ab\ncd"));
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["\"ab", "cd"]);
        assert_eq!(lines[0].spans[0].style, lines[1].spans[0].style);
    }

    #[test]
    fn test_html_wraps_classified_tokens() {
        let html = to_html(&tokenize("3+4"));
        assert_eq!(
            html,
            "<span class=\"syn-number\">3</span>\
             <span class=\"syn-function\">+</span>\
             <span class=\"syn-number\">4</span>"
        );
    }

    #[test]
    fn test_html_escapes_content() {
        let html = to_html(&tokenize("1<2 # a&b"));
        assert!(html.contains("<span class=\"syn-function\">&lt;</span>"));
        assert!(html.contains("# a&amp;b"));
        assert!(html.contains("</span> <span"));
    }

    #[test]
    fn test_ansi_keeps_plain_text_unstyled() {
        assert_eq!(to_ansi(&tokenize("a b")), "a b");
    }

    #[test]
    fn test_ansi_keeps_styled_content() {
        let ansi = to_ansi(&tokenize("a+b"));
        assert!(ansi.starts_with('a'));
        assert!(ansi.contains('+'));
        assert!(ansi.ends_with('b'));
    }
}

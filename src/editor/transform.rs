use super::{Edit, Selection, apply_block_transform};

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Prefix every line, blank or not, with [`INDENT`].
pub fn indent_lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| format!("{INDENT}{line}")).collect()
}

/// Strip up to two leading spaces from every line.
pub fn outdent_lines(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|&line| {
            line.strip_prefix(INDENT)
                .or_else(|| line.strip_prefix(' '))
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Comment or uncomment a block at its common indentation.
///
/// Every line counts, blank or not; an empty line has indentation 0. If
/// every line has `#` right after the common indentation, that `#` is
/// removed; otherwise one is inserted there on each line.
pub fn toggle_comment_lines(lines: &[&str]) -> Vec<String> {
    let level = lines.iter().copied().map(leading_spaces).min().unwrap_or(0);
    let commented = lines.iter().all(|line| line[level..].starts_with('#'));

    lines
        .iter()
        .map(|line| {
            let (indent, rest) = line.split_at(level);
            if commented {
                format!("{indent}{}", &rest[1..])
            } else {
                format!("{indent}#{rest}")
            }
        })
        .collect()
}

pub fn indent(buffer: &str, selection: Selection) -> Edit {
    apply_block_transform(buffer, selection, &indent_lines)
}

pub fn outdent(buffer: &str, selection: Selection) -> Edit {
    apply_block_transform(buffer, selection, &outdent_lines)
}

pub fn toggle_comment(buffer: &str, selection: Selection) -> Edit {
    apply_block_transform(buffer, selection, &toggle_comment_lines)
}

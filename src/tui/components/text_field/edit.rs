//! Cursor steps over a field's text, in byte offsets.
//!
//! Words are runs of alphanumerics and `_`, so `.` and `@` split an email
//! address into its parts.

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub(super) fn char_left(text: &str, pos: usize) -> usize {
    text[..pos]
        .chars()
        .next_back()
        .map_or(0, |c| pos - c.len_utf8())
}

pub(super) fn char_right(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(pos, |c| pos + c.len_utf8())
}

/// Start of the word at or before `pos`.
pub(super) fn word_left(text: &str, pos: usize) -> usize {
    text[..pos]
        .trim_end_matches(|c: char| !is_word_char(c))
        .trim_end_matches(is_word_char)
        .len()
}

/// End of the word at or after `pos`.
pub(super) fn word_right(text: &str, pos: usize) -> usize {
    let rest = text[pos..]
        .trim_start_matches(|c: char| !is_word_char(c))
        .trim_start_matches(is_word_char);
    text.len() - rest.len()
}

/// Start of the hard line holding `pos`.
pub(super) fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// End of the hard line holding `pos`, before its newline.
pub(super) fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

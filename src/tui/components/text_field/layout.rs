//! Where a field's text lands on screen.
//!
//! The message is laid out as [`Row`]s: byte ranges of the buffer, one per
//! screen line, produced by wrapping each hard line with `textwrap`. Keeping
//! rows as ranges into the buffer (instead of wrapped copies) lets cursor
//! math stay in byte offsets and display columns throughout.
//!
//! Single-line fields never wrap; they scroll sideways and only need
//! [`visible_columns`].

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Border width on every side.
pub(super) const BORDER: u16 = 1;
/// Columns right of the text: the scrollbar plus room for a cursor past the last character.
const GUTTER: u16 = 2;

/// Columns available for text inside a field `field_width` wide.
pub(super) fn text_width(field_width: u16) -> u16 {
    field_width.saturating_sub(2 * BORDER + GUTTER)
}

/// One screen line of the message, as a byte range into the buffer.
///
/// Whitespace swallowed at a soft break sits between one row's `end` and the
/// next row's `start`. The last row of a hard line always reaches the newline,
/// so trailing spaces the user just typed stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Lay `text` out in rows at most `width` columns wide. Always returns at
/// least one row; a trailing newline opens an empty last row.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let line_end = line_start + line.len();

        if width == 0 || line.width() <= usize::from(width) {
            rows.push(Row {
                start: line_start,
                end: line_end,
            });
        } else {
            let first = rows.len();
            let mut search = line_start;
            let options = textwrap::Options::new(usize::from(width)).break_words(true);
            for piece in textwrap::wrap(line, options) {
                let start = text[search..line_end]
                    .find(&*piece)
                    .map_or(search, |i| search + i);
                let end = (start + piece.len()).min(line_end);
                rows.push(Row { start, end });
                search = end;
            }

            match rows.get_mut(first) {
                Some(row) => row.start = line_start,
                None => rows.push(Row {
                    start: line_start,
                    end: line_end,
                }),
            }
            if let Some(last) = rows.last_mut() {
                last.end = line_end;
            }
        }

        line_start = line_end + 1;
    }

    rows
}

/// Index of the row holding byte offset `pos`.
pub(super) fn row_of(rows: &[Row], pos: usize) -> usize {
    rows.iter().rposition(|row| row.start <= pos).unwrap_or(0)
}

/// Display column of `pos` within `row`.
pub(super) fn column_of(text: &str, row: Row, pos: usize) -> u16 {
    if pos <= row.start {
        return 0;
    }
    text[row.start..pos].width() as u16
}

/// Byte offset in `row` closest to display column `column`, never splitting
/// a wide character.
pub(super) fn offset_at_column(text: &str, row: Row, column: u16) -> usize {
    let mut used = 0;
    for (i, c) in text[row.start..row.end].char_indices() {
        if used >= usize::from(column) {
            return row.start + i;
        }
        used += c.width().unwrap_or(0);
    }
    row.end
}

/// The slice of a single-line value shown when scrolled `scroll` columns in.
pub(super) fn visible_columns(text: &str, scroll: u16, width: u16) -> &str {
    let whole = Row {
        start: 0,
        end: text.len(),
    };
    let start = offset_at_column(text, whole, scroll);

    let mut used = 0;
    let mut end = start;
    for c in text[start..].chars() {
        used += c.width().unwrap_or(0);
        if used > usize::from(width) {
            break;
        }
        end += c.len_utf8();
    }
    &text[start..end]
}

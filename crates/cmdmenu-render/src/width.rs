//! Display-width helpers.

use unicode_width::UnicodeWidthStr;

/// Returns the number of terminal columns `s` occupies.
///
/// # Example
///
/// ```rust
/// use cmdmenu_render::display_width;
///
/// assert_eq!(display_width("Exit"), 4);
/// assert_eq!(display_width("Меню"), 4);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads `s` with trailing spaces up to `width` display columns.
///
/// Strings already at or beyond `width` are returned unchanged.
pub fn pad_right(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        return s.to_string();
    }
    let mut padded = String::with_capacity(s.len() + (width - current));
    padded.push_str(s);
    padded.extend(std::iter::repeat(' ').take(width - current));
    padded
}

/// Computes the width of every column as the widest cell it holds.
///
/// The column count is the larger of the header count and the longest row,
/// so ragged rows never index out of bounds.
pub fn column_widths<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> Vec<usize> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0; columns];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = display_width(header.as_ref());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell.as_ref()));
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_columns_not_bytes() {
        assert_eq!("Вход".len(), 8);
        assert_eq!(display_width("Вход"), 4);
        assert_eq!(display_width("café"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(display_width("日本語"), 6);
    }

    #[test]
    fn pad_right_fills_to_width() {
        assert_eq!(pad_right("A", 4), "A   ");
        assert_eq!(pad_right("Меню", 6), "Меню  ");
        assert_eq!(display_width(&pad_right("日", 5)), 5);
    }

    #[test]
    fn pad_right_leaves_long_strings_alone() {
        assert_eq!(pad_right("Login", 3), "Login");
        assert_eq!(pad_right("Exit", 4), "Exit");
    }

    #[test]
    fn column_widths_take_widest_cell() {
        let headers = vec!["#", "Menu"];
        let rows = vec![vec!["1", "View Profile"], vec!["10", "A"]];
        assert_eq!(column_widths(&headers, &rows), vec![2, 12]);
    }

    #[test]
    fn column_widths_cover_ragged_rows() {
        let headers = vec!["#"];
        let rows = vec![vec!["1", "extra"]];
        assert_eq!(column_widths(&headers, &rows), vec![1, 5]);
    }
}

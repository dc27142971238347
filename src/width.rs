//! Cell-width measurement for strings placed in fixed-size windows.

use unicode_width::UnicodeWidthStr;

/// Number of terminal cells `text` occupies, taken verbatim.
pub fn cell_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Number of terminal cells `text` occupies once colour escapes are removed.
pub fn display_width(text: &str) -> usize {
    let plain = strip_ansi_escapes::strip(text);
    cell_width(&String::from_utf8_lossy(&plain))
}

/// [`display_width`] clamped into the solver's length type.
pub(crate) fn display_len(text: &str) -> i32 {
    i32::try_from(display_width(text)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_do_not_count() {
        assert_eq!(display_width("\x1b[32mREBASING\x1b[0m"), 8);
        assert_eq!(cell_width("REBASING"), 8);
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        assert_eq!(display_width("検索: "), 6);
    }
}

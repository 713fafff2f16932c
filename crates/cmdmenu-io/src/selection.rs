//! Turning an input line into a menu selection.

use crate::InputError;

/// The key reserved for "exit" in a top-level menu and "back" in a submenu.
pub const EXIT_KEY: usize = 0;

/// A parsed, in-range menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The sentinel `0`.
    Exit,
    /// A 1-based option number.
    Item(usize),
}

impl Selection {
    /// Zero-based index into the option list, or `None` for [`Selection::Exit`]
    /// and for a hand-built `Item(0)`.
    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Exit => None,
            Selection::Item(n) => n.checked_sub(1),
        }
    }
}

/// Parses `raw` as a selection among `count` options.
///
/// Surrounding whitespace is ignored; the rest must be a base-10 integer in
/// `0..=count`. Anything else is an error.
///
/// ```
/// use cmdmenu_io::{parse_selection, InputError, Selection};
///
/// assert_eq!(parse_selection(" 0 \n", 3).unwrap(), Selection::Exit);
/// assert_eq!(parse_selection("3", 3).unwrap(), Selection::Item(3));
/// assert!(matches!(parse_selection("abc", 3), Err(InputError::NotANumber(_))));
/// assert!(matches!(parse_selection("99", 3), Err(InputError::OutOfRange { .. })));
/// ```
pub fn parse_selection(raw: &str, count: usize) -> Result<Selection, InputError> {
    let token = raw.trim();
    let value: i64 = token
        .parse()
        .map_err(|_| InputError::NotANumber(token.to_string()))?;

    match usize::try_from(value) {
        Ok(EXIT_KEY) => Ok(Selection::Exit),
        Ok(n) if n <= count => Ok(Selection::Item(n)),
        _ => Err(InputError::OutOfRange { value, max: count }),
    }
}

//! Border styles for boxed tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a menu table is framed. Selected by name in the menu config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Bare columns, two spaces apart, with no rules.
    None,
    /// Plain `+-|` frame that survives any terminal encoding.
    #[default]
    Ascii,
    /// Thin box-drawing frame, `┌─┐`.
    Light,
    /// Thick box-drawing frame, `┏━┓`.
    Heavy,
    /// Twin-line frame, `╔═╗`.
    Double,
    /// Thin frame with arc corners, `╭─╮`.
    Rounded,
}

impl BorderStyle {
    /// All styles, in declaration order.
    pub const ALL: [BorderStyle; 6] = [
        BorderStyle::None,
        BorderStyle::Ascii,
        BorderStyle::Light,
        BorderStyle::Heavy,
        BorderStyle::Double,
        BorderStyle::Rounded,
    ];

    /// The lowercase name used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Ascii => "ascii",
            BorderStyle::Light => "light",
            BorderStyle::Heavy => "heavy",
            BorderStyle::Double => "double",
            BorderStyle::Rounded => "rounded",
        }
    }

    /// Box-drawing characters, or `None` for borderless tables.
    pub(crate) fn chars(&self) -> Option<BorderChars> {
        let chars = match self {
            BorderStyle::None => return None,
            BorderStyle::Ascii => BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                left_t: '+',
                cross: '+',
                right_t: '+',
                top_t: '+',
                bottom_t: '+',
            },
            BorderStyle::Light => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            },
            BorderStyle::Heavy => BorderChars {
                horizontal: '━',
                vertical: '┃',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                left_t: '┣',
                cross: '╋',
                right_t: '┫',
                top_t: '┳',
                bottom_t: '┻',
            },
            BorderStyle::Double => BorderChars {
                horizontal: '═',
                vertical: '║',
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                left_t: '╠',
                cross: '╬',
                right_t: '╣',
                top_t: '╦',
                bottom_t: '╩',
            },
            BorderStyle::Rounded => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            },
        };
        Some(chars)
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a border style name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBorderStyleError(String);

impl fmt::Display for ParseBorderStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown border style '{}' (expected one of: none, ascii, light, heavy, double, rounded)",
            self.0
        )
    }
}

impl std::error::Error for ParseBorderStyleError {}

impl FromStr for BorderStyle {
    type Err = ParseBorderStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BorderStyle::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| ParseBorderStyleError(s.to_string()))
    }
}

/// The glyphs a single frame is drawn with.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub left_t: char,
    pub cross: char,
    pub right_t: char,
    pub top_t: char,
    pub bottom_t: char,
}

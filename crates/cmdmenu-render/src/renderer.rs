//! The table rendering capability and its built-in implementations.

use std::io::{self, Write};

use crate::border::{BorderChars, BorderStyle};
use crate::width::{column_widths, pad_right};

/// Draws a header row and data rows onto an output stream.
///
/// The router calls this once per menu render with headers `["#", title]`
/// and one row per option. Implementations decide everything about layout;
/// they must not assume anything about dispatch.
pub trait TableRenderer {
    /// Writes the table to `out`.
    fn render(&self, out: &mut dyn Write, headers: &[String], rows: &[Vec<String>])
        -> io::Result<()>;
}

/// Renders tables inside a box, every column sized to its widest cell.
///
/// ```text
/// +---+--------------+
/// | # | Menu         |
/// +---+--------------+
/// | 1 | Login        |
/// | 2 | View Profile |
/// | 0 | Exit         |
/// +---+--------------+
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxRenderer {
    border: BorderStyle,
}

impl BoxRenderer {
    /// Creates a renderer with ASCII borders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames the menu table with `border`.
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }
}

impl TableRenderer for BoxRenderer {
    fn render(
        &self,
        out: &mut dyn Write,
        headers: &[String],
        rows: &[Vec<String>],
    ) -> io::Result<()> {
        if headers.is_empty() {
            return Ok(());
        }

        let widths = column_widths(headers, rows);
        let Some(chars) = self.border.chars() else {
            writeln!(out, "{}", plain_row(&widths, headers))?;
            for row in rows {
                writeln!(out, "{}", plain_row(&widths, row))?;
            }
            return Ok(());
        };

        writeln!(
            out,
            "{}",
            rule(&widths, chars.top_left, chars.top_t, chars.top_right, &chars)
        )?;
        writeln!(out, "{}", boxed_row(&widths, headers, chars.vertical))?;
        writeln!(
            out,
            "{}",
            rule(&widths, chars.left_t, chars.cross, chars.right_t, &chars)
        )?;
        for row in rows {
            writeln!(out, "{}", boxed_row(&widths, row, chars.vertical))?;
        }
        writeln!(
            out,
            "{}",
            rule(
                &widths,
                chars.bottom_left,
                chars.bottom_t,
                chars.bottom_right,
                &chars
            )
        )
    }
}

/// A renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullRenderer;

impl TableRenderer for NullRenderer {
    fn render(
        &self,
        _out: &mut dyn Write,
        _headers: &[String],
        _rows: &[Vec<String>],
    ) -> io::Result<()> {
        Ok(())
    }
}

fn rule(widths: &[usize], left: char, join: char, right: char, chars: &BorderChars) -> String {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        line.push(if i == 0 { left } else { join });
        line.extend(std::iter::repeat(chars.horizontal).take(width + 2));
    }
    line.push(right);
    line
}

fn boxed_row(widths: &[usize], cells: &[String], vertical: char) -> String {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push(vertical);
        line.push(' ');
        line.push_str(&pad_right(cell, *width));
        line.push(' ');
    }
    line.push(vertical);
    line
}

fn plain_row(widths: &[usize], cells: &[String]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| pad_right(cells.get(i).map(String::as_str).unwrap_or(""), *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

//! Line-oriented input sources.

use std::collections::VecDeque;
use std::io::{self, BufRead, Cursor};

use crate::InputError;

/// Abstraction over a line-oriented input stream.
///
/// This trait allows tests and embedders to drive a menu without a terminal.
pub trait LineSource {
    /// Reads the next line without its line terminator.
    ///
    /// Returns `Ok(None)` once the stream is exhausted.
    fn read_line(&mut self) -> Result<Option<String>, InputError>;
}

/// Reads lines from any buffered reader.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// garbled line surfaces as an invalid selection instead of a read fault.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl ReaderSource<Cursor<Vec<u8>>> {
    /// Creates a source that replays `script`, e.g. `"1\n0\n"`.
    pub fn from_script(script: impl Into<String>) -> Self {
        Self::new(Cursor::new(script.into().into_bytes()))
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self) -> Result<Option<String>, InputError> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(InputError::Read)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&String::from_utf8_lossy(&self.buf))))
    }
}

/// Real stdin, read one line at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

impl StdinSource {
    /// Create a new stdin source.
    pub fn new() -> Self {
        Self
    }
}

impl LineSource for StdinSource {
    fn read_line(&mut self) -> Result<Option<String>, InputError> {
        let mut buf = Vec::new();
        let read = io::stdin()
            .lock()
            .read_until(b'\n', &mut buf)
            .map_err(InputError::Read)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&String::from_utf8_lossy(&buf))))
    }
}

fn strip_line_ending(line: &str) -> String {
    line.trim_end_matches('\n').trim_end_matches('\r').to_string()
}

#[derive(Debug, Clone)]
enum Step {
    Line(String),
    Fault(io::ErrorKind),
}

/// Scripted input for testing.
///
/// Replays lines (and, optionally, read faults) in order, then reports end
/// of input.
///
/// ```
/// use cmdmenu_io::{LineSource, MockInput};
///
/// let mut input = MockInput::lines(["1"]).fault().line("0");
/// assert_eq!(input.read_line().unwrap(), Some("1".to_string()));
/// assert!(input.read_line().is_err());
/// assert_eq!(input.read_line().unwrap(), Some("0".to_string()));
/// assert_eq!(input.read_line().unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockInput {
    steps: VecDeque<Step>,
}

impl MockInput {
    /// Create a mock that is already exhausted.
    pub fn eof() -> Self {
        Self::default()
    }

    /// Create a mock that returns the given lines in sequence.
    pub fn lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            steps: lines.into_iter().map(|l| Step::Line(l.into())).collect(),
        }
    }

    /// Create a mock from newline-separated text, e.g. `"1\n0\n"`.
    pub fn script(script: &str) -> Self {
        Self::lines(script.lines())
    }

    /// Append a line.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.steps.push_back(Step::Line(line.into()));
        self
    }

    /// Append a transient read fault.
    pub fn fault(self) -> Self {
        self.fault_kind(io::ErrorKind::Other)
    }

    /// Append a read fault of a specific kind.
    pub fn fault_kind(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fault(kind));
        self
    }

    /// Number of lines and faults not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl LineSource for MockInput {
    fn read_line(&mut self) -> Result<Option<String>, InputError> {
        match self.steps.pop_front() {
            Some(Step::Line(line)) => Ok(Some(line)),
            Some(Step::Fault(kind)) => Err(InputError::Read(io::Error::new(
                kind,
                "simulated read failure",
            ))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut dyn LineSource) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.read_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn reader_source_strips_line_endings() {
        let mut source = ReaderSource::from_script("1\r\n 2 \n3");
        assert_eq!(drain(&mut source), vec!["1", " 2 ", "3"]);
    }

    #[test]
    fn reader_source_keeps_blank_lines() {
        let mut source = ReaderSource::from_script("\n\n0\n");
        assert_eq!(drain(&mut source), vec!["", "", "0"]);
    }

    #[test]
    fn reader_source_replaces_invalid_utf8() {
        let mut source = ReaderSource::new(Cursor::new(vec![0xff, b'1', b'\n']));
        let line = source.read_line().unwrap().unwrap();
        assert_eq!(line, "\u{fffd}1");
    }

    #[test]
    fn reader_source_reports_eof_repeatedly() {
        let mut source = ReaderSource::from_script("");
        assert_eq!(source.read_line().unwrap(), None);
        assert_eq!(source.read_line().unwrap(), None);
    }

    #[test]
    fn mock_script_splits_lines() {
        let mut input = MockInput::script("1\n0\n");
        assert_eq!(input.remaining(), 2);
        assert_eq!(drain(&mut input), vec!["1", "0"]);
    }

    #[test]
    fn mock_fault_is_a_read_failure() {
        let mut input = MockInput::eof().fault_kind(io::ErrorKind::Interrupted);
        let err = input.read_line().unwrap_err();
        assert!(matches!(err, InputError::Read(ref e) if e.kind() == io::ErrorKind::Interrupted));
        assert_eq!(input.read_line().unwrap(), None);
    }
}

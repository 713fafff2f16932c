//! Shared input/output endpoints.

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use crate::source::{LineSource, ReaderSource, StdinSource};
use crate::{InputError, SharedBuffer};

/// The input and output a menu talks to.
///
/// Cloning shares both endpoints, so a submenu created from a parent reads
/// the same input and writes to the same output.
#[derive(Clone)]
pub struct Streams {
    input: Rc<RefCell<dyn LineSource>>,
    output: Rc<RefCell<dyn Write>>,
}

impl Streams {
    /// Creates streams from an input source and an output writer.
    pub fn new<I, O>(input: I, output: O) -> Self
    where
        I: LineSource + 'static,
        O: Write + 'static,
    {
        Self {
            input: Rc::new(RefCell::new(input)),
            output: Rc::new(RefCell::new(output)),
        }
    }

    /// The process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(StdinSource::new(), io::stdout())
    }

    /// Replays `script` as input and captures output in a [`SharedBuffer`].
    ///
    /// Returns the streams together with a handle on the captured output.
    pub fn scripted(script: impl Into<String>) -> (Self, SharedBuffer) {
        let output = SharedBuffer::new();
        let streams = Self::new(ReaderSource::from_script(script), output.clone());
        (streams, output)
    }

    /// Reads the next input line; `Ok(None)` at end of input.
    pub fn read_line(&self) -> Result<Option<String>, InputError> {
        self.input.borrow_mut().read_line()
    }

    /// Borrows the output writer.
    ///
    /// The borrow must not be held across a call back into user code.
    pub fn output(&self) -> RefMut<'_, dyn Write> {
        self.output.borrow_mut()
    }

    /// Returns true if both handles point at the same endpoints.
    pub fn ptr_eq(&self, other: &Streams) -> bool {
        Rc::ptr_eq(&self.input, &other.input) && Rc::ptr_eq(&self.output, &other.output)
    }
}

impl Default for Streams {
    fn default() -> Self {
        Self::stdio()
    }
}

impl fmt::Debug for Streams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Streams").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockInput;

    #[test]
    fn clones_share_input() {
        let (streams, _) = Streams::scripted("1\n2\n");
        let child = streams.clone();
        assert_eq!(streams.read_line().unwrap().as_deref(), Some("1"));
        assert_eq!(child.read_line().unwrap().as_deref(), Some("2"));
        assert_eq!(streams.read_line().unwrap(), None);
        assert!(streams.ptr_eq(&child));
    }

    #[test]
    fn output_is_captured() {
        let output = SharedBuffer::new();
        let streams = Streams::new(MockInput::eof(), output.clone());
        write!(streams.output(), "Test Menu").unwrap();
        assert_eq!(output.contents(), "Test Menu");
    }

    #[test]
    fn separate_streams_are_not_equal() {
        let (a, _) = Streams::scripted("");
        let (b, _) = Streams::scripted("");
        assert!(!a.ptr_eq(&b));
    }
}

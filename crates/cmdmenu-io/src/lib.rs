//! I/O plumbing for interactive menus.
//!
//! `cmdmenu-io` provides the narrow interfaces a menu loop needs to talk to
//! the outside world: a source of input lines, a sink for output text, and
//! the rule that turns a raw line into a menu selection.
//!
//! # Architecture
//!
//! ```text
//! Streams
//! ├── input:  Rc<RefCell<dyn LineSource>>   (StdinSource, ReaderSource, MockInput)
//! └── output: Rc<RefCell<dyn Write>>        (Stdout, SharedBuffer, any Write)
//! ```
//!
//! [`Streams`] is cheap to clone; clones share the same endpoints, which is
//! how nested menus keep reading from the same input.
//!
//! # Testing
//!
//! All endpoints accept mock implementations:
//!
//! ```
//! use cmdmenu_io::{parse_selection, MockInput, Selection, SharedBuffer, Streams};
//!
//! let output = SharedBuffer::new();
//! let streams = Streams::new(MockInput::script("2\n0\n"), output.clone());
//!
//! let line = streams.read_line().unwrap().unwrap();
//! assert_eq!(parse_selection(&line, 3).unwrap(), Selection::Item(2));
//! ```

mod error;
mod selection;
mod sink;
mod source;
mod streams;

pub use error::InputError;
pub use selection::{parse_selection, Selection, EXIT_KEY};
pub use sink::SharedBuffer;
pub use source::{LineSource, MockInput, ReaderSource, StdinSource};
pub use streams::Streams;

//! Interactive numbered menus for the terminal.
//!
//! `cmdmenu` prints a numbered list of options, reads the user's choice and
//! dispatches it to an [`Action`]. Menus nest into submenus, and every
//! dispatch runs through a middleware chain:
//!
//! ```text
//! global middleware (registration order)
//!   → action's local middleware (registration order)
//!     → action handler
//! ```
//!
//! # Features
//!
//! - **Numbered menus**: options are selected by number, `0` exits or goes back
//! - **Middleware**: global and per-action wrappers that can run code around
//!   a handler, short-circuit it or transform its result
//! - **Submenus**: [`Router::group`] nests a child menu as an action
//! - **Pluggable rendering**: any [`TableRenderer`] draws the menu
//! - **Scriptable I/O**: [`Streams`] swap stdin/stdout for scripted input and
//!   captured output
//! - **Reporting**: invalid input and failing actions go to a [`Reporter`]
//!
//! # Example
//!
//! ```rust
//! use cmdmenu::{middleware, Action, MenuContext, Router, Streams};
//!
//! let (streams, output) = Streams::scripted("2\n1\n0\n0\n");
//!
//! let mut router = Router::new("Main Menu");
//! router
//!     .set_streams(streams)
//!     .add_middleware(middleware::Recover)
//!     .add_action(Action::new("Login", |_ctx| Ok(())))
//!     .unwrap();
//! router
//!     .group("Settings", [Action::new("Account Settings", |_ctx| Ok(()))])
//!     .unwrap();
//!
//! router.run(&mut MenuContext::new());
//!
//! let text = output.contents();
//! assert!(text.contains("| 2 | Settings  |"));
//! assert!(text.contains("| 0 | <-Back           |"));
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`] events (menu enter/leave and dispatch at
//! `debug`, write and read failures at `warn`) and never installs a
//! subscriber; that is up to the application.

mod action;
mod config;
mod context;
mod error;
mod handler;
pub mod middleware;
mod report;
mod router;
mod setting;

pub use action::Action;
pub use config::{EofPolicy, MenuConfig};
pub use context::{Extensions, MenuContext};
pub use error::{ConfigError, MenuError};
pub use handler::{FnHandler, Handler, HandlerResult};
pub use middleware::{Chain, Middleware, Next};
pub use report::{ConsoleReporter, Diagnostic, Reporter};
pub use router::Router;
pub use setting::Setting;

pub use cmdmenu_io::{
    parse_selection, InputError, LineSource, MockInput, ReaderSource, Selection, SharedBuffer,
    StdinSource, Streams, EXIT_KEY,
};
pub use cmdmenu_render::{BorderStyle, BoxRenderer, NullRenderer, TableRenderer};

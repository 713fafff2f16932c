//! # cmdmenu Render - Table Drawing for Menus
//!
//! `cmdmenu-render` owns the one piece of presentation a menu needs: turning a
//! header row and data rows into text. The router only depends on the
//! [`TableRenderer`] trait, so any implementation can be swapped in per menu.
//!
//! ## Core Concepts
//!
//! - [`TableRenderer`]: the capability consumed by the router
//! - [`BoxRenderer`]: the built-in renderer, drawing borders around cells
//! - [`BorderStyle`]: which characters the box is drawn with
//! - [`NullRenderer`]: draws nothing (useful when embedding or testing)
//!
//! ## Quick Start
//!
//! ```rust
//! use cmdmenu_render::{BoxRenderer, TableRenderer};
//!
//! let headers = vec!["#".to_string(), "Menu".to_string()];
//! let rows = vec![
//!     vec!["1".to_string(), "A".to_string()],
//!     vec!["0".to_string(), "Exit".to_string()],
//! ];
//!
//! let mut out = Vec::new();
//! BoxRenderer::new().render(&mut out, &headers, &rows).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "+---+------+\n\
//!      | # | Menu |\n\
//!      +---+------+\n\
//!      | 1 | A    |\n\
//!      | 0 | Exit |\n\
//!      +---+------+\n"
//! );
//! ```
//!
//! ## Width Measurement
//!
//! Column widths are measured in terminal display columns via `unicode-width`,
//! never in bytes: `"Меню"` is four columns wide even though it is eight bytes
//! of UTF-8, and CJK characters count as two columns.

mod border;
mod renderer;
mod width;

pub use border::{BorderStyle, ParseBorderStyleError};
pub use renderer::{BoxRenderer, NullRenderer, TableRenderer};
pub use width::{column_widths, display_width, pad_right};

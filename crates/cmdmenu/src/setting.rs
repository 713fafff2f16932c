//! Configuration directives for [`Router::with_settings`] and [`Router::setup`].

use std::fmt;
use std::io::Write;
use std::rc::Rc;

use cmdmenu_io::{LineSource, Streams};
use cmdmenu_render::TableRenderer;

use crate::action::Action;
use crate::error::MenuError;
use crate::middleware::Middleware;
use crate::report::Reporter;
use crate::router::Router;

/// One change to a router, applied in order.
///
/// ```rust
/// use cmdmenu::{middleware::Recover, Action, Router, Setting};
///
/// let (streams, output) = cmdmenu::Streams::scripted("0\n");
/// let router = Router::with_settings(
///     "Main Menu",
///     [
///         Setting::show_path(true),
///         Setting::middleware(Recover),
///         Setting::actions([Action::new("Login", |_ctx| Ok(()))]),
///         Setting::Streams(streams),
///     ],
/// )
/// .unwrap();
///
/// router.run(&mut cmdmenu::MenuContext::new());
/// assert!(output.contents().starts_with("> Main Menu \n"));
/// ```
pub enum Setting {
    /// Replaces the table renderer.
    Renderer(Rc<dyn TableRenderer>),
    /// Enables or disables the path line above the menu.
    ShowPath(bool),
    /// Appends a global middleware.
    Middleware(Rc<dyn Middleware>),
    /// Registers actions, rejecting duplicate names.
    Actions(Vec<Action>),
    /// Replaces the input and output endpoints.
    Streams(Streams),
    /// Replaces the diagnostic reporter.
    Reporter(Rc<dyn Reporter>),
}

impl Setting {
    pub fn renderer<R: TableRenderer + 'static>(renderer: R) -> Self {
        Self::Renderer(Rc::new(renderer))
    }

    pub fn show_path(enable: bool) -> Self {
        Self::ShowPath(enable)
    }

    pub fn middleware<M: Middleware + 'static>(middleware: M) -> Self {
        Self::Middleware(Rc::new(middleware))
    }

    pub fn actions(actions: impl IntoIterator<Item = Action>) -> Self {
        Self::Actions(actions.into_iter().collect())
    }

    /// Reads selections from `input` and writes the menu to `output`.
    pub fn streams<I, O>(input: I, output: O) -> Self
    where
        I: LineSource + 'static,
        O: Write + 'static,
    {
        Self::Streams(Streams::new(input, output))
    }

    pub fn reporter<R: Reporter + 'static>(reporter: R) -> Self {
        Self::Reporter(Rc::new(reporter))
    }

    pub(crate) fn apply(self, router: &mut Router) -> Result<(), MenuError> {
        match self {
            Setting::Renderer(renderer) => {
                router.set_shared_renderer(renderer);
            }
            Setting::ShowPath(enable) => {
                router.show_path(enable);
            }
            Setting::Middleware(middleware) => {
                router.add_shared_middleware(middleware);
            }
            Setting::Actions(actions) => {
                router.add_actions(actions)?;
            }
            Setting::Streams(streams) => {
                router.set_streams(streams);
            }
            Setting::Reporter(reporter) => {
                router.set_shared_reporter(reporter);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Renderer(_) => f.write_str("Renderer(..)"),
            Setting::ShowPath(enable) => f.debug_tuple("ShowPath").field(enable).finish(),
            Setting::Middleware(_) => f.write_str("Middleware(..)"),
            Setting::Actions(actions) => f.debug_tuple("Actions").field(actions).finish(),
            Setting::Streams(streams) => f.debug_tuple("Streams").field(streams).finish(),
            Setting::Reporter(_) => f.write_str("Reporter(..)"),
        }
    }
}

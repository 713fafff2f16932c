//! The menu loop.
//!
//! A [`Router`] renders its actions as a numbered table, reads a selection
//! and dispatches it through global middleware, the action's local
//! middleware and finally the action's handler. Selection `0` leaves the
//! menu. A submenu is a child router stored inside one of the parent's
//! actions, so entering it is a nested call to its loop and `0` returns to
//! the parent.
//!
//! ```text
//! render menu → prompt → read line ─┬─ 0 ──────────────→ return
//!      ↑           ↑                ├─ invalid ─→ report ┘ (prompt again)
//!      │           └────────────────┤
//!      └──── dispatch(global → local → handler) ←─ 1..=n
//! ```

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use cmdmenu_io::{parse_selection, Streams, EXIT_KEY};
use cmdmenu_render::{BoxRenderer, TableRenderer};
use tracing::{debug, warn};

use crate::action::Action;
use crate::config::{EofPolicy, MenuConfig};
use crate::context::MenuContext;
use crate::error::MenuError;
use crate::handler::{Handler, HandlerResult};
use crate::middleware::{compose, Chain, Middleware};
use crate::report::{ConsoleReporter, Diagnostic, Reporter};
use crate::setting::Setting;

/// A numbered text menu.
///
/// ```rust
/// use cmdmenu::{Action, MenuContext, Router, Streams};
///
/// let (streams, output) = Streams::scripted("1\n0\n");
/// let mut router = Router::new("Test Menu");
/// router.set_streams(streams);
/// router
///     .add_action(Action::new("Test Option", |_ctx| {
///         println!("Handler executed");
///         Ok(())
///     }))
///     .unwrap();
///
/// router.run(&mut MenuContext::new());
/// assert!(output.contents().contains("| 1 | Test Option |"));
/// ```
pub struct Router {
    title: String,
    actions: Vec<Action>,
    middleware: Chain,
    renderer: Rc<dyn TableRenderer>,
    reporter: Rc<dyn Reporter>,
    streams: Streams,
    config: MenuConfig,
    is_submenu: bool,
    path: String,
}

impl Router {
    /// Creates a top-level menu on stdin and stdout with default settings.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_config(title, MenuConfig::default())
    }

    /// Creates a top-level menu using `config`.
    ///
    /// The default renderer uses the configured border and the default
    /// reporter uses the configured messages.
    pub fn with_config(title: impl Into<String>, config: MenuConfig) -> Self {
        let title = title.into();
        Self {
            path: path_segment(&title),
            renderer: Rc::new(BoxRenderer::new().border(config.border)),
            reporter: Rc::new(ConsoleReporter::from_config(&config)),
            streams: Streams::stdio(),
            actions: Vec::new(),
            middleware: Chain::new(),
            is_submenu: false,
            title,
            config,
        }
    }

    /// Creates a top-level menu configured from a YAML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn from_config_file(
        title: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, MenuError> {
        let config = MenuConfig::load(path)?;
        Ok(Self::with_config(title, config))
    }

    /// Creates a top-level menu and applies `settings` in order.
    pub fn with_settings(
        title: impl Into<String>,
        settings: impl IntoIterator<Item = Setting>,
    ) -> Result<Self, MenuError> {
        let mut router = Self::new(title);
        router.setup(settings)?;
        Ok(router)
    }

    /// Applies `settings` in order, stopping at the first failure.
    pub fn setup(
        &mut self,
        settings: impl IntoIterator<Item = Setting>,
    ) -> Result<&mut Self, MenuError> {
        for setting in settings {
            setting.apply(self)?;
        }
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The hierarchy path, one `"> title "` segment per level.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_submenu(&self) -> bool {
        self.is_submenu
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    pub fn renderer(&self) -> &Rc<dyn TableRenderer> {
        &self.renderer
    }

    /// Global middleware in registration order.
    pub fn middleware(&self) -> &Chain {
        &self.middleware
    }

    /// Actions in menu order; action `i` is selected with `i + 1`.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name() == name)
    }

    pub fn action_mut(&mut self, name: &str) -> Option<&mut Action> {
        self.actions.iter_mut().find(|action| action.name() == name)
    }

    /// The submenu registered under `name`, for adding to it after
    /// [`group`](Self::group) returned.
    pub fn submenu_mut(&mut self, name: &str) -> Option<&mut Router> {
        self.action_mut(name).and_then(Action::submenu_mut)
    }

    /// Replaces the table renderer of this menu.
    ///
    /// Submenus created earlier keep the renderer they were created with.
    pub fn set_renderer<R: TableRenderer + 'static>(&mut self, renderer: R) -> &mut Self {
        self.set_shared_renderer(Rc::new(renderer))
    }

    pub fn set_shared_renderer(&mut self, renderer: Rc<dyn TableRenderer>) -> &mut Self {
        self.renderer = renderer;
        self
    }

    /// Enables or disables the path line above the menu.
    pub fn show_path(&mut self, enable: bool) -> &mut Self {
        self.config.show_path = enable;
        self
    }

    pub fn set_eof_policy(&mut self, policy: EofPolicy) -> &mut Self {
        self.config.on_eof = policy;
        self
    }

    pub fn set_streams(&mut self, streams: Streams) -> &mut Self {
        self.streams = streams;
        self
    }

    pub fn set_reporter<R: Reporter + 'static>(&mut self, reporter: R) -> &mut Self {
        self.set_shared_reporter(Rc::new(reporter))
    }

    pub fn set_shared_reporter(&mut self, reporter: Rc<dyn Reporter>) -> &mut Self {
        self.reporter = reporter;
        self
    }

    /// Appends a global middleware. It wraps every action of this menu but
    /// not the actions inside its submenus.
    pub fn add_middleware<M: Middleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.middleware.push(middleware);
        self
    }

    pub fn add_shared_middleware(&mut self, middleware: Rc<dyn Middleware>) -> &mut Self {
        self.middleware.push_shared(middleware);
        self
    }

    /// Appends an action. Names must be unique within a menu.
    pub fn add_action(&mut self, action: Action) -> Result<&mut Self, MenuError> {
        self.ensure_unique(action.name())?;
        self.actions.push(action);
        Ok(self)
    }

    /// Appends actions in order, stopping at the first duplicate name.
    pub fn add_actions(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<&mut Self, MenuError> {
        for action in actions {
            self.add_action(action)?;
        }
        Ok(self)
    }

    /// Appends a local middleware to the action called `name`.
    pub fn add_action_middleware<M: Middleware + 'static>(
        &mut self,
        name: &str,
        middleware: M,
    ) -> Result<&mut Self, MenuError> {
        let Some(action) = self.actions.iter_mut().find(|action| action.name() == name) else {
            return Err(MenuError::UnknownAction {
                menu: self.title.clone(),
                name: name.to_string(),
            });
        };
        action.add_middleware(middleware);
        Ok(self)
    }

    /// Creates a submenu and registers it as an action named `title`.
    ///
    /// The submenu shares this menu's renderer, reporter and streams, and
    /// copies its config, all as they are now. It does not inherit global
    /// middleware. The returned reference can be used to add further actions
    /// or nested groups.
    pub fn group(
        &mut self,
        title: impl Into<String>,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<&mut Router, MenuError> {
        let title = title.into();
        self.ensure_unique(&title)?;

        let mut child = Router {
            path: format!("{}{}", self.path, path_segment(&title)),
            renderer: Rc::clone(&self.renderer),
            reporter: Rc::clone(&self.reporter),
            streams: self.streams.clone(),
            config: self.config.clone(),
            actions: Vec::new(),
            middleware: Chain::new(),
            is_submenu: true,
            title: title.clone(),
        };
        child.add_actions(actions)?;
        self.actions.push(Action::from_router(child));

        let menu = self.title.clone();
        self.submenu_mut(&title)
            .ok_or_else(|| MenuError::UnknownAction { menu, name: title })
    }

    /// Runs the menu until the user selects `0` or input ends.
    ///
    /// `ctx` is handed unchanged to every middleware and handler, including
    /// those of submenus.
    pub fn run(&self, ctx: &mut MenuContext) {
        debug!(menu = %self.title, submenu = self.is_submenu, "entering menu");
        while let Some(index) = self.next_selection() {
            self.dispatch(index, ctx);
        }
        debug!(menu = %self.title, "leaving menu");
    }

    fn ensure_unique(&self, name: &str) -> Result<(), MenuError> {
        if self.action(name).is_some() {
            return Err(MenuError::DuplicateAction {
                menu: self.title.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Renders the menu, then prompts until a usable answer arrives.
    /// Returns the action index, or `None` to leave the menu.
    fn next_selection(&self) -> Option<usize> {
        self.show_menu();

        let mut failures = 0u32;
        loop {
            self.emit(|out| {
                write!(out, "{}", self.config.prompt)?;
                out.flush()
            });

            match self.streams.read_line() {
                Ok(Some(line)) => {
                    failures = 0;
                    match parse_selection(&line, self.actions.len()) {
                        Ok(selection) => return selection.index(),
                        Err(error) => self.report(&Diagnostic::InvalidSelection {
                            input: &line,
                            error: &error,
                        }),
                    }
                }
                Ok(None) => match self.config.on_eof {
                    EofPolicy::Exit => return None,
                    EofPolicy::Reprompt => {
                        self.emit(|out| writeln!(out));
                        failures += 1;
                    }
                },
                Err(error) => {
                    self.report(&Diagnostic::ReadFailed { error: &error });
                    failures += 1;
                }
            }

            if failures > 0 && failures >= self.config.max_read_failures {
                warn!(menu = %self.title, failures, "giving up after repeated read failures");
                return None;
            }
        }
    }

    fn show_menu(&self) {
        let headers = vec!["#".to_string(), self.title.clone()];
        let mut rows: Vec<Vec<String>> = self
            .actions
            .iter()
            .enumerate()
            .map(|(index, action)| vec![(index + 1).to_string(), action.name().to_string()])
            .collect();
        rows.push(vec![
            EXIT_KEY.to_string(),
            self.config.sentinel_label(self.is_submenu).to_string(),
        ]);

        self.emit(|out| {
            if self.config.show_path {
                writeln!(out, "{}", self.path)?;
            }
            self.renderer.render(out, &headers, &rows)?;
            writeln!(out)
        });
    }

    fn dispatch(&self, index: usize, ctx: &mut MenuContext) {
        let Some(action) = self.actions.get(index) else {
            return;
        };
        debug!(menu = %self.title, action = %action.name(), "dispatching");

        let layers: Vec<&dyn Middleware> = self
            .middleware
            .iter()
            .chain(action.middleware().iter())
            .collect();

        self.emit(|out| writeln!(out));
        if let Err(error) = compose(&layers, action.terminal()).run(ctx) {
            self.report(&Diagnostic::ActionFailed {
                action: action.name(),
                error: &error,
            });
        }
        self.emit(|out| writeln!(out));
    }

    fn report(&self, diagnostic: &Diagnostic<'_>) {
        self.emit(|out| self.reporter.report(out, diagnostic));
    }

    /// Writes to the output stream. Write failures are logged, never fatal.
    fn emit(&self, write: impl FnOnce(&mut dyn Write) -> io::Result<()>) {
        let mut out = self.streams.output();
        if let Err(error) = write(&mut *out) {
            warn!(menu = %self.title, error = %error, "failed to write menu output");
        }
    }
}

/// Selecting a submenu's action runs the submenu's loop.
impl Handler for Router {
    fn handle(&self, ctx: &mut MenuContext) -> HandlerResult {
        self.run(ctx);
        Ok(())
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("title", &self.title)
            .field("path", &self.path)
            .field("is_submenu", &self.is_submenu)
            .field("actions", &self.actions)
            .field("middleware", &self.middleware)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn path_segment(title: &str) -> String {
    format!("> {title} ")
}

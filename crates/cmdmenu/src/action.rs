//! Menu options.

use std::fmt;

use crate::context::MenuContext;
use crate::handler::{FnHandler, Handler, HandlerResult};
use crate::middleware::{compose, Chain, Middleware};
use crate::router::Router;

/// What selecting an action runs.
pub(crate) enum Target {
    Handler(Box<dyn Handler>),
    Submenu(Box<Router>),
}

/// A named menu option with its own middleware.
///
/// Local middleware wraps only this action and runs after the owning
/// router's global middleware.
///
/// ```rust
/// use cmdmenu::{middleware, Action};
///
/// let admin = Action::new("Admin Panel", |_ctx| {
///     println!("Welcome, admin");
///     Ok(())
/// })
/// .with_middleware(middleware::from_fn(|ctx, next| {
///     println!("Checking admin rights...");
///     next.run(ctx)
/// }));
///
/// assert_eq!(admin.name(), "Admin Panel");
/// assert_eq!(admin.middleware().len(), 1);
/// ```
pub struct Action {
    name: String,
    target: Target,
    middleware: Chain,
}

impl Action {
    /// Creates an action that runs `handler` when selected.
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut MenuContext) -> HandlerResult + 'static,
    {
        Self::from_handler(name, FnHandler::new(handler))
    }

    /// Creates an action from any [`Handler`].
    pub fn from_handler<H: Handler + 'static>(name: impl Into<String>, handler: H) -> Self {
        Self {
            name: name.into(),
            target: Target::Handler(Box::new(handler)),
            middleware: Chain::new(),
        }
    }

    pub(crate) fn from_router(router: Router) -> Self {
        Self {
            name: router.title().to_string(),
            target: Target::Submenu(Box::new(router)),
            middleware: Chain::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a local middleware.
    pub fn add_middleware<M: Middleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a local middleware, builder style.
    pub fn with_middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Local middleware in registration order.
    pub fn middleware(&self) -> &Chain {
        &self.middleware
    }

    /// Returns true if selecting this action enters a submenu.
    pub fn is_submenu(&self) -> bool {
        matches!(self.target, Target::Submenu(_))
    }

    /// The submenu behind this action, if it is one.
    pub fn submenu(&self) -> Option<&Router> {
        match &self.target {
            Target::Submenu(router) => Some(router.as_ref()),
            Target::Handler(_) => None,
        }
    }

    /// Mutable access to the submenu behind this action, if it is one.
    pub fn submenu_mut(&mut self) -> Option<&mut Router> {
        match &mut self.target {
            Target::Submenu(router) => Some(router.as_mut()),
            Target::Handler(_) => None,
        }
    }

    /// The innermost callable: the handler, or the submenu's loop.
    pub(crate) fn terminal(&self) -> &dyn Handler {
        match &self.target {
            Target::Handler(handler) => &**handler,
            Target::Submenu(router) => &**router,
        }
    }

    /// Runs the action wrapped in its local middleware only.
    ///
    /// Routers dispatch through [`Router::run`]; this is for invoking an
    /// action outside a menu.
    pub fn run(&self, ctx: &mut MenuContext) -> HandlerResult {
        let layers: Vec<&dyn Middleware> = self.middleware.iter().collect();
        compose(&layers, self.terminal()).run(ctx)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("submenu", &self.is_submenu())
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

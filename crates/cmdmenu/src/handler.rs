//! Handler types.
//!
//! A handler is the terminal unit of work behind a menu option. It receives
//! the shared [`MenuContext`] and either succeeds or fails; there is no
//! return value because the menu has nothing to render from it.
//!
//! Handlers take `&self`. Closures that need to mutate captured state use
//! `Cell`/`RefCell`, which is the natural fit for a single-threaded loop.

use crate::context::MenuContext;

/// The result type for handlers and middleware.
///
/// Enables use of the `?` operator for error propagation.
pub type HandlerResult = Result<(), anyhow::Error>;

/// Trait for menu handlers.
///
/// # Example
///
/// ```rust
/// use cmdmenu::{Handler, HandlerResult, MenuContext};
/// use std::cell::Cell;
///
/// struct Counter { count: Cell<u32> }
///
/// impl Handler for Counter {
///     fn handle(&self, _ctx: &mut MenuContext) -> HandlerResult {
///         self.count.set(self.count.get() + 1);
///         Ok(())
///     }
/// }
/// ```
pub trait Handler {
    /// Execute the handler with the given context.
    fn handle(&self, ctx: &mut MenuContext) -> HandlerResult;
}

/// A wrapper that implements [`Handler`] for closures.
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&mut MenuContext) -> HandlerResult,
{
    /// Creates a new FnHandler wrapping the given closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&mut MenuContext) -> HandlerResult,
{
    fn handle(&self, ctx: &mut MenuContext) -> HandlerResult {
        (self.f)(ctx)
    }
}

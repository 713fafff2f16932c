//! Middleware wrapping handlers.
//!
//! A middleware runs "around" the rest of a dispatch. It receives the context
//! and a [`Next`] handle for everything after it, and decides what to do:
//!
//! ```text
//! g1 pre → g2 pre → l1 pre → handler → l1 post → g2 post → g1 post
//! ```
//!
//! - Call `next.run(ctx)` once to continue the chain.
//! - Return early without calling it to short-circuit (an auth check).
//! - Inspect or replace the returned result to transform the outcome.
//! - Call it again to retry, since [`Next`] is `Copy`.
//!
//! The router composes a fresh chain on each dispatch: its own global
//! middleware first, then the selected action's local middleware, then the
//! action's handler.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use thiserror::Error;
use tracing::error;

use crate::context::MenuContext;
use crate::handler::{Handler, HandlerResult};

/// A wrapper around the rest of a dispatch chain.
pub trait Middleware {
    /// Runs this layer. `next` invokes the remaining layers and the handler.
    fn call(&self, ctx: &mut MenuContext, next: Next<'_>) -> HandlerResult;
}

/// The remainder of a composed chain.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    layers: &'a [&'a dyn Middleware],
    terminal: &'a dyn Handler,
}

impl<'a> Next<'a> {
    /// Invokes the next layer, or the terminal handler once the layers run out.
    pub fn run(self, ctx: &mut MenuContext) -> HandlerResult {
        match self.layers.split_first() {
            Some((layer, rest)) => layer.call(
                ctx,
                Next {
                    layers: rest,
                    terminal: self.terminal,
                },
            ),
            None => self.terminal.handle(ctx),
        }
    }

    /// Number of middleware layers still ahead of the handler.
    pub fn remaining(&self) -> usize {
        self.layers.len()
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.layers.len())
            .finish_non_exhaustive()
    }
}

/// Composes `layers` around `terminal` into a single callable.
///
/// The first layer is the outermost: it runs first and sees the final result.
///
/// ```rust
/// use cmdmenu::middleware::{compose, from_fn, Middleware};
/// use cmdmenu::{FnHandler, MenuContext};
/// use std::cell::RefCell;
///
/// let trace = RefCell::new(Vec::new());
/// let outer = from_fn(|ctx, next| {
///     trace.borrow_mut().push("outer");
///     next.run(ctx)
/// });
/// let handler = FnHandler::new(|_ctx| {
///     trace.borrow_mut().push("handler");
///     Ok(())
/// });
///
/// let layers: [&dyn Middleware; 1] = [&outer];
/// compose(&layers, &handler).run(&mut MenuContext::new()).unwrap();
/// assert_eq!(*trace.borrow(), ["outer", "handler"]);
/// ```
pub fn compose<'a>(layers: &'a [&'a dyn Middleware], terminal: &'a dyn Handler) -> Next<'a> {
    Next { layers, terminal }
}

/// An ordered list of middleware, in registration order.
///
/// Layers are reference counted so one middleware value can be installed on
/// several routers or actions.
#[derive(Clone, Default)]
pub struct Chain {
    layers: Vec<Rc<dyn Middleware>>,
}

impl Chain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware after the existing ones.
    pub fn push<M: Middleware + 'static>(&mut self, middleware: M) {
        self.layers.push(Rc::new(middleware));
    }

    /// Appends an already shared middleware.
    pub fn push_shared(&mut self, middleware: Rc<dyn Middleware>) {
        self.layers.push(middleware);
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if no layer is registered.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterates the layers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Middleware> + '_ {
        self.layers
            .iter()
            .map(|layer| layer.as_ref() as &dyn Middleware)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("len", &self.layers.len())
            .finish()
    }
}

/// A middleware built from a closure. See [`from_fn`].
pub struct FnMiddleware<F> {
    f: F,
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&mut MenuContext, Next<'_>) -> HandlerResult,
{
    fn call(&self, ctx: &mut MenuContext, next: Next<'_>) -> HandlerResult {
        (self.f)(ctx, next)
    }
}

/// Adapts a closure into a [`Middleware`].
///
/// ```rust
/// use cmdmenu::middleware::from_fn;
///
/// let admin_only = from_fn(|ctx, next| {
///     if ctx.extensions.contains::<bool>() {
///         next.run(ctx)
///     } else {
///         Err(anyhow::anyhow!("access denied"))
///     }
/// });
/// # let _ = admin_only;
/// ```
pub fn from_fn<F>(f: F) -> FnMiddleware<F>
where
    F: Fn(&mut MenuContext, Next<'_>) -> HandlerResult,
{
    FnMiddleware { f }
}

/// A panic caught by [`Recover`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panic: {message}")]
pub struct PanicError {
    /// The panic payload, when it was a string.
    pub message: String,
}

impl PanicError {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// Turns a panic in the rest of the chain into a [`PanicError`].
///
/// The panic hook still runs, so the usual panic message reaches stderr
/// unless the application replaces the hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recover;

impl Middleware for Recover {
    fn call(&self, ctx: &mut MenuContext, next: Next<'_>) -> HandlerResult {
        match panic::catch_unwind(AssertUnwindSafe(|| next.run(ctx))) {
            Ok(result) => result,
            Err(payload) => Err(PanicError::from_payload(payload).into()),
        }
    }
}

/// Logs errors returned by the rest of the chain, then passes them on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Middleware for Logger {
    fn call(&self, ctx: &mut MenuContext, next: Next<'_>) -> HandlerResult {
        let result = next.run(ctx);
        if let Err(err) = &result {
            let message = format!("{err:#}");
            error!(error = %message, "action returned an error");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::FnHandler;
    use std::cell::{Cell, RefCell};

    fn recorder<'a>(log: &'a RefCell<Vec<String>>, name: &'a str) -> impl Middleware + 'a {
        from_fn(move |ctx, next| {
            log.borrow_mut().push(format!("{name} pre"));
            let result = next.run(ctx);
            log.borrow_mut().push(format!("{name} post"));
            result
        })
    }

    #[test]
    fn test_empty_chain_runs_handler() {
        let ran = Cell::new(false);
        let handler = FnHandler::new(|_ctx| {
            ran.set(true);
            Ok(())
        });

        let next = compose(&[], &handler);
        assert_eq!(next.remaining(), 0);
        next.run(&mut MenuContext::new()).unwrap();
        assert!(ran.get());
    }

    #[test]
    fn test_layers_wrap_in_registration_order() {
        let log = RefCell::new(Vec::new());
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");
        let handler = FnHandler::new(|_ctx| {
            log.borrow_mut().push("handler".to_string());
            Ok(())
        });

        let layers: [&dyn Middleware; 2] = [&a, &b];
        compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap();

        assert_eq!(
            *log.borrow(),
            ["a pre", "b pre", "handler", "b post", "a post"]
        );
    }

    #[test]
    fn test_short_circuit_skips_rest() {
        let ran = Cell::new(false);
        let deny = from_fn(|_ctx, _next| Err(anyhow::anyhow!("denied")));
        let handler = FnHandler::new(|_ctx| {
            ran.set(true);
            Ok(())
        });

        let layers: [&dyn Middleware; 1] = [&deny];
        let err = compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap_err();

        assert_eq!(err.to_string(), "denied");
        assert!(!ran.get());
    }

    #[test]
    fn test_middleware_can_replace_result() {
        let swallow = from_fn(|ctx, next| {
            let _ = next.run(ctx);
            Ok(())
        });
        let handler = FnHandler::new(|_ctx| Err(anyhow::anyhow!("boom")));

        let layers: [&dyn Middleware; 1] = [&swallow];
        assert!(compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .is_ok());
    }

    #[test]
    fn test_next_can_retry() {
        let attempts = Cell::new(0);
        let retry = from_fn(|ctx, next| next.run(ctx).or_else(|_| next.run(ctx)));
        let handler = FnHandler::new(|_ctx| {
            attempts.set(attempts.get() + 1);
            if attempts.get() < 2 {
                Err(anyhow::anyhow!("flaky"))
            } else {
                Ok(())
            }
        });

        let layers: [&dyn Middleware; 1] = [&retry];
        compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap();
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn test_middleware_passes_state_to_handler() {
        let inject = from_fn(|ctx, next| {
            ctx.extensions.insert(String::from("session"));
            next.run(ctx)
        });
        let handler = FnHandler::new(|ctx| {
            let value = ctx.extensions.get_required::<String>()?;
            assert_eq!(value, "session");
            Ok(())
        });

        let layers: [&dyn Middleware; 1] = [&inject];
        compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap();
    }

    #[test]
    fn test_recover_converts_panic() {
        let handler = FnHandler::new(|_ctx| -> HandlerResult { panic!("Something went wrong!") });

        let layers: [&dyn Middleware; 1] = [&Recover];
        let err = compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap_err();

        let panic = err.downcast_ref::<PanicError>().unwrap();
        assert_eq!(panic.message, "Something went wrong!");
        assert_eq!(err.to_string(), "panic: Something went wrong!");
    }

    #[test]
    fn test_recover_formatted_panic_message() {
        let handler = FnHandler::new(|_ctx| -> HandlerResult { panic!("code {}", 7) });

        let layers: [&dyn Middleware; 1] = [&Recover];
        let err = compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "panic: code 7");
    }

    #[test]
    fn test_recover_passes_through_errors() {
        let handler = FnHandler::new(|_ctx| Err(anyhow::anyhow!("plain")));

        let layers: [&dyn Middleware; 1] = [&Recover];
        let err = compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap_err();
        assert!(err.downcast_ref::<PanicError>().is_none());
    }

    #[test]
    fn test_logger_keeps_error() {
        let handler = FnHandler::new(|_ctx| Err(anyhow::anyhow!("kept")));

        let layers: [&dyn Middleware; 1] = [&Logger];
        let err = compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "kept");
    }

    #[test]
    fn test_chain_iterates_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = Chain::new();
        assert!(chain.is_empty());

        let first = Rc::clone(&log);
        chain.push(from_fn(move |ctx, next| {
            first.borrow_mut().push(1);
            next.run(ctx)
        }));
        let second = Rc::clone(&log);
        chain.push_shared(Rc::new(from_fn(move |ctx, next| {
            second.borrow_mut().push(2);
            next.run(ctx)
        })));
        assert_eq!(chain.len(), 2);

        let handler = FnHandler::new(|_ctx| Ok(()));
        let layers: Vec<&dyn Middleware> = chain.iter().collect();
        compose(&layers, &handler)
            .run(&mut MenuContext::new())
            .unwrap();
        assert_eq!(*log.borrow(), [1, 2]);
    }
}

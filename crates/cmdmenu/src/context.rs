//! The environment value threaded through every dispatch.
//!
//! The router never inspects or changes a [`MenuContext`]; it only hands the
//! same `&mut` reference to each middleware and handler. Middleware can use
//! [`Extensions`] to inject state that handlers later retrieve:
//!
//! ```rust
//! use cmdmenu::{middleware, Action, MenuContext};
//!
//! struct Session { user: String }
//!
//! let login = middleware::from_fn(|ctx, next| {
//!     ctx.extensions.insert(Session { user: "admin".into() });
//!     next.run(ctx)
//! });
//!
//! let profile = Action::new("View Profile", |ctx| {
//!     let session = ctx.extensions.get_required::<Session>()?;
//!     println!("Name: {}", session.user);
//!     Ok(())
//! })
//! .with_middleware(login);
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Session values shared between actions, at most one per type.
///
/// Values live as long as the [`MenuContext`] that holds them, so whatever
/// "Login" stores is still there when "Admin Panel" runs later.
#[derive(Default)]
pub struct Extensions {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, handing back the value of the same type it replaces.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        let previous = self.values.insert(TypeId::of::<T>(), Box::new(value))?;
        previous.downcast::<T>().ok().map(|boxed| *boxed)
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.values.get(&TypeId::of::<T>())?.downcast_ref()
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.values.get_mut(&TypeId::of::<T>())?.downcast_mut()
    }

    /// Like [`get`](Self::get), but a missing value is an error, so a handler
    /// that needs earlier session state can just use `?`.
    pub fn get_required<T: 'static>(&self) -> Result<&T, anyhow::Error> {
        self.get::<T>().ok_or_else(|| {
            anyhow::anyhow!(
                "no {} stored in this menu session; run the action that provides it first",
                type_name::<T>()
            )
        })
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extensions({} values)", self.values.len())
    }
}

/// Context passed to middleware and handlers on every dispatch.
///
/// One context is created by the caller of [`Router::run`](crate::Router::run)
/// and lives for the whole session, submenus included, so state inserted by
/// one action is visible to the next.
#[derive(Debug, Default)]
pub struct MenuContext {
    /// Session state, keyed by type.
    pub extensions: Extensions,
}

impl MenuContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value to the context, builder style.
    pub fn with<T: 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct LoggedIn(&'static str);

    #[test]
    fn test_insert_then_get() {
        let mut session = Extensions::new();
        assert!(!session.contains::<LoggedIn>());

        assert_eq!(session.insert(LoggedIn("admin")), None);
        assert!(session.contains::<LoggedIn>());
        assert_eq!(session.get::<LoggedIn>(), Some(&LoggedIn("admin")));
    }

    #[test]
    fn test_insert_replaces_same_type() {
        let mut session = Extensions::new();
        session.insert(LoggedIn("guest"));

        let previous = session.insert(LoggedIn("admin"));
        assert_eq!(previous, Some(LoggedIn("guest")));
        assert_eq!(session.get::<LoggedIn>(), Some(&LoggedIn("admin")));
    }

    #[test]
    fn test_types_do_not_collide() {
        let mut session = Extensions::new();
        session.insert(3u32);
        session.insert(String::from("three"));

        *session.get_mut::<u32>().unwrap() += 1;
        assert_eq!(session.get::<u32>(), Some(&4));
        assert_eq!(session.get::<String>().map(String::as_str), Some("three"));
        assert!(session.get_mut::<u8>().is_none());
    }

    #[test]
    fn test_get_required_names_missing_type() {
        let session = Extensions::new();
        let err = session.get_required::<LoggedIn>().unwrap_err();
        assert!(err.to_string().contains("LoggedIn"));
        assert!(err.to_string().contains("menu session"));
    }

    #[test]
    fn test_debug_counts_values() {
        let ctx = MenuContext::new().with(1u8).with(2u16);
        assert_eq!(format!("{:?}", ctx.extensions), "Extensions(2 values)");
    }

    #[test]
    fn test_context_with_builder() {
        let ctx = MenuContext::new().with(String::from("user"));
        assert_eq!(ctx.extensions.get::<String>().unwrap(), "user");
    }
}

//! Radix tree router.
//!
//! [`Router`] is the tree-backed engine. Lookups walk one node per path
//! segment, so cost depends on path depth rather than on the number of
//! registered patterns.

use http::Method;

use crate::error::InsertError;
use crate::method_router::MethodRouter;
use crate::node::Node;
use crate::params::Params;
use crate::RouteMatch;

/// A radix tree router storing values of type `T`.
///
/// # Example
///
/// ```rust
/// use checkpoint_router::{MethodRouter, Router};
/// use http::Method;
///
/// let mut router = Router::new();
/// router.insert("/users", MethodRouter::new().on(Method::GET, "listUsers"))?;
/// router.route(Method::GET, "/users/{id}", "getUser")?;
///
/// let found = router.match_route(&Method::GET, "/users/123").unwrap();
/// assert_eq!(*found.value, "getUser");
/// assert_eq!(found.params.get("id"), Some("123"));
/// # Ok::<(), checkpoint_router::InsertError>(())
/// ```
///
/// # Route Priority
///
/// For a given segment the router tries, in order:
///
/// 1. **Static segments** (e.g. `/users/me`)
/// 2. **Parameter segments** (e.g. `/users/{id}`)
/// 3. **Wildcard segments** (e.g. `/files/*path`)
///
/// # Duplicate Registrations
///
/// Inserting a pattern that already exists merges the method tables, and a
/// binding for the same method replaces the earlier one.
#[derive(Debug, Clone)]
pub struct Router<T> {
    root: Node<T>,
    route_count: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            route_count: 0,
        }
    }

    /// Inserts a method table at `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an [`InsertError`] if the pattern is malformed.
    pub fn insert(&mut self, pattern: &str, methods: MethodRouter<T>) -> Result<(), InsertError> {
        self.root.insert(pattern, methods)?;
        self.route_count += 1;
        Ok(())
    }

    /// Binds `value` to a single method at `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an [`InsertError`] if the pattern is malformed.
    pub fn route(&mut self, method: Method, pattern: &str, value: T) -> Result<(), InsertError> {
        self.insert(pattern, MethodRouter::new().on(method, value))
    }

    /// Binds `value` to every method at `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an [`InsertError`] if the pattern is malformed.
    pub fn route_any(&mut self, pattern: &str, value: T) -> Result<(), InsertError> {
        self.insert(pattern, MethodRouter::new().any(value))
    }

    /// Matches `method` and `path` against the router.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, T>> {
        let (methods, params) = self.root.match_path(path)?;
        let value = methods.get(method)?;
        Some(RouteMatch::new(value, params))
    }

    /// Matches `path` regardless of method.
    ///
    /// Returns the whole method table so callers can tell a missing path
    /// (404) from a missing method (405).
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodRouter<T>, Params)> {
        self.root.match_path(path)
    }

    /// Number of successful insertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if nothing was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}

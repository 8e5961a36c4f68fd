//! Path routers for the checkpoint harness.
//!
//! Two engines with deliberately different surfaces live here:
//!
//! - [`Router`]: a radix tree (compressed trie) with per-path method tables,
//!   `{param}` captures and trailing `*wildcard` segments.
//! - [`LinearRouter`]: an ordered list of routes checked first to last.
//!
//! Both are generic over the value they store, so the harness can register
//! request handlers directly.
//!
//! # Example
//!
//! ```rust
//! use checkpoint_router::{MethodRouter, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.insert("/users", MethodRouter::new().on(Method::GET, "listUsers").on(Method::POST, "createUser"))?;
//! router.insert("/users/{id}", MethodRouter::new().on(Method::GET, "getUser"))?;
//! router.route_any("/files/*path", "serveFile")?;
//!
//! let found = router.match_route(&Method::GET, "/users/123").unwrap();
//! assert_eq!(*found.value, "getUser");
//! assert_eq!(found.params.get("id"), Some("123"));
//! # Ok::<(), checkpoint_router::InsertError>(())
//! ```
//!
//! # Tree Layout
//!
//! ```text
//!                    (root)
//!                      │
//!              ┌───────┴───────┐
//!              │               │
//!            "users"        "files"
//!              │               │
//!        ┌─────┴─────┐      "*path"
//!        │           │        [*]
//!       (leaf)    "{id}"
//!   [GET,POST]      │
//!                 (leaf)
//!                 [GET]
//! ```

mod error;
mod linear;
mod method_router;
mod node;
mod params;
mod router;

pub use error::InsertError;
pub use linear::{LinearMatch, LinearRouter};
pub use method_router::MethodRouter;
pub use node::{Node, SegmentKind};
pub use params::Params;
pub use router::Router;

/// A matched route: the stored value and the captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    /// Value bound to the matched pattern and method
    pub value: &'a T,
    /// Captured path parameters
    pub params: Params,
}

impl<'a, T> RouteMatch<'a, T> {
    /// Creates a route match.
    #[must_use]
    pub fn new(value: &'a T, params: Params) -> Self {
        Self { value, params }
    }
}

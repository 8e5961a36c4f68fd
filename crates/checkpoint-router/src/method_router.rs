//! Per-path method table.
//!
//! A [`MethodRouter`] holds the values registered for a single path. Values
//! can be bound to a specific HTTP method or to every method at once; a
//! method-specific entry always takes precedence over the catch-all.

use http::Method;
use smallvec::SmallVec;

/// Maps HTTP methods to route values for one path.
///
/// # Example
///
/// ```rust
/// use checkpoint_router::MethodRouter;
/// use http::Method;
///
/// let router = MethodRouter::new()
///     .on(Method::GET, "listUsers")
///     .any("fallback");
///
/// assert_eq!(router.get(&Method::GET), Some(&"listUsers"));
/// assert_eq!(router.get(&Method::DELETE), Some(&"fallback"));
/// ```
#[derive(Debug, Clone)]
pub struct MethodRouter<T> {
    by_method: SmallVec<[(Method, T); 2]>,
    any: Option<T>,
}

impl<T> Default for MethodRouter<T> {
    fn default() -> Self {
        Self {
            by_method: SmallVec::new(),
            any: None,
        }
    }
}

impl<T> MethodRouter<T> {
    /// Creates an empty method table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to `method`, replacing an earlier binding.
    #[must_use]
    pub fn on(mut self, method: Method, value: T) -> Self {
        self.set(method, value);
        self
    }

    /// Binds `value` to every method without a specific binding.
    #[must_use]
    pub fn any(mut self, value: T) -> Self {
        self.any = Some(value);
        self
    }

    /// Binds `value` to `method` in place, replacing an earlier binding.
    pub fn set(&mut self, method: Method, value: T) {
        if let Some(slot) = self.by_method.iter_mut().find(|(m, _)| *m == method) {
            slot.1 = value;
        } else {
            self.by_method.push((method, value));
        }
    }

    /// Looks up the value for `method`, falling back to the catch-all.
    #[must_use]
    pub fn get(&self, method: &Method) -> Option<&T> {
        self.by_method
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, v)| v)
            .or(self.any.as_ref())
    }

    /// Returns true if a catch-all value is bound.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.any.is_some()
    }

    /// Methods with a specific binding, in registration order.
    ///
    /// Used to build the `Allow` header of a 405 response.
    pub fn allowed_methods(&self) -> impl Iterator<Item = &Method> {
        self.by_method.iter().map(|(m, _)| m)
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_method.is_empty() && self.any.is_none()
    }

    /// Merges `other` into this table. Bindings in `other` replace existing
    /// bindings for the same method, and its catch-all replaces ours.
    pub fn merge(&mut self, other: MethodRouter<T>) {
        for (method, value) in other.by_method {
            self.set(method, value);
        }
        if other.any.is_some() {
            self.any = other.any;
        }
    }
}

//! Linear first-match router.
//!
//! [`LinearRouter`] keeps routes in registration order and checks them one
//! by one. It exposes a different surface from the radix [`Router`]: every
//! route carries an optional method filter, parameters come back as a
//! `HashMap`, and duplicate registrations are kept side by side with the
//! earliest one winning.
//!
//! [`Router`]: crate::Router

use std::collections::HashMap;

use http::Method;

/// A segment of a linear route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    /// Literal segment (e.g. "users")
    Literal(String),
    /// Parameter segment (e.g. "{userId}")
    Param(String),
}

#[derive(Debug, Clone)]
struct Route<T> {
    /// `None` matches every method
    method: Option<Method>,
    segments: Vec<PathSegment>,
    pattern: String,
    value: T,
}

impl<T> Route<T> {
    fn new(method: Option<Method>, pattern: &str, value: T) -> Self {
        Self {
            method,
            segments: parse_segments(pattern),
            pattern: pattern.to_string(),
            value,
        }
    }

    fn accepts(&self, method: &Method) -> bool {
        self.method.is_none() || self.method.as_ref() == Some(method)
    }

    fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if path_segments.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, actual) in self.segments.iter().zip(path_segments) {
            match segment {
                PathSegment::Literal(expected) if expected != actual => return None,
                PathSegment::Literal(_) => {}
                PathSegment::Param(name) => {
                    params.insert(name.clone(), actual.to_string());
                }
            }
        }
        Some(params)
    }
}

fn parse_segments(pattern: &str) -> Vec<PathSegment> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => PathSegment::Param(name.to_string()),
            None => PathSegment::Literal(s.to_string()),
        })
        .collect()
}

/// A route found by [`LinearRouter::match_route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearMatch<'a, T> {
    /// Pattern the route was registered with
    pub pattern: &'a str,
    /// Registered value
    pub value: &'a T,
    /// Captured parameters
    pub params: HashMap<String, String>,
}

/// Router that scans routes in registration order.
///
/// # Example
///
/// ```rust
/// use checkpoint_router::LinearRouter;
/// use http::Method;
///
/// let mut router = LinearRouter::new();
/// router.add_route(Some(Method::GET), "/users/{userId}", "getUser");
/// router.add_route(None, "/health", "health");
///
/// let m = router.match_route(&Method::GET, "/users/42").unwrap();
/// assert_eq!(*m.value, "getUser");
/// assert_eq!(m.params.get("userId").map(String::as_str), Some("42"));
///
/// assert!(router.match_route(&Method::POST, "/users/42").is_none());
/// assert!(router.match_route(&Method::POST, "/health").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct LinearRouter<T> {
    routes: Vec<Route<T>>,
}

impl<T> Default for LinearRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinearRouter<T> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route. A `None` method matches every method.
    pub fn add_route(&mut self, method: Option<Method>, pattern: impl AsRef<str>, value: T) {
        self.routes.push(Route::new(method, pattern.as_ref(), value));
    }

    /// Returns the first route accepting `method` whose pattern matches
    /// `path`.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<LinearMatch<'_, T>> {
        self.routes
            .iter()
            .filter(|route| route.accepts(method))
            .find_map(|route| {
                route.match_path(path).map(|params| LinearMatch {
                    pattern: &route.pattern,
                    value: &route.value,
                    params,
                })
            })
    }

    /// Returns true if any route matches `path` under some method.
    #[must_use]
    pub fn matches_path(&self, path: &str) -> bool {
        self.routes.iter().any(|route| route.match_path(path).is_some())
    }

    /// Number of registered routes, duplicates included.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Registered patterns in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.pattern.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        assert_eq!(
            parse_segments("/users/{userId}/posts"),
            vec![
                PathSegment::Literal("users".to_string()),
                PathSegment::Param("userId".to_string()),
                PathSegment::Literal("posts".to_string()),
            ]
        );
    }

    #[test]
    fn test_segment_count_must_match() {
        let mut router = LinearRouter::new();
        router.add_route(None, "/users/{id}", ());

        assert!(router.match_route(&Method::GET, "/users").is_none());
        assert!(router.match_route(&Method::GET, "/users/1/posts").is_none());
        assert!(router.match_route(&Method::GET, "/users/1").is_some());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut router = LinearRouter::new();
        router.add_route(None, "/test", "first");
        router.add_route(None, "/test", "second");

        assert_eq!(router.route_count(), 2);
        assert_eq!(
            router.match_route(&Method::GET, "/test").map(|m| *m.value),
            Some("first")
        );
    }

    #[test]
    fn test_method_filter_skips_to_next_route() {
        let mut router = LinearRouter::new();
        router.add_route(Some(Method::POST), "/items", "create");
        router.add_route(None, "/items", "fallback");

        assert_eq!(
            router.match_route(&Method::POST, "/items").map(|m| *m.value),
            Some("create")
        );
        assert_eq!(
            router.match_route(&Method::GET, "/items").map(|m| *m.value),
            Some("fallback")
        );
    }

    #[test]
    fn test_matches_path_ignores_method() {
        let mut router = LinearRouter::new();
        router.add_route(Some(Method::DELETE), "/items/{id}", ());

        assert!(router.matches_path("/items/9"));
        assert!(!router.matches_path("/other"));
    }

    #[test]
    fn test_patterns_in_order() {
        let mut router = LinearRouter::new();
        router.add_route(None, "/b", ());
        router.add_route(None, "/a", ());

        assert_eq!(router.patterns().collect::<Vec<_>>(), vec!["/b", "/a"]);
    }
}

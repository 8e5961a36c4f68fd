//! Adapters for routing engines whose API does not match [`Router`].
//!
//! The set of supported engines is closed: each one is a variant of
//! [`RouterAdapter`], so the engine type is known at compile time and no
//! runtime type inspection is needed.

use std::collections::HashMap;

use checkpoint_router::LinearRouter;
use http::StatusCode;

use super::{split_pattern, Router};
use crate::error::CheckError;
use crate::handler::{Handler, Request};
use crate::recorder::ResponseRecorder;

/// Parameters captured by the `matchit` engine, stored in the request
/// extensions by [`RouterAdapter::Matchit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchitParams(Vec<(String, String)>);

impl MatchitParams {
    /// Returns the value captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Reads the value captured for `name` from a dispatched request.
    #[must_use]
    pub fn from_request<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
        request.extensions().get::<Self>()?.get(name)
    }

    /// Iterates over `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl From<&matchit::Params<'_, '_>> for MatchitParams {
    fn from(params: &matchit::Params<'_, '_>) -> Self {
        Self(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Parameters captured by [`LinearRouter`], stored in the request
/// extensions by [`RouterAdapter::Linear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearParams(pub HashMap<String, String>);

impl LinearParams {
    /// Returns the value captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Reads the value captured for `name` from a dispatched request.
    #[must_use]
    pub fn from_request<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
        request.extensions().get::<Self>()?.get(name)
    }
}

/// A routing engine driven through [`Router`] by translation.
///
/// # Example
///
/// ```
/// use checkpoint::{Checker, Handler, MatchitParams, RouterAdapter};
///
/// let mut checker = Checker::new(RouterAdapter::matchit());
/// checker
///     .path("/test/123")
///     .pattern("/test/{id}")
///     .handler(Handler::new(|w, r| {
///         let id = MatchitParams::from_request(r, "id").unwrap_or_default().to_string();
///         w.write(id.as_bytes());
///     }));
///
/// assert_eq!(checker.run()?.text(), "123");
/// # Ok::<(), checkpoint::CheckError>(())
/// ```
pub enum RouterAdapter {
    /// The `matchit` radix router. Its insert is fallible and its matches
    /// borrow from the path, so captures are copied into [`MatchitParams`].
    /// Inserting a pattern that is already present fails.
    Matchit(matchit::Router<Handler>),

    /// The linear first-match router. Routes carry an optional method filter
    /// and captures come back as a map, copied into [`LinearParams`].
    /// Duplicate patterns are kept and the earliest one keeps matching.
    Linear(LinearRouter<Handler>),

    /// No engine attached. Registration fails and dispatch answers
    /// `500 Unsupported router type`.
    Detached,
}

impl RouterAdapter {
    /// Adapter over an empty `matchit` router.
    #[must_use]
    pub fn matchit() -> Self {
        Self::Matchit(matchit::Router::new())
    }

    /// Adapter over an empty [`LinearRouter`].
    #[must_use]
    pub fn linear() -> Self {
        Self::Linear(LinearRouter::new())
    }

    /// Detaches the engine, leaving [`RouterAdapter::Detached`] in its place.
    pub fn take_engine(&mut self) -> Self {
        std::mem::replace(self, Self::Detached)
    }

    /// Name of the wrapped engine, for logs.
    #[must_use]
    pub fn engine_name(&self) -> &'static str {
        match self {
            Self::Matchit(_) => "matchit",
            Self::Linear(_) => "linear",
            Self::Detached => "detached",
        }
    }
}

impl std::fmt::Debug for RouterAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RouterAdapter").field(&self.engine_name()).finish()
    }
}

impl From<matchit::Router<Handler>> for RouterAdapter {
    fn from(router: matchit::Router<Handler>) -> Self {
        Self::Matchit(router)
    }
}

impl From<LinearRouter<Handler>> for RouterAdapter {
    fn from(router: LinearRouter<Handler>) -> Self {
        Self::Linear(router)
    }
}

impl Router for RouterAdapter {
    fn register(&mut self, pattern: &str, handler: Handler) -> Result<(), CheckError> {
        match self {
            Self::Matchit(router) => match split_pattern(pattern)? {
                (Some(method), _) => Err(CheckError::registration(
                    pattern,
                    format!("matchit routes by path only and cannot restrict to {method}"),
                )),
                (None, path) => router
                    .insert(path, handler)
                    .map_err(|e| CheckError::registration(pattern, e)),
            },
            Self::Linear(router) => {
                let (method, path) = split_pattern(pattern)?;
                router.add_route(method, path, handler);
                Ok(())
            }
            Self::Detached => Err(CheckError::registration(
                pattern,
                "router adapter has no engine attached",
            )),
        }
    }

    fn route(&self, request: &mut Request, sink: &mut ResponseRecorder) -> Option<Handler> {
        let found = match self {
            Self::Matchit(router) => router
                .at(request.uri().path())
                .ok()
                .map(|m| {
                    let params = MatchitParams::from(&m.params);
                    (m.value.clone(), Extension::Matchit(params))
                }),
            Self::Linear(router) => router
                .match_route(request.method(), request.uri().path())
                .map(|m| (m.value.clone(), Extension::Linear(LinearParams(m.params)))),
            Self::Detached => {
                tracing::warn!("dispatch on a router adapter with no engine attached");
                sink.error(StatusCode::INTERNAL_SERVER_ERROR, "Unsupported router type");
                return None;
            }
        };

        let Some((handler, params)) = found else {
            tracing::debug!(engine = self.engine_name(), path = request.uri().path(), "no route matched");
            sink.error(StatusCode::NOT_FOUND, "404 page not found");
            return None;
        };

        match params {
            Extension::Matchit(params) => {
                request.extensions_mut().insert(params);
            }
            Extension::Linear(params) => {
                request.extensions_mut().insert(params);
            }
        }
        Some(handler)
    }
}

enum Extension {
    Matchit(MatchitParams),
    Linear(LinearParams),
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::Method;

    fn request(method: Method, path: &str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(path)
            .body(Bytes::new())
            .unwrap()
    }

    fn write(body: &'static str) -> Handler {
        Handler::new(move |w, _| {
            w.write(body.as_bytes());
        })
    }

    fn serve(router: &RouterAdapter, method: Method, path: &str) -> (Request, ResponseRecorder) {
        let mut req = request(method, path);
        let mut sink = ResponseRecorder::new();
        router.dispatch(&mut req, &mut sink);
        (req, sink)
    }

    #[test]
    fn test_matchit_params_in_extensions() {
        let mut router = RouterAdapter::matchit();
        router.register("/users/{id}", write("ok")).unwrap();

        let (req, sink) = serve(&router, Method::GET, "/users/42");
        assert_eq!(sink.body(), b"ok");
        assert_eq!(MatchitParams::from_request(&req, "id"), Some("42"));
    }

    #[test]
    fn test_matchit_rejects_duplicate() {
        let mut router = RouterAdapter::matchit();
        router.register("/dup", write("a")).unwrap();
        let err = router.register("/dup", write("b")).unwrap_err();

        assert!(matches!(err, CheckError::Registration { .. }));
        assert_eq!(serve(&router, Method::GET, "/dup").1.body(), b"a");
    }

    #[test]
    fn test_matchit_rejects_method_pattern() {
        let mut router = RouterAdapter::matchit();
        let err = router.register("GET /users/{id}", write("never")).unwrap_err();

        assert!(matches!(
            err,
            CheckError::Registration { ref pattern, .. } if pattern == "GET /users/{id}"
        ));
        let (_, sink) = serve(&router, Method::GET, "/users/1");
        assert_eq!(sink.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_matchit_catch_all_syntax() {
        let mut router = RouterAdapter::matchit();
        router.register("/files/{*rest}", write("file")).unwrap();

        let (req, sink) = serve(&router, Method::GET, "/files/a/b.txt");
        assert_eq!(sink.body(), b"file");
        assert_eq!(MatchitParams::from_request(&req, "rest"), Some("a/b.txt"));
    }

    #[test]
    fn test_linear_keeps_first_duplicate() {
        let mut router = RouterAdapter::linear();
        router.register("/dup", write("a")).unwrap();
        router.register("/dup", write("b")).unwrap();

        assert_eq!(serve(&router, Method::GET, "/dup").1.body(), b"a");
    }

    #[test]
    fn test_linear_method_pattern() {
        let mut router = RouterAdapter::linear();
        router.register("PUT /items/{id}", write("put")).unwrap();

        let (req, sink) = serve(&router, Method::PUT, "/items/5");
        assert_eq!(sink.body(), b"put");
        assert_eq!(LinearParams::from_request(&req, "id"), Some("5"));

        let (_, sink) = serve(&router, Method::GET, "/items/5");
        assert_eq!(sink.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unmatched_is_not_found() {
        for router in [RouterAdapter::matchit(), RouterAdapter::linear()] {
            let (_, sink) = serve(&router, Method::GET, "/nowhere");
            assert_eq!(sink.status(), StatusCode::NOT_FOUND, "{router:?}");
        }
    }

    #[test]
    fn test_detached_dispatch_is_server_error() {
        let mut router = RouterAdapter::matchit();
        let engine = router.take_engine();
        assert_eq!(engine.engine_name(), "matchit");

        let (_, sink) = serve(&router, Method::GET, "/anything");
        assert_eq!(sink.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(sink.body(), b"Unsupported router type\n");
    }

    #[test]
    fn test_detached_register_fails() {
        let mut router = RouterAdapter::Detached;
        assert!(router.register("/x", write("x")).is_err());
    }
}

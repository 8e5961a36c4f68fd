//! Check configuration.
//!
//! A [`Checker`] collects everything one check needs: the router, the
//! terminal handler, the request parts and the middleware list. Setters can
//! be called any number of times in any order; nothing is validated until
//! [`Checker::run`].

use bytes::Bytes;
use http::Extensions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CheckError;
use crate::handler::{Handler, Middleware};

/// Configuration for checking a handler through a router.
///
/// Required before running: a handler and a non-empty path. Everything else
/// has a default, resolved at run time:
///
/// | Field | Default |
/// |-------|---------|
/// | method | `GET` |
/// | pattern | the path, without query string |
/// | body | empty |
/// | headers | none |
/// | middlewares | none |
///
/// # Example
///
/// ```
/// use checkpoint::{Checker, Handler, Mux};
/// use http::StatusCode;
///
/// let mut checker = Checker::new(Mux::new());
/// checker
///     .path("/echo")
///     .method("POST")
///     .body("request body content")
///     .header("X-Test-Header", "TestValue")
///     .handler(Handler::new(|w, r| {
///         if let Some(v) = r.headers().get("x-test-header").cloned() {
///             w.headers_mut().insert("x-test-header", v);
///         }
///         let body = r.body().clone();
///         w.write(&body);
///     }));
///
/// let result = checker.run()?;
/// assert_eq!(result.status(), StatusCode::OK);
/// assert_eq!(result.text(), "request body content");
/// assert_eq!(result.header("X-Test-Header"), Some("TestValue"));
/// # Ok::<(), checkpoint::CheckError>(())
/// ```
pub struct Checker<R> {
    pub(crate) router: R,
    pub(crate) handler: Option<Handler>,
    pub(crate) path: String,
    pub(crate) pattern: Option<String>,
    pub(crate) method: Option<String>,
    pub(crate) body: Option<Bytes>,
    pub(crate) headers: IndexMap<String, String>,
    pub(crate) middlewares: Vec<Middleware>,
    pub(crate) extensions: Extensions,
}

impl<R> Checker<R> {
    /// Creates a checker driving `router`.
    pub fn new(router: R) -> Self {
        Self {
            router,
            handler: None,
            path: String::new(),
            pattern: None,
            method: None,
            body: None,
            headers: IndexMap::new(),
            middlewares: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Sets the terminal handler.
    pub fn handler(&mut self, handler: Handler) -> &mut Self {
        self.handler = Some(handler);
        self
    }

    /// Sets the concrete request path, e.g. `/test/123`.
    pub fn path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = path.into();
        self
    }

    /// Sets the pattern the handler is registered under, e.g. `/test/{id}`.
    pub fn pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the request method.
    pub fn method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the request body.
    pub fn body(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a request header. Names are case-insensitive and a later value
    /// for the same name replaces the earlier one.
    pub fn header(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> &mut Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets several request headers, in order.
    pub fn headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.header(name, value);
        }
        self
    }

    /// Appends a middleware. The first appended middleware is the outermost.
    pub fn middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    /// Appends several middlewares, keeping their order.
    pub fn middlewares(&mut self, middlewares: impl IntoIterator<Item = Middleware>) -> &mut Self {
        self.middlewares.extend(middlewares);
        self
    }

    /// Attaches a typed value to every request this checker builds.
    ///
    /// This is how per-check context (deadlines, cancellation flags, fake
    /// identities) reaches handlers: read it back with
    /// `request.extensions().get::<T>()`.
    pub fn extension<T>(&mut self, value: T) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions.insert(value);
        self
    }

    /// Applies the fields present in `request`, leaving the rest untouched.
    pub fn apply(&mut self, request: &CheckRequest) -> &mut Self {
        if let Some(path) = &request.path {
            self.path(path.clone());
        }
        if let Some(pattern) = &request.pattern {
            self.pattern(pattern.clone());
        }
        if let Some(method) = &request.method {
            self.method(method.clone());
        }
        if let Some(body) = &request.body {
            self.body(body.clone());
        }
        self.headers(&request.headers)
    }

    /// The configured router.
    pub fn router(&self) -> &R {
        &self.router
    }

    /// Mutable access to the configured router.
    pub fn router_mut(&mut self) -> &mut R {
        &mut self.router
    }

    /// Consumes the checker, returning its router.
    pub fn into_router(self) -> R {
        self.router
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for Checker<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checker")
            .field("router", &self.router)
            .field("has_handler", &self.handler.is_some())
            .field("path", &self.path)
            .field("pattern", &self.pattern)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}

/// Serializable request parts, for table-driven checks loaded from fixtures.
///
/// Absent fields leave the checker unchanged when applied.
///
/// ```
/// use checkpoint::CheckRequest;
///
/// let req = CheckRequest::from_json(r#"{
///     "path": "/test/123",
///     "pattern": "/test/{id}",
///     "headers": { "X-Test-Header": "TestValue" }
/// }"#)?;
///
/// assert_eq!(req.path.as_deref(), Some("/test/123"));
/// assert_eq!(req.method, None);
/// # Ok::<(), checkpoint::CheckError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckRequest {
    /// Concrete request path
    pub path: Option<String>,
    /// Registration pattern
    pub pattern: Option<String>,
    /// Request method
    pub method: Option<String>,
    /// Request body as text
    pub body: Option<String>,
    /// Request headers
    pub headers: IndexMap<String, String>,
}

impl CheckRequest {
    /// Parses one request from JSON.
    pub fn from_json(json: &str) -> Result<Self, CheckError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a JSON array of requests.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, CheckError> {
        Ok(serde_json::from_str(json)?)
    }
}

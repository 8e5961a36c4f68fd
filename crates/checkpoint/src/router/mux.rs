//! Native router built on the radix tree engine.

use std::fmt;

use checkpoint_router::{Params, Router as RadixRouter};
use http::header::ALLOW;
use http::{HeaderValue, StatusCode};

use super::{split_pattern, Router};
use crate::error::CheckError;
use crate::handler::{Handler, Request};
use crate::recorder::ResponseRecorder;

/// Request multiplexer with native [`Router`] support.
///
/// Patterns use `{name}` for a single segment and a trailing `*name` for the
/// rest of the path. A pattern may start with a method (`"GET /users/{id}"`)
/// to restrict it; without one it matches every method.
///
/// Matched parameters are stored in the request extensions and read back
/// with [`path_param`].
///
/// Unknown paths get `404 page not found`. Known paths without a handler for
/// the request method get `405 Method Not Allowed` with an `Allow` header.
/// Registering the same method and pattern again replaces the handler.
#[derive(Default)]
pub struct Mux {
    routes: RadixRouter<Handler>,
}

impl Mux {
    /// Creates an empty multiplexer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations accepted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for Mux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mux").field("routes", &self.routes.len()).finish()
    }
}

impl Router for Mux {
    fn register(&mut self, pattern: &str, handler: Handler) -> Result<(), CheckError> {
        let (method, path) = split_pattern(pattern)?;
        let inserted = match method {
            Some(method) => self.routes.route(method, path, handler),
            None => self.routes.route_any(path, handler),
        };
        inserted.map_err(|e| CheckError::registration(pattern, e))
    }

    fn route(&self, request: &mut Request, sink: &mut ResponseRecorder) -> Option<Handler> {
        let Some((methods, params)) = self.routes.match_path(request.uri().path()) else {
            sink.error(StatusCode::NOT_FOUND, "404 page not found");
            return None;
        };

        match methods.get(request.method()) {
            Some(handler) => {
                request.extensions_mut().insert(params);
                Some(handler.clone())
            }
            None => {
                let allow = methods
                    .allowed_methods()
                    .map(http::Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                if let Ok(value) = HeaderValue::from_str(&allow) {
                    sink.headers_mut().insert(ALLOW, value);
                }
                sink.error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
                None
            }
        }
    }
}

/// Reads a path parameter captured by [`Mux`].
///
/// ```
/// use checkpoint::{path_param, Checker, Handler, Mux};
///
/// let mut checker = Checker::new(Mux::new());
/// checker
///     .path("/test/123")
///     .pattern("/test/{id}")
///     .handler(Handler::new(|w, r| {
///         let id = path_param(r, "id").unwrap_or_default().to_string();
///         w.write(id.as_bytes());
///     }));
///
/// let result = checker.run()?;
/// assert_eq!(result.text(), "123");
/// # Ok::<(), checkpoint::CheckError>(())
/// ```
#[must_use]
pub fn path_param<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
    request.extensions().get::<Params>()?.get(name)
}

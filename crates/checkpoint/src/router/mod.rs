//! Router capability and the engines that provide it.
//!
//! The harness drives every routing engine through the [`Router`] trait:
//! register a handler under a pattern, then dispatch a request. [`Mux`]
//! implements the trait natively. Engines whose own API differs are wrapped
//! in [`RouterAdapter`].
//!
//! Engines disagree on re-registration and on pattern syntax, and the trait
//! does not paper over it:
//!
//! | Engine | Same pattern registered twice | Catch-all | `"GET /path"` |
//! |--------|-------------------------------|-----------|---------------|
//! | [`Mux`] | later handler replaces the earlier one | `/files/*rest` | method-restricted |
//! | [`RouterAdapter::Matchit`] | rejected with [`CheckError::Registration`] | `/files/{*rest}` | rejected with [`CheckError::Registration`] |
//! | [`RouterAdapter::Linear`] | both kept, the earlier one keeps matching | none | method-restricted |
//!
//! Patterns using only `{param}` segments and no method are portable across
//! all three.

mod adapter;
mod mux;
mod shared;

pub use adapter::{LinearParams, MatchitParams, RouterAdapter};
pub use mux::{path_param, Mux};
pub use shared::SharedRouter;

use http::Method;

use crate::error::CheckError;
use crate::handler::{Handler, Request};
use crate::recorder::ResponseRecorder;

/// A routing engine the harness can register handlers with and dispatch to.
pub trait Router {
    /// Registers `handler` under `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Registration`] if the engine refuses the
    /// pattern. Registrations are never dropped silently.
    fn register(&mut self, pattern: &str, handler: Handler) -> Result<(), CheckError>;

    /// Finds the handler for `request`.
    ///
    /// On a match the captured parameters are stored in the request
    /// extensions and the handler is returned. Otherwise the engine writes
    /// its error reply (404, 405, 500) to `sink` and returns `None`.
    fn route(&self, request: &mut Request, sink: &mut ResponseRecorder) -> Option<Handler>;

    /// Routes `request` and lets the matched handler write into `sink`.
    ///
    /// Routing failures (no match, unsupported engine) are written to `sink`
    /// as error responses rather than returned.
    fn dispatch(&self, request: &mut Request, sink: &mut ResponseRecorder) {
        if let Some(handler) = self.route(request, sink) {
            handler.call(sink, request);
        }
    }

    /// Registers and dispatches as one step.
    ///
    /// Engines shared between checkers override this to register and route
    /// under one lock.
    fn register_and_dispatch(
        &mut self,
        pattern: &str,
        handler: Handler,
        request: &mut Request,
        sink: &mut ResponseRecorder,
    ) -> Result<(), CheckError> {
        self.register(pattern, handler)?;
        self.dispatch(request, sink);
        Ok(())
    }
}

impl<R: Router + ?Sized> Router for &mut R {
    fn register(&mut self, pattern: &str, handler: Handler) -> Result<(), CheckError> {
        (**self).register(pattern, handler)
    }

    fn route(&self, request: &mut Request, sink: &mut ResponseRecorder) -> Option<Handler> {
        (**self).route(request, sink)
    }

    fn dispatch(&self, request: &mut Request, sink: &mut ResponseRecorder) {
        (**self).dispatch(request, sink);
    }

    fn register_and_dispatch(
        &mut self,
        pattern: &str,
        handler: Handler,
        request: &mut Request,
        sink: &mut ResponseRecorder,
    ) -> Result<(), CheckError> {
        (**self).register_and_dispatch(pattern, handler, request, sink)
    }
}

impl<R: Router + ?Sized> Router for Box<R> {
    fn register(&mut self, pattern: &str, handler: Handler) -> Result<(), CheckError> {
        (**self).register(pattern, handler)
    }

    fn route(&self, request: &mut Request, sink: &mut ResponseRecorder) -> Option<Handler> {
        (**self).route(request, sink)
    }

    fn dispatch(&self, request: &mut Request, sink: &mut ResponseRecorder) {
        (**self).dispatch(request, sink);
    }

    fn register_and_dispatch(
        &mut self,
        pattern: &str,
        handler: Handler,
        request: &mut Request,
        sink: &mut ResponseRecorder,
    ) -> Result<(), CheckError> {
        (**self).register_and_dispatch(pattern, handler, request, sink)
    }
}

/// Splits an optional leading method off a pattern: `"GET /users"` becomes
/// `(Some(GET), "/users")` and `"/users"` becomes `(None, "/users")`.
pub(crate) fn split_pattern(pattern: &str) -> Result<(Option<Method>, &str), CheckError> {
    let trimmed = pattern.trim();
    let (method, path) = match trimmed.split_once(char::is_whitespace) {
        Some((method, path)) if !method.starts_with('/') => {
            let method = Method::from_bytes(method.as_bytes())
                .map_err(|e| CheckError::registration(pattern, e))?;
            (Some(method), path.trim_start())
        }
        _ => (None, trimmed),
    };

    if !path.starts_with('/') {
        return Err(CheckError::registration(pattern, "path must begin with '/'"));
    }
    Ok((method, path))
}

//! Check execution.
//!
//! Running a check resolves defaults, builds the request, wraps the handler
//! in its middleware, registers the result with the router, dispatches the
//! request and captures what the chain wrote.

use bytes::Bytes;
use tracing::debug;

use crate::config::Checker;
use crate::error::CheckError;
use crate::handler::{compose, Handler};
use crate::recorder::ResponseRecorder;
use crate::request::build_request;
use crate::result::CheckResult;
use crate::router::Router;

/// Method used when none is configured.
pub const DEFAULT_METHOD: &str = "GET";

/// Request parts after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) pattern: String,
    pub(crate) body: Bytes,
}

impl<R> Checker<R> {
    /// Validates required fields and fills in defaults. This is the only
    /// place defaults are decided.
    pub(crate) fn resolve(&self) -> Result<(Handler, Resolved), CheckError> {
        let handler = self.handler.clone().ok_or(CheckError::MissingHandler)?;
        if self.path.is_empty() {
            return Err(CheckError::EmptyPath);
        }

        let resolved = Resolved {
            method: self
                .method
                .clone()
                .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            path: self.path.clone(),
            pattern: self
                .pattern
                .clone()
                .unwrap_or_else(|| default_pattern(&self.path).to_string()),
            body: self.body.clone().unwrap_or_default(),
        };
        Ok((handler, resolved))
    }
}

/// The path component of `path`: query string and fragment are not part of
/// what a router matches on.
fn default_pattern(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

impl<R: Router> Checker<R> {
    /// Runs the check once and captures the response.
    ///
    /// A status written by the handler chain, including 4xx and 5xx, is part
    /// of the returned result and never turned into an error.
    ///
    /// The router keeps the registration afterwards. Running again registers
    /// the pattern again, with whatever effect the engine gives that.
    ///
    /// # Errors
    ///
    /// - [`CheckError::MissingHandler`] or [`CheckError::EmptyPath`] before
    ///   anything is built
    /// - a construction error if the method, path or a header is invalid
    /// - [`CheckError::Registration`] if the router refuses the pattern
    /// - [`CheckError::Capture`] if the response cannot be read back
    pub fn run(&mut self) -> Result<CheckResult, CheckError> {
        let (handler, resolved) = self.resolve()?;

        let span = tracing::debug_span!(
            "checkpoint.run",
            method = %resolved.method,
            path = %resolved.path,
            pattern = %resolved.pattern,
        );
        let _guard = span.enter();

        let mut request = build_request(
            &resolved.method,
            &resolved.path,
            resolved.body,
            &self.headers,
        )?;
        request.extensions_mut().extend(self.extensions.clone());

        let composed = compose(&self.middlewares, handler);
        debug!(middlewares = self.middlewares.len(), "composed handler chain");

        let mut sink = ResponseRecorder::new();
        self.router
            .register_and_dispatch(&resolved.pattern, composed, &mut request, &mut sink)?;

        let result = CheckResult::capture(sink)?;
        debug!(status = result.status_code(), body_len = result.body().len(), "captured response");
        Ok(result)
    }
}

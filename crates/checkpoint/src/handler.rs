//! Handlers, middleware, and middleware composition.
//!
//! A [`Handler`] writes a response for a request. A [`Middleware`] takes the
//! next handler and returns a new one that wraps it. [`compose`] folds an
//! ordered list of middleware onto a terminal handler.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::recorder::ResponseRecorder;

/// The in-memory request type passed through the handler chain.
pub type Request = http::Request<Bytes>;

type HandlerFn = dyn Fn(&mut ResponseRecorder, &mut Request) + Send + Sync;
type MiddlewareFn = dyn Fn(Handler) -> Handler + Send + Sync;

/// A cloneable request handler.
///
/// # Example
///
/// ```
/// use checkpoint::{Handler, ResponseRecorder, Request};
/// use http::StatusCode;
///
/// let handler = Handler::new(|w, _r| w.write_header(StatusCode::ACCEPTED));
///
/// let mut w = ResponseRecorder::new();
/// let mut r = Request::new(Default::default());
/// handler.call(&mut w, &mut r);
/// assert_eq!(w.status(), StatusCode::ACCEPTED);
/// ```
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    /// Wraps a closure as a handler.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut ResponseRecorder, &mut Request) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the handler.
    pub fn call(&self, w: &mut ResponseRecorder, r: &mut Request) {
        (self.0)(w, r);
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

/// A handler decorator.
///
/// # Example
///
/// ```
/// use checkpoint::{Handler, Middleware};
/// use http::HeaderValue;
///
/// let tag = Middleware::new(|next: Handler| {
///     Handler::new(move |w, r| {
///         r.headers_mut().insert("x-tag", HeaderValue::from_static("on"));
///         next.call(w, r);
///     })
/// });
/// # let _ = tag;
/// ```
#[derive(Clone)]
pub struct Middleware(Arc<MiddlewareFn>);

impl Middleware {
    /// Wraps a closure as middleware.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Applies the middleware to `next`.
    pub fn wrap(&self, next: Handler) -> Handler {
        (self.0)(next)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

/// Folds `middlewares` onto `terminal`.
///
/// The list is applied from last to first, so the first middleware is the
/// outermost: it sees the request first and the response last.
///
/// ```text
/// [m1, m2] + h  =>  m1(m2(h))
///
/// request  → m1 → m2 → h
/// response ← m1 ← m2 ← h
/// ```
pub fn compose(middlewares: &[Middleware], terminal: Handler) -> Handler {
    middlewares
        .iter()
        .rev()
        .fold(terminal, |next, middleware| middleware.wrap(next))
}

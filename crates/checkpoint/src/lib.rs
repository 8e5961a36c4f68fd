//! # Checkpoint
//!
//! Run an HTTP handler against a synthesized request, entirely in memory.
//!
//! A [`Checker`] builds one request, wraps the handler in an ordered list of
//! [`Middleware`], registers the result with a pluggable [`Router`] under a
//! pattern, dispatches the request, and returns what the chain wrote as a
//! [`CheckResult`]. No listener, socket or runtime is involved.
//!
//! ## Key Features
//!
//! - **Deterministic middleware order**: the first middleware added is the
//!   outermost, so it sees the request first and the response last
//! - **Pluggable routers**: the native [`Mux`] or any engine wrapped in
//!   [`RouterAdapter`]; path parameters resolve through each engine's own
//!   mechanism
//! - **Plain results**: status, canonical headers and body bytes; a 500 from
//!   the handler is data, not an error
//!
//! ## Example
//!
//! ```
//! use checkpoint::{path_param, Checker, Handler, Middleware, Mux};
//! use http::HeaderValue;
//!
//! let auth = Middleware::new(|next: Handler| {
//!     Handler::new(move |w, r| {
//!         r.headers_mut().insert("x-user", HeaderValue::from_static("alice"));
//!         next.call(w, r);
//!     })
//! });
//!
//! let mut checker = Checker::new(Mux::new());
//! checker
//!     .path("/users/123")
//!     .pattern("GET /users/{id}")
//!     .middleware(auth)
//!     .handler(Handler::new(|w, r| {
//!         let user = r.headers()["x-user"].to_str().unwrap_or("").to_string();
//!         let id = path_param(r, "id").unwrap_or("").to_string();
//!         w.headers_mut().insert("content-type", HeaderValue::from_static("text/plain"));
//!         w.write(format!("{user}:{id}").as_bytes());
//!     }));
//!
//! let result = checker.run()?;
//! assert_eq!(result.status_code(), 200);
//! assert_eq!(result.header("Content-Type"), Some("text/plain"));
//! assert_eq!(result.text(), "alice:123");
//! # Ok::<(), checkpoint::CheckError>(())
//! ```
//!
//! ## Flow
//!
//! ```text
//! Checker ─ resolve defaults ─ build_request ─┐
//!         └─ compose(middlewares, handler) ───┤
//!                                             ▼
//!                       Router::register(pattern) + dispatch
//!                                             │
//!                                    ResponseRecorder
//!                                             │
//!                                       CheckResult
//! ```

#![doc(html_root_url = "https://docs.rs/checkpoint/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod handler;
pub mod logging;
mod recorder;
mod request;
mod result;
pub mod router;
mod run;

pub use config::{CheckRequest, Checker};
pub use error::CheckError;
pub use handler::{compose, Handler, Middleware, Request};
pub use recorder::ResponseRecorder;
pub use request::build_request;
pub use result::{canonical_header_name, CheckResult};
pub use router::{path_param, LinearParams, MatchitParams, Mux, Router, RouterAdapter, SharedRouter};
pub use run::DEFAULT_METHOD;

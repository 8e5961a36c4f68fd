//! Router shared between checkers.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::Router;
use crate::error::CheckError;
use crate::handler::{Handler, Request};
use crate::recorder::ResponseRecorder;

/// A router that several checkers can hold at once.
///
/// Each clone points at the same engine. Registration and routing of one
/// run happen under a single lock, so a concurrent run cannot register a
/// different handler for the same pattern in between. The lock is released
/// before the matched handler runs, so a handler may itself use the router,
/// including running another check against it.
///
/// # Example
///
/// ```
/// use checkpoint::{Checker, Handler, Mux, SharedRouter};
///
/// let shared = SharedRouter::new(Mux::new());
/// let mut a = Checker::new(shared.clone());
/// let mut b = Checker::new(shared.clone());
///
/// a.path("/a").handler(Handler::new(|w, _| { w.write(b"a"); }));
/// b.path("/b").handler(Handler::new(|w, _| { w.write(b"b"); }));
///
/// assert_eq!(a.run()?.text(), "a");
/// assert_eq!(b.run()?.text(), "b");
/// assert_eq!(shared.lock().len(), 2);
/// # Ok::<(), checkpoint::CheckError>(())
/// ```
#[derive(Debug, Default)]
pub struct SharedRouter<R> {
    inner: Arc<Mutex<R>>,
}

impl<R> Clone for SharedRouter<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> SharedRouter<R> {
    /// Wraps `router` for shared use.
    pub fn new(router: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(router)),
        }
    }

    /// Locks the engine for direct access.
    pub fn lock(&self) -> MutexGuard<'_, R> {
        self.inner.lock()
    }
}

impl<R: Router> Router for SharedRouter<R> {
    fn register(&mut self, pattern: &str, handler: Handler) -> Result<(), CheckError> {
        self.inner.lock().register(pattern, handler)
    }

    fn route(&self, request: &mut Request, sink: &mut ResponseRecorder) -> Option<Handler> {
        self.inner.lock().route(request, sink)
    }

    fn register_and_dispatch(
        &mut self,
        pattern: &str,
        handler: Handler,
        request: &mut Request,
        sink: &mut ResponseRecorder,
    ) -> Result<(), CheckError> {
        let matched = {
            let mut router = self.inner.lock();
            router.register(pattern, handler)?;
            router.route(request, sink)
        };
        if let Some(handler) = matched {
            handler.call(sink, request);
        }
        Ok(())
    }
}

//! In-memory response sink.
//!
//! [`ResponseRecorder`] stands in for a network connection. Handlers set
//! headers, commit a status and append body bytes; the harness reads the
//! committed state back once the chain returns.

use std::io;

use bytes::{Bytes, BytesMut};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, HeaderValue, StatusCode};

/// Records status, headers and body written by a handler chain.
///
/// The status is committed by the first call to [`write_header`] or by the
/// first body write, which commits `200 OK`. The header map stays mutable
/// until the first body write and is snapshotted then, so changes made after
/// body bytes went out are not part of the recorded response.
///
/// [`write_header`]: ResponseRecorder::write_header
///
/// # Example
///
/// ```
/// use checkpoint::ResponseRecorder;
/// use http::StatusCode;
/// use std::io::Write;
///
/// let mut w = ResponseRecorder::new();
/// w.headers_mut().insert("x-id", "7".parse().unwrap());
/// w.write_header(StatusCode::CREATED);
/// write!(w, "created {}", 7).unwrap();
///
/// assert_eq!(w.status(), StatusCode::CREATED);
/// assert_eq!(w.body(), b"created 7");
/// ```
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    headers: HeaderMap,
    snapshot: Option<HeaderMap>,
    status: Option<StatusCode>,
    body: BytesMut,
}

impl ResponseRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The working header map.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the working header map.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Commits `status`. Only the first call has an effect.
    pub fn write_header(&mut self, status: StatusCode) {
        if let Some(existing) = self.status {
            tracing::trace!(%existing, ignored = %status, "superfluous write_header call");
            return;
        }
        self.status = Some(status);
    }

    /// Appends `data` to the body, committing `200 OK` if no status was
    /// written yet. Returns the number of bytes written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        if self.status.is_none() {
            self.write_header(StatusCode::OK);
        }
        if self.snapshot.is_none() {
            self.snapshot = Some(self.headers.clone());
        }
        self.body.extend_from_slice(data);
        data.len()
    }

    /// Writes a plain-text error reply.
    ///
    /// Sets `content-type: text/plain; charset=utf-8` and
    /// `x-content-type-options: nosniff`, commits `status`, and writes
    /// `message` followed by a newline.
    pub fn error(&mut self, status: StatusCode, message: &str) {
        self.headers.remove(CONTENT_LENGTH);
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.headers
            .insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        self.write_header(status);
        self.write(message.as_bytes());
        self.write(b"\n");
    }

    /// The committed status, or `200 OK` if nothing was committed.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Returns true once a status has been committed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    /// Headers as recorded: the snapshot taken at the first body write, or
    /// the working map if no body was written.
    #[must_use]
    pub fn recorded_headers(&self) -> &HeaderMap {
        self.snapshot.as_ref().unwrap_or(&self.headers)
    }

    /// Body bytes written so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the recorder, returning status, recorded headers and body.
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        let status = self.status();
        let headers = self.snapshot.unwrap_or(self.headers);
        (status, headers, self.body.freeze())
    }
}

impl io::Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(ResponseRecorder::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

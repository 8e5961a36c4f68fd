//! Captured response.

use std::borrow::Cow;
use std::collections::BTreeMap;

use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::CheckError;
use crate::recorder::ResponseRecorder;

/// Snapshot of the response written during a check.
///
/// Header names are stored in canonical form (`X-Test-Header`). A header
/// written several times is joined into one value with `", "`, in the order
/// the values were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    status: StatusCode,
    headers: BTreeMap<String, String>,
    body: Bytes,
}

impl CheckResult {
    /// Reads status, headers and body out of a finished recorder.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Capture`] if a header value is not visible
    /// ASCII and so cannot be represented as text.
    pub fn capture(sink: ResponseRecorder) -> Result<Self, CheckError> {
        let (status, header_map, body) = sink.into_parts();

        let mut headers = BTreeMap::new();
        for name in header_map.keys() {
            let values = header_map
                .get_all(name)
                .iter()
                .map(|value| {
                    value.to_str().map_err(|_| {
                        CheckError::Capture(format!("header '{name}' is not visible ASCII"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !values.is_empty() {
                headers.insert(canonical_header_name(name.as_str()), values.join(", "));
            }
        }

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// The status as a number.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// The status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// All headers, keyed by canonical name.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Looks up a header by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_name(name))
            .map(String::as_str)
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the result, returning the body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Body as text. Invalid UTF-8 sequences are replaced, and an empty body
    /// gives an empty string.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Body as text, failing on invalid UTF-8.
    pub fn try_text(&self) -> Result<&str, CheckError> {
        std::str::from_utf8(&self.body)
            .map_err(|e| CheckError::Capture(format!("body is not valid UTF-8: {e}")))
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, CheckError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Canonicalizes a header name: the first letter and every letter after a
/// hyphen are upper case, the rest lower case.
///
/// ```
/// assert_eq!(checkpoint::canonical_header_name("x-test-header"), "X-Test-Header");
/// assert_eq!(checkpoint::canonical_header_name("CONTENT-TYPE"), "Content-Type");
/// ```
#[must_use]
pub fn canonical_header_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let mapped = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            mapped
        })
        .collect()
}

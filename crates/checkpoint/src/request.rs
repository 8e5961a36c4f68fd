//! In-memory request construction.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Method, Uri};

use crate::error::CheckError;
use crate::handler::Request;

/// Builds an in-memory request.
///
/// Each header is assigned rather than appended, so a repeated name keeps
/// only its last value.
///
/// # Errors
///
/// Returns a construction error if the method is not an HTTP token, the
/// path is not a valid request URI, or a header name or value is invalid.
///
/// # Example
///
/// ```
/// use checkpoint::build_request;
///
/// let req = build_request("POST", "/items?draft=true", "payload", [("X-Id", "9")])?;
/// assert_eq!(req.method(), "POST");
/// assert_eq!(req.uri().query(), Some("draft=true"));
/// assert_eq!(req.headers()["x-id"], "9");
/// assert_eq!(req.body().as_ref(), b"payload");
/// # Ok::<(), checkpoint::CheckError>(())
/// ```
pub fn build_request<I, K, V>(
    method: &str,
    path: &str,
    body: impl Into<Bytes>,
    headers: I,
) -> Result<Request, CheckError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|_| CheckError::InvalidMethod(method.to_string()))?;
    let uri: Uri = path.parse().map_err(|e: http::uri::InvalidUri| CheckError::InvalidUri {
        uri: path.to_string(),
        reason: e.to_string(),
    })?;

    let mut request = Request::new(body.into());
    *request.method_mut() = method;
    *request.uri_mut() = uri;

    for (name, value) in headers {
        let (name, value) = (name.as_ref(), value.as_ref());
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            CheckError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| CheckError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        request.headers_mut().insert(header_name, header_value);
    }

    Ok(request)
}

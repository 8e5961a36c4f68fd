//! Path parameters captured during a route match.
//!
//! Parameters are kept in match order as `(name, value)` pairs. Most
//! patterns carry one or two parameters, so the pairs live inline until
//! [`INLINE_PARAMS`] is exceeded.

use smallvec::SmallVec;

/// Maximum number of parameters stored without a heap allocation.
const INLINE_PARAMS: usize = 4;

/// Parameters extracted from a matched path.
///
/// ```rust
/// use checkpoint_router::Params;
///
/// let mut params = Params::new();
/// params.push("orgId", "acme");
/// params.push("id", "123");
///
/// assert_eq!(params.get("id"), Some("123"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a captured parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value captured for `name`.
    ///
    /// When a name was captured more than once the last capture wins,
    /// matching how nested patterns shadow outer ones.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over `(name, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Drops captures beyond `len`. Used to undo a failed branch while
    /// walking the tree.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

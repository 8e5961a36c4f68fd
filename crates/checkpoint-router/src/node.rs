//! Radix tree node.
//!
//! Each node owns one path segment. Children are split by kind so that a
//! lookup can try static segments first, then the single parameter child,
//! then the single wildcard child.

use crate::error::InsertError;
use crate::method_router::MethodRouter;
use crate::params::Params;

/// Kind of path segment held by a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Literal segment (e.g. `users`)
    Static,
    /// Named parameter (e.g. `{id}`)
    Param(String),
    /// Catch-all for the rest of the path (e.g. `*path`)
    Wildcard(String),
}

/// A node in the radix tree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Raw segment text as written in the pattern
    pub segment: String,
    /// Segment kind
    pub kind: SegmentKind,
    /// Values registered at this node, if it terminates a pattern
    pub methods: Option<MethodRouter<T>>,
    /// Static children, sorted by segment for binary search
    pub static_children: Vec<Node<T>>,
    /// Parameter child
    pub param_child: Option<Box<Node<T>>>,
    /// Wildcard child, always a leaf
    pub wildcard_child: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn with_kind(segment: String, kind: SegmentKind) -> Self {
        Self {
            segment,
            kind,
            methods: None,
            static_children: Vec::new(),
            param_child: None,
            wildcard_child: None,
        }
    }

    /// Creates the root node.
    #[must_use]
    pub fn root() -> Self {
        Self::with_kind(String::new(), SegmentKind::Static)
    }

    /// Inserts `methods` at `pattern`, merging with values already there.
    ///
    /// # Errors
    ///
    /// Returns an [`InsertError`] if the pattern is malformed or names a
    /// parameter differently from an existing pattern at the same position.
    pub fn insert(&mut self, pattern: &str, methods: MethodRouter<T>) -> Result<(), InsertError> {
        let segments = parse_pattern(pattern)?;
        self.insert_segments(pattern, &segments, methods)
    }

    fn insert_segments(
        &mut self,
        pattern: &str,
        segments: &[(String, SegmentKind)],
        methods: MethodRouter<T>,
    ) -> Result<(), InsertError> {
        let Some(((segment, kind), remaining)) = segments.split_first() else {
            match &mut self.methods {
                Some(existing) => existing.merge(methods),
                None => self.methods = Some(methods),
            }
            return Ok(());
        };

        match kind {
            SegmentKind::Static => {
                let index = match self
                    .static_children
                    .binary_search_by(|c| c.segment.as_str().cmp(segment))
                {
                    Ok(index) => index,
                    Err(index) => {
                        let child = Node::with_kind(segment.clone(), SegmentKind::Static);
                        self.static_children.insert(index, child);
                        index
                    }
                };
                self.static_children[index].insert_segments(pattern, remaining, methods)
            }
            SegmentKind::Param(_) => {
                let child = self.param_child.get_or_insert_with(|| {
                    Box::new(Node::with_kind(segment.clone(), kind.clone()))
                });
                if child.kind != *kind {
                    return Err(InsertError::ConflictingParam {
                        pattern: pattern.to_string(),
                        existing: child.segment.clone(),
                    });
                }
                child.insert_segments(pattern, remaining, methods)
            }
            SegmentKind::Wildcard(_) => {
                let child = self.wildcard_child.get_or_insert_with(|| {
                    Box::new(Node::with_kind(segment.clone(), kind.clone()))
                });
                if child.kind != *kind {
                    return Err(InsertError::ConflictingParam {
                        pattern: pattern.to_string(),
                        existing: child.segment.clone(),
                    });
                }
                child.insert_segments(pattern, remaining, methods)
            }
        }
    }

    /// Matches a concrete path, returning the method table and captures.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodRouter<T>, Params)> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Params::new();
        let methods = self.match_segments(&segments, &mut params)?;
        Some((methods, params))
    }

    fn match_segments<'a>(
        &'a self,
        segments: &[&str],
        params: &mut Params,
    ) -> Option<&'a MethodRouter<T>> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.methods.as_ref();
        };

        if let Some(child) = self.find_static_child(segment) {
            if let Some(found) = child.match_segments(remaining, params) {
                return Some(found);
            }
        }

        if let Some(child) = &self.param_child {
            if let SegmentKind::Param(name) = &child.kind {
                let mark = params.len();
                params.push(name.clone(), *segment);
                if let Some(found) = child.match_segments(remaining, params) {
                    return Some(found);
                }
                params.truncate(mark);
            }
        }

        if let Some(child) = &self.wildcard_child {
            if let (SegmentKind::Wildcard(name), Some(methods)) = (&child.kind, &child.methods) {
                params.push(name.clone(), segments.join("/"));
                return Some(methods);
            }
        }

        None
    }

    fn find_static_child(&self, segment: &str) -> Option<&Node<T>> {
        self.static_children
            .binary_search_by(|c| c.segment.as_str().cmp(segment))
            .ok()
            .map(|i| &self.static_children[i])
    }
}

/// Splits a pattern into typed segments. Empty segments are dropped, so
/// `/users/` and `/users` describe the same route.
fn parse_pattern(pattern: &str) -> Result<Vec<(String, SegmentKind)>, InsertError> {
    let raw: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let last = raw.len().saturating_sub(1);

    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            let kind = if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                if name.is_empty() {
                    return Err(InsertError::EmptyParam(pattern.to_string()));
                }
                SegmentKind::Param(name.to_string())
            } else if let Some(name) = s.strip_prefix('*') {
                if i != last {
                    return Err(InsertError::WildcardNotLast(pattern.to_string()));
                }
                SegmentKind::Wildcard(name.to_string())
            } else {
                SegmentKind::Static
            };
            Ok(((*s).to_string(), kind))
        })
        .collect()
}

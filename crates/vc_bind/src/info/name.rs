use alloc::sync::Arc;
use core::fmt;

// -----------------------------------------------------------------------------
// PropertyName

/// An output name, optionally qualified by a namespace.
///
/// Used for property wrapper names, object id property names and root names.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PropertyName {
    simple: Arc<str>,
    namespace: Option<Arc<str>>,
}

impl PropertyName {
    #[inline]
    pub fn new(simple: impl Into<Arc<str>>) -> Self {
        Self {
            simple: simple.into(),
            namespace: None,
        }
    }

    #[inline]
    pub fn with_namespace(mut self, namespace: impl Into<Arc<str>>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[inline]
    pub fn simple_name(&self) -> &str {
        &self.simple
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns `true` if the simple part is non-empty.
    #[inline]
    pub fn has_simple_name(&self) -> bool {
        !self.simple.is_empty()
    }

    /// Returns `true` if this is exactly the unqualified name `name`.
    #[inline]
    pub fn is_unqualified(&self, name: &str) -> bool {
        self.namespace.is_none() && &*self.simple == name
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.simple),
            None => f.pad(&self.simple),
        }
    }
}

impl fmt::Debug for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyName({self})")
    }
}

impl From<&str> for PropertyName {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

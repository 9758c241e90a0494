use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// View

/// A named serialization view.
///
/// Views may derive from other views; an active view selects every property
/// declared for itself or for one of its ancestors.
///
/// # Examples
///
/// ```
/// use vc_bind::info::View;
///
/// let public = View::new("Public");
/// let internal = View::new("Internal").with_ancestors(["Public"]);
///
/// assert!(internal.is_a(&public));
/// assert!(!public.is_a(&internal));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct View {
    name: Arc<str>,
    ancestors: Arc<[Arc<str>]>,
}

impl View {
    #[inline]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ancestors: Arc::from(Vec::new()),
        }
    }

    /// Declares the views this view derives from.
    pub fn with_ancestors<S: Into<Arc<str>>>(mut self, ancestors: impl IntoIterator<Item = S>) -> Self {
        self.ancestors = ancestors.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if `self` is `declared` or derives from it.
    pub fn is_a(&self, declared: &View) -> bool {
        self.name == declared.name || self.ancestors.iter().any(|a| *a == declared.name)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "View({})", self.name)
    }
}

// -----------------------------------------------------------------------------
// ViewSet

/// The views a property belongs to. Empty means "no view restriction".
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ViewSet(Vec<View>);

impl ViewSet {
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &View> {
        self.0.iter()
    }

    /// Returns `true` if the `active` view selects a member of this set.
    pub fn admits(&self, active: &View) -> bool {
        self.0.iter().any(|declared| active.is_a(declared))
    }
}

impl FromIterator<View> for ViewSet {
    fn from_iter<T: IntoIterator<Item = View>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Debug for ViewSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

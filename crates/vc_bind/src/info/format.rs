use alloc::sync::Arc;

/// Requested output shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatShape {
    Natural,
    Object,
    Array,
    String,
    Number,
    Boolean,
    Scalar,
}

/// Per-use format overrides, e.g. from a property annotation.
///
/// The resolver only passes these through to the codec builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FormatOverrides {
    pub shape: Option<FormatShape>,
    pub pattern: Option<Arc<str>>,
}

impl FormatOverrides {
    /// No overrides.
    pub const EMPTY: Self = Self {
        shape: None,
        pattern: None,
    };

    #[inline]
    pub fn with_shape(mut self, shape: FormatShape) -> Self {
        self.shape = Some(shape);
        self
    }

    #[inline]
    pub fn with_pattern(mut self, pattern: impl Into<Arc<str>>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_none() && self.pattern.is_none()
    }
}

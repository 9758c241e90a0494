use alloc::sync::Arc;
use core::fmt;

// -----------------------------------------------------------------------------
// TagInclusion

/// Where the type tag of a polymorphic value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagInclusion {
    /// As an extra property inside the value's own object.
    Property,
    /// As the single key of a wrapping object.
    WrapperObject,
    /// As the first element of a wrapping array.
    WrapperArray,
    /// As a sibling property of the *enclosing* object.
    ExternalProperty,
    /// Reuses a regular property of the value.
    ExistingProperty,
}

impl TagInclusion {
    /// Inclusions that write the tag under a property name.
    #[inline]
    pub fn uses_property_name(self) -> bool {
        matches!(
            self,
            Self::Property | Self::ExternalProperty | Self::ExistingProperty
        )
    }
}

// -----------------------------------------------------------------------------
// TypeTag

/// Polymorphic type tag configuration of a value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeTag {
    inclusion: TagInclusion,
    property_name: Arc<str>,
}

impl TypeTag {
    #[inline]
    pub fn new(inclusion: TagInclusion, property_name: impl Into<Arc<str>>) -> Self {
        Self {
            inclusion,
            property_name: property_name.into(),
        }
    }

    /// A tag written as sibling property `name` of the enclosing object.
    #[inline]
    pub fn external(property_name: impl Into<Arc<str>>) -> Self {
        Self::new(TagInclusion::ExternalProperty, property_name)
    }

    #[inline]
    pub fn inclusion(&self) -> TagInclusion {
        self.inclusion
    }

    #[inline]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.inclusion == TagInclusion::ExternalProperty
    }

    /// Checks that inclusions writing a property have a name to write.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.inclusion.uses_property_name() && self.property_name.is_empty() {
            return Err("type tag written as a property needs a non-empty property name");
        }
        Ok(())
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({:?} `{}`)", self.inclusion, self.property_name)
    }
}

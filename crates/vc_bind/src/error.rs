use alloc::borrow::Cow;
use alloc::sync::Arc;

use thiserror::Error;

// -----------------------------------------------------------------------------
// BindError

/// Error produced while resolving a codec.
///
/// Use the constructor functions ([`BindError::type_definition`],
/// [`BindError::property_definition`] and [`BindError::custom`])
/// instead of building variants by hand.
///
/// An unresolvable type is **not** an error: the resolver answers with the
/// unknown-type codec instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindError {
    /// The definition of a type is malformed, e.g. an object id refers to a
    /// property that does not exist.
    #[error("invalid type definition for `{ty}`: {message}")]
    TypeDefinition {
        ty: Arc<str>,
        message: Cow<'static, str>,
    },

    /// The writer for one property of a type could not be constructed.
    ///
    /// This is the type definition error of a single property: it makes the
    /// whole type unresolvable, and [`is_definition_error`] reports it like
    /// [`TypeDefinition`]. Failures of a property codec's `contextualize`
    /// and invalid type tags end up here.
    ///
    /// [`is_definition_error`]: BindError::is_definition_error
    /// [`TypeDefinition`]: BindError::TypeDefinition
    #[error("invalid definition for property `{property}` of `{ty}`: {message}")]
    PropertyDefinition {
        ty: Arc<str>,
        property: Arc<str>,
        message: Cow<'static, str>,
    },

    /// Raised by extension code: modifiers, providers, converters or id generators.
    #[error("{0}")]
    Custom(Cow<'static, str>),
}

impl BindError {
    /// Creates a [`BindError::TypeDefinition`].
    #[cold]
    pub fn type_definition(ty: impl Into<Arc<str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::TypeDefinition {
            ty: ty.into(),
            message: message.into(),
        }
    }

    /// Creates a [`BindError::PropertyDefinition`].
    #[cold]
    pub fn property_definition(
        ty: impl Into<Arc<str>>,
        property: impl Into<Arc<str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::PropertyDefinition {
            ty: ty.into(),
            property: property.into(),
            message: message.into(),
        }
    }

    /// Creates a [`BindError::Custom`].
    #[cold]
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(message.into())
    }

    /// Returns `true` for errors that describe a broken type or property definition.
    #[inline]
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::TypeDefinition { .. } | Self::PropertyDefinition { .. }
        )
    }
}

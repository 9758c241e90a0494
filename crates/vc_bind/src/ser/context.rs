use alloc::sync::Arc;
use core::fmt;

use crate::codec::Codec;
use crate::config::BindConfig;
use crate::error::BindError;
use crate::info::{FormatOverrides, TypeDescription, TypeDescriptor, Typing};
use crate::registry::Introspector;

// -----------------------------------------------------------------------------
// StandardCodecs

/// Builders for the types the bean pipeline does not handle itself.
///
/// Every method answers `Ok(None)` by default, meaning "no codec from this
/// builder". `()` implements the trait with all defaults.
pub trait StandardCodecs: Send + Sync {
    /// Codec of a container type (list, set, array, map).
    fn build_container(
        &self,
        _cx: &ResolveContext<'_>,
        _ty: &TypeDescriptor,
        _desc: &TypeDescription,
        _format: &FormatOverrides,
        _static_typing: bool,
    ) -> Result<Option<Codec>, BindError> {
        Ok(None)
    }

    /// Codec of a reference type (optional or boxed values).
    fn build_reference(
        &self,
        _cx: &ResolveContext<'_>,
        _ty: &TypeDescriptor,
        _desc: &TypeDescription,
        _format: &FormatOverrides,
        _static_typing: bool,
    ) -> Result<Option<Codec>, BindError> {
        Ok(None)
    }

    /// Codec of a self-describing type, or one selected by type-level
    /// annotations such as a value accessor.
    fn find_by_annotations(
        &self,
        _cx: &ResolveContext<'_>,
        _ty: &TypeDescriptor,
        _desc: &TypeDescription,
    ) -> Result<Option<Codec>, BindError> {
        Ok(None)
    }

    /// Codec from the table of well-known types.
    fn find_by_lookup(
        &self,
        _cx: &ResolveContext<'_>,
        _ty: &TypeDescriptor,
        _desc: &TypeDescription,
        _format: &FormatOverrides,
        _static_typing: bool,
    ) -> Result<Option<Codec>, BindError> {
        Ok(None)
    }

    /// Codec of a primary type (numbers, strings, dates ...) matched by
    /// heuristics rather than exact lookup.
    fn find_by_primary_type(
        &self,
        _cx: &ResolveContext<'_>,
        _ty: &TypeDescriptor,
        _desc: &TypeDescription,
        _format: &FormatOverrides,
        _static_typing: bool,
    ) -> Result<Option<Codec>, BindError> {
        Ok(None)
    }

    /// Codec of an add-on interface type (iterators and the like), consulted
    /// when bean construction found nothing to write.
    fn find_by_add_on_type(
        &self,
        _cx: &ResolveContext<'_>,
        _ty: &TypeDescriptor,
        _desc: &TypeDescription,
        _static_typing: bool,
    ) -> Result<Option<Codec>, BindError> {
        Ok(None)
    }
}

impl StandardCodecs for () {}

// -----------------------------------------------------------------------------
// CodecProvider

/// An externally registered source of codecs.
///
/// Providers are consulted in registration order for types that are neither
/// containers nor references; the first `Some` wins.
pub trait CodecProvider: Send + Sync {
    fn find_codec(
        &self,
        config: &BindConfig,
        ty: &TypeDescriptor,
        desc: &TypeDescription,
    ) -> Result<Option<Codec>, BindError>;
}

// -----------------------------------------------------------------------------
// ResolveContext

/// Configuration and collaborators of a resolution.
///
/// The context only borrows; it is cheap to copy and holds no state.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    config: &'a BindConfig,
    introspector: &'a dyn Introspector,
    standard: &'a dyn StandardCodecs,
}

impl<'a> ResolveContext<'a> {
    /// Creates a context without standard codec builders.
    #[inline]
    pub fn new(config: &'a BindConfig, introspector: &'a dyn Introspector) -> Self {
        Self {
            config,
            introspector,
            standard: &(),
        }
    }

    #[inline]
    pub fn with_standard_codecs(mut self, standard: &'a dyn StandardCodecs) -> Self {
        self.standard = standard;
        self
    }

    #[inline]
    pub fn config(&self) -> &'a BindConfig {
        self.config
    }

    #[inline]
    pub fn introspector(&self) -> &'a dyn Introspector {
        self.introspector
    }

    #[inline]
    pub fn standard(&self) -> &'a dyn StandardCodecs {
        self.standard
    }

    /// Asks the introspector for the description of `ty`.
    #[inline]
    pub fn describe(&self, ty: &TypeDescriptor) -> Result<Arc<TypeDescription>, BindError> {
        self.introspector.describe(ty)
    }

    /// Whether values described by `desc` are written by declared type.
    ///
    /// The class-level typing annotation wins over the global setting.
    pub fn uses_static_typing(&self, desc: &TypeDescription) -> bool {
        match desc.annotations().typing {
            Some(typing) => typing == Typing::Static,
            None => self.config.use_static_typing,
        }
    }
}

impl fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

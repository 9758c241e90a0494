//! Sources of [`TypeDescription`]s.
//!
//! The resolver never inspects types itself; it asks an [`Introspector`].
//! [`DescriptionRegistry`] is the table-backed implementation. With the
//! `std` feature, `DescriptionRegistryArc` shares one between threads.

// -----------------------------------------------------------------------------
// Modules

mod description_registry;

// -----------------------------------------------------------------------------
// Exports

pub use description_registry::DescriptionRegistry;
#[cfg(feature = "std")]
pub use description_registry::DescriptionRegistryArc;

use alloc::sync::Arc;

use crate::error::BindError;
use crate::info::{TypeDescription, TypeDescriptor};

/// Produces the description of a type.
pub trait Introspector: Send + Sync {
    /// Describes `ty`.
    ///
    /// A type that is not known at all is described as a type without
    /// properties or annotations, not as an error.
    fn describe(&self, ty: &TypeDescriptor) -> Result<Arc<TypeDescription>, BindError>;
}

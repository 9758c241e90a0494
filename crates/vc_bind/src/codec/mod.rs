//! Resolved codecs.
//!
//! A [`Codec`] is the reusable strategy for writing instances of one type.
//! Codecs produced by this crate are immutable and `Send + Sync`, so a
//! resolved codec can be cached and shared between threads.
//!
//! ## Menu
//!
//! - [`BeanCodec`]: record of [`PropertyWriter`]s, optional [`ObjectIdWriter`],
//!   view-filtered writers ([`ViewGuardedWriter`]) and an [`AnyGetterWriter`].
//! - [`BeanCodecBuilder`]: mutable state of a bean codec under construction.
//! - [`DelegatingCodec`]: converts a value with a [`Converter`] first.
//! - [`UnknownCodec`]: terminal fallback for types without any known strategy.
//! - [`CustomCodec`]: codecs supplied from outside (annotations, providers,
//!   container builders ...).

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod builder;
mod delegating;
mod filtered;
mod object_id;
mod unknown;

// -----------------------------------------------------------------------------
// Exports

pub use bean::{AnyGetterWriter, BeanCodec, PropertyWriter};
pub use builder::BeanCodecBuilder;
pub use delegating::{Converter, DelegatingCodec};
pub use filtered::ViewGuardedWriter;
pub use object_id::{ExternalIdGenerator, IdGenerator, IdValue, IntSequenceGenerator, ObjectIdWriter};
pub use unknown::UnknownCodec;

use alloc::sync::Arc;
use core::fmt;

use crate::error::BindError;
use crate::info::{PropertyDef, TypeDescriptor};
use crate::ser::ResolveContext;

// -----------------------------------------------------------------------------
// CustomCodec

/// A codec implemented outside of this crate.
///
/// Codecs declared on a type, found by a [`CodecProvider`] or built by the
/// [`StandardCodecs`] are all custom codecs.
///
/// [`CodecProvider`]: crate::ser::CodecProvider
/// [`StandardCodecs`]: crate::ser::StandardCodecs
pub trait CustomCodec: Send + Sync + 'static {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// The type this codec writes, `None` if it writes any value.
    fn handled_type(&self) -> Option<&TypeDescriptor> {
        None
    }

    /// Binds the codec to the property it will write.
    ///
    /// Called while the property writer is built, for codecs declared on a
    /// property. Returning `Ok(None)` keeps the codec unchanged.
    fn contextualize(
        &self,
        _cx: &ResolveContext<'_>,
        _property: &PropertyDef,
    ) -> Result<Option<Codec>, BindError> {
        Ok(None)
    }
}

// -----------------------------------------------------------------------------
// Codec

/// A resolved serialization strategy.
#[derive(Clone)]
pub enum Codec {
    Bean(Arc<BeanCodec>),
    Delegating(Arc<DelegatingCodec>),
    Unknown(Arc<UnknownCodec>),
    Custom(Arc<dyn CustomCodec>),
}

impl Codec {
    /// Wraps a [`CustomCodec`].
    #[inline]
    pub fn custom(codec: impl CustomCodec) -> Self {
        Self::Custom(Arc::new(codec))
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Self::Bean(_) => "bean",
            Self::Delegating(_) => "delegating",
            Self::Unknown(_) => "unknown",
            Self::Custom(codec) => codec.name(),
        }
    }

    /// The type this codec writes, if it is bound to one.
    pub fn handled_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Bean(codec) => Some(codec.ty()),
            Self::Delegating(codec) => Some(codec.delegate_type()),
            Self::Unknown(codec) => Some(codec.ty()),
            Self::Custom(codec) => codec.handled_type(),
        }
    }

    #[inline]
    pub fn as_bean(&self) -> Option<&BeanCodec> {
        match self {
            Self::Bean(codec) => Some(codec),
            _ => None,
        }
    }

    #[inline]
    pub fn as_delegating(&self) -> Option<&DelegatingCodec> {
        match self {
            Self::Delegating(codec) => Some(codec),
            _ => None,
        }
    }

    #[inline]
    pub fn as_custom(&self) -> Option<&dyn CustomCodec> {
        match self {
            Self::Custom(codec) => Some(&**codec),
            _ => None,
        }
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Returns `true` if both values refer to the same codec instance.
    pub fn same_instance(&self, other: &Codec) -> bool {
        match (self, other) {
            (Self::Bean(a), Self::Bean(b)) => Arc::ptr_eq(a, b),
            (Self::Delegating(a), Self::Delegating(b)) => Arc::ptr_eq(a, b),
            (Self::Unknown(a), Self::Unknown(b)) => Arc::ptr_eq(a, b),
            (Self::Custom(a), Self::Custom(b)) => {
                core::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bean(codec) => fmt::Debug::fmt(codec, f),
            Self::Delegating(codec) => fmt::Debug::fmt(codec, f),
            Self::Unknown(codec) => fmt::Debug::fmt(codec, f),
            Self::Custom(codec) => write!(f, "Custom({})", codec.name()),
        }
    }
}

impl From<BeanCodec> for Codec {
    #[inline]
    fn from(codec: BeanCodec) -> Self {
        Self::Bean(Arc::new(codec))
    }
}

impl From<DelegatingCodec> for Codec {
    #[inline]
    fn from(codec: DelegatingCodec) -> Self {
        Self::Delegating(Arc::new(codec))
    }
}

impl From<UnknownCodec> for Codec {
    #[inline]
    fn from(codec: UnknownCodec) -> Self {
        Self::Unknown(Arc::new(codec))
    }
}

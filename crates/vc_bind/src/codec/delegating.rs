use alloc::sync::Arc;
use core::fmt;

use crate::codec::Codec;
use crate::info::TypeDescriptor;

// -----------------------------------------------------------------------------
// Converter

/// Converts a value into another representation before it is written.
pub trait Converter: Send + Sync + 'static {
    /// The type values are converted into.
    fn output_type(&self) -> TypeDescriptor;
}

// -----------------------------------------------------------------------------
// DelegatingCodec

/// Writes a value by converting it and handing the result to another codec.
///
/// When the delegate is `None` the codec of the converted value is found
/// from its runtime type at write time.
#[derive(Clone)]
pub struct DelegatingCodec {
    converter: Arc<dyn Converter>,
    delegate_type: TypeDescriptor,
    delegate: Option<Codec>,
}

impl DelegatingCodec {
    #[inline]
    pub fn new(converter: Arc<dyn Converter>, delegate_type: TypeDescriptor, delegate: Option<Codec>) -> Self {
        Self {
            converter,
            delegate_type,
            delegate,
        }
    }

    #[inline]
    pub fn converter(&self) -> &Arc<dyn Converter> {
        &self.converter
    }

    #[inline]
    pub fn delegate_type(&self) -> &TypeDescriptor {
        &self.delegate_type
    }

    #[inline]
    pub fn delegate(&self) -> Option<&Codec> {
        self.delegate.as_ref()
    }

    /// `true` if the delegate is chosen per value at write time.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.delegate.is_none()
    }
}

impl fmt::Debug for DelegatingCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatingCodec")
            .field("delegate_type", &self.delegate_type)
            .field("delegate", &self.delegate)
            .finish_non_exhaustive()
    }
}

use crate::info::TypeDescriptor;

/// Codec of last resort for types with no discoverable properties and no
/// other known strategy.
///
/// This is a regular result, not an error. At write time the instance is
/// written as an empty object, or rejected, depending on the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCodec {
    ty: TypeDescriptor,
}

impl UnknownCodec {
    #[inline]
    pub fn new(ty: TypeDescriptor) -> Self {
        Self { ty }
    }

    #[inline]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
}

//! Shared test fixtures.

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{Mutex, PoisonError};

use crate::codec::{Codec, CustomCodec, PropertyWriter};
use crate::error::BindError;
use crate::hash::{FixedHashState, HashMap};
use crate::info::{PropertyDef, TypeDescription, TypeDescriptor, TypeKey};
use crate::registry::{DescriptionRegistry, Introspector};
use crate::ser::ResolveContext;

pub(crate) fn string() -> TypeDescriptor {
    TypeDescriptor::scalar("alloc::string::String")
}

pub(crate) fn names(writers: &[PropertyWriter]) -> Vec<&str> {
    writers.iter().map(PropertyWriter::name).collect()
}

// -----------------------------------------------------------------------------
// CountingIntrospector

/// Counts `describe` calls per raw type.
pub(crate) struct CountingIntrospector {
    inner: DescriptionRegistry,
    calls: Mutex<HashMap<TypeKey, usize>>,
}

impl CountingIntrospector {
    pub(crate) fn new(inner: DescriptionRegistry) -> Self {
        Self {
            inner,
            calls: Mutex::new(HashMap::with_hasher(FixedHashState)),
        }
    }

    pub(crate) fn calls(&self, key: &TypeKey) -> usize {
        let calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        calls.get(key).copied().unwrap_or(0)
    }
}

impl Introspector for CountingIntrospector {
    fn describe(&self, ty: &TypeDescriptor) -> Result<Arc<TypeDescription>, BindError> {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(ty.key().clone())
            .or_insert(0) += 1;
        self.inner.describe(ty)
    }
}

// -----------------------------------------------------------------------------
// NamedCodec

/// A custom codec identified by name. Contextualizing it appends
/// `@property` to the name.
pub(crate) struct NamedCodec {
    name: String,
    failing: bool,
}

impl NamedCodec {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            failing: false,
        }
    }

    /// A codec whose contextualization fails.
    pub(crate) fn failing(name: &str) -> Self {
        Self {
            name: name.into(),
            failing: true,
        }
    }
}

impl CustomCodec for NamedCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn contextualize(
        &self,
        _cx: &ResolveContext<'_>,
        property: &PropertyDef,
    ) -> Result<Option<Codec>, BindError> {
        if self.failing {
            return Err(BindError::custom(format!("`{}` cannot write `{}`", self.name, property.name())));
        }
        Ok(Some(Codec::custom(NamedCodec::new(&format!(
            "{}@{}",
            self.name,
            property.name()
        )))))
    }
}

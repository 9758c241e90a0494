use alloc::sync::Arc;
use core::fmt;
#[cfg(feature = "std")]
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BindError;
use crate::hash::{FixedHashState, HashMap};
use crate::info::{TypeDescription, TypeDescriptor, TypeKey};
use crate::registry::Introspector;

// -----------------------------------------------------------------------------
// DescriptionRegistry

/// A table of registered [`TypeDescription`]s, keyed by raw type.
///
/// Descriptions are registered for a raw type; a request for one of its
/// generic instantiations gets the registered description re-targeted to the
/// requested descriptor.
///
/// # Example
///
/// ```
/// use vc_bind::info::{PropertyDef, TypeDescription, TypeDescriptor};
/// use vc_bind::registry::{DescriptionRegistry, Introspector};
///
/// let mut registry = DescriptionRegistry::new();
/// registry.register(
///     TypeDescription::new(TypeDescriptor::composite("app::User"))
///         .with_property(PropertyDef::new("id", TypeDescriptor::scalar("u64"))),
/// );
///
/// let user = registry.describe(&TypeDescriptor::composite("app::User")).unwrap();
/// assert_eq!(user.properties().len(), 1);
///
/// let other = registry.describe(&TypeDescriptor::composite("app::Other")).unwrap();
/// assert!(other.properties().is_empty());
/// ```
pub struct DescriptionRegistry {
    descriptions: HashMap<TypeKey, Arc<TypeDescription>>,
}

impl Default for DescriptionRegistry {
    /// See [`DescriptionRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            descriptions: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Registers `description` for its raw type.
    ///
    /// Returns `false` and keeps the existing entry if the raw type was
    /// already registered.
    pub fn register(&mut self, description: TypeDescription) -> bool {
        let key = description.ty().key().clone();
        if self.descriptions.contains_key(&key) {
            return false;
        }
        self.descriptions.insert(key, Arc::new(description));
        true
    }

    /// Registers `description`, replacing any existing entry.
    pub fn overwrite(&mut self, description: TypeDescription) {
        let key = description.ty().key().clone();
        self.descriptions.insert(key, Arc::new(description));
    }

    #[inline]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.descriptions.contains_key(key)
    }

    #[inline]
    pub fn get(&self, key: &TypeKey) -> Option<&Arc<TypeDescription>> {
        self.descriptions.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Returns an iterator over the registered descriptions, in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Arc<TypeDescription>> {
        self.descriptions.values()
    }
}

impl Introspector for DescriptionRegistry {
    fn describe(&self, ty: &TypeDescriptor) -> Result<Arc<TypeDescription>, BindError> {
        Ok(match self.descriptions.get(ty.key()) {
            Some(desc) if desc.ty() == ty => desc.clone(),
            Some(desc) => Arc::new(desc.instantiated(ty)),
            None => Arc::new(TypeDescription::new(ty.clone())),
        })
    }
}

impl fmt::Debug for DescriptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.descriptions.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// DescriptionRegistryArc

/// A [`DescriptionRegistry`] shared behind a lock.
#[cfg(feature = "std")]
#[derive(Clone, Default)]
pub struct DescriptionRegistryArc {
    /// The wrapped [`DescriptionRegistry`].
    pub internal: Arc<RwLock<DescriptionRegistry>>,
}

#[cfg(feature = "std")]
impl DescriptionRegistryArc {
    #[inline]
    pub fn new(registry: DescriptionRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`DescriptionRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, DescriptionRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`DescriptionRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, DescriptionRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(feature = "std")]
impl Introspector for DescriptionRegistryArc {
    #[inline]
    fn describe(&self, ty: &TypeDescriptor) -> Result<Arc<TypeDescription>, BindError> {
        self.read().describe(ty)
    }
}

#[cfg(feature = "std")]
impl fmt::Debug for DescriptionRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::DescriptionRegistry;
    #[cfg(feature = "std")]
    use super::DescriptionRegistryArc;
    use crate::info::{PropertyDef, TypeDescription, TypeDescriptor};
    use crate::registry::Introspector;

    fn page() -> TypeDescription {
        TypeDescription::new(TypeDescriptor::composite("app::Page"))
            .with_property(PropertyDef::new("items", TypeDescriptor::list_of(TypeDescriptor::top())))
    }

    #[test]
    fn register_once() {
        let mut registry = DescriptionRegistry::new();
        assert!(registry.register(page()));
        assert!(!registry.register(TypeDescription::new(TypeDescriptor::composite("app::Page"))));
        assert_eq!(registry.len(), 1);

        let desc = registry.describe(&TypeDescriptor::composite("app::Page")).unwrap();
        assert_eq!(desc.properties().len(), 1);

        registry.overwrite(TypeDescription::new(TypeDescriptor::composite("app::Page")));
        let desc = registry.describe(&TypeDescriptor::composite("app::Page")).unwrap();
        assert!(desc.properties().is_empty());
    }

    #[test]
    fn same_instance_for_exact_type() {
        let mut registry = DescriptionRegistry::new();
        registry.register(page());
        let ty = TypeDescriptor::composite("app::Page");
        let a = registry.describe(&ty).unwrap();
        let b = registry.describe(&ty).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn instantiation_is_retargeted() {
        let mut registry = DescriptionRegistry::new();
        registry.register(page());

        let ty = TypeDescriptor::composite("app::Page").with_params([TypeDescriptor::scalar("u8")]);
        let desc = registry.describe(&ty).unwrap();
        assert_eq!(desc.ty(), &ty);
        assert_eq!(desc.properties().len(), 1);
    }

    #[cfg(feature = "std")]
    #[test]
    fn shared() {
        let shared = DescriptionRegistryArc::default();
        shared.write().register(page());
        let desc = shared.describe(&TypeDescriptor::composite("app::Page")).unwrap();
        assert_eq!(desc.properties()[0].name(), "items");
    }
}

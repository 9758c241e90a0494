//! Root name lookup.
//!
//! The root name is the wrapper name written around a top-level value when
//! root wrapping is enabled. Computing it needs the class annotations of the
//! type, so results are kept in a small bounded cache.

use core::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cache::{LookupCache, LookupStats};
use crate::error::BindError;
use crate::info::{PropertyName, TypeDescriptor, TypeKey};
use crate::registry::Introspector;

/// Upper bound of cached root names.
pub const MAX_ENTRIES: usize = 200;

/// Thread-safe cache of root names, keyed by raw type.
///
/// Cached names are only valid for the process that computed them. A
/// serialized lookup carries no entries, and deserializing always yields an
/// empty lookup.
///
/// # Examples
///
/// ```
/// use vc_bind::info::TypeDescriptor;
/// use vc_bind::registry::DescriptionRegistry;
/// use vc_bind::root_name::RootNameLookup;
///
/// let lookup = RootNameLookup::new();
/// let registry = DescriptionRegistry::new();
///
/// let name = lookup
///     .find_root_name(&registry, &TypeDescriptor::composite("app::model::User"))
///     .unwrap();
/// assert_eq!(name.simple_name(), "User");
/// assert_eq!(lookup.len(), 1);
/// ```
pub struct RootNameLookup {
    names: Mutex<LookupCache<TypeKey, PropertyName>>,
}

impl Default for RootNameLookup {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl RootNameLookup {
    /// Creates an empty lookup with the default bounds.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTRIES)
    }

    /// Creates an empty lookup holding at most `max_entries` names.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            names: Mutex::new(LookupCache::new(max_entries)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LookupCache<TypeKey, PropertyName>> {
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the root name of `ty`, computing and caching it if needed.
    ///
    /// The name declared by the root name annotation wins if it has a simple
    /// name; otherwise the simple name of the type is used. Concurrent
    /// callers may both compute the name, either insert is kept.
    pub fn find_root_name(
        &self,
        introspector: &dyn Introspector,
        ty: &TypeDescriptor,
    ) -> Result<PropertyName, BindError> {
        if let Some(name) = self.get(ty.key()) {
            return Ok(name);
        }

        let desc = introspector.describe(ty)?;
        let name = match &desc.annotations().root_name {
            Some(name) if name.has_simple_name() => name.clone(),
            _ => PropertyName::new(ty.simple_name()),
        };
        log::trace!("root name of `{ty}` is `{name}`");

        self.put(ty.key().clone(), name.clone());
        Ok(name)
    }

    /// Returns the cached name for `key`.
    #[inline]
    pub fn get(&self, key: &TypeKey) -> Option<PropertyName> {
        self.lock().get(key)
    }

    #[inline]
    pub fn put(&self, key: TypeKey, name: PropertyName) {
        self.lock().put(key, name);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[inline]
    pub fn stats(&self) -> LookupStats {
        self.lock().stats()
    }
}

impl fmt::Debug for RootNameLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RootNameLookup").field(&*self.lock()).finish()
    }
}

impl Serialize for RootNameLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit_struct("RootNameLookup")
    }
}

impl<'de> Deserialize<'de> for RootNameLookup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Self::new())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::sync::Arc;
    use std::thread;

    use super::RootNameLookup;
    use crate::info::{ClassAnnotations, PropertyName, TypeDescription, TypeDescriptor, TypeKey};
    use crate::registry::DescriptionRegistry;
    use crate::testing::CountingIntrospector;

    fn annotated(path: &str, root: PropertyName) -> TypeDescription {
        TypeDescription::new(TypeDescriptor::composite(path)).with_annotations(ClassAnnotations {
            root_name: Some(root),
            ..ClassAnnotations::default()
        })
    }

    #[test]
    fn annotation_or_simple_name() {
        let mut registry = DescriptionRegistry::new();
        registry.register(annotated("app::Order", PropertyName::new("order")));
        registry.register(annotated("app::Blank", PropertyName::new("")));

        let lookup = RootNameLookup::new();
        let order = lookup
            .find_root_name(&registry, &TypeDescriptor::composite("app::Order"))
            .unwrap();
        assert_eq!(order.simple_name(), "order");

        let blank = lookup
            .find_root_name(&registry, &TypeDescriptor::composite("app::Blank"))
            .unwrap();
        assert_eq!(blank.simple_name(), "Blank");
    }

    #[test]
    fn cached_per_raw_type() {
        let introspector = CountingIntrospector::new(DescriptionRegistry::new());
        let lookup = RootNameLookup::new();

        let page = TypeDescriptor::composite("app::Page");
        let page_of_u8 = page.clone().with_params([TypeDescriptor::scalar("u8")]);

        lookup.find_root_name(&introspector, &page).unwrap();
        lookup.find_root_name(&introspector, &page).unwrap();
        lookup.find_root_name(&introspector, &page_of_u8).unwrap();

        assert_eq!(introspector.calls(page.key()), 1);
        assert_eq!(lookup.len(), 1);
        let stats = lookup.stats();
        assert_eq!((stats.hits, stats.misses), (2, 1));
    }

    #[test]
    fn bounded() {
        let registry = DescriptionRegistry::new();
        let lookup = RootNameLookup::new();
        for i in 0..=super::MAX_ENTRIES {
            let ty = TypeDescriptor::composite(format!("app::T{i}"));
            lookup.find_root_name(&registry, &ty).unwrap();
            assert!(lookup.len() <= super::MAX_ENTRIES);
        }
        assert_eq!(lookup.len(), super::MAX_ENTRIES);
        assert!(lookup.get(&TypeKey::new("app::T0")).is_none());
        assert!(lookup.get(&TypeKey::new("app::T1")).is_some());
    }

    #[test]
    fn snapshot_restores_empty() {
        let registry = DescriptionRegistry::new();
        let lookup = RootNameLookup::new();
        lookup
            .find_root_name(&registry, &TypeDescriptor::composite("app::User"))
            .unwrap();
        assert_eq!(lookup.len(), 1);

        let text = serde_json::to_string(&lookup).unwrap();
        let restored: RootNameLookup = serde_json::from_str(&text).unwrap();
        assert!(restored.is_empty());

        let forged: RootNameLookup =
            serde_json::from_str(r#"{ "app::User": "Intruder" }"#).unwrap();
        assert!(forged.is_empty());
    }

    #[test]
    fn concurrent_lookups() {
        let registry = Arc::new(DescriptionRegistry::new());
        let lookup = Arc::new(RootNameLookup::new());

        let handles: alloc::vec::Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                let lookup = lookup.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        let ty = TypeDescriptor::composite(format!("app::T{i}"));
                        let name = lookup.find_root_name(&*registry, &ty).unwrap();
                        assert_eq!(name.simple_name(), format!("T{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(lookup.len(), 50);
    }
}

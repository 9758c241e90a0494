use alloc::sync::Arc;
use core::fmt;

use crate::codec::Codec;
use crate::config::BindConfig;
use crate::error::BindError;
use crate::info::{FormatOverrides, PropertyName, TypeDescriptor};
use crate::registry::Introspector;
use crate::ser::{BeanCodecModifier, CodecFactory, CodecProvider, ResolveContext, StandardCodecs};
use crate::root_name::RootNameLookup;

/// A long-lived resolution handle.
///
/// Bundles the configuration, the introspector, the standard codec builders,
/// the [`CodecFactory`] and the [`RootNameLookup`]. A binder is `Send + Sync`
/// and meant to be shared; the root name cache is its only mutable state.
///
/// # Examples
///
/// ```
/// use vc_bind::Binder;
/// use vc_bind::info::{PropertyDef, TypeDescription, TypeDescriptor};
/// use vc_bind::registry::DescriptionRegistry;
///
/// let mut registry = DescriptionRegistry::new();
/// registry.register(
///     TypeDescription::new(TypeDescriptor::composite("app::User"))
///         .with_property(PropertyDef::new("name", TypeDescriptor::scalar("alloc::string::String"))),
/// );
/// let binder = Binder::new(registry);
///
/// let user = binder.resolve(&TypeDescriptor::composite("app::User")).unwrap();
/// assert_eq!(user.as_bean().unwrap().property_names(), ["name"]);
///
/// let empty = binder.resolve(&TypeDescriptor::composite("app::Empty")).unwrap();
/// assert!(empty.is_unknown());
///
/// let root = binder.find_root_name(&TypeDescriptor::composite("app::User")).unwrap();
/// assert_eq!(root.simple_name(), "User");
/// ```
pub struct Binder {
    config: BindConfig,
    introspector: Arc<dyn Introspector>,
    standard: Arc<dyn StandardCodecs>,
    factory: CodecFactory,
    root_names: RootNameLookup,
}

impl Binder {
    /// Creates a binder with default configuration and no standard codecs.
    pub fn new(introspector: impl Introspector + 'static) -> Self {
        Self {
            config: BindConfig::default(),
            introspector: Arc::new(introspector),
            standard: Arc::new(()),
            factory: CodecFactory::new(),
            root_names: RootNameLookup::new(),
        }
    }

    pub fn with_config(mut self, config: BindConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_standard_codecs(mut self, standard: impl StandardCodecs + 'static) -> Self {
        self.standard = Arc::new(standard);
        self
    }

    pub fn with_factory(mut self, factory: CodecFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Appends `modifier` to the modifier chain of the factory.
    pub fn with_modifier(mut self, modifier: impl BeanCodecModifier + 'static) -> Self {
        self.factory = self.factory.with_modifier(modifier);
        self
    }

    /// Appends `provider` to the providers of the factory.
    pub fn with_provider(mut self, provider: impl CodecProvider + 'static) -> Self {
        self.factory = self.factory.with_provider(provider);
        self
    }

    #[inline]
    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    #[inline]
    pub fn factory(&self) -> &CodecFactory {
        &self.factory
    }

    #[inline]
    pub fn root_names(&self) -> &RootNameLookup {
        &self.root_names
    }

    /// A resolution context borrowing this binder's collaborators.
    pub fn context(&self) -> ResolveContext<'_> {
        ResolveContext::new(&self.config, &*self.introspector).with_standard_codecs(&*self.standard)
    }

    /// Resolves the codec of `ty`. Never answers without a codec.
    #[inline]
    pub fn resolve(&self, ty: &TypeDescriptor) -> Result<Codec, BindError> {
        self.resolve_with_format(ty, &FormatOverrides::EMPTY)
    }

    pub fn resolve_with_format(
        &self,
        ty: &TypeDescriptor,
        format: &FormatOverrides,
    ) -> Result<Codec, BindError> {
        let cx = self.context();
        let desc = cx.describe(ty)?;
        self.factory.create_codec(&cx, ty, &desc, format)
    }

    /// Returns the root name of `ty`, see [`RootNameLookup::find_root_name`].
    #[inline]
    pub fn find_root_name(&self, ty: &TypeDescriptor) -> Result<PropertyName, BindError> {
        self.root_names.find_root_name(&*self.introspector, ty)
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("config", &self.config)
            .field("factory", &self.factory)
            .field("root_names", &self.root_names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use std::thread;

    use super::Binder;
    use crate::info::{PropertyDef, TypeDescription, TypeDescriptor};
    use crate::registry::DescriptionRegistry;
    use crate::testing::string;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn is_send_sync() {
        assert_send_sync::<Binder>();
    }

    #[test]
    fn shared_between_threads() {
        let mut registry = DescriptionRegistry::new();
        registry.register(
            TypeDescription::new(TypeDescriptor::composite("app::User"))
                .with_property(PropertyDef::new("id", TypeDescriptor::scalar("u64")))
                .with_property(PropertyDef::new("name", string())),
        );
        let binder = Arc::new(Binder::new(registry));

        let handles: alloc::vec::Vec<_> = (0..4)
            .map(|_| {
                let binder = binder.clone();
                thread::spawn(move || {
                    let codec = binder.resolve(&TypeDescriptor::composite("app::User")).unwrap();
                    let names = codec.as_bean().unwrap().property_names().join(",");
                    let root = binder.find_root_name(&TypeDescriptor::composite("app::User")).unwrap();
                    (names, root)
                })
            })
            .collect();

        for handle in handles {
            let (names, root) = handle.join().unwrap();
            assert_eq!(names, "id,name");
            assert_eq!(root.simple_name(), "User");
        }
        assert_eq!(binder.root_names().len(), 1);
    }
}

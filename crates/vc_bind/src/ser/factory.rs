use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::codec::{AnyGetterWriter, BeanCodecBuilder, Codec, DelegatingCodec, UnknownCodec};
use crate::error::BindError;
use crate::info::{AnyGetterDef, FormatOverrides, TypeDescription, TypeDescriptor};
use crate::ser::{BeanCodecModifier, CodecProvider, ResolveContext};

use super::{identity, properties, views};

// -----------------------------------------------------------------------------
// CodecFactory

/// The codec dispatcher.
///
/// A factory holds only its registered modifiers and providers. It is meant
/// to be built once and shared; registering returns a new factory.
///
/// # Examples
///
/// ```
/// use vc_bind::config::BindConfig;
/// use vc_bind::info::{FormatOverrides, PropertyDef, TypeDescription, TypeDescriptor};
/// use vc_bind::registry::{DescriptionRegistry, Introspector};
/// use vc_bind::ser::{CodecFactory, ResolveContext};
///
/// let mut registry = DescriptionRegistry::new();
/// registry.register(
///     TypeDescription::new(TypeDescriptor::composite("app::Point"))
///         .with_property(PropertyDef::new("x", TypeDescriptor::scalar("i32")))
///         .with_property(PropertyDef::new("y", TypeDescriptor::scalar("i32"))),
/// );
///
/// let config = BindConfig::new();
/// let cx = ResolveContext::new(&config, &registry);
/// let ty = TypeDescriptor::composite("app::Point");
/// let desc = registry.describe(&ty).unwrap();
///
/// let codec = CodecFactory::new()
///     .create_codec(&cx, &ty, &desc, &FormatOverrides::EMPTY)
///     .unwrap();
/// assert_eq!(codec.as_bean().unwrap().property_names(), ["x", "y"]);
/// ```
#[derive(Clone, Default)]
pub struct CodecFactory {
    modifiers: Vec<Arc<dyn BeanCodecModifier>>,
    providers: Vec<Arc<dyn CodecProvider>>,
}

impl CodecFactory {
    /// Creates a factory without modifiers or providers.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a factory with `modifier` appended to the modifier chain.
    pub fn with_modifier(&self, modifier: impl BeanCodecModifier + 'static) -> Self {
        let mut factory = self.clone();
        factory.modifiers.push(Arc::new(modifier));
        factory
    }

    /// Returns a factory with `provider` appended to the providers.
    pub fn with_provider(&self, provider: impl CodecProvider + 'static) -> Self {
        let mut factory = self.clone();
        factory.providers.push(Arc::new(provider));
        factory
    }

    #[inline]
    pub fn has_modifiers(&self) -> bool {
        !self.modifiers.is_empty()
    }

    #[inline]
    pub fn modifiers(&self) -> &[Arc<dyn BeanCodecModifier>] {
        &self.modifiers
    }

    #[inline]
    pub fn providers(&self) -> &[Arc<dyn CodecProvider>] {
        &self.providers
    }

    /// Resolves the codec of `ty`, described by `desc`.
    ///
    /// Always produces a codec: types without any known strategy get an
    /// [`UnknownCodec`].
    pub fn create_codec(
        &self,
        cx: &ResolveContext<'_>,
        ty: &TypeDescriptor,
        desc: &Arc<TypeDescription>,
        format: &FormatOverrides,
    ) -> Result<Codec, BindError> {
        if let Some(codec) = desc.explicit_codec() {
            log::debug!("`{ty}`: explicit codec `{}`", codec.name());
            return Ok(codec.clone());
        }

        let (ty, desc, static_typing) = refine(cx, ty, desc)?;

        let Some(converter) = desc.converter().cloned() else {
            return self.create_codec_by_category(cx, &ty, &desc, format, static_typing);
        };

        let delegate_type = converter.output_type();
        let mut delegate = None;
        let mut delegate_desc = desc;
        if !delegate_type.has_raw_type(&ty) {
            delegate_desc = cx.describe(&delegate_type)?;
            delegate = delegate_desc.explicit_codec().cloned();
        }
        if delegate.is_none() {
            if delegate_type.is_top() {
                log::trace!("`{ty}`: converts to the top type, delegate resolved per value");
            } else {
                delegate = Some(self.create_codec_by_category(
                    cx,
                    &delegate_type,
                    &delegate_desc,
                    format,
                    true,
                )?);
            }
        }

        log::debug!("`{ty}`: delegating codec for `{delegate_type}`");
        Ok(Codec::from(DelegatingCodec::new(converter, delegate_type, delegate)))
    }

    fn create_codec_by_category(
        &self,
        cx: &ResolveContext<'_>,
        ty: &TypeDescriptor,
        desc: &Arc<TypeDescription>,
        format: &FormatOverrides,
        static_typing: bool,
    ) -> Result<Codec, BindError> {
        let standard = cx.standard();
        let mut found = None;

        if ty.is_container() {
            let static_typing = static_typing || cx.uses_static_typing(desc);
            // container codecs are returned without modifier post-processing
            if let Some(codec) = standard.build_container(cx, ty, desc, format, static_typing)? {
                log::debug!("`{ty}`: container codec `{}`", codec.name());
                return Ok(codec);
            }
        } else {
            found = if ty.is_reference() {
                standard.build_reference(cx, ty, desc, format, static_typing)?
            } else {
                self.find_provided_codec(cx, ty, desc)?
            };
            if found.is_none() {
                found = standard.find_by_annotations(cx, ty, desc)?;
            }
        }

        let codec = match found {
            Some(codec) => codec,
            None => self.create_fallback_codec(cx, ty, desc, format, static_typing)?,
        };
        log::debug!("`{ty}`: resolved as `{}`", codec.name());

        self.modifiers
            .iter()
            .try_fold(codec, |codec, modifier| modifier.modify_codec(cx.config(), desc, codec))
    }

    fn find_provided_codec(
        &self,
        cx: &ResolveContext<'_>,
        ty: &TypeDescriptor,
        desc: &TypeDescription,
    ) -> Result<Option<Codec>, BindError> {
        for provider in &self.providers {
            if let Some(codec) = provider.find_codec(cx.config(), ty, desc)? {
                return Ok(Some(codec));
            }
        }
        Ok(None)
    }

    fn create_fallback_codec(
        &self,
        cx: &ResolveContext<'_>,
        ty: &TypeDescriptor,
        desc: &Arc<TypeDescription>,
        format: &FormatOverrides,
        static_typing: bool,
    ) -> Result<Codec, BindError> {
        let standard = cx.standard();
        if let Some(codec) = standard.find_by_lookup(cx, ty, desc, format, static_typing)? {
            return Ok(codec);
        }
        if let Some(codec) = standard.find_by_primary_type(cx, ty, desc, format, static_typing)? {
            return Ok(codec);
        }
        if let Some(codec) = self.construct_bean_or_add_on_codec(cx, ty, desc, static_typing)? {
            return Ok(codec);
        }
        log::debug!("`{ty}`: no properties and no known codec, using the unknown codec");
        Ok(Codec::from(UnknownCodec::new(ty.clone())))
    }

    /// Builds the bean codec of `ty`, or finds an add-on codec for it.
    ///
    /// Returns `Ok(None)` for types that cannot be beans, and for types with
    /// nothing to write, no add-on codec and no class annotations.
    pub fn construct_bean_or_add_on_codec(
        &self,
        cx: &ResolveContext<'_>,
        ty: &TypeDescriptor,
        desc: &Arc<TypeDescription>,
        static_typing: bool,
    ) -> Result<Option<Codec>, BindError> {
        if ty.is_top() {
            return Ok(Some(Codec::from(UnknownCodec::new(ty.clone()))));
        }
        if !ty.is_potential_bean() && !ty.is_enum() {
            return Ok(None);
        }

        let config = cx.config();
        let mut builder = BeanCodecBuilder::new(desc.clone());

        let mut props = match properties::find_bean_properties(cx, desc, &mut builder)? {
            Some(props) => properties::remove_overlapping_type_ids(props),
            None => Vec::new(),
        };

        let virtual_typing = cx.uses_static_typing(desc);
        for def in desc.virtual_properties() {
            props.push(properties::construct_writer(cx, ty, def, virtual_typing)?);
        }

        for modifier in &self.modifiers {
            props = modifier.change_properties(config, desc, props)?;
        }
        props = properties::filter_bean_properties(config, desc, props);
        for modifier in &self.modifiers {
            props = modifier.filter_properties(config, desc, props)?;
        }
        for modifier in &self.modifiers {
            props = modifier.order_properties(config, desc, props)?;
        }

        let object_id_writer = identity::build_object_id_writer(desc, &mut props)?;
        builder.set_object_id_writer(object_id_writer);
        builder.set_properties(props);
        builder.set_filter_id(desc.annotations().filter_id.clone());

        if let Some(any_getter) = desc.any_getter() {
            builder.set_any_getter(Some(construct_any_getter(cx, any_getter)?));
        }

        views::process_views(config, &mut builder);

        for modifier in &self.modifiers {
            builder = modifier.update_builder(config, desc, builder)?;
        }

        if !builder.is_empty() {
            return builder.build();
        }

        if let Some(codec) = cx.standard().find_by_add_on_type(cx, ty, desc, static_typing)? {
            return Ok(Some(codec));
        }
        if desc.has_known_class_annotations() {
            log::debug!("`{ty}`: no properties, empty codec for annotated type");
            return Ok(Some(builder.create_dummy()));
        }
        Ok(None)
    }
}

impl fmt::Debug for CodecFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecFactory")
            .field("modifiers", &self.modifiers.len())
            .field("providers", &self.providers.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Applies the refinement declared on the type.
///
/// A refined type forces static typing. If its raw type differs the refined
/// type is described anew.
fn refine(
    cx: &ResolveContext<'_>,
    ty: &TypeDescriptor,
    desc: &Arc<TypeDescription>,
) -> Result<(TypeDescriptor, Arc<TypeDescription>, bool), BindError> {
    match &desc.annotations().serialize_as {
        Some(refined) if refined != ty => {
            log::trace!("`{ty}`: refined to `{refined}`");
            let desc = if refined.has_raw_type(ty) {
                desc.clone()
            } else {
                cx.describe(refined)?
            };
            Ok((refined.clone(), desc, true))
        }
        _ => Ok((ty.clone(), desc.clone(), false)),
    }
}

fn construct_any_getter(
    cx: &ResolveContext<'_>,
    any_getter: &AnyGetterDef,
) -> Result<AnyGetterWriter, BindError> {
    let codec = match &any_getter.codec {
        Some(codec) => Some(codec.clone()),
        None => {
            let map_desc = cx.describe(&any_getter.map_type)?;
            cx.standard().build_container(
                cx,
                &any_getter.map_type,
                &map_desc,
                &FormatOverrides::EMPTY,
                cx.config().use_static_typing,
            )?
        }
    };
    Ok(AnyGetterWriter::new(
        any_getter.accessor.clone(),
        any_getter.map_type.clone(),
        codec,
    ))
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::sync::Mutex;

    use super::CodecFactory;
    use crate::Binder;
    use crate::codec::{BeanCodecBuilder, Codec, Converter, PropertyWriter};
    use crate::config::{BindConfig, IgnoredProperties};
    use crate::error::BindError;
    use crate::info::{
        Accessor, AnyGetterDef, ClassAnnotations, ContainerKind, FormatOverrides, ObjectIdInfo,
        PropertyDef, TypeDescription, TypeDescriptor, TypeShape, TypeTag, Typing, View,
    };
    use crate::registry::DescriptionRegistry;
    use crate::ser::{BeanCodecModifier, CodecProvider, ResolveContext, StandardCodecs};
    use crate::testing::{NamedCodec, names, string};

    // -------------------------------------------------------------------------
    // Fixtures

    struct Standard;

    impl StandardCodecs for Standard {
        fn build_container(
            &self,
            _cx: &ResolveContext<'_>,
            _ty: &TypeDescriptor,
            _desc: &TypeDescription,
            _format: &FormatOverrides,
            static_typing: bool,
        ) -> Result<Option<Codec>, BindError> {
            let name = if static_typing { "container/static" } else { "container/dynamic" };
            Ok(Some(Codec::custom(NamedCodec::new(name))))
        }

        fn build_reference(
            &self,
            _cx: &ResolveContext<'_>,
            _ty: &TypeDescriptor,
            _desc: &TypeDescription,
            _format: &FormatOverrides,
            _static_typing: bool,
        ) -> Result<Option<Codec>, BindError> {
            Ok(Some(Codec::custom(NamedCodec::new("reference"))))
        }

        fn find_by_primary_type(
            &self,
            _cx: &ResolveContext<'_>,
            ty: &TypeDescriptor,
            _desc: &TypeDescription,
            _format: &FormatOverrides,
            _static_typing: bool,
        ) -> Result<Option<Codec>, BindError> {
            Ok((ty.shape() == TypeShape::Scalar).then(|| Codec::custom(NamedCodec::new("scalar"))))
        }

        fn find_by_add_on_type(
            &self,
            _cx: &ResolveContext<'_>,
            ty: &TypeDescriptor,
            _desc: &TypeDescription,
            _static_typing: bool,
        ) -> Result<Option<Codec>, BindError> {
            Ok((ty.shape() == TypeShape::AddOn).then(|| Codec::custom(NamedCodec::new("add-on"))))
        }
    }

    struct ConvertTo(TypeDescriptor);

    impl Converter for ConvertTo {
        fn output_type(&self) -> TypeDescriptor {
            self.0.clone()
        }
    }

    struct ProvideFor {
        path: &'static str,
        name: &'static str,
    }

    impl CodecProvider for ProvideFor {
        fn find_codec(
            &self,
            _config: &BindConfig,
            ty: &TypeDescriptor,
            _desc: &TypeDescription,
        ) -> Result<Option<Codec>, BindError> {
            Ok((ty.path() == self.path).then(|| Codec::custom(NamedCodec::new(self.name))))
        }
    }

    #[derive(Clone)]
    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new(tag: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                tag,
                log: log.clone(),
            }
        }

        fn record(&self, event: String) {
            self.log.lock().unwrap().push(format!("{}:{event}", self.tag));
        }
    }

    impl BeanCodecModifier for Recorder {
        fn change_properties(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            properties: Vec<PropertyWriter>,
        ) -> Result<Vec<PropertyWriter>, BindError> {
            self.record(format!("change[{}]", names(&properties).join(",")));
            Ok(properties)
        }

        fn filter_properties(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            properties: Vec<PropertyWriter>,
        ) -> Result<Vec<PropertyWriter>, BindError> {
            self.record(format!("filter[{}]", names(&properties).join(",")));
            Ok(properties)
        }

        fn order_properties(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            properties: Vec<PropertyWriter>,
        ) -> Result<Vec<PropertyWriter>, BindError> {
            self.record(format!("order[{}]", names(&properties).join(",")));
            Ok(properties)
        }

        fn update_builder(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            builder: BeanCodecBuilder,
        ) -> Result<BeanCodecBuilder, BindError> {
            self.record(format!("update[filtered={}]", builder.filtered_properties().is_some()));
            Ok(builder)
        }

        fn modify_codec(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            codec: Codec,
        ) -> Result<Codec, BindError> {
            self.record(format!("modify[{}]", codec.name()));
            Ok(codec)
        }
    }

    /// Appends a writer named `extra`.
    struct AddExtra(&'static str);

    impl BeanCodecModifier for AddExtra {
        fn change_properties(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            mut properties: Vec<PropertyWriter>,
        ) -> Result<Vec<PropertyWriter>, BindError> {
            properties.push(PropertyWriter::new(self.0, string(), Accessor::getter(self.0)));
            Ok(properties)
        }
    }

    struct Reverse;

    impl BeanCodecModifier for Reverse {
        fn order_properties(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            mut properties: Vec<PropertyWriter>,
        ) -> Result<Vec<PropertyWriter>, BindError> {
            properties.reverse();
            Ok(properties)
        }
    }

    struct Wrap;

    impl BeanCodecModifier for Wrap {
        fn modify_codec(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            codec: Codec,
        ) -> Result<Codec, BindError> {
            Ok(Codec::custom(NamedCodec::new(&format!("wrapped({})", codec.name()))))
        }
    }

    struct FailUpdate;

    impl BeanCodecModifier for FailUpdate {
        fn update_builder(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            _builder: BeanCodecBuilder,
        ) -> Result<BeanCodecBuilder, BindError> {
            Err(BindError::custom("boom"))
        }
    }

    /// Drops the last property but leaves the filtered writers alone.
    struct BreakFiltered;

    impl BeanCodecModifier for BreakFiltered {
        fn update_builder(
            &self,
            _config: &BindConfig,
            _desc: &TypeDescription,
            mut builder: BeanCodecBuilder,
        ) -> Result<BeanCodecBuilder, BindError> {
            builder.properties_mut().pop();
            Ok(builder)
        }
    }

    fn comp(path: &str) -> TypeDescriptor {
        TypeDescriptor::composite(path)
    }

    fn prop(name: &str) -> PropertyDef {
        PropertyDef::new(name, string())
    }

    fn bean_desc(path: &str, props: &[&str]) -> TypeDescription {
        TypeDescription::new(comp(path)).with_properties(props.iter().map(|n| prop(n)))
    }

    fn binder<const N: usize>(descriptions: [TypeDescription; N]) -> Binder {
        let mut registry = DescriptionRegistry::new();
        for desc in descriptions {
            registry.register(desc);
        }
        Binder::new(registry).with_standard_codecs(Standard)
    }

    fn annotated(desc: TypeDescription, annotations: ClassAnnotations) -> TypeDescription {
        desc.with_annotations(annotations)
    }

    fn event_log() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    // -------------------------------------------------------------------------
    // Fallbacks

    #[test]
    fn no_properties_is_unknown() {
        let b = binder([
            TypeDescription::new(comp("app::Ghost")).with_property(prop("x").without_accessor()),
            annotated(
                bean_desc("app::Hidden", &["s"]),
                ClassAnnotations {
                    ignored_properties: Some(IgnoredProperties::new(["s"])),
                    ..ClassAnnotations::default()
                },
            ),
        ]);

        assert!(b.resolve(&comp("app::Nothing")).unwrap().is_unknown());
        assert!(b.resolve(&comp("app::Ghost")).unwrap().is_unknown());
        // annotated types with nothing to write get an empty bean codec
        let hidden = b.resolve(&comp("app::Hidden")).unwrap();
        assert!(hidden.as_bean().unwrap().is_dummy());
    }

    #[test]
    fn marker_annotation_gives_dummy() {
        let b = binder([annotated(
            TypeDescription::new(comp("app::Marker")),
            ClassAnnotations {
                markers: vec!["serializable".into()],
                ..ClassAnnotations::default()
            },
        )]);
        let codec = b.resolve(&comp("app::Marker")).unwrap();
        let bean = codec.as_bean().unwrap();
        assert!(bean.is_dummy());
        assert!(bean.properties().is_empty());
    }

    #[test]
    fn top_type_is_unknown() {
        let log = event_log();
        let b = binder([]).with_modifier(Recorder::new("m", &log));
        assert!(b.resolve(&TypeDescriptor::top()).unwrap().is_unknown());
        assert_eq!(entries(&log), ["m:modify[unknown]"]);
    }

    #[test]
    fn scalar_and_add_on() {
        let b = binder([]);
        assert_eq!(b.resolve(&TypeDescriptor::scalar("i32")).unwrap().name(), "scalar");
        assert_eq!(b.resolve(&TypeDescriptor::add_on("app::Iterable")).unwrap().name(), "add-on");

        // add-on types with properties are beans
        let b = binder([TypeDescription::new(TypeDescriptor::add_on("app::Named")).with_property(prop("name"))]);
        let codec = b.resolve(&TypeDescriptor::add_on("app::Named")).unwrap();
        assert_eq!(codec.as_bean().unwrap().property_names(), ["name"]);
    }

    #[test]
    fn enums() {
        let color = TypeDescriptor::enumeration("app::Color");
        let b = binder([TypeDescription::new(color.clone()).with_property(prop("rgb"))]);
        assert_eq!(b.resolve(&color).unwrap().as_bean().unwrap().property_names(), ["rgb"]);

        let b = binder([]);
        assert!(b.resolve(&color).unwrap().is_unknown());
    }

    #[test]
    fn without_standard_codecs() {
        let log = event_log();
        let b = Binder::new(DescriptionRegistry::new()).with_modifier(Recorder::new("m", &log));
        assert!(b.resolve(&TypeDescriptor::list_of(string())).unwrap().is_unknown());
        assert!(b.resolve(&string()).unwrap().is_unknown());
        assert_eq!(entries(&log), ["m:modify[unknown]", "m:modify[unknown]"]);
    }

    // -------------------------------------------------------------------------
    // Dispatch order

    #[test]
    fn explicit_codec_wins() {
        let log = event_log();
        let b = binder([bean_desc("app::Money", &["amount"]).with_codec(Codec::custom(NamedCodec::new("money")))])
            .with_modifier(Recorder::new("m", &log));

        assert_eq!(b.resolve(&comp("app::Money")).unwrap().name(), "money");
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn containers() {
        let log = event_log();
        let b = binder([]).with_modifier(Recorder::new("m", &log)).with_provider(ProvideFor {
            path: "alloc::vec::Vec",
            name: "provided",
        });
        let list = TypeDescriptor::list_of(string());

        assert_eq!(b.resolve(&list).unwrap().name(), "container/dynamic");
        // container codecs skip the modifiers
        assert!(entries(&log).is_empty());

        let b = binder([]).with_config(BindConfig::new().with_static_typing(true));
        assert_eq!(b.resolve(&list).unwrap().name(), "container/static");

        let b = binder([annotated(
            TypeDescription::new(TypeDescriptor::list_of(TypeDescriptor::top())),
            ClassAnnotations {
                typing: Some(Typing::Static),
                ..ClassAnnotations::default()
            },
        )]);
        assert_eq!(b.resolve(&list).unwrap().name(), "container/static");
    }

    #[test]
    fn references_skip_providers() {
        let b = binder([]).with_provider(ProvideFor {
            path: "core::option::Option",
            name: "provided",
        });
        assert_eq!(b.resolve(&TypeDescriptor::optional(string())).unwrap().name(), "reference");
    }

    #[test]
    fn providers_in_order_before_beans() {
        let b = binder([bean_desc("app::Special", &["a"])])
            .with_provider(ProvideFor {
                path: "app::Other",
                name: "other",
            })
            .with_provider(ProvideFor {
                path: "app::Special",
                name: "first",
            })
            .with_provider(ProvideFor {
                path: "app::Special",
                name: "second",
            });

        assert_eq!(b.resolve(&comp("app::Special")).unwrap().name(), "first");
        assert_eq!(b.resolve(&comp("app::Other")).unwrap().name(), "other");
    }

    #[test]
    fn refinement() {
        let b = binder([
            annotated(
                bean_desc("app::Impl", &["internal", "a"]),
                ClassAnnotations {
                    serialize_as: Some(comp("app::Api")),
                    ..ClassAnnotations::default()
                },
            ),
            bean_desc("app::Api", &["a", "b"]),
        ]);

        let codec = b.resolve(&comp("app::Impl")).unwrap();
        let bean = codec.as_bean().unwrap();
        assert_eq!(bean.ty(), &comp("app::Api"));
        assert_eq!(bean.property_names(), ["a", "b"]);
    }

    #[test]
    fn refinement_forces_static_typing() {
        let bag = TypeDescriptor::new("app::Bag", TypeShape::Container(ContainerKind::List));
        let b = binder([annotated(
            TypeDescription::new(bag.clone()),
            ClassAnnotations {
                serialize_as: Some(TypeDescriptor::list_of(string())),
                ..ClassAnnotations::default()
            },
        )]);
        assert_eq!(b.resolve(&bag).unwrap().name(), "container/static");

        // unrefined, the container keeps dynamic typing
        let b = binder([TypeDescription::new(bag.clone())]);
        assert_eq!(b.resolve(&bag).unwrap().name(), "container/dynamic");
    }

    #[test]
    fn factory_shared_between_binders() {
        let factory = CodecFactory::new().with_modifier(Wrap);
        let first = binder([bean_desc("app::A", &["x"])]).with_factory(factory.clone());
        let second = Binder::new(DescriptionRegistry::new()).with_factory(factory);

        assert_eq!(first.resolve(&comp("app::A")).unwrap().name(), "wrapped(bean)");
        assert_eq!(second.resolve(&comp("app::B")).unwrap().name(), "wrapped(unknown)");
    }

    // -------------------------------------------------------------------------
    // Converters

    #[test]
    fn converter_to_top_type_is_dynamic() {
        let log = event_log();
        let b = binder([TypeDescription::new(comp("app::Any"))
            .with_converter(Arc::new(ConvertTo(TypeDescriptor::top())))])
        .with_modifier(Recorder::new("m", &log));

        let codec = b.resolve(&comp("app::Any")).unwrap();
        let delegating = codec.as_delegating().unwrap();
        assert!(delegating.is_dynamic());
        assert!(delegating.delegate_type().is_top());
        // nothing was resolved for the top type
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn converter_resolves_output_type() {
        let log = event_log();
        let b = binder([
            TypeDescription::new(comp("app::Outer")).with_converter(Arc::new(ConvertTo(comp("app::Inner")))),
            bean_desc("app::Inner", &["x"]),
        ])
        .with_modifier(Recorder::new("m", &log));

        let codec = b.resolve(&comp("app::Outer")).unwrap();
        let delegating = codec.as_delegating().unwrap();
        assert!(!delegating.is_dynamic());
        let inner = delegating.delegate().unwrap().as_bean().unwrap();
        assert_eq!(inner.property_names(), ["x"]);

        // the delegate is post-processed, the wrapper is not
        let log = entries(&log);
        assert_eq!(log.last().map(String::as_str), Some("m:modify[bean]"));
        assert!(!log.iter().any(|e| e.contains("delegating")));
    }

    #[test]
    fn converter_output_explicit_codec() {
        let b = binder([
            TypeDescription::new(comp("app::Outer")).with_converter(Arc::new(ConvertTo(comp("app::Coded")))),
            bean_desc("app::Coded", &["x"]).with_codec(Codec::custom(NamedCodec::new("coded"))),
        ]);
        let codec = b.resolve(&comp("app::Outer")).unwrap();
        assert_eq!(codec.as_delegating().unwrap().delegate().map(Codec::name), Some("coded"));
    }

    // -------------------------------------------------------------------------
    // Beans

    #[test]
    fn object_id_property_first() {
        let b = binder([
            bean_desc("app::Node", &["a", "b", "id", "c"]).with_object_id(ObjectIdInfo::property_based("id")),
        ]);
        let codec = b.resolve(&comp("app::Node")).unwrap();
        let bean = codec.as_bean().unwrap();
        assert_eq!(bean.property_names(), ["id", "a", "b", "c"]);
        assert!(bean.object_id_writer().unwrap().is_property_based());

        // ids are placed after the modifiers ordered the rest
        let b = binder([
            bean_desc("app::Node", &["a", "b", "id", "c"]).with_object_id(ObjectIdInfo::property_based("id")),
        ])
        .with_modifier(Reverse);
        let codec = b.resolve(&comp("app::Node")).unwrap();
        assert_eq!(codec.as_bean().unwrap().property_names(), ["id", "c", "b", "a"]);
    }

    #[test]
    fn object_id_missing_property() {
        let b = binder([bean_desc("app::Node", &["a"]).with_object_id(ObjectIdInfo::property_based("uuid"))]);
        let err = b.resolve(&comp("app::Node")).unwrap_err();
        assert!(matches!(err, BindError::TypeDefinition { .. }));
        assert!(err.to_string().contains("uuid"));
    }

    #[test]
    fn type_id_filter_id_and_virtual_properties() {
        let b = binder([annotated(
            TypeDescription::new(comp("app::Event"))
                .with_property(prop("kind").with_getter("kind").holds_type_id())
                .with_property(prop("at"))
                .with_virtual_property(prop("version").with_getter("version")),
            ClassAnnotations {
                filter_id: Some("audit".into()),
                ..ClassAnnotations::default()
            },
        )]);

        let codec = b.resolve(&comp("app::Event")).unwrap();
        let bean = codec.as_bean().unwrap();
        assert_eq!(bean.property_names(), ["at", "version"]);
        assert_eq!(bean.type_id_accessor(), Some(&Accessor::getter("kind")));
        assert_eq!(bean.filter_id(), Some("audit"));
    }

    #[test]
    fn any_getter_only() {
        let extras = TypeDescriptor::map_of(string(), TypeDescriptor::top());
        let b = binder([TypeDescription::new(comp("app::Open"))
            .with_any_getter(AnyGetterDef::new(Accessor::getter("extras"), extras.clone()))]);

        let codec = b.resolve(&comp("app::Open")).unwrap();
        let bean = codec.as_bean().unwrap();
        assert!(bean.properties().is_empty());
        let any = bean.any_getter().unwrap();
        assert_eq!(any.map_type(), &extras);
        assert_eq!(any.codec().map(Codec::name), Some("container/dynamic"));
    }

    #[test]
    fn duplicate_external_tags() {
        let animal = comp("app::Animal");
        let b = binder([TypeDescription::new(comp("app::Zoo"))
            .with_property(PropertyDef::new("first", animal.clone()).with_type_tag(TypeTag::external("kind")))
            .with_property(PropertyDef::new("second", animal).with_type_tag(TypeTag::external("kind")))]);

        let codec = b.resolve(&comp("app::Zoo")).unwrap();
        let props = codec.as_bean().unwrap().properties();
        assert!(props[0].type_tag().is_some());
        assert!(props[1].type_tag().is_none());
    }

    #[test]
    fn views() {
        let v1 = View::new("V1");
        let v2 = View::new("V2");
        let v3 = View::new("V3").with_ancestors(["V1"]);
        let desc = TypeDescription::new(comp("app::Doc"))
            .with_property(prop("a"))
            .with_property(prop("b").with_views([v1.clone()]))
            .with_property(prop("c").with_views([v1.clone(), v2.clone()]));

        let names_for = |b: &Binder, view: Option<&View>| {
            let codec = b.resolve(&comp("app::Doc")).unwrap();
            codec
                .as_bean()
                .unwrap()
                .properties_for_view(view)
                .into_iter()
                .map(|w| String::from(w.name()))
                .collect::<Vec<_>>()
        };

        let b = binder([desc.clone()]).with_config(BindConfig::new().with_default_view_inclusion(false));
        assert_eq!(names_for(&b, None), ["a", "b", "c"]);
        assert_eq!(names_for(&b, Some(&v1)), ["b", "c"]);
        assert_eq!(names_for(&b, Some(&v2)), ["c"]);
        assert_eq!(names_for(&b, Some(&v3)), ["b", "c"]);

        let b = binder([desc]);
        assert_eq!(names_for(&b, Some(&v1)), ["a", "b", "c"]);
        assert_eq!(names_for(&b, Some(&v2)), ["a", "c"]);
        assert_eq!(names_for(&b, Some(&View::new("Other"))), ["a"]);
    }

    #[test]
    fn idempotent() {
        let b = binder([TypeDescription::new(comp("app::Node"))
            .with_property(prop("name").with_views([View::new("Public")]))
            .with_property(prop("id"))
            .with_property(PropertyDef::new("child", comp("app::Node")).with_type_tag(TypeTag::external("t")))
            .with_object_id(ObjectIdInfo::property_based("id"))]);

        let first = b.resolve(&comp("app::Node")).unwrap();
        let second = b.resolve(&comp("app::Node")).unwrap();
        let (first, second) = (first.as_bean().unwrap(), second.as_bean().unwrap());

        assert_eq!(first.property_names(), second.property_names());
        assert_eq!(first.property_names(), ["id", "name", "child"]);

        let guards = |bean: &crate::codec::BeanCodec| {
            bean.filtered_properties()
                .unwrap()
                .iter()
                .map(|w| w.as_ref().map(|w| w.is_guarded()))
                .collect::<Vec<_>>()
        };
        assert_eq!(guards(first), guards(second));
        assert_eq!(guards(first), [Some(false), Some(true), Some(false)]);

        let ids = |bean: &crate::codec::BeanCodec| {
            let writer = bean.object_id_writer().unwrap();
            (writer.id_type().clone(), writer.is_always_as_id(), writer.is_property_based())
        };
        assert_eq!(ids(first), ids(second));
    }

    // -------------------------------------------------------------------------
    // Modifiers

    #[test]
    fn modifier_hooks_in_order() {
        let log = event_log();
        let b = binder([bean_desc("app::Point", &["x", "y"])])
            .with_modifier(Recorder::new("m1", &log))
            .with_modifier(Recorder::new("m2", &log));

        b.resolve(&comp("app::Point")).unwrap();
        assert_eq!(
            entries(&log),
            [
                "m1:change[x,y]",
                "m2:change[x,y]",
                "m1:filter[x,y]",
                "m2:filter[x,y]",
                "m1:order[x,y]",
                "m2:order[x,y]",
                "m1:update[filtered=false]",
                "m2:update[filtered=false]",
                "m1:modify[bean]",
                "m2:modify[bean]",
            ]
        );
    }

    #[test]
    fn later_modifiers_see_earlier_output() {
        let log = event_log();
        let b = binder([annotated(
            bean_desc("app::Point", &["x", "y"]),
            ClassAnnotations {
                ignored_properties: Some(IgnoredProperties::new(["secret"])),
                ..ClassAnnotations::default()
            },
        )])
        .with_modifier(AddExtra("extra"))
        .with_modifier(AddExtra("secret"))
        .with_modifier(Recorder::new("m", &log))
        .with_modifier(Wrap)
        .with_modifier(Wrap);

        let codec = b.resolve(&comp("app::Point")).unwrap();
        assert_eq!(codec.name(), "wrapped(wrapped(bean))");

        let log = entries(&log);
        assert_eq!(log[0], "m:change[x,y,extra,secret]");
        // the configured ignore list runs between change and filter
        assert_eq!(log[1], "m:filter[x,y,extra]");
    }

    #[test]
    fn update_builder_sees_view_filtering() {
        let log = event_log();
        let b = binder([TypeDescription::new(comp("app::Doc"))
            .with_property(prop("a").with_views([View::new("V")]))])
        .with_modifier(Recorder::new("m", &log));

        b.resolve(&comp("app::Doc")).unwrap();
        assert!(entries(&log).contains(&String::from("m:update[filtered=true]")));
    }

    #[test]
    fn modifier_errors_propagate() {
        let b = binder([bean_desc("app::Point", &["x"])]).with_modifier(FailUpdate);
        assert_eq!(b.resolve(&comp("app::Point")).unwrap_err(), BindError::custom("boom"));
    }

    #[test]
    fn inconsistent_builder_is_a_definition_error() {
        let b = binder([TypeDescription::new(comp("app::Doc"))
            .with_property(prop("a"))
            .with_property(prop("b").with_views([View::new("V")]))])
        .with_modifier(BreakFiltered);

        let err = b.resolve(&comp("app::Doc")).unwrap_err();
        assert!(matches!(err, BindError::TypeDefinition { .. }));
    }
}

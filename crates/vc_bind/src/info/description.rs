use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::codec::{Codec, Converter, ExternalIdGenerator};
use crate::config::IgnoredProperties;
use crate::info::{Accessor, PropertyDef, PropertyName, TypeDescriptor, TypeTag};

// -----------------------------------------------------------------------------
// Typing

/// Whether values are serialized by their declared or their runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Typing {
    Static,
    Dynamic,
}

// -----------------------------------------------------------------------------
// ClassAnnotations

/// Type-level declarations found by the introspector.
#[derive(Clone, Default)]
pub struct ClassAnnotations {
    /// Codec to use for the type, skipping every other resolution step.
    pub codec: Option<Codec>,
    /// Serialize values of this type as if they were of another type.
    pub serialize_as: Option<TypeDescriptor>,
    pub typing: Option<Typing>,
    /// Properties whose value is of this type are dropped.
    pub ignorable: Option<bool>,
    pub root_name: Option<PropertyName>,
    /// Polymorphic handling for values declared with this type.
    pub type_tag: Option<TypeTag>,
    pub ignored_properties: Option<IgnoredProperties>,
    pub filter_id: Option<Arc<str>>,
    /// Other annotations that have no meaning to the resolver but still mark
    /// the type as deliberately serializable.
    pub markers: Vec<Arc<str>>,
}

impl ClassAnnotations {
    /// Returns `true` if any annotation at all is present.
    pub fn has_known_annotations(&self) -> bool {
        self.codec.is_some()
            || self.serialize_as.is_some()
            || self.typing.is_some()
            || self.ignorable.is_some()
            || self.root_name.is_some()
            || self.type_tag.is_some()
            || self.ignored_properties.is_some()
            || self.filter_id.is_some()
            || !self.markers.is_empty()
    }
}

impl fmt::Debug for ClassAnnotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassAnnotations")
            .field("codec", &self.codec.as_ref().map(Codec::name))
            .field("serialize_as", &self.serialize_as)
            .field("typing", &self.typing)
            .field("ignorable", &self.ignorable)
            .field("root_name", &self.root_name)
            .field("type_tag", &self.type_tag)
            .field("filter_id", &self.filter_id)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ObjectIdInfo

/// How object ids are produced.
#[derive(Clone)]
pub enum IdGeneratorKind {
    /// The id is the value of an existing property.
    Property,
    /// A separate generator produces ids.
    ///
    /// `generator_type` is the generator's descriptor; its first generic
    /// parameter is the id value type.
    External {
        generator_type: TypeDescriptor,
        prototype: Arc<dyn ExternalIdGenerator>,
    },
}

impl fmt::Debug for IdGeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property => f.write_str("Property"),
            Self::External { generator_type, .. } => write!(f, "External({generator_type})"),
        }
    }
}

/// Identity preservation settings of a type.
///
/// # Examples
///
/// ```
/// use vc_bind::info::ObjectIdInfo;
///
/// let info = ObjectIdInfo::property_based("id").always_as_id();
/// assert_eq!(info.property_name().simple_name(), "id");
/// assert!(info.is_always_as_id());
/// ```
#[derive(Clone, Debug)]
pub struct ObjectIdInfo {
    property_name: PropertyName,
    generator: IdGeneratorKind,
    scope: Option<TypeDescriptor>,
    always_as_id: bool,
}

impl ObjectIdInfo {
    /// Uses the value of property `name` as id.
    pub fn property_based(name: impl Into<PropertyName>) -> Self {
        Self {
            property_name: name.into(),
            generator: IdGeneratorKind::Property,
            scope: None,
            always_as_id: false,
        }
    }

    /// Uses `prototype` to generate ids, written under property `name`.
    pub fn external(
        name: impl Into<PropertyName>,
        generator_type: TypeDescriptor,
        prototype: Arc<dyn ExternalIdGenerator>,
    ) -> Self {
        Self {
            property_name: name.into(),
            generator: IdGeneratorKind::External {
                generator_type,
                prototype,
            },
            scope: None,
            always_as_id: false,
        }
    }

    /// Restricts id uniqueness to `scope`. Defaults to the annotated type.
    pub fn with_scope(mut self, scope: TypeDescriptor) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Writes the id instead of the full object, even on first occurrence.
    pub fn always_as_id(mut self) -> Self {
        self.always_as_id = true;
        self
    }

    #[inline]
    pub fn property_name(&self) -> &PropertyName {
        &self.property_name
    }

    #[inline]
    pub fn generator(&self) -> &IdGeneratorKind {
        &self.generator
    }

    #[inline]
    pub fn scope(&self) -> Option<&TypeDescriptor> {
        self.scope.as_ref()
    }

    #[inline]
    pub fn is_always_as_id(&self) -> bool {
        self.always_as_id
    }
}

// -----------------------------------------------------------------------------
// AnyGetterDef

/// A member returning a map of extra properties written inline with the
/// regular ones.
#[derive(Clone, Debug)]
pub struct AnyGetterDef {
    pub accessor: Accessor,
    /// Declared map type of the member.
    pub map_type: TypeDescriptor,
    /// Explicit codec declared on the member.
    pub codec: Option<Codec>,
}

impl AnyGetterDef {
    #[inline]
    pub fn new(accessor: Accessor, map_type: TypeDescriptor) -> Self {
        Self {
            accessor,
            map_type,
            codec: None,
        }
    }
}

// -----------------------------------------------------------------------------
// TypeDescription

/// Everything the introspector knows about one type.
///
/// # Examples
///
/// ```
/// use vc_bind::info::{PropertyDef, TypeDescription, TypeDescriptor};
///
/// let desc = TypeDescription::new(TypeDescriptor::composite("app::User"))
///     .with_property(PropertyDef::new("id", TypeDescriptor::scalar("u64")))
///     .with_property(PropertyDef::new("name", TypeDescriptor::scalar("alloc::string::String")));
///
/// assert_eq!(desc.properties().len(), 2);
/// assert!(desc.object_id().is_none());
/// ```
#[derive(Clone)]
pub struct TypeDescription {
    ty: TypeDescriptor,
    properties: Vec<PropertyDef>,
    virtual_properties: Vec<PropertyDef>,
    annotations: ClassAnnotations,
    object_id: Option<ObjectIdInfo>,
    converter: Option<Arc<dyn Converter>>,
    any_getter: Option<AnyGetterDef>,
}

impl TypeDescription {
    /// Creates a description without properties or annotations.
    pub fn new(ty: TypeDescriptor) -> Self {
        Self {
            ty,
            properties: Vec::new(),
            virtual_properties: Vec::new(),
            annotations: ClassAnnotations::default(),
            object_id: None,
            converter: None,
            any_getter: None,
        }
    }

    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_properties(mut self, properties: impl IntoIterator<Item = PropertyDef>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Adds a property that has no backing member discovered by introspection.
    pub fn with_virtual_property(mut self, property: PropertyDef) -> Self {
        self.virtual_properties.push(property);
        self
    }

    pub fn with_annotations(mut self, annotations: ClassAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Declares an explicit codec for the type.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.annotations.codec = Some(codec);
        self
    }

    pub fn with_object_id(mut self, info: ObjectIdInfo) -> Self {
        self.object_id = Some(info);
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn with_any_getter(mut self, any_getter: AnyGetterDef) -> Self {
        self.any_getter = Some(any_getter);
        self
    }

    /// Returns a copy describing `ty`, used when a generic instantiation is
    /// described by its raw type's registration.
    pub fn instantiated(&self, ty: &TypeDescriptor) -> Self {
        let mut desc = self.clone();
        desc.ty = ty.clone();
        desc
    }

    #[inline]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// Candidate properties, in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    #[inline]
    pub fn virtual_properties(&self) -> &[PropertyDef] {
        &self.virtual_properties
    }

    #[inline]
    pub fn annotations(&self) -> &ClassAnnotations {
        &self.annotations
    }

    #[inline]
    pub fn explicit_codec(&self) -> Option<&Codec> {
        self.annotations.codec.as_ref()
    }

    #[inline]
    pub fn object_id(&self) -> Option<&ObjectIdInfo> {
        self.object_id.as_ref()
    }

    #[inline]
    pub fn converter(&self) -> Option<&Arc<dyn Converter>> {
        self.converter.as_ref()
    }

    #[inline]
    pub fn any_getter(&self) -> Option<&AnyGetterDef> {
        self.any_getter.as_ref()
    }

    #[inline]
    pub fn has_known_class_annotations(&self) -> bool {
        self.annotations.has_known_annotations()
    }
}

impl fmt::Debug for TypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescription")
            .field("ty", &self.ty)
            .field("properties", &self.properties)
            .field("annotations", &self.annotations)
            .field("object_id", &self.object_id)
            .field("converter", &self.converter.is_some())
            .finish_non_exhaustive()
    }
}

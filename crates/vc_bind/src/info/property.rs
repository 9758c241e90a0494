use alloc::sync::Arc;
use core::fmt;

use bitflags::bitflags;

use crate::codec::Codec;
use crate::info::{PropertyName, TypeDescriptor, TypeTag, View, ViewSet};

// -----------------------------------------------------------------------------
// Accessor

/// How a property value is read from an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Field,
    Getter,
}

/// A readable member of a type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    kind: AccessorKind,
    member: Arc<str>,
}

impl Accessor {
    #[inline]
    pub fn field(member: impl Into<Arc<str>>) -> Self {
        Self {
            kind: AccessorKind::Field,
            member: member.into(),
        }
    }

    #[inline]
    pub fn getter(member: impl Into<Arc<str>>) -> Self {
        Self {
            kind: AccessorKind::Getter,
            member: member.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> AccessorKind {
        self.kind
    }

    /// Name of the member, e.g. the field name or `get_name`.
    #[inline]
    pub fn member(&self) -> &str {
        &self.member
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AccessorKind::Field => write!(f, "Field({})", self.member),
            AccessorKind::Getter => write!(f, "Getter({}())", self.member),
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyFlags

bitflags! {
    /// Metadata flags of a discovered property.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// The property is required on input.
        const REQUIRED       = 1 << 0;
        /// The property was included by an explicit declaration rather than discovered implicitly.
        const EXPLICIT       = 1 << 1;
        /// The property can also be written back (setter, mutable field or creator parameter).
        const MUTABLE        = 1 << 2;
        /// The property holds the type id of the instance.
        const TYPE_ID        = 1 << 3;
        /// The property is the back side of a managed parent/child reference.
        const BACK_REFERENCE = 1 << 4;
    }
}

// -----------------------------------------------------------------------------
// PropertyDef

/// A logical serializable property, as produced by an [`Introspector`].
///
/// The discovery pipeline owns these for the duration of one resolution and
/// turns the survivors into [`PropertyWriter`]s.
///
/// # Examples
///
/// ```
/// use vc_bind::info::{PropertyDef, TypeDescriptor, View};
///
/// let def = PropertyDef::new("email", TypeDescriptor::scalar("alloc::string::String"))
///     .with_getter("get_email")
///     .with_views([View::new("Internal")])
///     .explicit();
///
/// assert_eq!(def.name(), "email");
/// assert!(def.is_explicitly_included());
/// assert_eq!(def.views().len(), 1);
/// ```
///
/// [`Introspector`]: crate::registry::Introspector
/// [`PropertyWriter`]: crate::codec::PropertyWriter
#[derive(Clone)]
pub struct PropertyDef {
    name: Arc<str>,
    declared_type: TypeDescriptor,
    accessor: Option<Accessor>,
    wrapper_name: Option<PropertyName>,
    flags: PropertyFlags,
    views: ViewSet,
    codec: Option<Codec>,
    type_tag: Option<TypeTag>,
    content_type_tag: Option<TypeTag>,
}

impl PropertyDef {
    /// Creates a property read through a field of the same name.
    pub fn new(name: impl Into<Arc<str>>, declared_type: TypeDescriptor) -> Self {
        let name = name.into();
        Self {
            accessor: Some(Accessor::field(name.clone())),
            name,
            declared_type,
            wrapper_name: None,
            flags: PropertyFlags::empty(),
            views: ViewSet::new(),
            codec: None,
            type_tag: None,
            content_type_tag: None,
        }
    }

    /// Reads the property through getter `member`.
    pub fn with_getter(mut self, member: impl Into<Arc<str>>) -> Self {
        self.accessor = Some(Accessor::getter(member));
        self
    }

    /// Removes the accessor; such properties never reach the output.
    pub fn without_accessor(mut self) -> Self {
        self.accessor = None;
        self
    }

    pub fn with_wrapper_name(mut self, name: impl Into<PropertyName>) -> Self {
        self.wrapper_name = Some(name.into());
        self
    }

    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn required(self) -> Self {
        self.with_flags(PropertyFlags::REQUIRED)
    }

    #[inline]
    pub fn explicit(self) -> Self {
        self.with_flags(PropertyFlags::EXPLICIT)
    }

    #[inline]
    pub fn mutable(self) -> Self {
        self.with_flags(PropertyFlags::MUTABLE)
    }

    #[inline]
    pub fn holds_type_id(self) -> Self {
        self.with_flags(PropertyFlags::TYPE_ID)
    }

    #[inline]
    pub fn back_reference(self) -> Self {
        self.with_flags(PropertyFlags::BACK_REFERENCE)
    }

    pub fn with_views(mut self, views: impl IntoIterator<Item = View>) -> Self {
        self.views = views.into_iter().collect();
        self
    }

    /// Declares an explicit codec for the property value.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Declares a polymorphic type tag for the property value.
    pub fn with_type_tag(mut self, tag: TypeTag) -> Self {
        self.type_tag = Some(tag);
        self
    }

    /// Declares a polymorphic type tag for the elements of a container or reference property.
    pub fn with_content_type_tag(mut self, tag: TypeTag) -> Self {
        self.content_type_tag = Some(tag);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    #[inline]
    pub fn declared_type(&self) -> &TypeDescriptor {
        &self.declared_type
    }

    #[inline]
    pub fn accessor(&self) -> Option<&Accessor> {
        self.accessor.as_ref()
    }

    #[inline]
    pub fn wrapper_name(&self) -> Option<&PropertyName> {
        self.wrapper_name.as_ref()
    }

    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    #[inline]
    pub fn views(&self) -> &ViewSet {
        &self.views
    }

    #[inline]
    pub fn codec(&self) -> Option<&Codec> {
        self.codec.as_ref()
    }

    #[inline]
    pub fn type_tag(&self) -> Option<&TypeTag> {
        self.type_tag.as_ref()
    }

    #[inline]
    pub fn content_type_tag(&self) -> Option<&TypeTag> {
        self.content_type_tag.as_ref()
    }

    #[inline]
    pub fn is_type_id(&self) -> bool {
        self.flags.contains(PropertyFlags::TYPE_ID)
    }

    #[inline]
    pub fn is_back_reference(&self) -> bool {
        self.flags.contains(PropertyFlags::BACK_REFERENCE)
    }

    #[inline]
    pub fn is_explicitly_included(&self) -> bool {
        self.flags.contains(PropertyFlags::EXPLICIT)
    }

    /// Whether the property has a write path as well.
    #[inline]
    pub fn could_deserialize(&self) -> bool {
        self.flags.contains(PropertyFlags::MUTABLE)
    }
}

impl fmt::Debug for PropertyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("accessor", &self.accessor)
            .field("flags", &self.flags)
            .field("views", &self.views)
            .finish_non_exhaustive()
    }
}

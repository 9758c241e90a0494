use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::codec::{Codec, ObjectIdWriter, ViewGuardedWriter};
use crate::info::{Accessor, PropertyFlags, PropertyName, TypeDescriptor, TypeTag, View, ViewSet};

// -----------------------------------------------------------------------------
// PropertyWriter

/// The resolved writer of one property.
///
/// Created by the property discovery pipeline, one per surviving
/// [`PropertyDef`](crate::info::PropertyDef). Modifiers may also create
/// writers of their own with [`PropertyWriter::new`].
#[derive(Clone)]
pub struct PropertyWriter {
    name: Arc<str>,
    wrapper_name: Option<PropertyName>,
    declared_type: TypeDescriptor,
    accessor: Accessor,
    codec: Option<Codec>,
    type_tag: Option<TypeTag>,
    content_type_tag: Option<TypeTag>,
    views: ViewSet,
    flags: PropertyFlags,
    static_typing: bool,
}

impl PropertyWriter {
    pub fn new(name: impl Into<Arc<str>>, declared_type: TypeDescriptor, accessor: Accessor) -> Self {
        Self {
            name: name.into(),
            wrapper_name: None,
            declared_type,
            accessor,
            codec: None,
            type_tag: None,
            content_type_tag: None,
            views: ViewSet::new(),
            flags: PropertyFlags::empty(),
            static_typing: false,
        }
    }

    pub fn with_codec(mut self, codec: Option<Codec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_wrapper_name(mut self, name: Option<PropertyName>) -> Self {
        self.wrapper_name = name;
        self
    }

    pub fn with_type_tag(mut self, tag: Option<TypeTag>) -> Self {
        self.type_tag = tag;
        self
    }

    pub fn with_content_type_tag(mut self, tag: Option<TypeTag>) -> Self {
        self.content_type_tag = tag;
        self
    }

    pub fn with_views(mut self, views: ViewSet) -> Self {
        self.views = views;
        self
    }

    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_static_typing(mut self, static_typing: bool) -> Self {
        self.static_typing = static_typing;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn wrapper_name(&self) -> Option<&PropertyName> {
        self.wrapper_name.as_ref()
    }

    #[inline]
    pub fn declared_type(&self) -> &TypeDescriptor {
        &self.declared_type
    }

    #[inline]
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// Codec bound at resolution time. `None` means it is found lazily from
    /// the runtime value.
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
    pub fn views(&self) -> &ViewSet {
        &self.views
    }

    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    #[inline]
    pub fn uses_static_typing(&self) -> bool {
        self.static_typing
    }

    /// Drops the value type tag, the value is then written without one.
    #[inline]
    pub fn clear_type_tag(&mut self) {
        self.type_tag = None;
    }

    /// Returns `true` if this property is written under the output name `name`.
    pub fn would_conflict_with_name(&self, name: &str) -> bool {
        match &self.wrapper_name {
            Some(wrapper) => wrapper.is_unqualified(name),
            None => &*self.name == name,
        }
    }
}

impl fmt::Debug for PropertyWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyWriter")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("accessor", &self.accessor)
            .field("codec", &self.codec.as_ref().map(Codec::name))
            .field("type_tag", &self.type_tag)
            .field("views", &self.views)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// AnyGetterWriter

/// Writes the entries of a map-valued member inline with the regular properties.
#[derive(Clone, Debug)]
pub struct AnyGetterWriter {
    accessor: Accessor,
    map_type: TypeDescriptor,
    codec: Option<Codec>,
}

impl AnyGetterWriter {
    #[inline]
    pub fn new(accessor: Accessor, map_type: TypeDescriptor, codec: Option<Codec>) -> Self {
        Self {
            accessor,
            map_type,
            codec,
        }
    }

    #[inline]
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    #[inline]
    pub fn map_type(&self) -> &TypeDescriptor {
        &self.map_type
    }

    #[inline]
    pub fn codec(&self) -> Option<&Codec> {
        self.codec.as_ref()
    }
}

// -----------------------------------------------------------------------------
// BeanCodec

/// Codec writing a composite value property by property.
///
/// When an object id writer is present and its generator is
/// property-based, the id property is `properties()[0]`.
pub struct BeanCodec {
    pub(super) ty: TypeDescriptor,
    pub(super) properties: Vec<PropertyWriter>,
    pub(super) filtered_properties: Option<Vec<Option<ViewGuardedWriter>>>,
    pub(super) type_id: Option<Accessor>,
    pub(super) object_id_writer: Option<ObjectIdWriter>,
    pub(super) any_getter: Option<AnyGetterWriter>,
    pub(super) filter_id: Option<Arc<str>>,
    pub(super) dummy: bool,
}

impl BeanCodec {
    #[inline]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// All property writers, in output order.
    #[inline]
    pub fn properties(&self) -> &[PropertyWriter] {
        &self.properties
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(PropertyWriter::name).collect()
    }

    /// Writers used when a view is active, index-aligned with
    /// [`properties`](Self::properties). `None` entries are never written
    /// under a view.
    #[inline]
    pub fn filtered_properties(&self) -> Option<&[Option<ViewGuardedWriter>]> {
        self.filtered_properties.as_deref()
    }

    /// The writers used for `active`, in output order.
    ///
    /// Without an active view, or without view-filtered writers, this is the
    /// full property list.
    pub fn properties_for_view(&self, active: Option<&View>) -> Vec<&PropertyWriter> {
        match (active, &self.filtered_properties) {
            (Some(view), Some(filtered)) => filtered
                .iter()
                .flatten()
                .filter(|guarded| guarded.admits(view))
                .map(ViewGuardedWriter::writer)
                .collect(),
            _ => self.properties.iter().collect(),
        }
    }

    /// Member holding the type id of the instance.
    #[inline]
    pub fn type_id_accessor(&self) -> Option<&Accessor> {
        self.type_id.as_ref()
    }

    #[inline]
    pub fn object_id_writer(&self) -> Option<&ObjectIdWriter> {
        self.object_id_writer.as_ref()
    }

    #[inline]
    pub fn any_getter(&self) -> Option<&AnyGetterWriter> {
        self.any_getter.as_ref()
    }

    /// Identifier of the property filter to apply at write time.
    #[inline]
    pub fn filter_id(&self) -> Option<&str> {
        self.filter_id.as_deref()
    }

    /// `true` for the empty codec of an annotated type without properties.
    #[inline]
    pub fn is_dummy(&self) -> bool {
        self.dummy
    }
}

impl fmt::Debug for BeanCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanCodec")
            .field("ty", &self.ty)
            .field("properties", &self.property_names())
            .field("object_id_writer", &self.object_id_writer)
            .field("filter_id", &self.filter_id)
            .field("dummy", &self.dummy)
            .finish_non_exhaustive()
    }
}

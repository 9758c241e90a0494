use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::codec::{AnyGetterWriter, BeanCodec, Codec, ObjectIdWriter, PropertyWriter, ViewGuardedWriter};
use crate::error::BindError;
use crate::info::{Accessor, TypeDescription};

/// Mutable state of a [`BeanCodec`] under construction.
///
/// The builder is moved through the construction steps (and through
/// [`BeanCodecModifier::update_builder`]) and consumed by [`build`].
///
/// [`BeanCodecModifier::update_builder`]: crate::ser::BeanCodecModifier::update_builder
/// [`build`]: BeanCodecBuilder::build
#[derive(Debug)]
pub struct BeanCodecBuilder {
    description: Arc<TypeDescription>,
    properties: Vec<PropertyWriter>,
    filtered_properties: Option<Vec<Option<ViewGuardedWriter>>>,
    type_id: Option<Accessor>,
    object_id_writer: Option<ObjectIdWriter>,
    any_getter: Option<AnyGetterWriter>,
    filter_id: Option<Arc<str>>,
}

impl BeanCodecBuilder {
    pub fn new(description: Arc<TypeDescription>) -> Self {
        Self {
            description,
            properties: Vec::new(),
            filtered_properties: None,
            type_id: None,
            object_id_writer: None,
            any_getter: None,
            filter_id: None,
        }
    }

    #[inline]
    pub fn description(&self) -> &TypeDescription {
        &self.description
    }

    #[inline]
    pub fn properties(&self) -> &[PropertyWriter] {
        &self.properties
    }

    #[inline]
    pub fn properties_mut(&mut self) -> &mut Vec<PropertyWriter> {
        &mut self.properties
    }

    pub fn set_properties(&mut self, properties: Vec<PropertyWriter>) {
        self.properties = properties;
    }

    #[inline]
    pub fn filtered_properties(&self) -> Option<&[Option<ViewGuardedWriter>]> {
        self.filtered_properties.as_deref()
    }

    /// Sets the view-filtered writers. Must be index-aligned with the
    /// properties when the codec is built.
    pub fn set_filtered_properties(&mut self, filtered: Option<Vec<Option<ViewGuardedWriter>>>) {
        self.filtered_properties = filtered;
    }

    #[inline]
    pub fn type_id(&self) -> Option<&Accessor> {
        self.type_id.as_ref()
    }

    pub fn set_type_id(&mut self, accessor: Accessor) -> Result<(), BindError> {
        if let Some(existing) = &self.type_id {
            return Err(BindError::type_definition(
                self.description.ty(),
                format!(
                    "multiple type ids specified with {:?} and {:?}",
                    existing, accessor
                ),
            ));
        }
        self.type_id = Some(accessor);
        Ok(())
    }

    #[inline]
    pub fn object_id_writer(&self) -> Option<&ObjectIdWriter> {
        self.object_id_writer.as_ref()
    }

    pub fn set_object_id_writer(&mut self, writer: Option<ObjectIdWriter>) {
        self.object_id_writer = writer;
    }

    #[inline]
    pub fn any_getter(&self) -> Option<&AnyGetterWriter> {
        self.any_getter.as_ref()
    }

    pub fn set_any_getter(&mut self, any_getter: Option<AnyGetterWriter>) {
        self.any_getter = any_getter;
    }

    #[inline]
    pub fn filter_id(&self) -> Option<&str> {
        self.filter_id.as_deref()
    }

    pub fn set_filter_id(&mut self, filter_id: Option<Arc<str>>) {
        self.filter_id = filter_id;
    }

    /// `true` if a built codec would have nothing to write: no properties,
    /// no any-getter and no object id.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.any_getter.is_none() && self.object_id_writer.is_none()
    }

    /// Builds the codec.
    ///
    /// Returns `Ok(None)` when the builder [is empty](Self::is_empty). Fails
    /// if the view-filtered writers are not index-aligned with the properties.
    pub fn build(self) -> Result<Option<Codec>, BindError> {
        if self.is_empty() {
            return Ok(None);
        }
        if let Some(filtered) = &self.filtered_properties
            && filtered.len() != self.properties.len()
        {
            return Err(BindError::type_definition(
                self.description.ty(),
                format!(
                    "mismatch between properties ({}) and filtered properties ({})",
                    self.properties.len(),
                    filtered.len()
                ),
            ));
        }
        Ok(Some(self.into_codec(false)))
    }

    /// Builds an empty codec, for types with declarations but nothing to write.
    pub fn create_dummy(self) -> Codec {
        let mut builder = self;
        builder.properties.clear();
        builder.filtered_properties = None;
        builder.into_codec(true)
    }

    fn into_codec(self, dummy: bool) -> Codec {
        Codec::from(BeanCodec {
            ty: self.description.ty().clone(),
            properties: self.properties,
            filtered_properties: self.filtered_properties,
            type_id: self.type_id,
            object_id_writer: self.object_id_writer,
            any_getter: self.any_getter,
            filter_id: self.filter_id,
            dummy,
        })
    }
}

use alloc::vec::Vec;

use crate::codec::{BeanCodecBuilder, Codec, PropertyWriter};
use crate::config::BindConfig;
use crate::error::BindError;
use crate::info::TypeDescription;

/// Hooks rewriting the stages of codec construction.
///
/// Modifiers registered on a [`CodecFactory`] run in registration order and
/// each one sees the output of the previous one. Every hook takes its input
/// by value and hands it back, possibly changed; the default implementations
/// return it untouched. Errors propagate to the caller as they are.
///
/// The hooks run in this order for a bean type:
///
/// 1. [`change_properties`]: after discovery and type tag de-duplication;
/// 2. [`filter_properties`]: after the configured ignore-by-name filter;
/// 3. [`order_properties`];
/// 4. [`update_builder`]: after the object id writer, the filter id, the
///    any-getter and view filtering are set up. The builder already holds
///    the view-filtered writers, changes to the property list must keep
///    them index-aligned;
/// 5. [`modify_codec`]: on the final codec of any non-container type, bean
///    or not.
///
/// [`CodecFactory`]: crate::ser::CodecFactory
/// [`change_properties`]: BeanCodecModifier::change_properties
/// [`filter_properties`]: BeanCodecModifier::filter_properties
/// [`order_properties`]: BeanCodecModifier::order_properties
/// [`update_builder`]: BeanCodecModifier::update_builder
/// [`modify_codec`]: BeanCodecModifier::modify_codec
pub trait BeanCodecModifier: Send + Sync {
    /// Adds, removes or replaces discovered property writers.
    fn change_properties(
        &self,
        _config: &BindConfig,
        _desc: &TypeDescription,
        properties: Vec<PropertyWriter>,
    ) -> Result<Vec<PropertyWriter>, BindError> {
        Ok(properties)
    }

    /// Removes property writers.
    fn filter_properties(
        &self,
        _config: &BindConfig,
        _desc: &TypeDescription,
        properties: Vec<PropertyWriter>,
    ) -> Result<Vec<PropertyWriter>, BindError> {
        Ok(properties)
    }

    /// Reorders property writers.
    fn order_properties(
        &self,
        _config: &BindConfig,
        _desc: &TypeDescription,
        properties: Vec<PropertyWriter>,
    ) -> Result<Vec<PropertyWriter>, BindError> {
        Ok(properties)
    }

    fn update_builder(
        &self,
        _config: &BindConfig,
        _desc: &TypeDescription,
        builder: BeanCodecBuilder,
    ) -> Result<BeanCodecBuilder, BindError> {
        Ok(builder)
    }

    /// Post-processes a resolved codec, e.g. by wrapping it.
    fn modify_codec(
        &self,
        _config: &BindConfig,
        _desc: &TypeDescription,
        codec: Codec,
    ) -> Result<Codec, BindError> {
        Ok(codec)
    }
}

/// A modifier that changes nothing.
impl BeanCodecModifier for () {}

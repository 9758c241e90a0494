//! Property discovery: from the candidate [`PropertyDef`]s of a description
//! to the ordered [`PropertyWriter`]s of a bean codec.

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::codec::{BeanCodecBuilder, Codec, PropertyWriter};
use crate::config::BindConfig;
use crate::error::BindError;
use crate::hash::{FixedHashState, HashMap, HashSet};
use crate::info::{PropertyDef, TypeDescription, TypeDescriptor, TypeKey, TypeTag};
use crate::ser::ResolveContext;

/// Builds the writers of the candidate properties of `desc`.
///
/// Type-id properties are recorded on `builder` instead of being written.
/// Returns `Ok(None)` if no candidate is left after dropping ignorable,
/// accessor-less and (optionally) setter-less properties.
pub(super) fn find_bean_properties(
    cx: &ResolveContext<'_>,
    desc: &TypeDescription,
    builder: &mut BeanCodecBuilder,
) -> Result<Option<Vec<PropertyWriter>>, BindError> {
    let candidates: Vec<&PropertyDef> = desc.properties().iter().collect();
    let mut candidates = remove_ignorable_types(cx, candidates)?;
    if cx.config().require_setters_for_getters {
        remove_setterless_getters(&mut candidates);
    }
    if candidates.is_empty() {
        return Ok(None);
    }

    let static_typing = cx.uses_static_typing(desc);
    let mut writers = Vec::with_capacity(candidates.len());
    for def in candidates {
        if def.is_type_id() {
            if let Some(accessor) = def.accessor() {
                builder.set_type_id(accessor.clone())?;
            }
            continue;
        }
        if def.is_back_reference() {
            log::trace!("`{}`: skipping back reference `{}`", desc.ty(), def.name());
            continue;
        }
        writers.push(construct_writer(cx, desc.ty(), def, static_typing)?);
    }
    Ok(Some(writers))
}

/// Drops properties without accessor and properties whose value type is
/// ignorable. Ignorability is looked up once per raw type.
fn remove_ignorable_types<'d>(
    cx: &ResolveContext<'_>,
    candidates: Vec<&'d PropertyDef>,
) -> Result<Vec<&'d PropertyDef>, BindError> {
    let mut ignores: HashMap<TypeKey, bool> = HashMap::with_hasher(FixedHashState);
    let mut kept = Vec::with_capacity(candidates.len());
    for def in candidates {
        if def.accessor().is_none() {
            continue;
        }
        let ty = def.declared_type();
        let ignored = match ignores.get(ty.key()) {
            Some(&ignored) => ignored,
            None => {
                let ignored = is_ignorable_type(cx, ty)?;
                ignores.insert(ty.key().clone(), ignored);
                ignored
            }
        };
        if ignored {
            log::trace!("dropping `{}`: type `{}` is ignorable", def.name(), ty);
        } else {
            kept.push(def);
        }
    }
    Ok(kept)
}

fn is_ignorable_type(cx: &ResolveContext<'_>, ty: &TypeDescriptor) -> Result<bool, BindError> {
    if let Some(ignored) = cx
        .config()
        .override_for(ty.key())
        .and_then(|o| o.ignored_type)
    {
        return Ok(ignored);
    }
    Ok(cx.describe(ty)?.annotations().ignorable.unwrap_or(false))
}

/// Drops implicitly discovered properties that cannot be written back.
fn remove_setterless_getters(candidates: &mut Vec<&PropertyDef>) {
    candidates.retain(|def| def.could_deserialize() || def.is_explicitly_included());
}

/// Builds the writer of one property.
///
/// A codec declared on the property is contextualized right away. Any
/// failure is reported as a property definition error of `bean`.
pub(super) fn construct_writer(
    cx: &ResolveContext<'_>,
    bean: &TypeDescriptor,
    def: &PropertyDef,
    static_typing: bool,
) -> Result<PropertyWriter, BindError> {
    let fail = |message: alloc::string::String| {
        BindError::property_definition(bean, def.name_arc().clone(), message)
    };
    let wrap = |err: BindError| match err {
        BindError::PropertyDefinition { .. } => err,
        other => fail(other.to_string()),
    };

    let Some(accessor) = def.accessor() else {
        return Err(fail("property has no accessor".to_string()));
    };
    let ty = def.declared_type();

    let codec = match def.codec() {
        Some(codec) => Some(contextualize(cx, codec, def).map_err(wrap)?),
        None => None,
    };

    let content_type_tag = if ty.is_container() || ty.is_reference() {
        find_type_tag(cx, def.content_type_tag(), ty.content_type()).map_err(wrap)?
    } else {
        None
    };
    let type_tag = find_type_tag(cx, def.type_tag(), Some(ty)).map_err(wrap)?;

    for tag in type_tag.iter().chain(content_type_tag.iter()) {
        tag.validate().map_err(|message| fail(message.to_string()))?;
    }

    Ok(PropertyWriter::new(def.name_arc().clone(), ty.clone(), accessor.clone())
        .with_wrapper_name(def.wrapper_name().cloned())
        .with_codec(codec)
        .with_type_tag(type_tag)
        .with_content_type_tag(content_type_tag)
        .with_views(def.views().clone())
        .with_flags(def.flags())
        .with_static_typing(static_typing))
}

fn contextualize(cx: &ResolveContext<'_>, codec: &Codec, def: &PropertyDef) -> Result<Codec, BindError> {
    match codec {
        Codec::Custom(custom) => Ok(custom
            .contextualize(cx, def)?
            .unwrap_or_else(|| codec.clone())),
        _ => Ok(codec.clone()),
    }
}

/// The tag declared on the property, else the tag declared on the value type.
fn find_type_tag(
    cx: &ResolveContext<'_>,
    declared: Option<&TypeTag>,
    ty: Option<&TypeDescriptor>,
) -> Result<Option<TypeTag>, BindError> {
    if let Some(tag) = declared {
        return Ok(Some(tag.clone()));
    }
    match ty {
        Some(ty) if !ty.is_top() => Ok(cx.describe(ty)?.annotations().type_tag.clone()),
        _ => Ok(None),
    }
}

/// Clears external-property type tags that would write a duplicate key.
///
/// A tag is cleared when another property is written under the tag's name,
/// or when an earlier property already keeps an external tag with that name.
pub(super) fn remove_overlapping_type_ids(mut writers: Vec<PropertyWriter>) -> Vec<PropertyWriter> {
    let mut claimed: HashSet<Arc<str>> = HashSet::with_hasher(FixedHashState);
    for index in 0..writers.len() {
        let name: Arc<str> = match writers[index].type_tag() {
            Some(tag) if tag.is_external() => Arc::from(tag.property_name()),
            _ => continue,
        };
        let collides = claimed.contains(&name)
            || writers
                .iter()
                .enumerate()
                .any(|(other, w)| other != index && w.would_conflict_with_name(&name));
        if collides {
            log::trace!(
                "clearing external type tag `{name}` of `{}`: name already written",
                writers[index].name()
            );
            writers[index].clear_type_tag();
        } else {
            claimed.insert(name);
        }
    }
    writers
}

/// Drops the writers named by the ignored-properties declaration of the type
/// and its configuration override.
pub(super) fn filter_bean_properties(
    config: &BindConfig,
    desc: &TypeDescription,
    writers: Vec<PropertyWriter>,
) -> Vec<PropertyWriter> {
    let declared = desc.annotations().ignored_properties.as_ref();
    let overridden = config
        .override_for(desc.ty().key())
        .and_then(|o| o.ignored_properties.as_ref());
    let ignorals = match (declared, overridden) {
        (Some(declared), Some(overridden)) => declared.with_overrides(overridden),
        (Some(one), None) | (None, Some(one)) => one.clone(),
        (None, None) => return writers,
    };

    let ignored = ignorals.for_serialization();
    if ignored.is_empty() {
        return writers;
    }
    writers
        .into_iter()
        .filter(|w| !ignored.iter().any(|name| name.as_str() == w.name()))
        .collect()
}

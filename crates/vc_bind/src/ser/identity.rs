use alloc::format;
use alloc::vec::Vec;

use crate::codec::{IdGenerator, ObjectIdWriter, PropertyWriter};
use crate::error::BindError;
use crate::info::{IdGeneratorKind, TypeDescription};

/// Builds the object id writer of a bean, if its description asks for one.
///
/// With a property-based generator the id property is moved to the front of
/// `properties`, the rest keep their order.
pub(super) fn build_object_id_writer(
    desc: &TypeDescription,
    properties: &mut Vec<PropertyWriter>,
) -> Result<Option<ObjectIdWriter>, BindError> {
    let Some(info) = desc.object_id() else {
        return Ok(None);
    };

    match info.generator() {
        IdGeneratorKind::Property => {
            let name = info.property_name().simple_name();
            let Some(index) = properties.iter().position(|p| p.name() == name) else {
                return Err(BindError::type_definition(
                    desc.ty(),
                    format!("invalid object id definition: cannot find property with name `{name}`"),
                ));
            };
            properties[..=index].rotate_right(1);
            let id_property = properties[0].clone();

            log::trace!("`{}`: object id from property `{name}`", desc.ty());
            Ok(Some(ObjectIdWriter::new(
                id_property.declared_type().clone(),
                None,
                IdGenerator::Property(id_property),
                info.is_always_as_id(),
            )))
        }
        IdGeneratorKind::External {
            generator_type,
            prototype,
        } => {
            let Some(id_type) = generator_type.params().first() else {
                return Err(BindError::type_definition(
                    desc.ty(),
                    format!("invalid object id definition: generator `{generator_type}` declares no id type"),
                ));
            };
            let scope = info.scope().unwrap_or(desc.ty());
            let generator = prototype.for_scope(scope);

            Ok(Some(ObjectIdWriter::new(
                id_type.clone(),
                Some(info.property_name().clone()),
                IdGenerator::External(generator),
                info.is_always_as_id(),
            )))
        }
    }
}

//! Type and property metadata consumed by the resolver.
//!
//! ## Menu
//!
//! - [`TypeDescriptor`]: identity of a runtime type; [`TypeKey`] is its normalized lookup key.
//! - [`TypeShape`] / [`TypeCategory`]: declared structure and derived dispatch category.
//! - [`PropertyDef`]: a candidate property with its [`Accessor`] and [`PropertyFlags`].
//! - [`TypeDescription`]: everything known about a type, including [`ClassAnnotations`],
//!   [`ObjectIdInfo`] and an optional converter.
//! - [`View`] / [`ViewSet`]: serialization views.
//! - [`TypeTag`]: polymorphic type tag settings.
//! - [`FormatOverrides`]: per-use format settings, passed through to codec builders.

// -----------------------------------------------------------------------------
// Modules

mod description;
mod format;
mod name;
mod property;
mod type_desc;
mod type_tag;
mod view;

// -----------------------------------------------------------------------------
// Exports

pub use description::{AnyGetterDef, ClassAnnotations, IdGeneratorKind, ObjectIdInfo};
pub use description::{TypeDescription, Typing};
pub use format::{FormatOverrides, FormatShape};
pub use name::PropertyName;
pub use property::{Accessor, AccessorKind, PropertyDef, PropertyFlags};
pub use type_desc::{ContainerKind, TOP_TYPE_PATH, TypeCategory, TypeDescriptor, TypeKey, TypeShape};
pub use type_tag::{TagInclusion, TypeTag};
pub use view::{View, ViewSet};

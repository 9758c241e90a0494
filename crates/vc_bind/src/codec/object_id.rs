use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicI64, Ordering};

use crate::codec::PropertyWriter;
use crate::info::{PropertyName, TypeDescriptor};

// -----------------------------------------------------------------------------
// IdValue

/// A generated object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdValue {
    Int(i64),
    Text(Arc<str>),
}

// -----------------------------------------------------------------------------
// ExternalIdGenerator

/// Produces object ids that are not stored in the object itself.
///
/// Generators are used as prototypes: [`for_scope`] binds one to the scope
/// its ids must be unique in, and [`new_for_serialization`] creates the
/// instance that actually hands out ids during one write.
///
/// [`for_scope`]: ExternalIdGenerator::for_scope
/// [`new_for_serialization`]: ExternalIdGenerator::new_for_serialization
pub trait ExternalIdGenerator: Send + Sync + 'static {
    /// The scope ids are unique in, `None` for an unbound prototype.
    fn scope(&self) -> Option<&TypeDescriptor>;

    /// Returns a generator bound to `scope`. May return a clone of `self`
    /// if it is already bound to that scope.
    fn for_scope(&self, scope: &TypeDescriptor) -> Arc<dyn ExternalIdGenerator>;

    /// Returns a fresh generator for one serialization run.
    fn new_for_serialization(&self) -> Arc<dyn ExternalIdGenerator>;

    fn generate_id(&self) -> IdValue;
}

/// Hands out increasing integer ids, starting at 1.
pub struct IntSequenceGenerator {
    scope: Option<TypeDescriptor>,
    next: AtomicI64,
}

impl IntSequenceGenerator {
    #[inline]
    pub fn new() -> Self {
        Self::with_scope(None)
    }

    #[inline]
    fn with_scope(scope: Option<TypeDescriptor>) -> Self {
        Self {
            scope,
            next: AtomicI64::new(1),
        }
    }
}

impl Default for IntSequenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalIdGenerator for IntSequenceGenerator {
    fn scope(&self) -> Option<&TypeDescriptor> {
        self.scope.as_ref()
    }

    fn for_scope(&self, scope: &TypeDescriptor) -> Arc<dyn ExternalIdGenerator> {
        Arc::new(Self::with_scope(Some(scope.clone())))
    }

    fn new_for_serialization(&self) -> Arc<dyn ExternalIdGenerator> {
        Arc::new(Self::with_scope(self.scope.clone()))
    }

    fn generate_id(&self) -> IdValue {
        IdValue::Int(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for IntSequenceGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntSequenceGenerator")
            .field("scope", &self.scope)
            .field("next", &self.next.load(Ordering::Relaxed))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ObjectIdWriter

/// Source of the ids written by an [`ObjectIdWriter`].
#[derive(Clone)]
pub enum IdGenerator {
    /// The id is the value of this property of the object.
    Property(PropertyWriter),
    External(Arc<dyn ExternalIdGenerator>),
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(writer) => write!(f, "Property({})", writer.name()),
            Self::External(generator) => write!(f, "External(scope: {:?})", generator.scope()),
        }
    }
}

/// Identity preservation settings of a bean codec.
///
/// The first occurrence of an object is written in full together with its
/// id, later occurrences as the id only.
#[derive(Clone, Debug)]
pub struct ObjectIdWriter {
    id_type: TypeDescriptor,
    property_name: Option<PropertyName>,
    generator: IdGenerator,
    always_as_id: bool,
}

impl ObjectIdWriter {
    /// `property_name` is `None` for property-based ids, the id property
    /// already writes itself.
    pub fn new(
        id_type: TypeDescriptor,
        property_name: Option<PropertyName>,
        generator: IdGenerator,
        always_as_id: bool,
    ) -> Self {
        Self {
            id_type,
            property_name,
            generator,
            always_as_id,
        }
    }

    #[inline]
    pub fn id_type(&self) -> &TypeDescriptor {
        &self.id_type
    }

    /// Name of the extra id property, `None` if no extra property is written.
    #[inline]
    pub fn property_name(&self) -> Option<&PropertyName> {
        self.property_name.as_ref()
    }

    #[inline]
    pub fn generator(&self) -> &IdGenerator {
        &self.generator
    }

    #[inline]
    pub fn is_always_as_id(&self) -> bool {
        self.always_as_id
    }

    #[inline]
    pub fn is_property_based(&self) -> bool {
        matches!(self.generator, IdGenerator::Property(_))
    }
}

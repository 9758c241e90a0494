use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// TypeKey

/// Normalized lookup key of a type, derived from its raw path only.
///
/// Generic parameters are not part of the key: `Vec<u8>` and `Vec<String>`
/// share the key `alloc::vec::Vec`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(Arc<str>);

impl TypeKey {
    /// Creates a key from a raw type path.
    #[inline]
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    /// Returns the raw type path.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&TypeKey> for Arc<str> {
    #[inline]
    fn from(key: &TypeKey) -> Self {
        key.0.clone()
    }
}

// -----------------------------------------------------------------------------
// TypeShape

/// The kind of container a [`TypeShape::Container`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    List,
    Set,
    Array,
    Map,
}

/// Declared structure of a type, as reported by the introspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// The universal top type; nothing is known statically.
    Top,
    /// A well-known value type: numbers, strings, booleans, dates ...
    Scalar,
    /// A collection, array or map. Content types are the generic parameters.
    Container(ContainerKind),
    /// A wrapper around a single optional or shared value.
    Reference,
    Enum,
    /// A record of named properties.
    Composite,
    /// An interface-like type serialized through an add-on capability,
    /// such as iterables or text sequences.
    AddOn,
}

/// Dispatch category of a type, derived from its [`TypeShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Container,
    Reference,
    Primary,
    Bean,
    AddOn,
    Unknown,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.pad("Container"),
            Self::Reference => f.pad("Reference"),
            Self::Primary => f.pad("Primary"),
            Self::Bean => f.pad("Bean"),
            Self::AddOn => f.pad("AddOn"),
            Self::Unknown => f.pad("Unknown"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Path of the universal top type.
pub const TOP_TYPE_PATH: &str = "core::any::Any";

/// Immutable identity of a runtime type: raw path, shape and generic parameters.
///
/// Cloning is cheap, the path and the parameters are reference counted.
///
/// # Examples
///
/// ```
/// use vc_bind::info::{TypeDescriptor, TypeCategory};
///
/// let user = TypeDescriptor::composite("app::User");
/// let users = TypeDescriptor::list_of(user.clone());
///
/// assert_eq!(users.to_string(), "alloc::vec::Vec<app::User>");
/// assert_eq!(users.content_type(), Some(&user));
/// assert_eq!(users.category(), TypeCategory::Container);
/// assert_eq!(user.simple_name(), "User");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    key: TypeKey,
    shape: TypeShape,
    params: Arc<[TypeDescriptor]>,
}

impl TypeDescriptor {
    /// Creates a descriptor without generic parameters.
    pub fn new(path: impl Into<Arc<str>>, shape: TypeShape) -> Self {
        Self {
            key: TypeKey::new(path),
            shape,
            params: Arc::from(Vec::new()),
        }
    }

    /// The universal top type.
    #[inline]
    pub fn top() -> Self {
        Self::new(TOP_TYPE_PATH, TypeShape::Top)
    }

    #[inline]
    pub fn scalar(path: impl Into<Arc<str>>) -> Self {
        Self::new(path, TypeShape::Scalar)
    }

    #[inline]
    pub fn composite(path: impl Into<Arc<str>>) -> Self {
        Self::new(path, TypeShape::Composite)
    }

    #[inline]
    pub fn enumeration(path: impl Into<Arc<str>>) -> Self {
        Self::new(path, TypeShape::Enum)
    }

    #[inline]
    pub fn add_on(path: impl Into<Arc<str>>) -> Self {
        Self::new(path, TypeShape::AddOn)
    }

    /// `alloc::vec::Vec<elem>`.
    pub fn list_of(elem: TypeDescriptor) -> Self {
        Self::new("alloc::vec::Vec", TypeShape::Container(ContainerKind::List)).with_params([elem])
    }

    /// `std::collections::HashMap<key, value>`.
    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::new(
            "std::collections::HashMap",
            TypeShape::Container(ContainerKind::Map),
        )
        .with_params([key, value])
    }

    /// `core::option::Option<inner>`.
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::new("core::option::Option", TypeShape::Reference).with_params([inner])
    }

    /// Replaces the generic parameters.
    pub fn with_params(mut self, params: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    /// Returns the normalized lookup key.
    #[inline]
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Returns the raw path, without generic parameters.
    #[inline]
    pub fn path(&self) -> &str {
        self.key.as_str()
    }

    /// Returns the last path segment, e.g. `User` for `app::model::User`.
    pub fn simple_name(&self) -> &str {
        let path = self.path();
        match path.rfind("::") {
            Some(index) => &path[index + 2..],
            None => path,
        }
    }

    #[inline]
    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    #[inline]
    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    /// Returns `true` if both descriptors share the same raw type.
    #[inline]
    pub fn has_raw_type(&self, other: &TypeDescriptor) -> bool {
        self.key == other.key
    }

    #[inline]
    pub fn is_top(&self) -> bool {
        self.shape == TypeShape::Top
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.shape, TypeShape::Container(_))
    }

    #[inline]
    pub fn is_reference(&self) -> bool {
        self.shape == TypeShape::Reference
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        self.shape == TypeShape::Enum
    }

    /// Composite and add-on types may be serialized as beans.
    #[inline]
    pub fn is_potential_bean(&self) -> bool {
        matches!(self.shape, TypeShape::Composite | TypeShape::AddOn)
    }

    /// Returns the element type of a container or the referenced type of a
    /// reference. For maps this is the value type.
    pub fn content_type(&self) -> Option<&TypeDescriptor> {
        match self.shape {
            TypeShape::Container(ContainerKind::Map) => self.params.get(1),
            TypeShape::Container(_) | TypeShape::Reference => self.params.first(),
            _ => None,
        }
    }

    /// Derives the dispatch category.
    pub fn category(&self) -> TypeCategory {
        match self.shape {
            TypeShape::Top => TypeCategory::Unknown,
            TypeShape::Scalar => TypeCategory::Primary,
            TypeShape::Container(_) => TypeCategory::Container,
            TypeShape::Reference => TypeCategory::Reference,
            TypeShape::Enum | TypeShape::Composite => TypeCategory::Bean,
            TypeShape::AddOn => TypeCategory::AddOn,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())?;
        if let Some((first, rest)) = self.params.split_first() {
            write!(f, "<{first}")?;
            for param in rest {
                write!(f, ", {param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({self}: {:?})", self.shape)
    }
}

/// Renders the full descriptor, generic parameters included.
impl From<&TypeDescriptor> for Arc<str> {
    fn from(ty: &TypeDescriptor) -> Self {
        if ty.params.is_empty() {
            return ty.key.0.clone();
        }
        Arc::from(alloc::format!("{ty}"))
    }
}

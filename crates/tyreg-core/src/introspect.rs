//! Declared-type introspection.
//!
//! When a field annotation omits its type, the field processor asks a
//! [`TypeIntrospector`] what the field was statically declared as. The
//! capability is injected, so tests can swap in a fixed table.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::model::TypeTarget;

/// What an introspector reports for a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNameLike {
    /// A composite (named) type; its identifying name is used.
    Named(String),
    /// Anything else; its string form is used.
    Literal(String),
}

impl TypeNameLike {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// The type name handed to the schema generator.
    #[must_use]
    pub fn into_type_name(self) -> String {
        match self {
            Self::Named(name) | Self::Literal(name) => name,
        }
    }
}

impl fmt::Display for TypeNameLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) | Self::Literal(name) => f.write_str(name),
        }
    }
}

/// Reports the statically declared type of a field.
pub trait TypeIntrospector {
    fn declared_type(&self, target: &TypeTarget, field_key: &str) -> Option<TypeNameLike>;
}

impl<I: TypeIntrospector + ?Sized> TypeIntrospector for &I {
    fn declared_type(&self, target: &TypeTarget, field_key: &str) -> Option<TypeNameLike> {
        (**self).declared_type(target, field_key)
    }
}

impl<I: TypeIntrospector + ?Sized> TypeIntrospector for Box<I> {
    fn declared_type(&self, target: &TypeTarget, field_key: &str) -> Option<TypeNameLike> {
        (**self).declared_type(target, field_key)
    }
}

/// Introspector that never knows anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntrospection;

impl TypeIntrospector for NoIntrospection {
    fn declared_type(&self, _target: &TypeTarget, _field_key: &str) -> Option<TypeNameLike> {
        None
    }
}

/// Table of declared field types, keyed by owning type id and field key.
#[derive(Debug, Clone, Default)]
pub struct DeclaredTypes {
    fields: HashMap<(String, String), TypeNameLike>,
}

impl DeclaredTypes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `Owner::field_key` is declared as `Field`.
    ///
    /// The entry is keyed by the id [`TypeTarget::of`] gives `Owner`. Types
    /// registered under an explicit id need [`Self::with_named`].
    #[must_use]
    pub fn with<Owner: 'static, Field: DeclaredType + ?Sized>(self, field_key: &str) -> Self {
        let owner = TypeTarget::of::<Owner>();
        self.with_named::<Field>(owner.name(), field_key)
    }

    /// Record that field `field_key` of the type registered as `owner_id` is
    /// declared as `Field`.
    #[must_use]
    pub fn with_named<Field: DeclaredType + ?Sized>(
        mut self,
        owner_id: &str,
        field_key: &str,
    ) -> Self {
        self.insert(owner_id, field_key, Field::type_name_like());
        self
    }

    pub fn insert(&mut self, owner: &str, field_key: &str, declared: TypeNameLike) {
        self.fields
            .insert((owner.to_string(), field_key.to_string()), declared);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TypeIntrospector for DeclaredTypes {
    fn declared_type(&self, target: &TypeTarget, field_key: &str) -> Option<TypeNameLike> {
        self.fields
            .get(&(target.name().to_string(), field_key.to_string()))
            .cloned()
    }
}

/// Maps a Rust field type to the type name the schema generator understands.
pub trait DeclaredType {
    fn type_name_like() -> TypeNameLike;
}

macro_rules! declared_literal {
    ($name:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl DeclaredType for $ty {
                fn type_name_like() -> TypeNameLike {
                    TypeNameLike::Literal($name.to_string())
                }
            }
        )+
    };
}

declared_literal!("string" => String, str, char);
declared_literal!("boolean" => bool);
declared_literal!(
    "number" => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);

impl<T: DeclaredType + ?Sized> DeclaredType for &T {
    fn type_name_like() -> TypeNameLike {
        T::type_name_like()
    }
}

impl<T: DeclaredType> DeclaredType for Option<T> {
    fn type_name_like() -> TypeNameLike {
        T::type_name_like()
    }
}

impl<T: DeclaredType> DeclaredType for Vec<T> {
    fn type_name_like() -> TypeNameLike {
        TypeNameLike::Named(format!("Array<{}>", T::type_name_like()))
    }
}

impl<T: DeclaredType> DeclaredType for [T] {
    fn type_name_like() -> TypeNameLike {
        TypeNameLike::Named(format!("Array<{}>", T::type_name_like()))
    }
}

impl<T: DeclaredType, S> DeclaredType for HashMap<String, T, S> {
    fn type_name_like() -> TypeNameLike {
        TypeNameLike::Named(format!("Map<string, {}>", T::type_name_like()))
    }
}

impl<T: DeclaredType> DeclaredType for BTreeMap<String, T> {
    fn type_name_like() -> TypeNameLike {
        TypeNameLike::Named(format!("Map<string, {}>", T::type_name_like()))
    }
}

//! Registration-phase glue.
//!
//! A [`Loader`] owns the registry being built, the pending property stores,
//! and the injected generator and introspector. Field annotations must run
//! before their type's annotation; [`TypeDeclaration`] and
//! [`SchemaObject`] enforce that order.

use tyreg_core::{
    DeclaredType, NoIntrospection, PropertyDescriptor, RegistrationPolicy, TypeDescriptor,
    TypeIntrospector, TypeTarget,
};

use crate::error::SchemaError;
use crate::field::{FieldOverrides, FieldProcessor};
use crate::generator::{JsonSchemaGenerator, SchemaGenerator};
use crate::object::{TypeOptions, TypeProcessor};
use crate::pending::PendingStore;
use crate::registry::{FrozenRegistry, Registry};

pub struct Loader {
    registry: Registry,
    pending: PendingStore,
    generator: Box<dyn SchemaGenerator>,
    introspector: Box<dyn TypeIntrospector>,
    policy: RegistrationPolicy,
}

impl Loader {
    /// Loader with the default JSON-Schema generator, no introspection, and
    /// the permissive policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            pending: PendingStore::new(),
            generator: Box::new(JsonSchemaGenerator::new()),
            introspector: Box::new(NoIntrospection),
            policy: RegistrationPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_generator(mut self, generator: impl SchemaGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    #[must_use]
    pub fn with_introspector(mut self, introspector: impl TypeIntrospector + 'static) -> Self {
        self.introspector = Box::new(introspector);
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Field annotation entry point.
    ///
    /// # Errors
    ///
    /// See [`FieldProcessor::annotate`].
    pub fn annotate_field(
        &mut self,
        target: &TypeTarget,
        field_key: &str,
        name: Option<&str>,
        type_name: Option<&str>,
    ) -> Result<PropertyDescriptor, SchemaError> {
        FieldProcessor::new(&*self.generator, &*self.introspector, self.policy).annotate(
            &self.registry,
            &mut self.pending,
            target,
            field_key,
            FieldOverrides::new(name, type_name),
        )
    }

    /// Type annotation entry point.
    ///
    /// # Errors
    ///
    /// See [`TypeProcessor::annotate`].
    pub fn annotate_type(
        &mut self,
        target: &TypeTarget,
        options: TypeOptions,
    ) -> Result<TypeDescriptor, SchemaError> {
        TypeProcessor::new(self.policy).annotate(&self.pending, &mut self.registry, target, options)
    }

    /// Start declaring `target`'s fields.
    pub fn declare(&mut self, target: TypeTarget) -> TypeDeclaration<'_> {
        TypeDeclaration {
            loader: self,
            target,
            options: TypeOptions::default(),
        }
    }

    /// Declare a self-describing type: its fields, then the type itself.
    ///
    /// # Errors
    ///
    /// Propagates the first field or type annotation error.
    pub fn register<T: SchemaObject>(&mut self) -> Result<TypeDescriptor, SchemaError> {
        let mut declaration = self.declare(T::target());
        declaration.options = T::options();
        T::fields(&mut declaration)?;
        declaration.commit()
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// End the registration phase and hand the registry to consumers.
    #[must_use]
    pub fn finish(self) -> FrozenRegistry {
        tracing::debug!(types = self.registry.len(), "registration finished");
        self.registry.freeze()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Field-by-field declaration of one type, committed with [`commit`](Self::commit).
pub struct TypeDeclaration<'a> {
    loader: &'a mut Loader,
    target: TypeTarget,
    options: TypeOptions,
}

impl TypeDeclaration<'_> {
    #[must_use]
    pub const fn target(&self) -> &TypeTarget {
        &self.target
    }

    /// Field typed by the loader's introspector.
    ///
    /// # Errors
    ///
    /// See [`FieldProcessor::annotate`].
    pub fn field(&mut self, field_key: &str) -> Result<&mut Self, SchemaError> {
        self.loader
            .annotate_field(&self.target, field_key, None, None)?;
        Ok(self)
    }

    /// Field with an explicit schema property name and type name.
    ///
    /// # Errors
    ///
    /// See [`FieldProcessor::annotate`].
    pub fn field_as(
        &mut self,
        field_key: &str,
        name: &str,
        type_name: &str,
    ) -> Result<&mut Self, SchemaError> {
        self.loader
            .annotate_field(&self.target, field_key, Some(name), Some(type_name))?;
        Ok(self)
    }

    /// Field typed from its Rust type.
    ///
    /// # Errors
    ///
    /// See [`FieldProcessor::annotate`].
    pub fn field_of<F: DeclaredType + ?Sized>(
        &mut self,
        field_key: &str,
    ) -> Result<&mut Self, SchemaError> {
        let type_name = F::type_name_like().into_type_name();
        self.field_as(field_key, field_key, &type_name)
    }

    pub fn discriminator(&mut self, property: impl Into<String>) -> &mut Self {
        self.options.discriminator = Some(property.into());
        self
    }

    /// Finalize the type into the registry.
    ///
    /// # Errors
    ///
    /// See [`TypeProcessor::annotate`].
    pub fn commit(self) -> Result<TypeDescriptor, SchemaError> {
        self.loader.annotate_type(&self.target, self.options)
    }
}

/// A Rust type that declares its own schema.
pub trait SchemaObject: Sized + 'static {
    /// Registry target; defaults to the type's own name with no supertype.
    fn target() -> TypeTarget {
        TypeTarget::of::<Self>()
    }

    fn options() -> TypeOptions {
        TypeOptions::default()
    }

    /// Declare every schema field.
    ///
    /// # Errors
    ///
    /// Propagates field annotation errors.
    fn fields(declaration: &mut TypeDeclaration<'_>) -> Result<(), SchemaError>;
}

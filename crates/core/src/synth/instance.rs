//! Instances of synthesized types.

use std::sync::Arc;

use super::builder::{Accessor, BaseType, SynthesizedType};
use super::errors::{SynthError, SynthResult};
use super::spec::PropertySpec;
use super::value::Value;

/// An object of a synthesized type: one value slot per property.
#[derive(Debug, Clone)]
pub struct Instance {
    ty: Arc<SynthesizedType>,
    slots: Vec<Value>,
}

impl Instance {
    /// Allocate an instance with every slot at its type's default value.
    pub fn new(ty: Arc<SynthesizedType>) -> Self {
        let slots = ty
            .properties()
            .iter()
            .map(|p| p.value_type().default_value())
            .collect();
        Self { ty, slots }
    }

    /// The synthesized type of this instance.
    pub fn type_info(&self) -> &Arc<SynthesizedType> {
        &self.ty
    }

    pub fn base(&self) -> &BaseType {
        self.ty.base()
    }

    /// Whether this instance's type extends `base`.
    pub fn is_instance_of(&self, base: &BaseType) -> bool {
        self.ty.base() == base
    }

    /// Whether `other` has exactly the same synthesized type.
    pub fn same_type(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.ty, &other.ty)
    }

    /// Read a property.
    pub fn get(&self, property: &str) -> SynthResult<&Value> {
        let accessor = self.resolve(property)?;
        Ok(&self.slots[accessor.slot()])
    }

    /// Write a property, checking the value against its declared type.
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> SynthResult<()> {
        let value = value.into();
        let ty = Arc::clone(&self.ty);
        let accessor = ty.accessor(property).ok_or_else(|| SynthError::UnknownProperty {
            type_name: ty.name().to_string(),
            property: property.to_string(),
        })?;

        if !accessor.value_type().accepts(&value) {
            return Err(SynthError::ValueTypeMismatch {
                property: property.to_string(),
                expected: accessor.value_type().to_string(),
                actual: value.type_name().to_string(),
            });
        }

        self.write(accessor, value);
        Ok(())
    }

    /// Call a generated zero-argument method such as `choicesPaymentMethod`.
    pub fn invoke(&self, method: &str) -> SynthResult<Vec<String>> {
        self.ty
            .method(method)
            .map(|m| m.invoke())
            .ok_or_else(|| SynthError::UnknownMethod {
                type_name: self.ty.name().to_string(),
                method: method.to_string(),
            })
    }

    /// Property names and current values, in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .properties()
            .iter()
            .map(|p| (p.name(), &self.slots[p.slot()]))
    }

    fn resolve(&self, property: &str) -> SynthResult<Accessor<'_>> {
        self.ty.accessor(property).ok_or_else(|| SynthError::UnknownProperty {
            type_name: self.ty.name().to_string(),
            property: property.to_string(),
        })
    }

    fn write(&mut self, accessor: Accessor<'_>, value: Value) {
        self.slots[accessor.slot()] = value;
    }
}

impl SynthesizedType {
    /// Allocate a default-initialized instance of this type.
    pub fn new_instance(self: &Arc<Self>) -> Instance {
        Instance::new(Arc::clone(self))
    }
}

/// Allocate an instance of `ty` and apply the specs' initial values in order.
///
/// `ty` must be fully built. A spec whose accessor cannot be found fails
/// immediately with [`SynthError::AccessorResolution`].
pub fn instantiate(ty: &Arc<SynthesizedType>, specs: &[PropertySpec]) -> SynthResult<Instance> {
    let mut instance = Instance::new(Arc::clone(ty));

    for spec in specs {
        let Some(value) = &spec.initial_value else {
            continue;
        };

        let accessor = ty.accessor(&spec.name).ok_or_else(|| SynthError::AccessorResolution {
            type_name: ty.name().to_string(),
            property: spec.name.clone(),
        })?;

        if !accessor.value_type().accepts(value) {
            return Err(SynthError::InitialValueTypeMismatch {
                property: spec.name.clone(),
                expected: accessor.value_type().to_string(),
                actual: value.type_name().to_string(),
            });
        }

        instance.write(accessor, value.clone());
    }

    Ok(instance)
}

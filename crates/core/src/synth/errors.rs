//! Error types for type synthesis and instance access.

use thiserror::Error;

/// Errors that can occur while synthesizing a type or using its instances.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// A property spec is malformed.
    #[error("invalid spec for property '{property}': {message}")]
    InvalidSpec { property: String, message: String },

    /// The type name is already bound to a type with a different base.
    #[error("type '{name}' already exists with base '{existing}', requested base '{requested}'")]
    TypeNameCollision {
        name: String,
        existing: String,
        requested: String,
    },

    /// An accessor is missing on a type that finished building.
    #[error("accessor '{property}' could not be resolved on built type '{type_name}'")]
    AccessorResolution { type_name: String, property: String },

    /// An initial value is not assignable to the declared property type.
    #[error("initial value for '{property}' must be {expected}, got {actual}")]
    InitialValueTypeMismatch {
        property: String,
        expected: String,
        actual: String,
    },

    /// A value written through an accessor has the wrong type.
    #[error("invalid type for property '{property}': expected {expected}, got {actual}")]
    ValueTypeMismatch {
        property: String,
        expected: String,
        actual: String,
    },

    /// The caller asked for a property the type does not have.
    #[error("type '{type_name}' has no property '{property}'")]
    UnknownProperty { type_name: String, property: String },

    /// The caller asked for a method the type does not have.
    #[error("type '{type_name}' has no method '{method}'")]
    UnknownMethod { type_name: String, method: String },
}

impl SynthError {
    pub(crate) fn invalid_spec(property: &str, message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            property: property.to_string(),
            message: message.into(),
        }
    }
}

pub type SynthResult<T> = Result<T, SynthError>;

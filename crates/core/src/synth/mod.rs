//! Runtime synthesis of view-model types.
//!
//! This module builds new object types on demand from a list of
//! [`PropertySpec`]s. Each generated property gets:
//! - A storage slot of its declared [`ValueType`]
//! - A get/set accessor pair named exactly like the spec
//! - A [`PropertyMetadata`] record for the hosting framework to introspect
//! - For text properties with choices, a `choices<Name>` query method
//!
//! Types are cached by name in a [`TypeRegistry`]; the first request for a
//! name builds the type and every later request reuses it.
//!
//! # Example
//!
//! ```
//! use dynview_core::synth::{BaseType, PropertySpec, TypeRegistry, ValueType};
//!
//! let registry = TypeRegistry::new();
//! let specs = vec![
//!     PropertySpec::text("FirstName").with_initial_value("Joe"),
//!     PropertySpec::text("PaymentMethod").with_choices(["Visa", "Mastercard"]),
//!     PropertySpec::new("Age", ValueType::Integer).mandatory(),
//! ];
//!
//! let dvm = registry
//!     .create(&BaseType::default(), "MyCompany", "MyCompany.Customer", &specs)
//!     .unwrap();
//!
//! assert_eq!(dvm.get("FirstName").unwrap().as_text(), Some("Joe"));
//! assert_eq!(dvm.invoke("choicesPaymentMethod").unwrap()[0], "Visa");
//! ```

pub mod builder;
pub mod errors;
pub mod instance;
pub mod metadata;
pub mod registry;
pub mod spec;
pub mod value;

pub use builder::{
    Accessor, BaseType, ChoicesFn, GeneratedMethod, PropertyInfo, SynthesizedType, TypeBuilder,
    build, derive_metadata,
};
pub use errors::{SynthError, SynthResult};
pub use instance::{Instance, instantiate};
pub use metadata::{Annotation, MetadataKey, MultiLine, PropertyMetadata};
pub use registry::{Namespace, TypeRegistry};
pub use spec::{PropertySpec, choices_method_name, validate_specs};
pub use value::{Value, ValueType};

use crate::config::types::ResolvedConfig;

/// Create an instance of `type_name` using the process-wide registry.
///
/// Builds and caches the type on first request. See [`TypeRegistry::create`].
pub fn create(
    base: &BaseType,
    namespace: &str,
    type_name: &str,
    specs: &[PropertySpec],
) -> SynthResult<Instance> {
    TypeRegistry::global().create(base, namespace, type_name, specs)
}

/// Like [`create`], taking the namespace from a resolved configuration.
pub fn create_with_config(
    config: &ResolvedConfig,
    base: &BaseType,
    type_name: &str,
    specs: &[PropertySpec],
) -> SynthResult<Instance> {
    create(base, &config.namespace, type_name, specs)
}

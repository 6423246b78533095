#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! Runtime synthesis of annotated view-model types.
//!
//! Give [`create`] a base type, a namespace, a type name and a list of
//! [`PropertySpec`]s; get back an [`Instance`] of a type built on demand,
//! whose properties carry metadata for a hosting framework to introspect.

pub mod config;
pub mod logging;
pub mod synth;

pub use synth::{
    Annotation, BaseType, Instance, MetadataKey, MultiLine, PropertyInfo, PropertyMetadata,
    PropertySpec, SynthError, SynthResult, SynthesizedType, TypeRegistry, Value, ValueType,
    create, create_with_config,
};

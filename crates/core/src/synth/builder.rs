//! Type builder: turns a base type and a spec list into a synthesized type.
//!
//! A synthesized type is a schema-driven record. Every spec becomes a
//! [`PropertyInfo`] owning one storage slot, an accessor pair named after
//! the spec, and a metadata record derived by [`derive_metadata`]. Text specs
//! with choices also produce a zero-argument [`GeneratedMethod`] named
//! `choices<Name>`.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::errors::{SynthError, SynthResult};
use super::metadata::{Annotation, MultiLine, PropertyMetadata};
use super::spec::{PropertySpec, choices_method_name, validate_specs};
use super::value::ValueType;

/// The base capability a synthesized type extends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BaseType {
    name: String,
    not_persisted: bool,
}

impl BaseType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), not_persisted: false }
    }

    /// The stock base for dynamic view models: never persisted by the host.
    pub fn dynamic_view_model() -> Self {
        Self::new("DynamicViewModel").not_persisted()
    }

    /// Mark instances of derived types as transient.
    pub fn not_persisted(mut self) -> Self {
        self.not_persisted = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_not_persisted(&self) -> bool {
        self.not_persisted
    }
}

impl Default for BaseType {
    fn default() -> Self {
        Self::dynamic_view_model()
    }
}

impl std::fmt::Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Resolved get/set pair for one property.
#[derive(Debug, Clone, Copy)]
pub struct Accessor<'t> {
    property: &'t PropertyInfo,
}

impl<'t> Accessor<'t> {
    pub fn name(&self) -> &'t str {
        &self.property.name
    }

    pub fn value_type(&self) -> ValueType {
        self.property.value_type
    }

    /// Index of the backing slot in an instance.
    pub fn slot(&self) -> usize {
        self.property.slot
    }
}

/// One synthesized property.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyInfo {
    name: String,
    value_type: ValueType,
    slot: usize,
    metadata: PropertyMetadata,
}

impl PropertyInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }
}

/// Body of a generated choices method.
pub type ChoicesFn = Arc<dyn Fn() -> Vec<String> + Send + Sync>;

/// A zero-argument query method generated for a property with choices.
#[derive(Clone)]
pub struct GeneratedMethod {
    name: String,
    property: String,
    body: ChoicesFn,
}

impl GeneratedMethod {
    /// Method returning `choices` verbatim on every call.
    fn choices(property: &str, choices: Vec<String>) -> Self {
        Self {
            name: choices_method_name(property),
            property: property.to_string(),
            body: Arc::new(move || choices.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property this method serves.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn invoke(&self) -> Vec<String> {
        (self.body)()
    }
}

impl std::fmt::Debug for GeneratedMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedMethod")
            .field("name", &self.name)
            .field("property", &self.property)
            .finish_non_exhaustive()
    }
}

/// A type built at runtime, identified by namespace and name.
///
/// Immutable once built; shared as `Arc<SynthesizedType>` by the registry
/// and by every instance.
#[derive(Debug)]
pub struct SynthesizedType {
    namespace: String,
    name: String,
    base: BaseType,
    properties: Vec<PropertyInfo>,
    property_index: FxHashMap<String, usize>,
    methods: Vec<GeneratedMethod>,
}

impl SynthesizedType {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `namespace::name`.
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }

    pub fn base(&self) -> &BaseType {
        &self.base
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Properties sorted by member order; ties keep declaration order.
    pub fn properties_in_order(&self) -> Vec<&PropertyInfo> {
        let mut props: Vec<&PropertyInfo> = self.properties.iter().collect();
        props.sort_by(|a, b| {
            let a = a.metadata.order().unwrap_or_default();
            let b = b.metadata.order().unwrap_or_default();
            a.total_cmp(&b)
        });
        props
    }

    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.property_index.get(name).map(|&i| &self.properties[i])
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property_index.contains_key(name)
    }

    pub fn accessor(&self, name: &str) -> Option<Accessor<'_>> {
        self.property(name).map(|property| Accessor { property })
    }

    pub fn methods(&self) -> &[GeneratedMethod] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&GeneratedMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Number of storage slots an instance needs.
    pub fn slot_count(&self) -> usize {
        self.properties.len()
    }
}

/// Derive the metadata record for one spec.
///
/// Pure and deterministic: the same spec always yields the same record.
pub fn derive_metadata(spec: &PropertySpec) -> PropertyMetadata {
    let mut metadata = PropertyMetadata::new();

    // Always present, even when empty
    metadata.attach(Annotation::DisplayName(
        spec.display_name.clone().unwrap_or_default(),
    ));
    metadata.attach(Annotation::MemberOrder(spec.order));

    if let Some(description) = &spec.description {
        metadata.attach(Annotation::DescribedAs(description.clone()));
    }

    if !spec.mandatory {
        metadata.attach(Annotation::Optionally);
    }

    if spec.value_type.is_text() {
        if let Some(len) = spec.typical_length {
            metadata.attach(Annotation::TypicalLength(len));
        }
        if let Some(len) = spec.max_length {
            metadata.attach(Annotation::MaxLength(len));
        }
        if let Some(multi_line) =
            MultiLine::from_parts(spec.multi_line_lines, spec.multi_line_width)
        {
            metadata.attach(Annotation::MultiLine(multi_line));
        }
    }

    metadata
}

/// Incremental builder for one synthesized type.
///
/// Nothing built here is visible to other callers until the finished type
/// is published by the registry.
#[derive(Debug)]
pub struct TypeBuilder {
    namespace: String,
    name: String,
    base: BaseType,
    properties: Vec<PropertyInfo>,
    property_index: FxHashMap<String, usize>,
    methods: Vec<GeneratedMethod>,
}

impl TypeBuilder {
    /// Declare a new type extending `base`.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, base: BaseType) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            base,
            properties: Vec::new(),
            property_index: FxHashMap::default(),
            methods: Vec::new(),
        }
    }

    /// Append the slot, accessor pair, metadata and choices method for `spec`.
    pub fn append_property(&mut self, spec: &PropertySpec) -> SynthResult<()> {
        spec.validate()?;
        if self.property_index.contains_key(&spec.name) {
            return Err(SynthError::invalid_spec(&spec.name, "duplicate property name"));
        }

        let slot = self.properties.len();
        self.properties.push(PropertyInfo {
            name: spec.name.clone(),
            value_type: spec.value_type,
            slot,
            metadata: derive_metadata(spec),
        });
        self.property_index.insert(spec.name.clone(), slot);

        if spec.value_type.is_text()
            && let Some(choices) = &spec.choices
        {
            self.methods.push(GeneratedMethod::choices(&spec.name, choices.clone()));
        }

        Ok(())
    }

    /// Finalize the type.
    ///
    /// Checks that every spec resolves to an accessor before the type can be
    /// handed to the registry.
    pub fn finish(self, specs: &[PropertySpec]) -> SynthResult<SynthesizedType> {
        for spec in specs {
            let resolved = self
                .property_index
                .get(&spec.name)
                .is_some_and(|&i| self.properties[i].name == spec.name);
            if !resolved {
                return Err(SynthError::AccessorResolution {
                    type_name: self.name.clone(),
                    property: spec.name.clone(),
                });
            }
        }

        Ok(SynthesizedType {
            namespace: self.namespace,
            name: self.name,
            base: self.base,
            properties: self.properties,
            property_index: self.property_index,
            methods: self.methods,
        })
    }
}

/// Build a complete type from `specs`, in input order.
pub fn build(
    namespace: &str,
    base: &BaseType,
    type_name: &str,
    specs: &[PropertySpec],
) -> SynthResult<SynthesizedType> {
    validate_specs(specs)?;

    let mut builder = TypeBuilder::new(namespace, type_name, base.clone());
    for spec in specs {
        builder.append_property(spec)?;
    }
    let ty = builder.finish(specs)?;

    tracing::debug!(
        type_name = %ty.full_name(),
        properties = ty.properties.len(),
        methods = ty.methods.len(),
        "synthesized type"
    );

    Ok(ty)
}

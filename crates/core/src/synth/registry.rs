//! Registry of synthesized types.

use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::builder::{self, BaseType, SynthesizedType};
use super::errors::{SynthError, SynthResult};
use super::instance::{Instance, instantiate};
use super::spec::{PropertySpec, validate_specs};

static GLOBAL: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::new);

/// The namespace synthesized types are declared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    name: String,
}

impl Namespace {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Cache of synthesized types keyed by type name.
///
/// The registry guarantees at most one build per name. A type is published
/// only once it is complete, so readers see either nothing or the finished
/// type. Entries are never removed.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    namespace: OnceCell<Namespace>,
    types: RwLock<FxHashMap<String, Arc<SynthesizedType>>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL
    }

    /// Get the namespace, creating it on first use.
    ///
    /// The first name wins; later calls with another name get the existing
    /// namespace.
    pub fn ensure_namespace(&self, name: &str) -> &Namespace {
        let namespace = self.namespace.get_or_init(|| {
            tracing::debug!(namespace = name, "created synthesis namespace");
            Namespace { name: name.to_string() }
        });
        if namespace.name != name {
            tracing::warn!(
                requested = name,
                existing = %namespace.name,
                "synthesis namespace already exists; keeping the existing one"
            );
        }
        namespace
    }

    /// The namespace, if one has been created.
    pub fn namespace(&self) -> Option<&Namespace> {
        self.namespace.get()
    }

    /// Look up a published type by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<SynthesizedType>> {
        self.types.read().get(name).cloned()
    }

    /// Publish a finished type.
    ///
    /// If the name is already taken the existing type is returned and the
    /// new one discarded.
    pub fn register(&self, ty: SynthesizedType) -> Arc<SynthesizedType> {
        let mut types = self.types.write();
        if let Some(existing) = types.get(ty.name()) {
            tracing::error!(
                type_name = ty.name(),
                "type already published; keeping the first registration"
            );
            return Arc::clone(existing);
        }
        let ty = Arc::new(ty);
        types.insert(ty.name().to_string(), Arc::clone(&ty));
        tracing::debug!(type_name = %ty.full_name(), "published type");
        ty
    }

    /// Return the type registered under `name`, building and publishing it
    /// with `build` if absent.
    ///
    /// `build` runs under the write lock, so concurrent callers for the same
    /// name wait and then observe the single finished type.
    pub fn get_or_build<F>(
        &self,
        name: &str,
        base: &BaseType,
        build: F,
    ) -> SynthResult<Arc<SynthesizedType>>
    where
        F: FnOnce() -> SynthResult<SynthesizedType>,
    {
        if let Some(existing) = self.lookup(name) {
            tracing::trace!(type_name = name, "type cache hit");
            return check_base(existing, base);
        }

        let mut types = self.types.write();
        if let Some(existing) = types.get(name) {
            return check_base(Arc::clone(existing), base);
        }

        let ty = Arc::new(build()?);
        debug_assert_eq!(ty.name(), name);
        types.insert(name.to_string(), Arc::clone(&ty));
        tracing::debug!(type_name = %ty.full_name(), "published type");
        Ok(ty)
    }

    /// Obtain the type `type_name` (building it on first request) and return
    /// a fresh instance with the specs' initial values applied.
    ///
    /// Specs are validated before the registry is touched. When the type is
    /// already cached, the specs only supply initial values; they are not
    /// compared against the cached type.
    pub fn create(
        &self,
        base: &BaseType,
        namespace: &str,
        type_name: &str,
        specs: &[PropertySpec],
    ) -> SynthResult<Instance> {
        validate_specs(specs)?;

        let namespace = self.ensure_namespace(namespace);
        let ty = self.get_or_build(type_name, base, || {
            builder::build(namespace.name(), base, type_name, specs)
        })?;

        instantiate(&ty, specs)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// Names of all published types, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }
}

fn check_base(
    existing: Arc<SynthesizedType>,
    requested: &BaseType,
) -> SynthResult<Arc<SynthesizedType>> {
    if existing.base() != requested {
        return Err(SynthError::TypeNameCollision {
            name: existing.name().to_string(),
            existing: existing.base().to_string(),
            requested: requested.to_string(),
        });
    }
    Ok(existing)
}

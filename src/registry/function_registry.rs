//! Ordered collection of namespaces used to resolve function calls

use super::error::{RegistryError, RegistryResult};
use super::function::{Function, FunctionError, FunctionResolver, FunctionResult};
use super::functions::builtin_namespace;
use super::namespace::Namespace;
use crate::model::Value;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Registry of function namespaces
///
/// Namespaces are searched in registration order and the first one holding a
/// function with a matching name, arity and argument types wins. The registry
/// is shared between threads; lookups take a read lock that is released
/// before the function body runs.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    namespaces: RwLock<IndexMap<String, Arc<Namespace>>>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace after all existing ones
    pub fn register_namespace(&self, namespace: Namespace) -> RegistryResult<()> {
        validate_namespace_name(namespace.name())?;

        let mut namespaces = self.namespaces.write();
        if namespaces.contains_key(namespace.name()) {
            return Err(RegistryError::AlreadyRegistered {
                namespace: namespace.name().to_string(),
            });
        }
        log::debug!(
            "registered namespace '{}' with {} function(s)",
            namespace.name(),
            namespace.len()
        );
        namespaces.insert(namespace.name().to_string(), Arc::new(namespace));
        Ok(())
    }

    /// Register a built-in library by name
    ///
    /// Returns `false` without error if the library is already present.
    pub fn register_library(&self, name: &str) -> RegistryResult<bool> {
        if self.has_namespace(name) {
            return Ok(false);
        }
        let namespace = builtin_namespace(name).ok_or_else(|| RegistryError::UnknownLibrary {
            name: name.to_string(),
        })?;
        match self.register_namespace(namespace) {
            Ok(()) => Ok(true),
            // Lost a race with another registration of the same library
            Err(RegistryError::AlreadyRegistered { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Remove a namespace, returning it if it was registered
    pub fn remove_namespace(&self, name: &str) -> Option<Arc<Namespace>> {
        let removed = self.namespaces.write().shift_remove(name);
        if removed.is_some() {
            log::debug!("removed namespace '{name}'");
        }
        removed
    }

    /// Check if a namespace is registered
    pub fn has_namespace(&self, name: &str) -> bool {
        self.namespaces.read().contains_key(name)
    }

    /// Get a registered namespace
    pub fn namespace(&self, name: &str) -> Option<Arc<Namespace>> {
        self.namespaces.read().get(name).cloned()
    }

    /// Namespace names in search order
    pub fn namespace_names(&self) -> Vec<String> {
        self.namespaces.read().keys().cloned().collect()
    }

    /// Find the first function accepting `args`
    ///
    /// When some namespace has the right name and arity but no namespace
    /// accepts the argument types, the first type mismatch is reported.
    pub fn find(&self, name: &str, args: &[Value]) -> FunctionResult<Arc<dyn Function>> {
        let namespaces = self.namespaces.read();
        let mut mismatch = None;

        for namespace in namespaces.values() {
            let Some(function) = namespace.get(name, args.len()) else {
                continue;
            };
            match function.validate_args(args) {
                Ok(()) => return Ok(function),
                Err(err) => {
                    mismatch.get_or_insert(err);
                }
            }
        }

        Err(mismatch.unwrap_or_else(|| FunctionError::NotFound {
            name: name.to_string(),
            arity: args.len(),
        }))
    }
}

impl FunctionResolver for FunctionRegistry {
    fn resolve(&self, name: &str, args: &[Value]) -> FunctionResult<Value> {
        let function = self.find(name, args)?;
        log::trace!("calling {}", function.signature());
        function.evaluate(args)
    }
}

fn validate_namespace_name(name: &str) -> RegistryResult<()> {
    let invalid = |reason: &str| RegistryError::InvalidNamespace {
        namespace: name.to_string(),
        reason: reason.to_string(),
    };

    let Some(first) = name.chars().next() else {
        return Err(invalid("namespace cannot be empty"));
    };
    if !first.is_ascii_alphabetic() {
        return Err(invalid("namespace must start with a letter"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(invalid(
            "namespace may only contain letters, digits, '_' and '.'",
        ));
    }
    Ok(())
}

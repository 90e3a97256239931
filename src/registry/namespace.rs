//! Named groups of functions

use super::error::{RegistryError, RegistryResult};
use super::function::Function;
use crate::model::Value;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// A named collection of functions, keyed by name and arity
///
/// The same name may be registered once per arity, so `substring(s, 1)` and
/// `substring(s, 1, 2)` can live side by side.
#[derive(Clone, Default)]
pub struct Namespace {
    name: String,
    functions: FxHashMap<String, FxHashMap<usize, Arc<dyn Function>>>,
}

impl Namespace {
    /// Create an empty namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: FxHashMap::default(),
        }
    }

    /// Namespace name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a function, rejecting a second overload with the same arity
    pub fn register(&mut self, function: impl Function + 'static) -> RegistryResult<()> {
        let name = function.name().to_string();
        let arity = function.signature().arity();
        let overloads = self.functions.entry(name.clone()).or_default();
        if overloads.contains_key(&arity) {
            return Err(RegistryError::FunctionConflict {
                namespace: self.name.clone(),
                function: format!("{name}/{arity}"),
            });
        }
        overloads.insert(arity, Arc::new(function));
        Ok(())
    }

    /// Builder form of [`Namespace::register`]
    pub fn with(mut self, function: impl Function + 'static) -> RegistryResult<Self> {
        self.register(function)?;
        Ok(self)
    }

    /// Get the overload of `name` taking `arity` arguments
    pub fn get(&self, name: &str, arity: usize) -> Option<Arc<dyn Function>> {
        self.functions.get(name)?.get(&arity).cloned()
    }

    /// Find an overload whose arity and parameter types accept `args`
    pub fn find_match(&self, name: &str, args: &[Value]) -> Option<Arc<dyn Function>> {
        self.get(name, args.len())
            .filter(|function| function.signature().matches(args))
    }

    /// Check if any overload of `name` exists
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Sorted function names
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All functions, sorted by name then arity
    pub fn functions(&self) -> Vec<&dyn Function> {
        let mut functions: Vec<&dyn Function> = self
            .functions
            .values()
            .flat_map(|overloads| overloads.values().map(|f| f.as_ref()))
            .collect();
        functions.sort_by(|a, b| {
            let (a, b) = (a.signature(), b.signature());
            a.name.cmp(&b.name).then(a.arity().cmp(&b.arity()))
        });
        functions
    }

    /// Number of registered overloads
    pub fn len(&self) -> usize {
        self.functions.values().map(FxHashMap::len).sum()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("functions", &self.function_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::function::NativeFunction;

    #[test]
    fn test_overloads_by_arity() {
        let ns = Namespace::new("demo")
            .with(NativeFunction::unary("f", |x| x + 1.0))
            .unwrap()
            .with(NativeFunction::binary("f", |x, y| x + y))
            .unwrap();

        assert_eq!(ns.len(), 2);
        assert_eq!(ns.function_names(), vec!["f"]);
        assert!(ns.get("f", 1).is_some());
        assert!(ns.get("f", 2).is_some());
        assert!(ns.get("f", 3).is_none());
        assert!(ns.find_match("f", &[Value::from("x")]).is_none());
    }

    #[test]
    fn test_conflicting_registration() {
        let mut ns = Namespace::new("demo");
        ns.register(NativeFunction::unary("f", f64::abs)).unwrap();
        assert_eq!(
            ns.register(NativeFunction::unary("f", f64::sqrt)),
            Err(RegistryError::FunctionConflict {
                namespace: "demo".to_string(),
                function: "f/1".to_string(),
            })
        );
    }
}

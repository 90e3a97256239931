//! Function registry
//!
//! Functions are grouped into [`Namespace`]s, and a [`FunctionRegistry`]
//! searches its namespaces in registration order whenever the evaluator meets
//! a function call.

#![warn(missing_docs)]

pub mod error;
pub mod function;
pub mod function_registry;
pub mod functions;
pub mod namespace;
pub mod signature;

pub use error::{RegistryError, RegistryResult};
pub use function::{Function, FunctionError, FunctionResolver, FunctionResult, NativeFunction};
pub use function_registry::FunctionRegistry;
pub use functions::{BUILTIN_LIBRARIES, builtin_namespace};
pub use namespace::Namespace;
pub use signature::{FunctionSignature, ValueType};

/// Create a registry with the `math` library registered
pub fn create_standard_registry() -> RegistryResult<FunctionRegistry> {
    let registry = FunctionRegistry::new();
    registry.register_library(functions::math::NAME)?;
    Ok(registry)
}

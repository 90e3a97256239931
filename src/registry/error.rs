//! Error types for the function registry

use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised while registering or removing namespaces
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Namespace already registered
    #[error("Namespace '{namespace}' is already registered")]
    AlreadyRegistered {
        /// The namespace that is already registered
        namespace: String,
    },

    /// No built-in library has this name
    #[error("Unknown library '{name}'")]
    UnknownLibrary {
        /// The requested library name
        name: String,
    },

    /// Invalid namespace name
    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace {
        /// The invalid namespace
        namespace: String,
        /// Reason why the namespace is invalid
        reason: String,
    },

    /// Two functions with the same name and arity in one namespace
    #[error("Function '{function}' conflicts with existing function in namespace '{namespace}'")]
    FunctionConflict {
        /// The namespace where the conflict occurred
        namespace: String,
        /// The conflicting function, as `name/arity`
        function: String,
    },
}

//! Data model for expression evaluation
//!
//! Holds the dynamically typed [`Value`] that flows through the evaluation
//! stack and into function calls.

#![warn(missing_docs)]

pub mod value;

pub use value::Value;

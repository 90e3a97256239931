//! Built-in function libraries

pub mod math;
pub mod text;

use super::namespace::Namespace;

/// Names of the libraries that can be registered by name
pub const BUILTIN_LIBRARIES: &[&str] = &[math::NAME, text::NAME];

/// Build a built-in library namespace
pub fn builtin_namespace(name: &str) -> Option<Namespace> {
    let namespace = match name {
        math::NAME => math::namespace(),
        text::NAME => text::namespace(),
        _ => return None,
    };
    match namespace {
        Ok(namespace) => Some(namespace),
        Err(err) => {
            log::error!("failed to build library '{name}': {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_library_builds() {
        for name in BUILTIN_LIBRARIES {
            let namespace = builtin_namespace(name).unwrap();
            assert_eq!(namespace.name(), *name);
            assert!(!namespace.is_empty());
        }
        assert!(builtin_namespace("java.lang.Math").is_none());
    }
}

//! Registry of data source factories.

use super::SourceStream;
use super::builtin;
use crate::error::BoxError;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Creates a byte stream from the scalar value of a source node.
pub type SourceFactory =
    Arc<dyn Fn(&str) -> std::result::Result<Box<dyn SourceStream>, BoxError> + Send + Sync>;

/// Maps source tags to stream factories.
///
/// Cheap to clone: clones share the same table. The process-wide default
/// comes pre-loaded with the built-in `file`, `env`, `string`, and `bytes`
/// sources.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Arc<RwLock<HashMap<String, SourceFactory>>>,
}

static GLOBAL: OnceLock<SourceRegistry> = OnceLock::new();

impl SourceRegistry {
    /// Create a new registry with no sources at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the built-in source types.
    pub fn with_builtins() -> Self {
        let reg = Self::new();
        {
            let mut sources = reg.sources.write().expect("source registry lock poisoned");
            sources.insert("file".to_owned(), Arc::new(builtin::file_source));
            sources.insert("env".to_owned(), Arc::new(builtin::env_source));
            sources.insert("string".to_owned(), Arc::new(builtin::string_source));
            sources.insert("bytes".to_owned(), Arc::new(builtin::bytes_source));
        }
        reg
    }

    /// The process-wide default registry, created exactly once on first use
    /// with the built-in sources pre-loaded.
    pub fn global() -> &'static SourceRegistry {
        GLOBAL.get_or_init(SourceRegistry::with_builtins)
    }

    /// Look up the factory registered for `tag`.
    pub fn lookup(&self, tag: &str) -> Option<SourceFactory> {
        let sources = self.sources.read().expect("source registry lock poisoned");
        sources.get(tag).cloned()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry").finish_non_exhaustive()
    }
}

/// Register a source factory under `tag`.
///
/// Pass `None` to register on the process-wide default registry.
///
/// # Panics
///
/// Panics if `tag` is already registered.
pub fn register_source<F>(registry: Option<&SourceRegistry>, tag: &str, factory: F)
where
    F: Fn(&str) -> std::result::Result<Box<dyn SourceStream>, BoxError> + Send + Sync + 'static,
{
    let reg = match registry {
        Some(reg) => reg,
        None => SourceRegistry::global(),
    };
    let mut sources = reg.sources.write().expect("source registry lock poisoned");
    if sources.contains_key(tag) {
        panic!("data source type {tag:?} already registered");
    }
    sources.insert(tag.to_owned(), Arc::new(factory));
    tracing::debug!(tag, "registered data source type");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_present() {
        let reg = SourceRegistry::with_builtins();
        for tag in ["file", "env", "string", "bytes"] {
            assert!(reg.lookup(tag).is_some(), "missing builtin {tag}");
        }
    }

    #[test]
    fn test_empty_registry_has_no_builtins() {
        let reg = SourceRegistry::new();
        assert!(reg.lookup("string").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_source_panics() {
        let reg = SourceRegistry::with_builtins();
        register_source(Some(&reg), "string", builtin::string_source);
    }
}

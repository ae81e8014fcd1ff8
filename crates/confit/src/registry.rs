//! Capability registry: (capability, type tag) → factory tables.
//!
//! Registration misuse panics: a duplicate capability, a duplicate
//! (capability, tag) pair, or a binding against an unregistered capability is
//! a wiring bug discoverable at process start, not a runtime condition.

use crate::context::Context;
use crate::error::BoxError;
use confit_yaml::YamlNode;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

/// An opaque constructed instance, typically a boxed capability trait object.
pub type ErasedInstance = Box<dyn Any>;

/// A registered factory after erasure: decode the body, construct, box.
pub type ErasedFactory =
    Arc<dyn Fn(&Context, &YamlNode) -> std::result::Result<ErasedInstance, FactoryError> + Send + Sync>;

/// Failure modes of an erased factory, classified so the resolver can tell a
/// config shape mismatch apart from a factory body error.
#[derive(Debug)]
pub enum FactoryError {
    /// The config shape did not decode from the body node.
    Decode(confit_yaml::Error),

    /// The caller-supplied factory returned an error.
    Construct(BoxError),
}

#[derive(Default)]
struct CapabilityTable {
    factories: HashMap<String, ErasedFactory>,
}

#[derive(Default)]
struct Tables {
    capabilities: HashMap<String, CapabilityTable>,
}

/// A capability registry.
///
/// Cheap to clone: clones share the same tables, so a factory may capture a
/// clone of the registry it was registered on and recurse through it.
/// Registration takes the write lock; lookup takes the read lock and hands
/// back the factory, which is always invoked outside the lock.
#[derive(Clone, Default)]
pub struct Registry {
    tables: Arc<RwLock<Tables>>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default registry, created exactly once on first use.
    ///
    /// Every API that takes `Option<&Registry>` falls back to this instance
    /// when passed `None`.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// Look up the factory registered for `(capability, tag)`.
    pub fn lookup(&self, capability: &str, tag: &str) -> Option<ErasedFactory> {
        let tables = self.tables.read().expect("registry lock poisoned");
        tables
            .capabilities
            .get(capability)
            .and_then(|t| t.factories.get(tag))
            .cloned()
    }

    pub(crate) fn find(&self, capability: &str, tag: &str) -> std::result::Result<ErasedFactory, Miss> {
        let tables = self.tables.read().expect("registry lock poisoned");
        let table = tables.capabilities.get(capability).ok_or(Miss::Capability)?;
        table.factories.get(tag).cloned().ok_or(Miss::Tag)
    }

    fn insert_capability(&self, name: &str) {
        let mut tables = self.tables.write().expect("registry lock poisoned");
        if tables.capabilities.contains_key(name) {
            panic!("unable to register capability {name:?}: capability already registered");
        }
        tables
            .capabilities
            .insert(name.to_owned(), CapabilityTable::default());
    }

    fn insert_factory(&self, capability: &str, tag: &str, factory: ErasedFactory) {
        let mut tables = self.tables.write().expect("registry lock poisoned");
        let Some(table) = tables.capabilities.get_mut(capability) else {
            panic!(
                "unable to register factory with config name {tag:?} for capability {capability:?}: capability not registered"
            );
        };
        if table.factories.contains_key(tag) {
            panic!(
                "unable to register factory with config name {tag:?} for capability {capability:?}: configuration type double registration"
            );
        }
        table.factories.insert(tag.to_owned(), factory);
    }
}

pub(crate) enum Miss {
    Capability,
    Tag,
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read().expect("registry lock poisoned");
        for (name, table) in &tables.capabilities {
            if table.factories.is_empty() {
                writeln!(f, "Capability {name} has no registered types")?;
                continue;
            }
            writeln!(f, "Capability: {name}")?;
            for tag in table.factories.keys() {
                writeln!(f, "  Config: {tag}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

fn registry_of(explicit: Option<&Registry>) -> &Registry {
    explicit.unwrap_or_else(|| Registry::global())
}

/// Register a capability name with the given registry.
///
/// Pass `None` to use the process-wide default registry.
///
/// # Panics
///
/// Panics if the capability is already registered.
pub fn register_capability(registry: Option<&Registry>, name: &str) {
    registry_of(registry).insert_capability(name);
    tracing::debug!(capability = name, "registered capability");
}

/// Declares that a constructed implementation satisfies one capability.
///
/// Each binding pairs a capability name with the coercion from the concrete
/// implementation type into that capability's boxed trait object. The
/// [`binding!`](crate::binding) macro writes the coercion.
pub struct Binding<T> {
    capability: &'static str,
    erase: fn(T) -> ErasedInstance,
}

impl<T> Binding<T> {
    pub fn new(capability: &'static str, erase: fn(T) -> ErasedInstance) -> Self {
        Self { capability, erase }
    }

    /// The capability this binding names.
    pub fn capability(&self) -> &'static str {
        self.capability
    }
}

/// Expands the coercion from an implementation value into a boxed capability
/// trait object, erased for registry storage.
///
/// ```rust,ignore
/// register_factory(
///     Some(&registry),
///     "greetings.english",
///     vec![binding!("Greeter", dyn Greeter)],
///     english_factory,
/// );
/// ```
#[macro_export]
macro_rules! binding {
    ($capability:expr, $object:ty) => {
        $crate::Binding::new($capability, |value| {
            ::std::boxed::Box::new(::std::boxed::Box::new(value) as ::std::boxed::Box<$object>)
                as $crate::ErasedInstance
        })
    };
}

/// Register a typed factory under `tag` for every capability it declares.
///
/// The factory takes a decoded config shape; the registry wraps it so the
/// stored form decodes the body node, invokes the factory, and erases the
/// result through the binding's coercion. Pass `None` to use the process-wide
/// default registry.
///
/// # Panics
///
/// Panics if `bindings` is empty, names an unregistered capability, or the
/// `(capability, tag)` pair already exists.
pub fn register_factory<C, T, F>(
    registry: Option<&Registry>,
    tag: &str,
    bindings: Vec<Binding<T>>,
    factory: F,
) where
    C: serde::de::DeserializeOwned + 'static,
    T: 'static,
    F: Fn(&Context, C) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
{
    let factory = Arc::new(factory);
    register_erased(registry, tag, bindings, move |ctx: &Context, node: &YamlNode| {
        let config: C = confit_yaml::decode(node).map_err(FactoryError::Decode)?;
        factory(ctx, config).map_err(FactoryError::Construct)
    });
}

/// Register a factory that receives the raw body node instead of a decoded
/// config shape.
///
/// Composite factories use this form to extract nested typed configs or data
/// sources from their own body and recurse through the resolver.
///
/// # Panics
///
/// Same conditions as [`register_factory`].
pub fn register_raw_factory<T, F>(
    registry: Option<&Registry>,
    tag: &str,
    bindings: Vec<Binding<T>>,
    factory: F,
) where
    T: 'static,
    F: Fn(&Context, &YamlNode) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
{
    let factory = Arc::new(factory);
    register_erased(registry, tag, bindings, move |ctx: &Context, node: &YamlNode| {
        factory(ctx, node).map_err(FactoryError::Construct)
    });
}

fn register_erased<T, W>(registry: Option<&Registry>, tag: &str, bindings: Vec<Binding<T>>, wrapped: W)
where
    T: 'static,
    W: Fn(&Context, &YamlNode) -> std::result::Result<T, FactoryError> + Send + Sync + 'static,
{
    if bindings.is_empty() {
        panic!("unable to register factory with config name {tag:?}: no capability bindings declared");
    }

    let reg = registry_of(registry);
    let wrapped = Arc::new(wrapped);
    for binding in bindings {
        let wrapped = Arc::clone(&wrapped);
        let erase = binding.erase;
        let erased: ErasedFactory =
            Arc::new(move |ctx: &Context, node: &YamlNode| wrapped(ctx, node).map(erase));
        reg.insert_factory(binding.capability, tag, erased);
        tracing::debug!(capability = binding.capability, tag, "registered factory");
    }
}

//! Resolution: typed config → constructed capability instance.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::registry::{FactoryError, Miss, Registry};
use crate::typed_config::TypedConfig;

/// Construct an instance of `capability` from a typed config, with a default
/// (never-cancelled) context.
///
/// `T` is the capability's boxed trait object, e.g. `Box<dyn Greeter>`. Pass
/// `None` to resolve against the process-wide default registry.
pub fn make<T: 'static>(
    registry: Option<&Registry>,
    capability: &str,
    config: &TypedConfig,
) -> Result<T> {
    make_with_context(&Context::new(), registry, capability, config)
}

/// Construct an instance of `capability` from a typed config.
///
/// Looks up the factory bound to `(capability, config.type_tag())`, invokes
/// it with the config body, and downcasts the result to `T`. The factory runs
/// outside the registry lock, so factories are free to recurse into the same
/// registry for nested configs.
pub fn make_with_context<T: 'static>(
    ctx: &Context,
    registry: Option<&Registry>,
    capability: &str,
    config: &TypedConfig,
) -> Result<T> {
    let reg = match registry {
        Some(reg) => reg,
        None => Registry::global(),
    };
    let line = config.span().line;
    let tag = config.type_tag();

    tracing::debug!(capability, tag, "resolving typed config");

    // The read lock is released inside find; the factory is invoked unlocked.
    let factory = reg.find(capability, tag).map_err(|miss| match miss {
        Miss::Capability => Error::CapabilityNotRegistered {
            capability: capability.to_owned(),
            line,
        },
        Miss::Tag => Error::TypeNotRegistered {
            capability: capability.to_owned(),
            tag: tag.to_owned(),
            line,
        },
    })?;

    let instance = factory(ctx, config.body()).map_err(|e| match e {
        FactoryError::Decode(source) => Error::ConfigDecodeFailed { line, source },
        FactoryError::Construct(source) => Error::ConstructionFailed {
            tag: tag.to_owned(),
            line,
            source,
        },
    })?;

    // Unreachable with correct bindings; checked because the erased table
    // cannot express the capability type statically.
    instance
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| Error::CapabilityMismatch {
            capability: capability.to_owned(),
            tag: tag.to_owned(),
            line,
        })
}

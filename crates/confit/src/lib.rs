//! # confit
//!
//! A config-driven polymorphic construction registry: YAML documents say
//! *which* implementation of a capability to build and *with what
//! parameters*, and the registry resolves that description into a live
//! instance at runtime.
//!
//! ## Typed configs
//!
//! A capability is an abstract contract named by a string; implementations
//! register factories against a type tag. A document selects one with the
//! `@type` discriminator:
//!
//! ```yaml
//! name: english
//! typed_config:
//!   "@type": greetings.english
//!   greeting: Hey there
//! ```
//!
//! Wiring happens at startup and misuse panics there; resolution is a plain
//! `Result` with errors that point back at a line in the document:
//!
//! ```rust
//! use confit::{Context, Registry, TypedConfig, binding, make, register_capability, register_factory};
//!
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English {
//!     phrase: String,
//! }
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         self.phrase.clone()
//!     }
//! }
//!
//! #[derive(serde::Deserialize)]
//! struct EnglishConfig {
//!     greeting: String,
//! }
//!
//! let registry = Registry::new();
//! register_capability(Some(&registry), "Greeter");
//! register_factory(
//!     Some(&registry),
//!     "greetings.english",
//!     vec![binding!("Greeter", dyn Greeter)],
//!     |_ctx: &Context, config: EnglishConfig| {
//!         Ok(English {
//!             phrase: config.greeting,
//!         })
//!     },
//! );
//!
//! let tc = TypedConfig::parse(
//!     "typed_config:\n  \"@type\": greetings.english\n  greeting: Hey there",
//! )
//! .unwrap();
//! let greeter: Box<dyn Greeter> = make(Some(&registry), "Greeter", &tc).unwrap();
//! assert_eq!(greeter.greet(), "Hey there");
//! ```
//!
//! Passing `None` for the registry uses a process-wide default, created
//! exactly once on first use.
//!
//! ## Data sources
//!
//! The same tag-to-factory mechanism, specialized for lazily-opened byte
//! streams, lives in [`DataSource`] / [`SourceRegistry`]: a node names one
//! source kind by key (`file`, `env`, `string`, `bytes`, or a user-registered
//! tag) and the stream is opened on first read.

mod context;
mod error;
mod registry;
mod resolve;
mod source;
mod typed_config;

pub use context::Context;
pub use error::{BoxError, Error, Result};
pub use registry::{
    Binding, ErasedFactory, ErasedInstance, FactoryError, Registry, register_capability,
    register_factory, register_raw_factory,
};
pub use resolve::{make, make_with_context};
pub use source::{
    BufferStream, DataSource, EnvStream, FileStream, SourceFactory, SourceRegistry, SourceStream,
    register_source,
};
pub use typed_config::{DISCRIMINATOR_KEY, TypedConfig};

// Re-exports for factories that work with raw body nodes.
pub use confit_yaml::{Span, YamlNode};

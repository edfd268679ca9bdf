//! Schema, directives and converters for the termconf resolution engine.
//!
//! This crate provides the static side of configuration resolution:
//!
//! - The option schema registry (names, defaults, converters, storage kinds)
//! - Named type converters
//! - Directive records produced by the config tokenizer
//! - Deprecated option rewrite rules
//! - The built-in option catalog, color table and default bindings
//! - Typed errors shared by the whole engine

pub mod converters;
pub mod defaults;
pub mod deprecation;
pub mod directive;
pub mod error;
pub mod platform;
pub mod schema;
pub mod value;

// Re-export main types for convenience
pub use converters::{Converter, ConverterRegistry};
pub use deprecation::{DeprecationHandler, DeprecationRule, DeprecationTable};
pub use directive::{AliasKind, Directive, KeyDirective, MouseDirective};
pub use error::{ResolveError, Result};
pub use platform::Platform;
pub use schema::{OptionSpec, SchemaRegistry, SchemaRegistryBuilder, StorageKind};
pub use value::{Color, OptionValue};

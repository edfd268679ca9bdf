//! termconf: configuration resolution for a kitty-style terminal.
//!
//! An ordered stream of directives (option assignments, key and mouse
//! bindings, aliases, table clears) is compiled into one typed
//! [`ResolvedConfiguration`]. The [`ConfigStore`] publishes snapshots
//! atomically so readers never observe a half-built configuration.
//!
//! ```no_run
//! use termconf::{ConfigEngine, ConfigStore, Directive};
//! use std::sync::Arc;
//!
//! let engine = Arc::new(ConfigEngine::with_defaults());
//! let store = ConfigStore::new(engine, [Directive::set("repaint_delay", "20")])?;
//! assert_eq!(store.current().option("repaint_delay")?.as_int(), Some(20));
//! # Ok::<(), termconf::ResolveError>(())
//! ```

pub mod alias;
pub mod engine;
pub mod resolved;
pub mod resolver;
pub mod store;

pub use alias::{ALIAS_EXPANSION_LIMIT, AliasTable};
pub use engine::{ConfigEngine, ConfigEngineBuilder};
pub use resolved::{ResolvedConfiguration, ResolvedOption};
pub use resolver::Resolver;
pub use store::ConfigStore;

// Re-export the types callers need to build directive streams and read results
pub use termconf_config::{
    AliasKind, Color, Directive, KeyDirective, MouseDirective, OptionValue, Platform,
    ResolveError, Result,
};
pub use termconf_keybindings::{
    BindingAction, KeyBindingRule, KeyModes, MouseBindingRule, MouseButton, MouseEvent,
};

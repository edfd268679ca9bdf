//! The option schema registry.
//!
//! The registry is the static catalog of every known option: its default
//! text, the converter that types it, and whether it holds one value or an
//! ordered list. It is assembled once with [`SchemaRegistryBuilder`] and then
//! frozen; a frozen [`SchemaRegistry`] is read-only and can be shared across
//! any number of resolve passes.

use crate::error::{ResolveError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Marker that declares an option as accumulating in the catalog.
pub const ACCUMULATING_MARKER: char = '+';

/// How an option stores its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// One value, the last assignment wins.
    Scalar,
    /// An ordered list, appended to across directives.
    Accumulating,
}

/// Declaration of a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    /// Default value as raw text, converted like any directive value.
    pub default: String,
    /// Name of the converter in the converter registry.
    pub converter: String,
    pub kind: StorageKind,
    /// For accumulating options: whether a non-empty default seeds the list.
    pub add_to_default: bool,
}

impl OptionSpec {
    pub fn scalar(name: &str, default: &str, converter: &str) -> Self {
        Self {
            name: name.to_string(),
            default: default.to_string(),
            converter: converter.to_string(),
            kind: StorageKind::Scalar,
            add_to_default: true,
        }
    }

    pub fn accumulating(name: &str, default: &str, converter: &str) -> Self {
        Self {
            kind: StorageKind::Accumulating,
            ..Self::scalar(name, default, converter)
        }
    }

    /// Build a spec from a catalog declaration, where a leading `+` on the
    /// name marks the option as accumulating.
    pub fn parse_declaration(decl_name: &str, default: &str, converter: &str) -> Self {
        match decl_name.strip_prefix(ACCUMULATING_MARKER) {
            Some(name) => Self::accumulating(name, default, converter),
            None => Self::scalar(decl_name, default, converter),
        }
    }

    /// Leave a non-empty default out of the initial list.
    pub fn without_default_entry(mut self) -> Self {
        self.add_to_default = false;
        self
    }

    pub fn is_accumulating(&self) -> bool {
        self.kind == StorageKind::Accumulating
    }

    /// Whether the default text contributes an entry to an accumulating list.
    pub fn seeds_list(&self) -> bool {
        self.is_accumulating() && self.add_to_default && !self.default.is_empty()
    }
}

/// Mutable builder used while assembling the catalog.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    specs: Vec<OptionSpec>,
    index: HashMap<String, usize>,
}

impl SchemaRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option to the catalog.
    ///
    /// # Errors
    /// Returns [`ResolveError::DuplicateOption`] if the name is already present.
    pub fn register(&mut self, spec: OptionSpec) -> Result<&mut Self> {
        if self.index.contains_key(&spec.name) {
            return Err(ResolveError::DuplicateOption { name: spec.name });
        }
        self.index.insert(spec.name.clone(), self.specs.len());
        self.specs.push(spec);
        Ok(self)
    }

    /// Register every spec, stopping at the first duplicate.
    pub fn register_all<I>(&mut self, specs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = OptionSpec>,
    {
        for spec in specs {
            self.register(spec)?;
        }
        Ok(self)
    }

    /// Freeze the catalog.
    pub fn build(self) -> SchemaRegistry {
        log::debug!("Schema registry frozen with {} options", self.specs.len());
        SchemaRegistry {
            specs: self.specs,
            index: self.index,
        }
    }
}

/// Frozen, read-only option catalog.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    specs: Vec<OptionSpec>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    /// The built-in option catalog.
    pub fn with_defaults() -> Self {
        let mut builder = Self::builder();
        for spec in crate::defaults::option_specs() {
            if let Err(e) = builder.register(spec) {
                // The built-in catalog is static data; a duplicate is a bug in it.
                log::error!("Built-in option catalog: {e}");
            }
        }
        builder.build()
    }

    /// Look up an option by name.
    ///
    /// # Errors
    /// Returns [`ResolveError::UnknownOption`] if the name was never registered.
    pub fn lookup(&self, name: &str) -> Result<&OptionSpec> {
        self.index
            .get(name)
            .map(|&i| &self.specs[i])
            .ok_or_else(|| ResolveError::unknown_option(name))
    }

    /// Declared default text for an option.
    pub fn default_value(&self, name: &str) -> Result<&str> {
        self.lookup(name).map(|spec| spec.default.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Specs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

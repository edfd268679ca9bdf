//! The frozen resolution engine: schema, converters, deprecations and
//! default bindings shared by every resolve pass.

use crate::resolved::ResolvedConfiguration;
use crate::resolver::Resolver;
use std::borrow::Borrow;
use termconf_config::{
    ConverterRegistry, DeprecationTable, Directive, Platform, Result, SchemaRegistry, defaults,
};

/// Immutable inputs to configuration resolution.
///
/// An engine is built once and may be shared across threads; each call to
/// [`ConfigEngine::resolve`] owns its own tables until it returns.
#[derive(Debug)]
pub struct ConfigEngine {
    schema: SchemaRegistry,
    converters: ConverterRegistry,
    deprecations: DeprecationTable,
    default_directives: Vec<Directive>,
    platform: Platform,
}

impl ConfigEngine {
    /// Start from the built-in schema, converters and deprecations, with no
    /// default bindings and the current platform.
    pub fn builder() -> ConfigEngineBuilder {
        ConfigEngineBuilder::default()
    }

    /// The built-in catalog plus the default key and mouse bindings.
    pub fn with_defaults() -> Self {
        Self::builder()
            .default_directives(defaults::default_directives())
            .build()
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn deprecations(&self) -> &DeprecationTable {
        &self.deprecations
    }

    /// Directives applied before every stream.
    pub fn default_directives(&self) -> &[Directive] {
        &self.default_directives
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolve `directives` for the engine's platform.
    pub fn resolve<I>(&self, directives: I) -> Result<ResolvedConfiguration>
    where
        I: IntoIterator,
        I::Item: Borrow<Directive>,
    {
        self.resolve_for(self.platform, directives)
    }

    /// Resolve `directives` as if running on `platform`.
    ///
    /// Default directives are applied first. The first failing directive
    /// aborts the pass.
    pub fn resolve_for<I>(&self, platform: Platform, directives: I) -> Result<ResolvedConfiguration>
    where
        I: IntoIterator,
        I::Item: Borrow<Directive>,
    {
        let mut resolver = Resolver::new(self, platform);
        for directive in &self.default_directives {
            resolver.apply(directive).inspect_err(|e| {
                log::error!("Default directive rejected: {e}");
            })?;
        }
        for (index, directive) in directives.into_iter().enumerate() {
            resolver.apply(directive.borrow()).inspect_err(|e| {
                log::error!("Directive #{index} rejected: {e}");
            })?;
        }
        resolver.finish()
    }
}

/// Builder for [`ConfigEngine`].
#[derive(Debug, Default)]
pub struct ConfigEngineBuilder {
    schema: Option<SchemaRegistry>,
    converters: Option<ConverterRegistry>,
    deprecations: Option<DeprecationTable>,
    default_directives: Vec<Directive>,
    platform: Option<Platform>,
}

impl ConfigEngineBuilder {
    pub fn schema(mut self, schema: SchemaRegistry) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn converters(mut self, converters: ConverterRegistry) -> Self {
        self.converters = Some(converters);
        self
    }

    pub fn deprecations(mut self, deprecations: DeprecationTable) -> Self {
        self.deprecations = Some(deprecations);
        self
    }

    pub fn default_directives(mut self, directives: Vec<Directive>) -> Self {
        self.default_directives = directives;
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn build(self) -> ConfigEngine {
        let engine = ConfigEngine {
            schema: self.schema.unwrap_or_else(SchemaRegistry::with_defaults),
            converters: self.converters.unwrap_or_else(ConverterRegistry::with_builtins),
            deprecations: self.deprecations.unwrap_or_else(DeprecationTable::with_builtins),
            default_directives: self.default_directives,
            platform: self.platform.unwrap_or_else(Platform::current),
        };
        log::info!(
            "Config engine ready: {} options, {} converters, {} deprecations, {} default directives, platform {}",
            engine.schema.len(),
            engine.converters.len(),
            engine.deprecations.len(),
            engine.default_directives.len(),
            engine.platform
        );
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_send_sync() {
        assert_send_sync::<ConfigEngine>();
    }

    #[test]
    fn test_builder_defaults() {
        let engine = ConfigEngine::builder().platform(Platform::Linux).build();
        assert!(engine.default_directives().is_empty());
        assert!(engine.schema().contains("repaint_delay"));
        assert_eq!(engine.platform(), Platform::Linux);
    }

    #[test]
    fn test_with_defaults_has_bindings() {
        let engine = ConfigEngine::with_defaults();
        assert!(!engine.default_directives().is_empty());
    }
}

//! A single resolve pass over a directive stream.
//!
//! The resolver owns its option values, binding tables and alias table for
//! the duration of the pass. Nothing is published until [`Resolver::finish`]
//! succeeds.

use crate::alias::AliasTable;
use crate::engine::ConfigEngine;
use crate::resolved::{ResolvedConfiguration, ResolvedOption};
use std::collections::{HashMap, HashSet};
use termconf_config::{
    Directive, KeyDirective, MouseDirective, OptionSpec, OptionValue, Platform, ResolveError,
    Result,
};
use termconf_keybindings::{
    KeyBindingRule, KeyBindingTable, Modifiers, MouseBindingRule, MouseBindingTable,
    parse_modifiers,
};

/// Option holding the modifier set that `kitty_mod` stands for.
pub const KITTY_MOD_OPTION: &str = "kitty_mod";
/// Used when the schema has no `kitty_mod` option.
pub const DEFAULT_KITTY_MOD: &str = "ctrl+shift";

/// Mutable state of one resolve pass.
#[derive(Debug)]
pub struct Resolver<'e> {
    engine: &'e ConfigEngine,
    platform: Platform,
    /// Options touched by a directive so far.
    values: HashMap<String, OptionValue>,
    keys: KeyBindingTable,
    mouse: MouseBindingTable,
    aliases: AliasTable,
    warned_deprecations: HashSet<String>,
    applied: usize,
}

impl<'e> Resolver<'e> {
    pub fn new(engine: &'e ConfigEngine, platform: Platform) -> Self {
        Self {
            engine,
            platform,
            values: HashMap::new(),
            keys: KeyBindingTable::new(),
            mouse: MouseBindingTable::new(),
            aliases: AliasTable::new(),
            warned_deprecations: HashSet::new(),
            applied: 0,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Key bindings as they stand, before symbolic modifiers are resolved.
    pub fn key_bindings(&self) -> &KeyBindingTable {
        &self.keys
    }

    pub fn mouse_bindings(&self) -> &MouseBindingTable {
        &self.mouse
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Apply one directive, rewriting deprecated names first.
    pub fn apply(&mut self, directive: &Directive) -> Result<()> {
        let engine = self.engine;
        let deprecations = engine.deprecations();
        if let Some(name) = directive.option_name()
            && deprecations.is_deprecated(name)
        {
            self.warn_deprecated(name);
            let rewritten = deprecations.rewrite_directive(directive.clone())?;
            log::debug!("Deprecated '{name}' rewritten into {} directive(s)", rewritten.len());
            for d in &rewritten {
                self.dispatch(d)?;
            }
            return Ok(());
        }
        self.dispatch(directive)
    }

    fn warn_deprecated(&mut self, name: &str) {
        if self.warned_deprecations.insert(name.to_string()) {
            let canonical = self
                .engine
                .deprecations()
                .canonical_names(name)
                .map(|names| names.join(", "))
                .unwrap_or_default();
            log::warn!("Option '{name}' is deprecated, use {canonical} instead");
        }
    }

    fn dispatch(&mut self, directive: &Directive) -> Result<()> {
        self.applied += 1;
        match directive {
            Directive::SetOption { name, value } => self.set_option(name, value),
            Directive::AppendOption { name, value } => self.append_option(name, value),
            Directive::BindKey(binding) => self.bind_key(binding),
            Directive::BindMouse(binding) => self.bind_mouse(binding),
            Directive::ClearAllKeyBindings => {
                log::debug!("Clearing {} key bindings", self.keys.len());
                self.keys.clear();
                Ok(())
            }
            Directive::ClearAllMouseBindings => {
                log::debug!("Clearing {} mouse bindings", self.mouse.len());
                self.mouse.clear();
                Ok(())
            }
            Directive::DefineAlias {
                kind,
                name,
                expansion,
            } => {
                if self.aliases.define(*kind, name, expansion).is_some() {
                    log::debug!("{kind} '{name}' redefined");
                }
                Ok(())
            }
        }
    }

    fn convert(&self, spec: &OptionSpec, raw: &str) -> Result<OptionValue> {
        self.engine
            .converters()
            .convert(&spec.converter, raw)
            .map_err(|reason| ResolveError::TypeConversion {
                option: spec.name.clone(),
                value: raw.to_string(),
                reason,
            })
    }

    fn set_option(&mut self, name: &str, raw: &str) -> Result<()> {
        let engine = self.engine;
        let spec = engine.schema().lookup(name)?;
        let value = self.convert(spec, raw)?;
        let value = if spec.is_accumulating() {
            if self.values.contains_key(name) {
                log::debug!("Resetting accumulated values of '{name}'");
            }
            OptionValue::List(vec![value])
        } else {
            value
        };
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn append_option(&mut self, name: &str, raw: &str) -> Result<()> {
        let engine = self.engine;
        let spec = engine.schema().lookup(name)?;
        if !spec.is_accumulating() {
            return Err(ResolveError::NotAccumulating {
                name: name.to_string(),
            });
        }
        let value = self.convert(spec, raw)?;
        if !self.values.contains_key(name) {
            let initial = self.initial_list(spec)?;
            self.values.insert(name.to_string(), initial);
        }
        // accumulating options only ever hold lists
        if let Some(OptionValue::List(items)) = self.values.get_mut(name) {
            items.push(value);
        }
        Ok(())
    }

    /// Starting list of an accumulating option, seeded from its default if declared so.
    fn initial_list(&self, spec: &OptionSpec) -> Result<OptionValue> {
        if spec.seeds_list() {
            Ok(OptionValue::List(vec![self.convert(spec, &spec.default)?]))
        } else {
            Ok(OptionValue::List(Vec::new()))
        }
    }

    fn default_for(&self, spec: &OptionSpec) -> Result<OptionValue> {
        if spec.is_accumulating() {
            self.initial_list(spec)
        } else {
            self.convert(spec, &spec.default)
        }
    }

    fn bind_key(&mut self, binding: &KeyDirective) -> Result<()> {
        if !self.platform.admits(binding.only) {
            log::debug!(
                "Skipping key binding {} on {} (only {:?})",
                binding.sequence,
                self.platform,
                binding.only
            );
            return Ok(());
        }
        let action = self.aliases.expand(&binding.action)?;
        let rule = KeyBindingRule::from_directive(binding, &action)?;
        self.keys.upsert(rule);
        Ok(())
    }

    fn bind_mouse(&mut self, binding: &MouseDirective) -> Result<()> {
        if !self.platform.admits(binding.only) {
            log::debug!(
                "Skipping mouse binding {} on {} (only {:?})",
                binding.trigger,
                self.platform,
                binding.only
            );
            return Ok(());
        }
        let action = self.aliases.expand(&binding.action)?;
        let rule = MouseBindingRule::from_directive(binding, &action)?;
        self.mouse.upsert(rule);
        Ok(())
    }

    /// Fill in defaults, resolve symbolic modifiers and freeze the result.
    pub fn finish(mut self) -> Result<ResolvedConfiguration> {
        let engine = self.engine;
        let schema = engine.schema();
        let mut options = Vec::with_capacity(schema.len());
        for spec in schema.iter() {
            let default = self.default_for(spec)?;
            let option = match self.values.remove(&spec.name) {
                Some(value) => ResolvedOption {
                    name: spec.name.clone(),
                    changed: value != default,
                    value,
                },
                None => ResolvedOption {
                    name: spec.name.clone(),
                    value: default,
                    changed: false,
                },
            };
            options.push(option);
        }

        let kitty_mod = kitty_mod_from(&options)?;
        let keys = self.keys.resolve_modifiers(self.platform, kitty_mod);
        let mouse = self.mouse.resolve_modifiers(self.platform, kitty_mod);

        log::info!(
            "Resolved {} directives on {}: {} options ({} changed), {} key bindings, {} mouse bindings",
            self.applied,
            self.platform,
            options.len(),
            options.iter().filter(|o| o.changed).count(),
            keys.len(),
            mouse.len()
        );

        Ok(ResolvedConfiguration::new(
            self.platform,
            kitty_mod,
            options,
            keys,
            mouse,
        ))
    }
}

fn kitty_mod_from(options: &[ResolvedOption]) -> Result<Modifiers> {
    let text = options
        .iter()
        .find(|o| o.name == KITTY_MOD_OPTION)
        .and_then(|o| o.value.as_str())
        .unwrap_or(DEFAULT_KITTY_MOD);
    parse_modifiers(text).map_err(|e| e.into_resolve_error(text))
}

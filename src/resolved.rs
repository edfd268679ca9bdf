//! The immutable result of a resolve pass.

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use termconf_config::{OptionValue, Platform, ResolveError, Result};
use termconf_keybindings::{
    KeyBindingRule, KeyBindingTable, KeyModes, Modifiers, MouseBindingRule, MouseBindingTable,
};

/// Final value of one option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOption {
    pub name: String,
    pub value: OptionValue,
    /// Whether the value differs from the converted default.
    pub changed: bool,
}

/// A complete, typed configuration snapshot.
///
/// Every option in the schema has exactly one value; bindings reflect the
/// final override state with symbolic modifiers already resolved.
#[derive(Debug, Clone)]
pub struct ResolvedConfiguration {
    platform: Platform,
    kitty_mod: Modifiers,
    options: Vec<ResolvedOption>,
    index: HashMap<String, usize>,
    keys: KeyBindingTable,
    mouse: MouseBindingTable,
}

impl ResolvedConfiguration {
    pub(crate) fn new(
        platform: Platform,
        kitty_mod: Modifiers,
        options: Vec<ResolvedOption>,
        keys: KeyBindingTable,
        mouse: MouseBindingTable,
    ) -> Self {
        let index = options
            .iter()
            .enumerate()
            .map(|(i, o)| (o.name.clone(), i))
            .collect();
        Self {
            platform,
            kitty_mod,
            options,
            index,
            keys,
            mouse,
        }
    }

    /// Typed value of `name`; fails only for names outside the schema.
    pub fn option(&self, name: &str) -> Result<&OptionValue> {
        self.index
            .get(name)
            .map(|&i| &self.options[i].value)
            .ok_or_else(|| ResolveError::unknown_option(name))
    }

    /// All options in schema order.
    pub fn options(&self) -> &[ResolvedOption] {
        &self.options
    }

    /// Options whose final value differs from their default.
    pub fn changed_options(&self) -> impl Iterator<Item = &ResolvedOption> {
        self.options.iter().filter(|o| o.changed)
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The concrete modifiers `kitty_mod` resolved to.
    pub fn kitty_mod(&self) -> Modifiers {
        self.kitty_mod
    }

    /// Key bindings in last-applied order; an override sits where it was applied,
    /// not where the binding it replaced was.
    pub fn key_bindings(&self) -> &[KeyBindingRule] {
        self.keys.rules()
    }

    pub fn key_table(&self) -> &KeyBindingTable {
        &self.keys
    }

    pub fn key_bindings_for_mode(&self, mode: KeyModes) -> impl Iterator<Item = &KeyBindingRule> {
        self.keys.for_mode(mode)
    }

    /// Mouse bindings in last-applied order.
    pub fn mouse_bindings(&self) -> &[MouseBindingRule] {
        self.mouse.rules()
    }

    pub fn mouse_table(&self) -> &MouseBindingTable {
        &self.mouse
    }

    pub fn mouse_bindings_for(&self, grabbed: bool) -> impl Iterator<Item = &MouseBindingRule> {
        self.mouse.for_grab_state(grabbed)
    }

    /// Debug view: changed options and all bindings.
    pub fn to_json_value(&self) -> Value {
        let changed: serde_json::Map<String, Value> = self
            .changed_options()
            .map(|o| (o.name.clone(), json!(o.value)))
            .collect();
        let keys: Vec<Value> = self
            .keys
            .iter()
            .map(|r| {
                json!({
                    "sequence": r.sequence.to_string(),
                    "modes": r.modes.to_string(),
                    "action": r.action.spec(),
                    "description": r.description,
                })
            })
            .collect();
        let mouse: Vec<Value> = self
            .mouse
            .iter()
            .map(|r| {
                json!({
                    "trigger": r.trigger.to_string(),
                    "action": r.action.spec(),
                    "description": r.description,
                })
            })
            .collect();
        json!({
            "platform": self.platform,
            "kitty_mod": self.kitty_mod.to_string(),
            "changed_options": changed,
            "key_bindings": keys,
            "mouse_bindings": mouse,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_json_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigEngine;
    use termconf_config::Directive;

    fn resolve(directives: &[Directive]) -> ResolvedConfiguration {
        ConfigEngine::builder()
            .platform(Platform::Linux)
            .build()
            .resolve(directives)
            .unwrap()
    }

    #[test]
    fn test_unknown_option() {
        let resolved = resolve(&[]);
        assert!(matches!(
            resolved.option("nope"),
            Err(ResolveError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_every_schema_option_present() {
        let engine = ConfigEngine::builder().platform(Platform::Linux).build();
        let resolved = engine.resolve(&[] as &[Directive]).unwrap();
        assert_eq!(resolved.options().len(), engine.schema().len());
        for spec in engine.schema().iter() {
            assert!(resolved.option(&spec.name).is_ok(), "{}", spec.name);
        }
    }

    #[test]
    fn test_changed_options() {
        let resolved = resolve(&[
            Directive::set("repaint_delay", "20"),
            Directive::set("font_size", "11.0"),
        ]);
        let changed: Vec<&str> = resolved.changed_options().map(|o| o.name.as_str()).collect();
        assert_eq!(changed, vec!["repaint_delay"]);
    }

    #[test]
    fn test_json_dump() {
        let resolved = resolve(&[
            Directive::set("repaint_delay", "20"),
            Directive::bind_key("ctrl+a", "foo"),
            Directive::bind_mouse("left press ungrabbed", "discard_event"),
        ]);
        let value = resolved.to_json_value();
        assert_eq!(value["platform"], "linux");
        assert_eq!(value["kitty_mod"], "ctrl+shift");
        assert_eq!(value["changed_options"]["repaint_delay"], 20);
        assert_eq!(value["key_bindings"][0]["sequence"], "ctrl+a");
        assert_eq!(value["key_bindings"][0]["modes"], "all");
        assert_eq!(value["mouse_bindings"][0]["action"], "discard_event");
        assert!(resolved.to_json().unwrap().contains("\"repaint_delay\": 20"));
    }
}

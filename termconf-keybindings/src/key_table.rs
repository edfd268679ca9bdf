//! Ordered key binding table with override semantics.
//!
//! A rule's identity is its key sequence plus the dispatch modes it covers.
//! Inserting a rule removes its modes from every earlier rule with the same
//! sequence; an earlier rule left with no modes is dropped.

use crate::action::BindingAction;
use crate::modes::KeyModes;
use crate::parser::{KeySequence, Modifiers, parse_key_sequence};
use crate::platform::resolve_modifiers;
use termconf_config::{KeyDirective, Platform, ResolveError};

/// A single resolved key binding.
///
/// There is no platform filter field: bindings restricted to another platform
/// are skipped before they reach the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindingRule {
    pub sequence: KeySequence,
    pub modes: KeyModes,
    pub action: BindingAction,
    pub description: String,
}

impl KeyBindingRule {
    pub fn new(sequence: KeySequence, action: BindingAction) -> Self {
        Self {
            sequence,
            modes: KeyModes::ALL,
            action,
            description: String::new(),
        }
    }

    /// Build a rule from a `map` directive, using `action` in place of the
    /// directive's own action (which may have been alias-expanded).
    pub fn from_directive(directive: &KeyDirective, action: &str) -> Result<Self, ResolveError> {
        let sequence = parse_key_sequence(&directive.sequence)
            .map_err(|e| e.into_resolve_error(&directive.sequence))?;
        let modes = match directive.modes.as_deref() {
            Some(modes) => KeyModes::parse(modes).map_err(|e| e.into_resolve_error(modes))?,
            None => KeyModes::ALL,
        };
        Ok(Self::new(sequence, BindingAction::from_spec(action))
            .with_modes(modes)
            .with_description(directive.description.clone()))
    }

    pub fn with_modes(mut self, modes: KeyModes) -> Self {
        self.modes = modes;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Key bindings in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBindingTable {
    rules: Vec<KeyBindingRule>,
}

impl KeyBindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `rule`, overriding earlier rules in the modes it covers.
    ///
    /// Returns how many earlier rules were dropped entirely.
    pub fn upsert(&mut self, rule: KeyBindingRule) -> usize {
        let before = self.rules.len();
        for existing in self
            .rules
            .iter_mut()
            .filter(|r| r.sequence == rule.sequence && r.modes.intersects(rule.modes))
        {
            log::debug!(
                "Key binding {} [{}] overrides '{}'",
                rule.sequence,
                rule.modes,
                existing.action
            );
            existing.modes = existing.modes.difference(rule.modes);
        }
        self.rules.retain(|r| !r.modes.is_empty());
        let dropped = before - self.rules.len();
        self.rules.push(rule);
        dropped
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Rules in last-applied order: an overriding rule moves to the end.
    pub fn rules(&self) -> &[KeyBindingRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBindingRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule bound to `sequence` in `mode`, if any.
    pub fn lookup(&self, sequence: &KeySequence, mode: KeyModes) -> Option<&KeyBindingRule> {
        self.rules
            .iter()
            .rev()
            .find(|r| &r.sequence == sequence && r.modes.contains(mode))
    }

    /// Rules active in `mode`.
    pub fn for_mode(&self, mode: KeyModes) -> impl Iterator<Item = &KeyBindingRule> {
        self.rules.iter().filter(move |r| r.modes.contains(mode))
    }

    /// Whether `sequence` starts a longer chord bound in `mode`.
    pub fn is_chord_prefix(&self, sequence: &KeySequence, mode: KeyModes) -> bool {
        self.for_mode(mode)
            .any(|r| sequence.is_prefix_of(&r.sequence))
    }

    /// Replace symbolic modifiers with concrete ones.
    ///
    /// Rules are re-inserted in order, so rules that now share an identity
    /// collapse with the later one winning.
    pub fn resolve_modifiers(self, platform: Platform, kitty_mod: Modifiers) -> KeyBindingTable {
        let mut resolved = KeyBindingTable::new();
        for rule in self.rules {
            let sequence = rule.sequence.map_presses(|mut press| {
                press.modifiers = resolve_modifiers(press.modifiers, platform, kitty_mod);
                press
            });
            resolved.upsert(KeyBindingRule { sequence, ..rule });
        }
        resolved
    }
}

impl<'a> IntoIterator for &'a KeyBindingTable {
    type Item = &'a KeyBindingRule;
    type IntoIter = std::slice::Iter<'a, KeyBindingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

//! Directive records consumed by the resolver.
//!
//! A directive is one already-tokenized configuration line. The tokenizer
//! (and `include` expansion) live outside this crate; [`Directive::from_key_value`]
//! is the bridge from a `key value` pair to a typed directive.

use crate::error::{ResolveError, Result};
use crate::platform::Platform;
use crate::schema::ACCUMULATING_MARKER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which alias table a [`Directive::DefineAlias`] populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasKind {
    /// Substitutes the action name of a binding's action.
    Action,
    /// Substitutes the kitten name after a `kitten` action.
    Kitten,
}

impl fmt::Display for AliasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasKind::Action => f.write_str("action_alias"),
            AliasKind::Kitten => f.write_str("kitten_alias"),
        }
    }
}

/// A `map` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDirective {
    pub description: String,
    /// Key sequence, e.g. `ctrl+shift+c` or the chord `ctrl+f>2`.
    pub sequence: String,
    pub action: String,
    /// Dispatch modes, e.g. `normal,application`; `None` means every mode.
    pub modes: Option<String>,
    pub only: Option<Platform>,
}

impl KeyDirective {
    pub fn new(sequence: &str, action: &str) -> Self {
        Self {
            description: String::new(),
            sequence: sequence.to_string(),
            action: action.to_string(),
            modes: None,
            only: None,
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn in_modes(mut self, modes: &str) -> Self {
        self.modes = Some(modes.to_string());
        self
    }

    pub fn only_on(mut self, platform: Platform) -> Self {
        self.only = Some(platform);
        self
    }
}

/// A `mouse_map` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseDirective {
    pub description: String,
    /// `button event modes`, e.g. `ctrl+shift+left release grabbed,ungrabbed`.
    pub trigger: String,
    pub action: String,
    pub only: Option<Platform>,
}

impl MouseDirective {
    pub fn new(trigger: &str, action: &str) -> Self {
        Self {
            description: String::new(),
            trigger: trigger.to_string(),
            action: action.to_string(),
            only: None,
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn only_on(mut self, platform: Platform) -> Self {
        self.only = Some(platform);
        self
    }
}

/// One instruction in the configuration stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    SetOption { name: String, value: String },
    AppendOption { name: String, value: String },
    BindKey(KeyDirective),
    BindMouse(MouseDirective),
    ClearAllKeyBindings,
    ClearAllMouseBindings,
    DefineAlias {
        kind: AliasKind,
        name: String,
        expansion: String,
    },
}

impl Directive {
    pub fn set(name: &str, value: &str) -> Self {
        Directive::SetOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn append(name: &str, value: &str) -> Self {
        Directive::AppendOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn bind_key(sequence: &str, action: &str) -> Self {
        Directive::BindKey(KeyDirective::new(sequence, action))
    }

    pub fn bind_mouse(trigger: &str, action: &str) -> Self {
        Directive::BindMouse(MouseDirective::new(trigger, action))
    }

    pub fn alias(kind: AliasKind, name: &str, expansion: &str) -> Self {
        Directive::DefineAlias {
            kind,
            name: name.to_string(),
            expansion: expansion.to_string(),
        }
    }

    /// Build a directive from one tokenized `key value` line.
    ///
    /// Returns `Ok(None)` for lines that have no effect, such as
    /// `clear_all_shortcuts no`.
    pub fn from_key_value(key: &str, value: &str) -> Result<Option<Directive>> {
        let value = value.trim();
        let directive = match key {
            "map" => {
                let (sequence, action) = split_first_word(value)
                    .ok_or_else(|| ResolveError::malformed(value, "map needs a key and an action"))?;
                Directive::bind_key(sequence, action)
            }
            "mouse_map" => {
                let malformed = || {
                    ResolveError::malformed(
                        value,
                        "mouse_map needs a button, an event, modes and an action",
                    )
                };
                let (button, rest) = split_first_word(value).ok_or_else(malformed)?;
                let (event, rest) = split_first_word(rest).ok_or_else(malformed)?;
                let (modes, action) = split_first_word(rest).ok_or_else(malformed)?;
                Directive::bind_mouse(&format!("{button} {event} {modes}"), action)
            }
            "clear_all_shortcuts" => {
                return Ok(truthy(key, value)?.then_some(Directive::ClearAllKeyBindings));
            }
            "clear_all_mouse_actions" => {
                return Ok(truthy(key, value)?.then_some(Directive::ClearAllMouseBindings));
            }
            "action_alias" | "kitten_alias" => {
                let kind = if key == "action_alias" {
                    AliasKind::Action
                } else {
                    AliasKind::Kitten
                };
                let (name, expansion) = split_first_word(value).ok_or_else(|| {
                    ResolveError::malformed(value, format!("{kind} needs a name and an expansion"))
                })?;
                Directive::alias(kind, name, expansion)
            }
            _ => match key.strip_prefix(ACCUMULATING_MARKER) {
                Some(name) => Directive::append(name, value),
                None => Directive::set(key, value),
            },
        };
        Ok(Some(directive))
    }

    /// Option name targeted by this directive, if it is an option directive.
    pub fn option_name(&self) -> Option<&str> {
        match self {
            Directive::SetOption { name, .. } | Directive::AppendOption { name, .. } => Some(name),
            _ => None,
        }
    }
}

fn split_first_word(s: &str) -> Option<(&str, &str)> {
    let (first, rest) = s.split_once(char::is_whitespace)?;
    let rest = rest.trim();
    (!first.is_empty() && !rest.is_empty()).then_some((first, rest))
}

fn truthy(key: &str, value: &str) -> Result<bool> {
    crate::converters::to_bool(value).map_err(|reason| ResolveError::TypeConversion {
        option: key.to_string(),
        value: value.to_string(),
        reason,
    })
}

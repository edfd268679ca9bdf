//! Keyboard dispatch modes.
//!
//! A key binding applies in one or more dispatch modes. Two bindings with the
//! same key sequence only conflict in the modes they share.

use crate::parser::ParseError;
use std::fmt;

/// Set of dispatch modes a key binding is active in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModes {
    /// Regular keyboard handling.
    pub normal: bool,
    /// Cursor keys in application mode.
    pub application: bool,
    /// The progressive keyboard protocol is active.
    pub kitty: bool,
}

impl KeyModes {
    pub const ALL: KeyModes = KeyModes {
        normal: true,
        application: true,
        kitty: true,
    };

    pub const NORMAL: KeyModes = KeyModes {
        normal: true,
        application: false,
        kitty: false,
    };

    pub const APPLICATION: KeyModes = KeyModes {
        normal: false,
        application: true,
        kitty: false,
    };

    pub const KITTY: KeyModes = KeyModes {
        normal: false,
        application: false,
        kitty: true,
    };

    pub fn is_empty(&self) -> bool {
        !(self.normal || self.application || self.kitty)
    }

    pub fn intersects(&self, other: KeyModes) -> bool {
        !self.intersection(other).is_empty()
    }

    /// True when every mode in `other` is also in `self`.
    pub fn contains(&self, other: KeyModes) -> bool {
        self.intersection(other) == other
    }

    pub fn intersection(&self, other: KeyModes) -> KeyModes {
        KeyModes {
            normal: self.normal && other.normal,
            application: self.application && other.application,
            kitty: self.kitty && other.kitty,
        }
    }

    /// Modes of `self` that are not in `other`.
    pub fn difference(&self, other: KeyModes) -> KeyModes {
        KeyModes {
            normal: self.normal && !other.normal,
            application: self.application && !other.application,
            kitty: self.kitty && !other.kitty,
        }
    }

    /// Parse a comma separated list such as `normal,application` or `all`.
    pub fn parse(s: &str) -> Result<KeyModes, ParseError> {
        let mut modes = KeyModes::default();
        for token in s.split(',').map(str::trim) {
            match token.to_lowercase().as_str() {
                "normal" => modes.normal = true,
                "application" => modes.application = true,
                "kitty" => modes.kitty = true,
                "all" => modes = KeyModes::ALL,
                "" => return Err(ParseError::new(format!("Empty mode in '{s}'"))),
                other => return Err(ParseError::new(format!("Unknown key mode: '{other}'"))),
            }
        }
        Ok(modes)
    }
}

impl fmt::Display for KeyModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == KeyModes::ALL {
            return f.write_str("all");
        }
        let names: Vec<&str> = [
            (self.normal, "normal"),
            (self.application, "application"),
            (self.kitty, "kitty"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
        f.write_str(&names.join(","))
    }
}

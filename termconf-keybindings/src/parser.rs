//! Key sequence parser.
//!
//! Parses key strings like "ctrl+shift+b" into [`KeyPress`] values and chords
//! like "ctrl+f>2" into [`KeySequence`]s. Also supports raw native key codes
//! (e.g., "ctrl+0x61") for keys that have no name.

use crate::platform::{named_key_name, parse_named_key, punctuation_char, punctuation_name};
use std::fmt;
use winit::keyboard::NamedKey;

/// Separator between the key presses of a chord.
pub const CHORD_SEPARATOR: char = '>';

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl ParseError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    /// Attach the offending text and convert into the engine error.
    pub fn into_resolve_error(self, spec: &str) -> termconf_config::ResolveError {
        termconf_config::ResolveError::malformed(spec, self.0)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Set of active modifiers for a key press or mouse button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
    pub hyper: bool,
    pub meta: bool,
    /// If true, this represents CmdOrCtrl (Cmd on macOS, Ctrl elsewhere)
    pub cmd_or_ctrl: bool,
    /// Placeholder for the configurable `kitty_mod` modifier set.
    pub kitty_mod: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether symbolic modifiers still need resolving.
    pub fn is_symbolic(&self) -> bool {
        self.cmd_or_ctrl || self.kitty_mod
    }

    pub fn union(self, other: Modifiers) -> Modifiers {
        Modifiers {
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            shift: self.shift || other.shift,
            super_key: self.super_key || other.super_key,
            hyper: self.hyper || other.hyper,
            meta: self.meta || other.meta,
            cmd_or_ctrl: self.cmd_or_ctrl || other.cmd_or_ctrl,
            kitty_mod: self.kitty_mod || other.kitty_mod,
        }
    }

    /// Set the flag named by `token`; returns false if it is not a modifier.
    fn set_from_token(&mut self, token: &str) -> bool {
        match token.to_lowercase().as_str() {
            "ctrl" | "control" | "⌃" => self.ctrl = true,
            "alt" | "opt" | "option" | "⌥" => self.alt = true,
            "shift" | "⇧" => self.shift = true,
            "super" | "cmd" | "command" | "⌘" => self.super_key = true,
            "hyper" => self.hyper = true,
            "meta" => self.meta = true,
            "cmd_or_ctrl" | "cmdorctrl" => self.cmd_or_ctrl = true,
            "kitty_mod" => self.kitty_mod = true,
            _ => return false,
        }
        true
    }

    fn names(&self) -> Vec<&'static str> {
        let mut parts = Vec::new();
        if self.kitty_mod {
            parts.push("kitty_mod");
        }
        if self.cmd_or_ctrl {
            parts.push("cmd_or_ctrl");
        }
        if self.ctrl {
            parts.push("ctrl");
        }
        if self.alt {
            parts.push("alt");
        }
        if self.shift {
            parts.push("shift");
        }
        if self.super_key {
            parts.push("super");
        }
        if self.hyper {
            parts.push("hyper");
        }
        if self.meta {
            parts.push("meta");
        }
        parts
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join("+"))
    }
}

/// The actual key (a character, a named key or a native code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// A single character key, stored lower-cased (e.g., 'a', '1', '[')
    Character(char),
    /// A named key (e.g., F1, Enter, PageUp)
    Named(NamedKey),
    /// A raw platform key code, for keys with no name.
    Native(u32),
}

impl fmt::Display for ParsedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedKey::Character(c) => match punctuation_name(*c) {
                Some(name) => f.write_str(name),
                None => write!(f, "{c}"),
            },
            ParsedKey::Named(n) => match named_key_name(*n) {
                Some(name) => f.write_str(name),
                None => write!(f, "{n:?}"),
            },
            ParsedKey::Native(code) => write!(f, "0x{code:x}"),
        }
    }
}

/// A single key press: modifiers plus a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// An ordered chord of one or more key presses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySequence(Vec<KeyPress>);

impl KeySequence {
    /// Build a sequence; `None` if `presses` is empty.
    pub fn new(presses: Vec<KeyPress>) -> Option<Self> {
        (!presses.is_empty()).then_some(Self(presses))
    }

    pub fn presses(&self) -> &[KeyPress] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a sequence holds at least one press.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_chord(&self) -> bool {
        self.0.len() > 1
    }

    /// Whether `self` is a strict prefix of `other`.
    pub fn is_prefix_of(&self, other: &KeySequence) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    pub(crate) fn map_presses(&self, f: impl Fn(KeyPress) -> KeyPress) -> KeySequence {
        KeySequence(self.0.iter().copied().map(f).collect())
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(&CHORD_SEPARATOR.to_string()))
    }
}

/// Split `s` on `+` into modifiers and an optional trailing non-modifier token.
fn split_modifiers(s: &str) -> Result<(Modifiers, Option<&str>), ParseError> {
    let parts: Vec<&str> = s.split('+').map(str::trim).collect();

    let mut modifiers = Modifiers::default();
    let mut rest = None;

    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            return Err(ParseError::new(format!("Empty component in '{s}'")));
        }
        let is_last = i == parts.len() - 1;
        if modifiers.set_from_token(part) {
            continue;
        }
        if !is_last {
            return Err(ParseError::new(format!(
                "Unknown modifier '{part}' (the key must come last)"
            )));
        }
        rest = Some(*part);
    }

    Ok((modifiers, rest))
}

/// Parse a key press string into a [`KeyPress`].
///
/// Supported format: "modifier+modifier+key"
///
/// Modifiers:
/// - `ctrl`, `control` - Control key
/// - `alt`, `opt`, `option` - Alt/Option key
/// - `shift` - Shift key
/// - `super`, `cmd`, `command` - Super/Cmd key
/// - `hyper`, `meta`
/// - `cmd_or_ctrl` - Cmd on macOS, Ctrl on other platforms
/// - `kitty_mod` - the configurable shortcut modifier set
///
/// Keys:
/// - Single characters: `a`, `1`, `[`, etc. (case-insensitive)
/// - Named keys: `f1`-`f35`, `enter`, `escape`, `page_up`, `tab`, etc.
/// - Punctuation names: `plus`, `minus`, `equal`, `comma`, ...
/// - Native key codes: `0x61`
pub fn parse_key_press(s: &str) -> Result<KeyPress, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::new("Empty key press"));
    }

    let (modifiers, key_part) = split_modifiers(s)?;
    let key_str = key_part.ok_or_else(|| {
        ParseError::new("Key press ends with modifier, no key specified")
    })?;
    let key = parse_key(key_str)?;

    Ok(KeyPress { modifiers, key })
}

/// Parse a key string into a ParsedKey.
fn parse_key(s: &str) -> Result<ParsedKey, ParseError> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16)
            .map(ParsedKey::Native)
            .map_err(|_| ParseError::new(format!("Invalid native key code: '{s}'")));
    }

    // Try named keys first (case-insensitive)
    if let Some(named) = parse_named_key(s) {
        return Ok(ParsedKey::Named(named));
    }

    if let Some(c) = punctuation_char(s) {
        return Ok(ParsedKey::Character(c));
    }

    // Single character
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(ParsedKey::Character(c.to_lowercase().next().unwrap_or(c)));
    }

    Err(ParseError::new(format!("Unknown key: '{s}'")))
}

/// Parse a chord like "ctrl+f>2" into a [`KeySequence`].
pub fn parse_key_sequence(s: &str) -> Result<KeySequence, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new("Empty key sequence"));
    }

    let mut presses = Vec::new();
    for part in trimmed.split(CHORD_SEPARATOR) {
        let press = parse_key_press(part).map_err(|e| ParseError::new(format!("'{part}': {e}")))?;
        presses.push(press);
    }

    KeySequence::new(presses).ok_or_else(|| ParseError::new("Empty key sequence"))
}

/// Parse a modifier-only string such as the value of `kitty_mod`.
pub fn parse_modifiers(s: &str) -> Result<Modifiers, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Modifiers::default());
    }
    match split_modifiers(trimmed)? {
        (mods, None) => Ok(mods),
        (_, Some(other)) => Err(ParseError::new(format!("'{other}' is not a modifier"))),
    }
}

/// Split a mouse button token such as "ctrl+shift+left" into modifiers and the button name.
pub(crate) fn split_button(s: &str) -> Result<(Modifiers, &str), ParseError> {
    let (mods, rest) = split_modifiers(s.trim())?;
    let button = rest.ok_or_else(|| ParseError::new(format!("No button in '{s}'")))?;
    Ok((mods, button))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_key() {
        let press = parse_key_press("a").unwrap();
        assert!(press.modifiers.is_empty());
        assert_eq!(press.key, ParsedKey::Character('a'));
    }

    #[test]
    fn test_ctrl_shift_key() {
        let press = parse_key_press("ctrl+shift+b").unwrap();
        assert!(press.modifiers.ctrl);
        assert!(press.modifiers.shift);
        assert_eq!(press.key, ParsedKey::Character('b'));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            parse_key_press("Ctrl+Shift+A").unwrap(),
            parse_key_press("ctrl+shift+a").unwrap()
        );
    }

    #[test]
    fn test_modifier_aliases() {
        assert!(parse_key_press("control+a").unwrap().modifiers.ctrl);
        assert!(parse_key_press("opt+a").unwrap().modifiers.alt);
        assert!(parse_key_press("option+a").unwrap().modifiers.alt);
        assert!(parse_key_press("cmd+a").unwrap().modifiers.super_key);
        assert!(parse_key_press("⌘+a").unwrap().modifiers.super_key);
        assert!(parse_key_press("kitty_mod+a").unwrap().modifiers.kitty_mod);
        assert!(parse_key_press("cmd_or_ctrl+a").unwrap().modifiers.cmd_or_ctrl);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            parse_key_press("page_up").unwrap().key,
            ParsedKey::Named(NamedKey::PageUp)
        );
        assert_eq!(
            parse_key_press("PageUp").unwrap().key,
            ParsedKey::Named(NamedKey::PageUp)
        );
        assert_eq!(
            parse_key_press("kitty_mod+f11").unwrap().key,
            ParsedKey::Named(NamedKey::F11)
        );
        assert_eq!(
            parse_key_press("return").unwrap().key,
            ParsedKey::Named(NamedKey::Enter)
        );
    }

    #[test]
    fn test_punctuation_names() {
        assert_eq!(
            parse_key_press("kitty_mod+plus").unwrap().key,
            ParsedKey::Character('+')
        );
        assert_eq!(
            parse_key_press("kitty_mod+equal").unwrap().key,
            ParsedKey::Character('=')
        );
        assert_eq!(parse_key_press("cmd+,").unwrap().key, ParsedKey::Character(','));
    }

    #[test]
    fn test_native_code() {
        let press = parse_key_press("ctrl+0x61").unwrap();
        assert!(press.modifiers.ctrl);
        assert_eq!(press.key, ParsedKey::Native(0x61));
        assert!(parse_key_press("0xzz").is_err());
    }

    #[test]
    fn test_invalid() {
        assert!(parse_key_press("").is_err());
        assert!(parse_key_press("ctrl").is_err());
        assert!(parse_key_press("ctrl+shift").is_err());
        assert!(parse_key_press("ctrl+unknownkey").is_err());
        assert!(parse_key_press("ctrl++").is_err());
        assert!(parse_key_press("a+ctrl").is_err());
    }

    #[test]
    fn test_display_normalizes() {
        assert_eq!(parse_key_press("Shift+Ctrl+A").unwrap().to_string(), "ctrl+shift+a");
        assert_eq!(parse_key_press("kitty_mod+page_up").unwrap().to_string(), "kitty_mod+page_up");
        assert_eq!(parse_key_press("ctrl+plus").unwrap().to_string(), "ctrl+plus");
    }

    #[test]
    fn test_chord() {
        let seq = parse_key_sequence("ctrl+f>2").unwrap();
        assert_eq!(seq.len(), 2);
        assert!(seq.is_chord());
        assert_eq!(seq.presses()[1].key, ParsedKey::Character('2'));
        assert_eq!(seq.to_string(), "ctrl+f>2");
    }

    #[test]
    fn test_chord_errors() {
        assert!(parse_key_sequence("").is_err());
        assert!(parse_key_sequence("ctrl+f>").is_err());
        assert!(parse_key_sequence(">a").is_err());
    }

    #[test]
    fn test_prefix() {
        let short = parse_key_sequence("kitty_mod+p").unwrap();
        let long = parse_key_sequence("kitty_mod+p>f").unwrap();
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(!short.is_prefix_of(&short));
    }

    #[test]
    fn test_parse_modifiers() {
        let mods = parse_modifiers("ctrl+shift").unwrap();
        assert!(mods.ctrl && mods.shift && !mods.alt);
        assert!(parse_modifiers("ctrl+a").is_err());
        assert!(parse_modifiers("").unwrap().is_empty());
    }

    #[test]
    fn test_into_resolve_error() {
        let err = parse_key_press("ctrl+").unwrap_err().into_resolve_error("ctrl+");
        assert!(matches!(
            err,
            termconf_config::ResolveError::MalformedBindingSpec { .. }
        ));
    }
}

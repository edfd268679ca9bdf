//! Platform-specific keybinding resolution.
//!
//! Contains:
//! - `cmd_or_ctrl` and `kitty_mod` modifier expansion
//! - Named key table (string ↔ `NamedKey`)
//! - Punctuation name table (string ↔ `char`)

use crate::parser::Modifiers;
use termconf_config::Platform;
use winit::keyboard::NamedKey;

/// Resolve the `CmdOrCtrl` modifier for `platform`.
///
/// Returns `(expected_ctrl, expected_super)` given a `cmd_or_ctrl` flag and the
/// raw `ctrl`/`super_key` values from the parsed press.
///
/// - macOS: `CmdOrCtrl` maps to Super (Cmd key).
/// - All other platforms: `CmdOrCtrl` maps to Ctrl.
#[inline]
pub fn resolve_cmd_or_ctrl(
    platform: Platform,
    cmd_or_ctrl: bool,
    ctrl: bool,
    super_key: bool,
) -> (bool, bool) {
    match (cmd_or_ctrl, platform) {
        (false, _) => (ctrl, super_key),
        (true, Platform::Macos) => (ctrl, true),
        (true, _) => (true, super_key),
    }
}

/// Replace symbolic modifiers with concrete ones.
///
/// `kitty_mod` expands to the concrete flags of `kitty_mod`; `cmd_or_ctrl`
/// expands per [`resolve_cmd_or_ctrl`]. The result has no symbolic flags.
pub fn resolve_modifiers(mods: Modifiers, platform: Platform, kitty_mod: Modifiers) -> Modifiers {
    let mut resolved = mods;
    if resolved.kitty_mod {
        resolved.kitty_mod = false;
        resolved = resolved.union(Modifiers {
            kitty_mod: false,
            ..kitty_mod
        });
    }
    let (ctrl, super_key) =
        resolve_cmd_or_ctrl(platform, resolved.cmd_or_ctrl, resolved.ctrl, resolved.super_key);
    Modifiers {
        ctrl,
        super_key,
        cmd_or_ctrl: false,
        ..resolved
    }
}

/// Canonical names of functional keys. The first name for a key is used for display.
const NAMED_KEYS: &[(&str, NamedKey)] = &[
    ("escape", NamedKey::Escape),
    ("esc", NamedKey::Escape),
    ("enter", NamedKey::Enter),
    ("return", NamedKey::Enter),
    ("tab", NamedKey::Tab),
    ("backspace", NamedKey::Backspace),
    ("insert", NamedKey::Insert),
    ("ins", NamedKey::Insert),
    ("delete", NamedKey::Delete),
    ("del", NamedKey::Delete),
    ("right", NamedKey::ArrowRight),
    ("arrowright", NamedKey::ArrowRight),
    ("left", NamedKey::ArrowLeft),
    ("arrowleft", NamedKey::ArrowLeft),
    ("down", NamedKey::ArrowDown),
    ("arrowdown", NamedKey::ArrowDown),
    ("up", NamedKey::ArrowUp),
    ("arrowup", NamedKey::ArrowUp),
    ("page_up", NamedKey::PageUp),
    ("pgup", NamedKey::PageUp),
    ("page_down", NamedKey::PageDown),
    ("pgdn", NamedKey::PageDown),
    ("home", NamedKey::Home),
    ("end", NamedKey::End),
    ("space", NamedKey::Space),
    ("caps_lock", NamedKey::CapsLock),
    ("scroll_lock", NamedKey::ScrollLock),
    ("num_lock", NamedKey::NumLock),
    ("print_screen", NamedKey::PrintScreen),
    ("pause", NamedKey::Pause),
    ("menu", NamedKey::ContextMenu),
    ("f1", NamedKey::F1),
    ("f2", NamedKey::F2),
    ("f3", NamedKey::F3),
    ("f4", NamedKey::F4),
    ("f5", NamedKey::F5),
    ("f6", NamedKey::F6),
    ("f7", NamedKey::F7),
    ("f8", NamedKey::F8),
    ("f9", NamedKey::F9),
    ("f10", NamedKey::F10),
    ("f11", NamedKey::F11),
    ("f12", NamedKey::F12),
    ("f13", NamedKey::F13),
    ("f14", NamedKey::F14),
    ("f15", NamedKey::F15),
    ("f16", NamedKey::F16),
    ("f17", NamedKey::F17),
    ("f18", NamedKey::F18),
    ("f19", NamedKey::F19),
    ("f20", NamedKey::F20),
    ("f21", NamedKey::F21),
    ("f22", NamedKey::F22),
    ("f23", NamedKey::F23),
    ("f24", NamedKey::F24),
    ("f25", NamedKey::F25),
    ("f26", NamedKey::F26),
    ("f27", NamedKey::F27),
    ("f28", NamedKey::F28),
    ("f29", NamedKey::F29),
    ("f30", NamedKey::F30),
    ("f31", NamedKey::F31),
    ("f32", NamedKey::F32),
    ("f33", NamedKey::F33),
    ("f34", NamedKey::F34),
    ("f35", NamedKey::F35),
];

/// Punctuation keys that are awkward to write literally in a binding.
const PUNCTUATION: &[(&str, char)] = &[
    ("plus", '+'),
    ("minus", '-'),
    ("equal", '='),
    ("comma", ','),
    ("period", '.'),
    ("slash", '/'),
    ("backslash", '\\'),
    ("semicolon", ';'),
    ("apostrophe", '\''),
    ("grave", '`'),
    ("left_bracket", '['),
    ("right_bracket", ']'),
    ("less", '<'),
    ("greater", '>'),
];

/// Lower-case and drop underscores, so `Page_Up`, `page_up` and `PageUp` compare equal.
fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse a named key string into a [`NamedKey`].
///
/// Matching is case-insensitive and ignores underscores. Returns `None` for
/// unrecognised strings.
pub fn parse_named_key(s: &str) -> Option<NamedKey> {
    let folded = fold(s);
    NAMED_KEYS
        .iter()
        .find(|(name, _)| fold(name) == folded)
        .map(|(_, key)| *key)
}

/// Canonical name for a [`NamedKey`].
pub fn named_key_name(key: NamedKey) -> Option<&'static str> {
    NAMED_KEYS
        .iter()
        .find(|(_, k)| *k == key)
        .map(|(name, _)| *name)
}

/// Character for a punctuation name such as `plus`.
pub fn punctuation_char(s: &str) -> Option<char> {
    let folded = fold(s);
    PUNCTUATION
        .iter()
        .find(|(name, _)| fold(name) == folded)
        .map(|(_, c)| *c)
}

/// Name used when displaying a punctuation character.
///
/// Only characters that would be ambiguous inside a binding string get a name.
pub fn punctuation_name(c: char) -> Option<&'static str> {
    match c {
        '+' => Some("plus"),
        '>' => Some("greater"),
        _ => None,
    }
}

//! Default key and mouse bindings, expressed as directives.
//!
//! These are prepended to a user's directive stream, so user bindings
//! override them and `clear_all_shortcuts` / `clear_all_mouse_actions`
//! discard them.

use crate::directive::{Directive, KeyDirective, MouseDirective};
use crate::platform::Platform;

/// `(description, sequence, action, only)`
type KeyRow = (&'static str, &'static str, &'static str, Option<Platform>);
/// `(description, trigger, action)`
type MouseRow = (&'static str, &'static str, &'static str);

const MACOS: Option<Platform> = Some(Platform::Macos);

const KEYS: &[KeyRow] = &[
    // Clipboard
    ("Copy to clipboard", "kitty_mod+c", "copy_to_clipboard", None),
    ("Copy to clipboard", "cmd+c", "copy_to_clipboard", MACOS),
    ("Paste from clipboard", "kitty_mod+v", "paste_from_clipboard", None),
    ("Paste from clipboard", "cmd+v", "paste_from_clipboard", MACOS),
    ("Paste from selection", "kitty_mod+s", "paste_from_selection", None),
    ("Paste from selection", "shift+insert", "paste_from_selection", None),
    ("Pass selection to program", "kitty_mod+o", "pass_selection_to_program", None),
    // Scrolling
    ("Scroll line up", "kitty_mod+up", "scroll_line_up", None),
    ("Scroll line up", "kitty_mod+k", "scroll_line_up", None),
    ("Scroll line up", "opt+cmd+page_up", "scroll_line_up", MACOS),
    ("Scroll line up", "cmd+up", "scroll_line_up", MACOS),
    ("Scroll line down", "kitty_mod+down", "scroll_line_down", None),
    ("Scroll line down", "kitty_mod+j", "scroll_line_down", None),
    ("Scroll line down", "opt+cmd+page_down", "scroll_line_down", MACOS),
    ("Scroll line down", "cmd+down", "scroll_line_down", MACOS),
    ("Scroll page up", "kitty_mod+page_up", "scroll_page_up", None),
    ("Scroll page up", "cmd+page_up", "scroll_page_up", MACOS),
    ("Scroll page down", "kitty_mod+page_down", "scroll_page_down", None),
    ("Scroll page down", "cmd+page_down", "scroll_page_down", MACOS),
    ("Scroll to top", "kitty_mod+home", "scroll_home", None),
    ("Scroll to bottom", "kitty_mod+end", "scroll_end", None),
    ("Browse scrollback buffer in pager", "kitty_mod+h", "show_scrollback", None),
    // Windows
    ("New window", "kitty_mod+enter", "new_window", None),
    ("New window", "cmd+enter", "new_window", MACOS),
    ("New OS window", "kitty_mod+n", "new_os_window", None),
    ("New OS window", "cmd+n", "new_os_window", MACOS),
    ("Close window", "kitty_mod+w", "close_window", None),
    ("Close window", "shift+cmd+d", "close_window", MACOS),
    ("Next window", "kitty_mod+]", "next_window", None),
    ("Previous window", "kitty_mod+[", "previous_window", None),
    // Tabs
    ("Next tab", "kitty_mod+right", "next_tab", None),
    ("Next tab", "ctrl+tab", "next_tab", None),
    ("Previous tab", "kitty_mod+left", "previous_tab", None),
    ("Previous tab", "ctrl+shift+tab", "previous_tab", None),
    ("New tab", "kitty_mod+t", "new_tab", None),
    ("New tab", "cmd+t", "new_tab", MACOS),
    ("Close tab", "kitty_mod+q", "close_tab", None),
    ("Close tab", "cmd+w", "close_tab", MACOS),
    // Layout
    ("Next layout", "kitty_mod+l", "next_layout", None),
    // Font sizes
    ("Increase font size", "kitty_mod+equal", "change_font_size all +2.0", None),
    ("Increase font size", "kitty_mod+plus", "change_font_size all +2.0", None),
    ("Increase font size", "cmd+plus", "change_font_size all +2.0", MACOS),
    ("Decrease font size", "kitty_mod+minus", "change_font_size all -2.0", None),
    ("Decrease font size", "cmd+minus", "change_font_size all -2.0", MACOS),
    ("Reset font size", "kitty_mod+backspace", "change_font_size all 0", None),
    ("Reset font size", "cmd+0", "change_font_size all 0", MACOS),
    // Select and act on visible text
    ("Open URL", "kitty_mod+e", "open_url_with_hints", None),
    ("Insert selected path", "kitty_mod+p>f", "kitten hints --type path --program -", None),
    ("Open selected path", "kitty_mod+p>shift+f", "kitten hints --type path", None),
    ("Insert selected line", "kitty_mod+p>l", "kitten hints --type line --program -", None),
    // Miscellaneous
    ("Toggle fullscreen", "kitty_mod+f11", "toggle_fullscreen", None),
    ("Toggle fullscreen", "ctrl+cmd+f", "toggle_fullscreen", MACOS),
    ("Unicode input", "kitty_mod+u", "kitten unicode_input", None),
    ("Edit config file", "kitty_mod+f2", "edit_config_file", None),
    ("Edit config file", "cmd+,", "edit_config_file", MACOS),
    ("Reload config file", "kitty_mod+f5", "load_config_file", None),
    ("Reload config file", "ctrl+cmd+,", "load_config_file", MACOS),
    ("Debug config", "kitty_mod+f6", "debug_config", None),
    ("Debug config", "opt+cmd+,", "debug_config", MACOS),
    ("Reset the terminal", "kitty_mod+delete", "clear_terminal reset active", None),
    ("Clear to cursor line", "cmd+k", "clear_terminal to_cursor active", MACOS),
];

const MOUSE: &[MouseRow] = &[
    (
        "Click the link under the mouse or move the cursor",
        "left click ungrabbed",
        "mouse_handle_click selection link prompt",
    ),
    (
        "Click the link under the mouse or move the cursor even when grabbed",
        "shift+left click grabbed,ungrabbed",
        "mouse_handle_click selection link prompt",
    ),
    (
        "Click the link under the mouse cursor",
        "ctrl+shift+left release grabbed,ungrabbed",
        "mouse_handle_click link",
    ),
    (
        "Discard press event for link click",
        "ctrl+shift+left press grabbed",
        "discard_event",
    ),
    (
        "Paste from the primary selection",
        "middle release ungrabbed",
        "paste_from_selection",
    ),
    (
        "Start selecting text",
        "left press ungrabbed",
        "mouse_selection normal",
    ),
    (
        "Start selecting text in a rectangle",
        "ctrl+alt+left press ungrabbed",
        "mouse_selection rectangle",
    ),
    (
        "Select a word",
        "left doublepress ungrabbed",
        "mouse_selection word",
    ),
    (
        "Select a line",
        "left triplepress ungrabbed",
        "mouse_selection line",
    ),
    (
        "Select line from point",
        "ctrl+alt+left triplepress ungrabbed",
        "mouse_selection line_from_point",
    ),
    (
        "Extend the current selection",
        "right press ungrabbed",
        "mouse_selection extend",
    ),
    (
        "Paste from the primary selection even when grabbed",
        "shift+middle release ungrabbed,grabbed",
        "paste_selection",
    ),
    (
        "Discard press event for middle click paste",
        "shift+middle press grabbed",
        "discard_event",
    ),
    (
        "Start selecting text even when grabbed",
        "shift+left press ungrabbed,grabbed",
        "mouse_selection normal",
    ),
    (
        "Start selecting text in a rectangle even when grabbed",
        "ctrl+shift+alt+left press ungrabbed,grabbed",
        "mouse_selection rectangle",
    ),
    (
        "Select a word even when grabbed",
        "shift+left doublepress ungrabbed,grabbed",
        "mouse_selection word",
    ),
    (
        "Select a line even when grabbed",
        "shift+left triplepress ungrabbed,grabbed",
        "mouse_selection line",
    ),
    (
        "Select line from point even when grabbed",
        "ctrl+shift+alt+left triplepress ungrabbed,grabbed",
        "mouse_selection line_from_point",
    ),
    (
        "Extend the current selection even when grabbed",
        "shift+right press ungrabbed,grabbed",
        "mouse_selection extend",
    ),
    (
        "Show clicked command output in pager",
        "ctrl+shift+right press ungrabbed",
        "mouse_show_command_output",
    ),
];

/// Default `map` directives, in declaration order.
pub fn key_directives() -> Vec<Directive> {
    KEYS.iter()
        .map(|&(description, sequence, action, only)| {
            let mut binding = KeyDirective::new(sequence, action).described(description);
            binding.only = only;
            Directive::BindKey(binding)
        })
        .collect()
}

/// Default `mouse_map` directives, in declaration order.
pub fn mouse_directives() -> Vec<Directive> {
    MOUSE
        .iter()
        .map(|&(description, trigger, action)| {
            Directive::BindMouse(MouseDirective::new(trigger, action).described(description))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_directives_carry_platform() {
        let keys = key_directives();
        assert_eq!(keys.len(), KEYS.len());
        let macos_only = keys
            .iter()
            .filter(|d| matches!(d, Directive::BindKey(k) if k.only == MACOS))
            .count();
        assert!(macos_only > 0);
        assert!(macos_only < keys.len());
    }

    #[test]
    fn test_mouse_directives() {
        let mouse = mouse_directives();
        assert_eq!(mouse.len(), MOUSE.len());
        assert!(mouse.iter().all(|d| matches!(d, Directive::BindMouse(_))));
    }
}

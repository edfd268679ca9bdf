//! Built-in option catalog.
//!
//! Declarations are `(name, default, converter)`; a leading `+` on the name
//! declares an accumulating option.

use crate::schema::OptionSpec;

// ── Fonts ──────────────────────────────────────────────────────────────────
const FONTS: &[(&str, &str, &str)] = &[
    ("font_family", "monospace", "str"),
    ("bold_font", "auto", "str"),
    ("italic_font", "auto", "str"),
    ("bold_italic_font", "auto", "str"),
    ("font_size", "11.0", "positive_float"),
    ("force_ltr", "no", "to_bool"),
    ("+symbol_map", "", "str"),
    ("+narrow_symbols", "", "str"),
    ("disable_ligatures", "never", "str"),
    ("+font_features", "", "str"),
    ("+modify_font", "", "str"),
    ("box_drawing_scale", "0.001, 1, 1.5, 2", "str"),
];

// ── Cursor ─────────────────────────────────────────────────────────────────
const CURSOR: &[(&str, &str, &str)] = &[
    ("cursor", "#cccccc", "to_color_or_none"),
    ("cursor_text_color", "#111111", "to_color_or_none"),
    ("cursor_shape", "block", "to_cursor_shape"),
    ("cursor_beam_thickness", "1.5", "positive_float"),
    ("cursor_underline_thickness", "2.0", "positive_float"),
    ("cursor_blink_interval", "-1", "float"),
    ("cursor_stop_blinking_after", "15.0", "positive_float"),
];

// ── Scrollback & mouse ─────────────────────────────────────────────────────
const SCROLLBACK_AND_MOUSE: &[(&str, &str, &str)] = &[
    ("scrollback_lines", "2000", "int"),
    (
        "scrollback_pager",
        "less --chop-long-lines --RAW-CONTROL-CHARS +INPUT_LINE_NUMBER",
        "to_cmdline",
    ),
    ("wheel_scroll_multiplier", "5.0", "float"),
    ("touch_scroll_multiplier", "1.0", "float"),
    ("mouse_hide_wait", "3.0", "float"),
    ("url_color", "#0087bd", "to_color"),
    ("url_style", "curly", "str"),
    ("open_url_with", "default", "to_cmdline"),
    ("detect_urls", "yes", "to_bool"),
    ("copy_on_select", "no", "str"),
    ("strip_trailing_spaces", "never", "str"),
    ("click_interval", "-1.0", "float"),
    ("focus_follows_mouse", "no", "to_bool"),
    ("pointer_shape_when_grabbed", "arrow", "str"),
    ("pointer_shape_when_dragging", "beam", "str"),
];

// ── Performance & bell ─────────────────────────────────────────────────────
const PERFORMANCE_AND_BELL: &[(&str, &str, &str)] = &[
    ("repaint_delay", "10", "positive_int"),
    ("input_delay", "3", "positive_int"),
    ("sync_to_monitor", "yes", "to_bool"),
    ("enable_audio_bell", "yes", "to_bool"),
    ("visual_bell_duration", "0.0", "positive_float"),
];

// ── Window layout & tab bar ────────────────────────────────────────────────
const WINDOW_AND_TABS: &[(&str, &str, &str)] = &[
    ("remember_window_size", "yes", "to_bool"),
    ("initial_window_width", "640", "str"),
    ("initial_window_height", "400", "str"),
    ("enabled_layouts", "*", "str"),
    ("window_border_width", "0.5pt", "str"),
    ("draw_minimal_borders", "yes", "to_bool"),
    ("window_padding_width", "0", "str"),
    ("placement_strategy", "center", "str"),
    ("active_border_color", "#00ff00", "to_color_or_none"),
    ("inactive_border_color", "#cccccc", "to_color"),
    ("bell_border_color", "#ff5a00", "to_color"),
    ("hide_window_decorations", "no", "str"),
    ("confirm_os_window_close", "-1", "int"),
    ("tab_bar_edge", "bottom", "str"),
    ("tab_bar_style", "fade", "str"),
    ("tab_separator", "\" ┇\"", "str"),
    ("active_tab_foreground", "#000", "to_color"),
    ("active_tab_background", "#eee", "to_color"),
    ("inactive_tab_foreground", "#444", "to_color"),
    ("inactive_tab_background", "#999", "to_color"),
    ("tab_bar_background", "none", "to_color_or_none"),
];

// ── Color scheme (the 256-entry table is appended separately) ──────────────
const COLORS: &[(&str, &str, &str)] = &[
    ("foreground", "#dddddd", "to_color"),
    ("background", "#000000", "to_color"),
    ("background_opacity", "1.0", "unit_float"),
    ("dim_opacity", "0.75", "unit_float"),
    ("selection_foreground", "#000000", "to_color_or_none"),
    ("selection_background", "#fffacd", "to_color_or_none"),
    ("mark1_foreground", "black", "to_color"),
    ("mark1_background", "#98d3cb", "to_color"),
    ("mark2_foreground", "black", "to_color"),
    ("mark2_background", "#f2dcd3", "to_color"),
    ("mark3_foreground", "black", "to_color"),
    ("mark3_background", "#f274bc", "to_color"),
];

// ── Advanced, OS specific & keyboard ───────────────────────────────────────
const ADVANCED: &[(&str, &str, &str)] = &[
    ("shell", ".", "str"),
    ("editor", ".", "str"),
    ("close_on_child_death", "no", "to_bool"),
    ("allow_remote_control", "no", "str"),
    ("+remote_control_password", "", "str"),
    ("+env", "", "env"),
    ("+watcher", "", "store_multiple"),
    ("+exe_search_path", "", "store_multiple"),
    ("update_check_interval", "24", "float"),
    ("startup_session", "none", "config_or_absolute_path"),
    ("shell_integration", "enabled", "str"),
    ("term", "xterm-kitty", "str"),
    ("macos_option_as_alt", "no", "str"),
    ("macos_show_window_title_in", "all", "str"),
    ("linux_display_server", "auto", "str"),
    ("kitty_mod", "ctrl+shift", "to_modifiers"),
];

/// Every built-in option, in catalog order.
pub fn option_specs() -> Vec<OptionSpec> {
    let groups = [
        FONTS,
        CURSOR,
        SCROLLBACK_AND_MOUSE,
        PERFORMANCE_AND_BELL,
        WINDOW_AND_TABS,
        COLORS,
    ];
    let mut specs: Vec<OptionSpec> = groups
        .iter()
        .flat_map(|group| group.iter())
        .map(|&(name, default, converter)| declare(name, default, converter))
        .collect();

    specs.extend(
        super::colors::color_table_defaults()
            .into_iter()
            .map(|(name, default)| OptionSpec::scalar(&name, &default, "to_color")),
    );
    specs.extend(
        ADVANCED
            .iter()
            .map(|&(name, default, converter)| declare(name, default, converter)),
    );
    specs
}

/// Accumulating built-ins never seed their list with the default text.
fn declare(name: &str, default: &str, converter: &str) -> OptionSpec {
    let spec = OptionSpec::parse_declaration(name, default, converter);
    if spec.is_accumulating() {
        spec.without_default_entry()
    } else {
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::ConverterRegistry;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique() {
        let specs = option_specs();
        let names: HashSet<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), specs.len());
    }

    #[test]
    fn test_every_default_converts() {
        let converters = ConverterRegistry::with_builtins();
        for spec in option_specs() {
            if spec.default.is_empty() && spec.is_accumulating() {
                continue;
            }
            assert!(
                converters.convert(&spec.converter, &spec.default).is_ok(),
                "default for {} does not convert with {}",
                spec.name,
                spec.converter
            );
        }
    }

    #[test]
    fn test_accumulating_options_start_empty() {
        for spec in option_specs().iter().filter(|s| s.is_accumulating()) {
            assert!(!spec.seeds_list(), "{} seeds its list", spec.name);
        }
    }
}

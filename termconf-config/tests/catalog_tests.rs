//! Integration tests for termconf-config.
//!
//! These tests exercise the built-in catalog as a whole: schema, converters,
//! deprecations and the `key value` directive bridge working together.

use termconf_config::{
    ConverterRegistry, DeprecationTable, Directive, OptionValue, ResolveError, SchemaRegistry,
    StorageKind, defaults,
};

// ---------------------------------------------------------------------------
// Schema + converters
// ---------------------------------------------------------------------------

#[test]
fn every_builtin_option_has_a_registered_converter() {
    let schema = SchemaRegistry::with_defaults();
    let converters = ConverterRegistry::with_builtins();
    for spec in schema.iter() {
        assert!(
            converters.contains(&spec.converter),
            "{} uses unregistered converter {}",
            spec.name,
            spec.converter
        );
    }
}

#[test]
fn builtin_defaults_convert_to_expected_types() {
    let schema = SchemaRegistry::with_defaults();
    let converters = ConverterRegistry::with_builtins();

    let convert_default = |name: &str| {
        let spec = schema.lookup(name).unwrap();
        converters.convert(&spec.converter, &spec.default).unwrap()
    };

    assert_eq!(convert_default("repaint_delay"), OptionValue::Int(10));
    assert_eq!(convert_default("font_size"), OptionValue::Float(11.0));
    assert_eq!(convert_default("detect_urls"), OptionValue::Bool(true));
    assert_eq!(convert_default("tab_bar_background"), OptionValue::None);
    assert_eq!(convert_default("kitty_mod"), OptionValue::Text("ctrl+shift".into()));
    assert_eq!(
        convert_default("color160").as_color().map(|c| c.to_string()),
        Some("#d70000".to_string())
    );
}

#[test]
fn accumulating_options_are_marked() {
    let schema = SchemaRegistry::with_defaults();
    for name in ["env", "symbol_map", "font_features", "modify_font", "watcher"] {
        assert_eq!(
            schema.lookup(name).unwrap().kind,
            StorageKind::Accumulating,
            "{name}"
        );
    }
    assert_eq!(
        schema.lookup("repaint_delay").unwrap().kind,
        StorageKind::Scalar
    );
}

#[test]
fn unknown_option_lookup_fails() {
    let schema = SchemaRegistry::with_defaults();
    assert!(matches!(
        schema.lookup("definitely_not_an_option"),
        Err(ResolveError::UnknownOption { .. })
    ));
}

// ---------------------------------------------------------------------------
// Deprecations target real options
// ---------------------------------------------------------------------------

#[test]
fn deprecation_targets_exist_in_schema() {
    let schema = SchemaRegistry::with_defaults();
    let table = DeprecationTable::with_builtins();
    for name in [
        "x11_hide_window_decorations",
        "macos_hide_titlebar",
        "macos_show_window_title_in_menubar",
        "adjust_line_height",
        "adjust_column_width",
        "adjust_baseline",
    ] {
        for canonical in table.canonical_names(name).unwrap() {
            assert!(schema.contains(canonical), "{name} -> {canonical}");
        }
    }
}

#[test]
fn deprecated_names_are_not_schema_options() {
    let schema = SchemaRegistry::with_defaults();
    assert!(!schema.contains("adjust_line_height"));
    assert!(!schema.contains("send_text"));
}

// ---------------------------------------------------------------------------
// Directive bridge
// ---------------------------------------------------------------------------

#[test]
fn key_value_lines_build_a_stream() {
    let lines = [
        ("repaint_delay", "20"),
        ("+env", "X=1"),
        ("clear_all_shortcuts", "yes"),
        ("map", "ctrl+a foo"),
        ("action_alias", "A foo bar"),
        ("clear_all_mouse_actions", "no"),
    ];
    let stream: Vec<Directive> = lines
        .iter()
        .filter_map(|(k, v)| Directive::from_key_value(k, v).unwrap())
        .collect();
    assert_eq!(stream.len(), 5);
    assert_eq!(stream[2], Directive::ClearAllKeyBindings);
}

#[test]
fn default_directive_stream_has_keys_then_mouse() {
    let stream = defaults::default_directives();
    let first_mouse = stream
        .iter()
        .position(|d| matches!(d, Directive::BindMouse(_)))
        .unwrap();
    assert!(
        stream[..first_mouse]
            .iter()
            .all(|d| matches!(d, Directive::BindKey(_)))
    );
    assert!(
        stream[first_mouse..]
            .iter()
            .all(|d| matches!(d, Directive::BindMouse(_)))
    );
}

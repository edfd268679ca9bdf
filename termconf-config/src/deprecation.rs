//! Rewrite rules for deprecated option names.
//!
//! A deprecated name maps to a handler that translates the legacy value into
//! directives on the canonical options. Rewriting happens before resolution,
//! so the canonical options then follow the normal override/append rules.

use crate::converters::to_bool;
use crate::directive::{Directive, KeyDirective};
use crate::error::{ResolveError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Translates `(deprecated_name, raw_value)` into canonical directives.
pub type DeprecationHandler = Arc<dyn Fn(&str, &str) -> Result<Vec<Directive>> + Send + Sync>;

/// One deprecation entry.
#[derive(Clone)]
pub struct DeprecationRule {
    /// Canonical names the handler writes to.
    pub canonical: Vec<String>,
    handler: DeprecationHandler,
}

impl std::fmt::Debug for DeprecationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeprecationRule")
            .field("canonical", &self.canonical)
            .finish_non_exhaustive()
    }
}

/// Mapping from deprecated names to rewrite rules.
#[derive(Debug, Clone, Default)]
pub struct DeprecationTable {
    rules: HashMap<String, DeprecationRule>,
}

impl DeprecationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the built-in deprecations.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();

        table.register(
            &["x11_hide_window_decorations", "macos_hide_titlebar"],
            &["hide_window_decorations"],
            |name, value| {
                Ok(if legacy_bool(name, value)? {
                    vec![Directive::set("hide_window_decorations", "yes")]
                } else {
                    Vec::new()
                })
            },
        );

        table.register(
            &["macos_show_window_title_in_menubar"],
            &["macos_show_window_title_in"],
            |name, value| {
                Ok(if legacy_bool(name, value)? {
                    Vec::new()
                } else {
                    vec![Directive::set("macos_show_window_title_in", "window")]
                })
            },
        );

        table.register(
            &["adjust_line_height", "adjust_column_width", "adjust_baseline"],
            &["modify_font"],
            |name, value| {
                let field = match name {
                    "adjust_line_height" => "cell_height",
                    "adjust_column_width" => "cell_width",
                    _ => "baseline",
                };
                let value = value.trim();
                if value.is_empty() {
                    return Err(deprecation_error(name, value, "missing adjustment"));
                }
                Ok(vec![Directive::append(
                    "modify_font",
                    &format!("{field} {value}"),
                )])
            },
        );

        table.register(&["send_text"], &["map"], |name, value| {
            let mut parts = value.trim().splitn(3, char::is_whitespace);
            let (Some(modes), Some(key), Some(text)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(deprecation_error(
                    name,
                    value,
                    "expected: send_text modes key text",
                ));
            };
            let binding = KeyDirective::new(key, &format!("send_text {modes} {text}"))
                .described("Send arbitrary text on key presses")
                .in_modes(modes);
            Ok(vec![Directive::BindKey(binding)])
        });

        table
    }

    /// Register one handler for one or more deprecated names.
    pub fn register<F>(&mut self, deprecated: &[&str], canonical: &[&str], handler: F)
    where
        F: Fn(&str, &str) -> Result<Vec<Directive>> + Send + Sync + 'static,
    {
        let rule = DeprecationRule {
            canonical: canonical.iter().map(|s| s.to_string()).collect(),
            handler: Arc::new(handler),
        };
        for name in deprecated {
            self.rules.insert(name.to_string(), rule.clone());
        }
    }

    pub fn is_deprecated(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Canonical names a deprecated option is rewritten to.
    pub fn canonical_names(&self, name: &str) -> Option<&[String]> {
        self.rules.get(name).map(|r| r.canonical.as_slice())
    }

    /// Rewrite an assignment of `name`.
    ///
    /// Names without an entry come back unchanged as a single `SetOption`.
    pub fn rewrite(&self, name: &str, value: &str) -> Result<Vec<Directive>> {
        match self.rules.get(name) {
            Some(rule) => (rule.handler)(name, value),
            None => Ok(vec![Directive::set(name, value)]),
        }
    }

    /// Rewrite a directive; only option directives naming a deprecated option change.
    pub fn rewrite_directive(&self, directive: Directive) -> Result<Vec<Directive>> {
        if let Directive::SetOption { name, value } | Directive::AppendOption { name, value } =
            &directive
            && let Some(rule) = self.rules.get(name.as_str())
        {
            return (rule.handler)(name, value);
        }
        Ok(vec![directive])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn legacy_bool(name: &str, value: &str) -> Result<bool> {
    to_bool(value).map_err(|reason| deprecation_error(name, value, &reason))
}

fn deprecation_error(name: &str, value: &str, reason: &str) -> ResolveError {
    ResolveError::Deprecation {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_for_unknown_names() {
        let table = DeprecationTable::with_builtins();
        assert_eq!(
            table.rewrite("font_size", "12").unwrap(),
            vec![Directive::set("font_size", "12")]
        );
        let append = Directive::append("env", "X=1");
        assert_eq!(
            table.rewrite_directive(append.clone()).unwrap(),
            vec![append]
        );
        assert_eq!(
            table
                .rewrite_directive(Directive::ClearAllKeyBindings)
                .unwrap(),
            vec![Directive::ClearAllKeyBindings]
        );
    }

    #[test]
    fn test_hide_decorations_aliases() {
        let table = DeprecationTable::with_builtins();
        assert_eq!(
            table.rewrite("macos_hide_titlebar", "yes").unwrap(),
            vec![Directive::set("hide_window_decorations", "yes")]
        );
        assert!(
            table
                .rewrite("x11_hide_window_decorations", "no")
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            table.rewrite("x11_hide_window_decorations", "sometimes"),
            Err(ResolveError::Deprecation { .. })
        ));
    }

    #[test]
    fn test_adjust_fans_into_modify_font() {
        let table = DeprecationTable::with_builtins();
        assert_eq!(
            table.rewrite("adjust_line_height", "120%").unwrap(),
            vec![Directive::append("modify_font", "cell_height 120%")]
        );
        assert_eq!(
            table.rewrite("adjust_baseline", "2").unwrap(),
            vec![Directive::append("modify_font", "baseline 2")]
        );
        assert_eq!(
            table.canonical_names("adjust_column_width"),
            Some(&["modify_font".to_string()][..])
        );
    }

    #[test]
    fn test_send_text_becomes_binding() {
        let table = DeprecationTable::with_builtins();
        let out = table
            .rewrite("send_text", "normal,application ctrl+a hello world")
            .unwrap();
        match &out[..] {
            [Directive::BindKey(k)] => {
                assert_eq!(k.sequence, "ctrl+a");
                assert_eq!(k.action, "send_text normal,application hello world");
                assert_eq!(k.modes.as_deref(), Some("normal,application"));
            }
            other => panic!("unexpected rewrite: {other:?}"),
        }
        assert!(table.rewrite("send_text", "all").is_err());
    }

    #[test]
    fn test_custom_fan_out() {
        let mut table = DeprecationTable::new();
        table.register(&["legacy_blink"], &["cursor_blink", "bell_blink"], |_, v| {
            Ok(vec![
                Directive::set("cursor_blink", v),
                Directive::set("bell_blink", v),
            ])
        });
        assert!(table.is_deprecated("legacy_blink"));
        assert_eq!(
            table.rewrite("legacy_blink", "yes").unwrap(),
            vec![
                Directive::set("cursor_blink", "yes"),
                Directive::set("bell_blink", "yes"),
            ]
        );
    }
}

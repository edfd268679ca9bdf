//! Named type converters.
//!
//! Each option declares a converter by name; the resolver looks the name up
//! here and hands it the raw directive text. Converters are plain functions
//! so the registry can be shared freely between resolve passes.

use crate::value::{Color, OptionValue};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

/// A converter turns raw directive text into a typed value, or explains why it can't.
pub type Converter = Arc<dyn Fn(&str) -> Result<OptionValue, String> + Send + Sync>;

/// `NAME=value` assigns, bare `NAME` removes the variable from the child environment.
static ENV_ASSIGNMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(=.*)?$")
        .expect("env assignment regex is a compile-time constant and must be valid")
});

/// Registry mapping converter names to converter functions.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, Converter>,
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.converters.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ConverterRegistry")
            .field("converters", &names)
            .finish()
    }
}

impl ConverterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with the built-in converters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("str", |s| Ok(OptionValue::Text(s.to_string())));
        registry.register("to_bool", |s| to_bool(s).map(OptionValue::Bool));
        registry.register("int", |s| parse_int(s).map(OptionValue::Int));
        registry.register("positive_int", |s| {
            let i = parse_int(s)?;
            Ok(OptionValue::Int(i.max(0)))
        });
        registry.register("float", |s| parse_float(s).map(OptionValue::Float));
        registry.register("positive_float", |s| {
            let f = parse_float(s)?;
            Ok(OptionValue::Float(f.max(0.0)))
        });
        registry.register("unit_float", |s| {
            let f = parse_float(s)?;
            Ok(OptionValue::Float(f.clamp(0.0, 1.0)))
        });
        registry.register("to_color", |s| to_color(s).map(OptionValue::Color));
        registry.register("to_color_or_none", |s| {
            if s.trim().eq_ignore_ascii_case("none") {
                Ok(OptionValue::None)
            } else {
                to_color(s).map(OptionValue::Color)
            }
        });
        registry.register("to_cmdline", to_cmdline);
        registry.register("env", env_assignment);
        registry.register("store_multiple", |s| Ok(OptionValue::Text(s.to_string())));
        registry.register("config_or_absolute_path", |s| {
            if s.trim().is_empty() || s.trim().eq_ignore_ascii_case("none") {
                Ok(OptionValue::None)
            } else {
                Ok(OptionValue::Path(expand_home(s.trim())))
            }
        });
        registry.register("to_modifiers", to_modifiers);
        registry.register("to_cursor_shape", |s| {
            let shape = s.trim().to_lowercase();
            match shape.as_str() {
                "block" | "beam" | "underline" => Ok(OptionValue::Text(shape)),
                _ => Err(format!("'{}' is not one of block, beam, underline", s.trim())),
            }
        });
        log::debug!(
            "Converter registry initialized with {} built-in converters",
            registry.len()
        );
        registry
    }

    /// Register (or replace) a converter under `name`.
    pub fn register<F>(&mut self, name: &str, converter: F)
    where
        F: Fn(&str) -> Result<OptionValue, String> + Send + Sync + 'static,
    {
        self.converters.insert(name.to_string(), Arc::new(converter));
    }

    /// Convert `raw` with the converter registered as `name`.
    ///
    /// The error string is the converter's reason; an unregistered name is
    /// reported the same way so callers see a single failure mode.
    pub fn convert(&self, name: &str, raw: &str) -> Result<OptionValue, String> {
        match self.converters.get(name) {
            Some(converter) => converter(raw),
            None => Err(format!("no converter registered as '{name}'")),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

/// Parse a yes/no style boolean.
pub fn to_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "on" => Ok(true),
        "n" | "no" | "false" | "off" => Ok(false),
        other => Err(format!("'{other}' is not a boolean (use yes or no)")),
    }
}

fn parse_int(s: &str) -> Result<i64, String> {
    s.trim()
        .parse::<i64>()
        .map_err(|e| format!("not an integer: {e}"))
}

fn parse_float(s: &str) -> Result<f64, String> {
    let f = s
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("not a number: {e}"))?;
    if f.is_finite() {
        Ok(f)
    } else {
        Err("number must be finite".to_string())
    }
}

/// Parse `#rgb`, `#rrggbb`, `rgb:rr/gg/bb` or one of the basic color names.
pub fn to_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| format!("invalid hex color: '{s}'"));
    }
    if let Some(spec) = s.strip_prefix("rgb:") {
        let parts: Vec<&str> = spec.split('/').collect();
        if parts.len() == 3 {
            let mut channels = [0u8; 3];
            for (slot, part) in channels.iter_mut().zip(&parts) {
                *slot = parse_x11_channel(part).ok_or_else(|| format!("invalid color: '{s}'"))?;
            }
            return Ok(Color::new(channels[0], channels[1], channels[2]));
        }
        return Err(format!("invalid color: '{s}'"));
    }
    named_color(&s.to_lowercase()).ok_or_else(|| format!("unknown color: '{s}'"))
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::new(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::new(r, g, b))
        }
        _ => None,
    }
}

/// X11 channels are 1-4 hex digits scaled to 8 bits.
fn parse_x11_channel(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 4 {
        return None;
    }
    let value = u32::from_str_radix(part, 16).ok()?;
    let max = (1u32 << (4 * part.len() as u32)) - 1;
    Some(((value * 255 + max / 2) / max) as u8)
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::new(0, 0, 0),
        "white" => Color::new(255, 255, 255),
        "red" => Color::new(255, 0, 0),
        "green" => Color::new(0, 255, 0),
        "blue" => Color::new(0, 0, 255),
        "yellow" => Color::new(255, 255, 0),
        "cyan" => Color::new(0, 255, 255),
        "magenta" => Color::new(255, 0, 255),
        "gray" | "grey" => Color::new(190, 190, 190),
        "orange" => Color::new(255, 165, 0),
        _ => return None,
    };
    Some(color)
}

fn to_cmdline(s: &str) -> Result<OptionValue, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(OptionValue::Args(Vec::new()));
    }
    shell_words::split(trimmed)
        .map(OptionValue::Args)
        .map_err(|e| format!("cannot split command line: {e}"))
}

fn env_assignment(s: &str) -> Result<OptionValue, String> {
    let trimmed = s.trim();
    if ENV_ASSIGNMENT_PATTERN.is_match(trimmed) {
        Ok(OptionValue::Text(trimmed.to_string()))
    } else {
        Err(format!("'{trimmed}' is not NAME=value or NAME"))
    }
}

fn to_modifiers(s: &str) -> Result<OptionValue, String> {
    const KNOWN: &[&str] = &[
        "ctrl", "control", "shift", "alt", "opt", "option", "super", "cmd", "command", "hyper",
        "meta", "⌃", "⇧", "⌥", "⌘",
    ];
    let mut parts = Vec::new();
    for part in s.split('+').map(str::trim) {
        let lower = part.to_lowercase();
        if !KNOWN.contains(&lower.as_str()) {
            return Err(format!("unknown modifier: '{part}'"));
        }
        parts.push(lower);
    }
    Ok(OptionValue::Text(parts.join("+")))
}

fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool() {
        let r = ConverterRegistry::with_builtins();
        assert_eq!(r.convert("to_bool", "yes"), Ok(OptionValue::Bool(true)));
        assert_eq!(r.convert("to_bool", "Off"), Ok(OptionValue::Bool(false)));
        assert!(r.convert("to_bool", "maybe").is_err());
    }

    #[test]
    fn test_numbers() {
        let r = ConverterRegistry::with_builtins();
        assert_eq!(r.convert("positive_int", "20"), Ok(OptionValue::Int(20)));
        assert_eq!(r.convert("positive_int", "-3"), Ok(OptionValue::Int(0)));
        assert_eq!(r.convert("unit_float", "1.5"), Ok(OptionValue::Float(1.0)));
        assert!(r.convert("int", "ten").is_err());
        assert!(r.convert("float", "inf").is_err());
    }

    #[test]
    fn test_colors() {
        assert_eq!(to_color("#ff8000"), Ok(Color::new(255, 128, 0)));
        assert_eq!(to_color("#fff"), Ok(Color::new(255, 255, 255)));
        assert_eq!(to_color("rgb:ff/00/80"), Ok(Color::new(255, 0, 128)));
        assert_eq!(to_color("rgb:f/0/0"), Ok(Color::new(255, 0, 0)));
        assert_eq!(to_color("Black"), Ok(Color::new(0, 0, 0)));
        assert!(to_color("#12").is_err());
        assert!(to_color("chartreuse-ish").is_err());

        let r = ConverterRegistry::with_builtins();
        assert_eq!(r.convert("to_color_or_none", "none"), Ok(OptionValue::None));
    }

    #[test]
    fn test_cmdline() {
        let r = ConverterRegistry::with_builtins();
        assert_eq!(
            r.convert("to_cmdline", "less --chop-long-lines 'a b'"),
            Ok(OptionValue::Args(vec![
                "less".to_string(),
                "--chop-long-lines".to_string(),
                "a b".to_string()
            ]))
        );
        assert!(r.convert("to_cmdline", "unterminated 'quote").is_err());
    }

    #[test]
    fn test_env() {
        let r = ConverterRegistry::with_builtins();
        assert_eq!(r.convert("env", "X=1"), Ok(OptionValue::Text("X=1".into())));
        assert_eq!(r.convert("env", "REMOVE_ME"), Ok(OptionValue::Text("REMOVE_ME".into())));
        assert!(r.convert("env", "1BAD=x").is_err());
    }

    #[test]
    fn test_modifiers() {
        let r = ConverterRegistry::with_builtins();
        assert_eq!(
            r.convert("to_modifiers", "Ctrl+Shift"),
            Ok(OptionValue::Text("ctrl+shift".into()))
        );
        assert!(r.convert("to_modifiers", "ctrl+q").is_err());
    }

    #[test]
    fn test_cursor_shape() {
        let r = ConverterRegistry::with_builtins();
        assert_eq!(r.convert("to_cursor_shape", "Beam"), Ok(OptionValue::Text("beam".into())));
        assert!(r.convert("to_cursor_shape", "triangle").is_err());
    }

    #[test]
    fn test_unknown_converter() {
        let r = ConverterRegistry::with_builtins();
        let err = r.convert("no_such_converter", "x").unwrap_err();
        assert!(err.contains("no_such_converter"));
    }

    #[test]
    fn test_custom_converter() {
        let mut r = ConverterRegistry::new();
        assert!(r.is_empty());
        r.register("upper", |s| Ok(OptionValue::Text(s.to_uppercase())));
        assert!(r.contains("upper"));
        assert_eq!(r.convert("upper", "abc"), Ok(OptionValue::Text("ABC".into())));
    }
}

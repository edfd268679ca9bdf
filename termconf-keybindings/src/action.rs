//! Binding actions.
//!
//! Action strings stay opaque to the engine except for the two sentinels
//! and the `combine` form, which holds several actions behind a separator.

use std::fmt;

/// Sentinel action: the binding slot is occupied but does nothing.
pub const NO_OP: &str = "no_op";
/// Sentinel action: the triggering event is swallowed.
pub const DISCARD_EVENT: &str = "discard_event";
/// Leading word of a multi-action binding.
pub const COMBINE: &str = "combine";

/// What a binding does when it fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindingAction {
    /// Unbound; the event falls through to the application.
    NoOp,
    /// Consume the event without doing anything.
    Discard,
    /// Any other action, kept as written after alias expansion.
    Command(String),
}

impl BindingAction {
    pub fn from_spec(spec: &str) -> Self {
        match spec.trim() {
            "" | NO_OP => BindingAction::NoOp,
            DISCARD_EVENT => BindingAction::Discard,
            other => BindingAction::Command(other.to_string()),
        }
    }

    pub fn spec(&self) -> &str {
        match self {
            BindingAction::NoOp => NO_OP,
            BindingAction::Discard => DISCARD_EVENT,
            BindingAction::Command(s) => s,
        }
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self, BindingAction::NoOp)
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, BindingAction::Discard)
    }

    /// First word of the action, e.g. `kitten` or `new_window`.
    pub fn name(&self) -> &str {
        self.spec().split_whitespace().next().unwrap_or_default()
    }
}

impl fmt::Display for BindingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec())
    }
}

/// A `combine SEP a SEP b` action split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedAction<'a> {
    pub separator: &'a str,
    pub actions: Vec<&'a str>,
}

impl CombinedAction<'_> {
    /// Rebuild the action string from (possibly rewritten) parts.
    pub fn join<S: AsRef<str>>(separator: &str, actions: &[S]) -> String {
        let mut out = format!("{COMBINE} {separator}");
        for (i, action) in actions.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(separator);
            }
            out.push(' ');
            out.push_str(action.as_ref().trim());
        }
        out
    }
}

/// Split a `combine` action; `None` if `spec` is not one.
pub fn split_combine(spec: &str) -> Option<CombinedAction<'_>> {
    let rest = spec.trim_start().strip_prefix(COMBINE)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let separator = rest.split_whitespace().next()?;
    let body = &rest[separator.len()..];
    let actions = body
        .split(separator)
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();
    Some(CombinedAction { separator, actions })
}

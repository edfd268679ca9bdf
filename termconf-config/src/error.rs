//! Typed error variants for the termconf resolution engine.
//!
//! Every failure that can abort a resolve pass is represented here so that
//! callers (the config loader, the reload path) can match on the specific
//! failure mode and report the offending option or binding to the user.

use thiserror::Error;

/// Errors produced while building the schema or resolving a directive stream.
///
/// Any of these aborts the whole resolve pass; a partially resolved
/// configuration is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A directive referenced an option name absent from the schema registry.
    #[error("Unknown option: '{name}'")]
    UnknownOption {
        /// The offending option name.
        name: String,
    },

    /// The converter registered for a known option rejected the raw text.
    #[error("Invalid value for option '{option}': '{value}' ({reason})")]
    TypeConversion {
        /// Option whose value failed to convert.
        option: String,
        /// Raw text as it appeared in the directive.
        value: String,
        /// Human-readable reason reported by the converter.
        reason: String,
    },

    /// An append directive targeted a scalar option.
    #[error("Option '{name}' does not accept multiple values")]
    NotAccumulating {
        /// The scalar option that was appended to.
        name: String,
    },

    /// Alias expansion did not terminate within the substitution ceiling.
    #[error("Alias expansion for '{name}' exceeded {limit} substitutions (alias cycle?)")]
    AliasCycle {
        /// The alias name at which expansion gave up.
        name: String,
        /// The substitution ceiling that was exceeded.
        limit: usize,
    },

    /// A key or mouse directive could not be parsed into structured form.
    #[error("Malformed binding '{spec}': {reason}")]
    MalformedBindingSpec {
        /// The sequence, trigger or mode text that failed to parse.
        spec: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The same option name was registered twice while building the schema.
    #[error("Option '{name}' is already registered")]
    DuplicateOption {
        /// The duplicated option name.
        name: String,
    },

    /// A deprecation handler could not translate a legacy value.
    #[error("Cannot translate deprecated option '{name}' with value '{value}': {reason}")]
    Deprecation {
        /// The deprecated option name.
        name: String,
        /// Raw legacy value.
        value: String,
        /// Why the value could not be translated.
        reason: String,
    },
}

impl ResolveError {
    /// Shorthand for an [`ResolveError::UnknownOption`].
    pub fn unknown_option(name: impl Into<String>) -> Self {
        ResolveError::UnknownOption { name: name.into() }
    }

    /// Shorthand for a [`ResolveError::MalformedBindingSpec`].
    pub fn malformed(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::MalformedBindingSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = ResolveError::TypeConversion {
            option: "font_size".to_string(),
            value: "huge".to_string(),
            reason: "not a number".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("font_size"));
        assert!(msg.contains("huge"));
        assert!(msg.contains("not a number"));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(
            ResolveError::unknown_option("nope"),
            ResolveError::UnknownOption {
                name: "nope".to_string()
            }
        );
        assert!(matches!(
            ResolveError::malformed("ctrl+", "no key"),
            ResolveError::MalformedBindingSpec { .. }
        ));
    }
}

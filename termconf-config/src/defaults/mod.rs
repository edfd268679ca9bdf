//! Built-in catalog data.
//!
//! Each sub-module groups related defaults; everything is re-exported here so
//! call-sites can use `crate::defaults::*`.

mod bindings;
mod colors;
mod options;

// ── Option catalog ─────────────────────────────────────────────────────────
pub use options::option_specs;

// ── Color table ────────────────────────────────────────────────────────────
pub use colors::{color_table_defaults, palette_color};

// ── Bindings ───────────────────────────────────────────────────────────────
pub use bindings::{key_directives, mouse_directives};

use crate::directive::Directive;

/// The default directive stream: key bindings followed by mouse bindings.
///
/// A full load resolves `default_directives()` followed by the user's
/// directives.
pub fn default_directives() -> Vec<Directive> {
    let mut directives = key_directives();
    directives.extend(mouse_directives());
    directives
}

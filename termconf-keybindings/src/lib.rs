//! Key and mouse bindings for termconf.
//!
//! This crate turns `map` and `mouse_map` directives into ordered binding
//! tables.
//!
//! Features:
//! - Key presses and chords (`ctrl+shift+b`, `kitty_mod+p>f`, `ctrl+0x61`)
//! - Symbolic modifiers (`kitty_mod`, `cmd_or_ctrl`) resolved per platform
//! - Override by identity, partitioned by dispatch mode or grab state
//! - Mouse triggers with button, event and grab modes

pub mod action;
mod key_table;
pub mod modes;
mod mouse;
pub mod parser;
pub mod platform;

pub use action::{BindingAction, CombinedAction, split_combine};
pub use key_table::{KeyBindingRule, KeyBindingTable};
pub use modes::KeyModes;
pub use mouse::{
    GrabModes, MouseBindingRule, MouseBindingTable, MouseButton, MouseEvent, MouseTrigger,
    parse_mouse_trigger,
};
pub use parser::{
    KeyPress, KeySequence, Modifiers, ParseError, ParsedKey, parse_key_press, parse_key_sequence,
    parse_modifiers,
};

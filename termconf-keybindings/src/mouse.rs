//! Mouse triggers and the mouse binding table.
//!
//! A trigger reads `[modifiers+]button event grab_modes`, for example
//! `ctrl+shift+left release grabbed,ungrabbed`. Buttons are normalized so
//! `b1` and `left` name the same button.

use crate::action::BindingAction;
use crate::parser::{Modifiers, ParseError, split_button};
use crate::platform::resolve_modifiers;
use std::fmt;
use termconf_config::{MouseDirective, Platform, ResolveError};

/// Number of addressable mouse buttons (`b1` to `b8`).
pub const MOUSE_BUTTON_COUNT: u8 = 8;

/// A mouse button, numbered from zero.
///
/// `left` is button 0, `right` button 1 and `middle` button 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButton(u8);

impl MouseButton {
    pub const LEFT: MouseButton = MouseButton(0);
    pub const RIGHT: MouseButton = MouseButton(1);
    pub const MIDDLE: MouseButton = MouseButton(2);

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn parse(s: &str) -> Result<MouseButton, ParseError> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "left" => Ok(MouseButton::LEFT),
            "right" => Ok(MouseButton::RIGHT),
            "middle" => Ok(MouseButton::MIDDLE),
            other => other
                .strip_prefix('b')
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=MOUSE_BUTTON_COUNT).contains(n))
                .map(|n| MouseButton(n - 1))
                .ok_or_else(|| ParseError::new(format!("Unknown mouse button: '{s}'"))),
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MouseButton::LEFT => f.write_str("left"),
            MouseButton::RIGHT => f.write_str("right"),
            MouseButton::MIDDLE => f.write_str("middle"),
            MouseButton(n) => write!(f, "b{}", n + 1),
        }
    }
}

/// The mouse event a binding fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEvent {
    Press,
    Release,
    DoublePress,
    TriplePress,
    Click,
    DoubleClick,
}

impl MouseEvent {
    pub fn parse(s: &str) -> Result<MouseEvent, ParseError> {
        match s.to_lowercase().as_str() {
            "press" => Ok(MouseEvent::Press),
            "release" => Ok(MouseEvent::Release),
            "doublepress" => Ok(MouseEvent::DoublePress),
            "triplepress" => Ok(MouseEvent::TriplePress),
            "click" => Ok(MouseEvent::Click),
            "doubleclick" => Ok(MouseEvent::DoubleClick),
            _ => Err(ParseError::new(format!("Unknown mouse event: '{s}'"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MouseEvent::Press => "press",
            MouseEvent::Release => "release",
            MouseEvent::DoublePress => "doublepress",
            MouseEvent::TriplePress => "triplepress",
            MouseEvent::Click => "click",
            MouseEvent::DoubleClick => "doubleclick",
        }
    }
}

impl fmt::Display for MouseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a binding applies while the program has grabbed the mouse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GrabModes {
    pub grabbed: bool,
    pub ungrabbed: bool,
}

impl GrabModes {
    pub const BOTH: GrabModes = GrabModes {
        grabbed: true,
        ungrabbed: true,
    };

    pub fn only(grabbed: bool) -> GrabModes {
        GrabModes {
            grabbed,
            ungrabbed: !grabbed,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.grabbed || self.ungrabbed)
    }

    pub fn intersects(&self, other: GrabModes) -> bool {
        (self.grabbed && other.grabbed) || (self.ungrabbed && other.ungrabbed)
    }

    pub fn difference(&self, other: GrabModes) -> GrabModes {
        GrabModes {
            grabbed: self.grabbed && !other.grabbed,
            ungrabbed: self.ungrabbed && !other.ungrabbed,
        }
    }

    pub fn admits(&self, grabbed: bool) -> bool {
        if grabbed { self.grabbed } else { self.ungrabbed }
    }

    pub fn parse(s: &str) -> Result<GrabModes, ParseError> {
        let mut modes = GrabModes::default();
        for token in s.split(',').map(str::trim) {
            match token.to_lowercase().as_str() {
                "grabbed" => modes.grabbed = true,
                "ungrabbed" => modes.ungrabbed = true,
                _ => return Err(ParseError::new(format!("Unknown grab mode: '{token}'"))),
            }
        }
        Ok(modes)
    }
}

impl fmt::Display for GrabModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.grabbed, self.ungrabbed) {
            (true, true) => f.write_str("grabbed,ungrabbed"),
            (true, false) => f.write_str("grabbed"),
            (false, true) => f.write_str("ungrabbed"),
            (false, false) => Ok(()),
        }
    }
}

/// A parsed mouse trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseTrigger {
    pub modifiers: Modifiers,
    pub button: MouseButton,
    pub event: MouseEvent,
    pub grab: GrabModes,
}

impl MouseTrigger {
    /// Whether `self` and `other` compete for the same events.
    fn same_slot(&self, other: &MouseTrigger) -> bool {
        self.modifiers == other.modifiers
            && self.button == other.button
            && self.event == other.event
    }
}

impl fmt::Display for MouseTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.modifiers.is_empty() {
            write!(f, "{}+", self.modifiers)?;
        }
        write!(f, "{} {} {}", self.button, self.event, self.grab)
    }
}

/// Parse a trigger such as `shift+left press ungrabbed,grabbed`.
///
/// The grab mode list is optional and defaults to `ungrabbed`.
pub fn parse_mouse_trigger(s: &str) -> Result<MouseTrigger, ParseError> {
    let mut words = s.split_whitespace();
    let (button_part, event_part) = match (words.next(), words.next()) {
        (Some(b), Some(e)) => (b, e),
        _ => {
            return Err(ParseError::new(format!(
                "Mouse trigger '{s}' needs a button and an event"
            )));
        }
    };
    let grab = match words.next() {
        Some(modes) => GrabModes::parse(modes)?,
        None => GrabModes::only(false),
    };
    if let Some(extra) = words.next() {
        return Err(ParseError::new(format!("Unexpected '{extra}' in mouse trigger")));
    }

    let (modifiers, button) = split_button(button_part)?;
    Ok(MouseTrigger {
        modifiers,
        button: MouseButton::parse(button)?,
        event: MouseEvent::parse(event_part)?,
        grab,
    })
}

/// A single resolved mouse binding.
///
/// Like key rules, it carries no platform filter; filtering happens on resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseBindingRule {
    pub trigger: MouseTrigger,
    pub action: BindingAction,
    pub description: String,
}

impl MouseBindingRule {
    /// Build a rule from a `mouse_map` directive, using `action` in place of
    /// the directive's own action.
    pub fn from_directive(directive: &MouseDirective, action: &str) -> Result<Self, ResolveError> {
        let trigger = parse_mouse_trigger(&directive.trigger)
            .map_err(|e| e.into_resolve_error(&directive.trigger))?;
        Ok(Self::new(trigger, BindingAction::from_spec(action))
            .with_description(directive.description.clone()))
    }

    pub fn new(trigger: MouseTrigger, action: BindingAction) -> Self {
        Self {
            trigger,
            action,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Mouse bindings in insertion order.
///
/// Identity is button, modifiers and event; grab modes partition like key
/// dispatch modes do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MouseBindingTable {
    rules: Vec<MouseBindingRule>,
}

impl MouseBindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `rule`, overriding earlier rules in the grab modes it covers.
    ///
    /// Returns how many earlier rules were dropped entirely.
    pub fn upsert(&mut self, rule: MouseBindingRule) -> usize {
        let before = self.rules.len();
        for existing in self.rules.iter_mut().filter(|r| {
            r.trigger.same_slot(&rule.trigger) && r.trigger.grab.intersects(rule.trigger.grab)
        }) {
            log::debug!(
                "Mouse binding {} overrides '{}'",
                rule.trigger,
                existing.action
            );
            existing.trigger.grab = existing.trigger.grab.difference(rule.trigger.grab);
        }
        self.rules.retain(|r| !r.trigger.grab.is_empty());
        let dropped = before - self.rules.len();
        self.rules.push(rule);
        dropped
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Rules in last-applied order.
    pub fn rules(&self) -> &[MouseBindingRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &MouseBindingRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that apply when the mouse is (or is not) grabbed.
    pub fn for_grab_state(&self, grabbed: bool) -> impl Iterator<Item = &MouseBindingRule> {
        self.rules
            .iter()
            .filter(move |r| r.trigger.grab.admits(grabbed))
    }

    /// The rule that fires for an event, if any.
    pub fn lookup(
        &self,
        modifiers: Modifiers,
        button: MouseButton,
        event: MouseEvent,
        grabbed: bool,
    ) -> Option<&MouseBindingRule> {
        self.rules.iter().rev().find(|r| {
            r.trigger.modifiers == modifiers
                && r.trigger.button == button
                && r.trigger.event == event
                && r.trigger.grab.admits(grabbed)
        })
    }

    /// Replace symbolic modifiers with concrete ones, later rules winning on collision.
    pub fn resolve_modifiers(self, platform: Platform, kitty_mod: Modifiers) -> MouseBindingTable {
        let mut resolved = MouseBindingTable::new();
        for mut rule in self.rules {
            rule.trigger.modifiers = resolve_modifiers(rule.trigger.modifiers, platform, kitty_mod);
            resolved.upsert(rule);
        }
        resolved
    }
}

impl<'a> IntoIterator for &'a MouseBindingTable {
    type Item = &'a MouseBindingRule;
    type IntoIter = std::slice::Iter<'a, MouseBindingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

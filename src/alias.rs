//! Action and kitten alias expansion.
//!
//! Aliases are looked up in the table as it stands at the point a binding is
//! resolved. A name with no alias yet stays as literal text.

use std::collections::HashMap;
use termconf_config::{AliasKind, ResolveError, Result};
use termconf_keybindings::{CombinedAction, split_combine};

/// Maximum substitutions along one expansion chain before it is treated as a cycle.
pub const ALIAS_EXPANSION_LIMIT: usize = 16;

const KITTEN: &str = "kitten";

/// Alias definitions seen so far in a directive stream.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    actions: HashMap<String, String>,
    kittens: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: AliasKind) -> &HashMap<String, String> {
        match kind {
            AliasKind::Action => &self.actions,
            AliasKind::Kitten => &self.kittens,
        }
    }

    /// Define or replace an alias. Returns the previous expansion, if any.
    pub fn define(&mut self, kind: AliasKind, name: &str, expansion: &str) -> Option<String> {
        let map = match kind {
            AliasKind::Action => &mut self.actions,
            AliasKind::Kitten => &mut self.kittens,
        };
        map.insert(name.to_string(), expansion.trim().to_string())
    }

    pub fn get(&self, kind: AliasKind, name: &str) -> Option<&str> {
        self.map(kind).get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len() + self.kittens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand every alias reference in `action`.
    ///
    /// Each sub-action of a `combine` is expanded on its own. A kitten alias
    /// whose expansion starts with its own name, as in
    /// `kitten_alias hints hints --hints-offset=0`, is substituted once.
    /// Any other repeat along a chain, or a chain longer than
    /// [`ALIAS_EXPANSION_LIMIT`], fails with [`ResolveError::AliasCycle`].
    pub fn expand(&self, action: &str) -> Result<String> {
        self.expand_chain(action, 0, Vec::new(), Vec::new())
    }

    fn expand_chain(
        &self,
        action: &str,
        mut depth: usize,
        mut used_kittens: Vec<String>,
        mut settled_kittens: Vec<String>,
    ) -> Result<String> {
        if let Some(combined) = split_combine(action) {
            let parts = combined
                .actions
                .iter()
                .map(|part| {
                    self.expand_chain(part, depth, used_kittens.clone(), settled_kittens.clone())
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(CombinedAction::join(combined.separator, &parts));
        }

        let mut current = action.trim().to_string();
        while let Some(step) = self.substitute_head(&current, &settled_kittens) {
            depth += 1;
            let repeated = step.kind == AliasKind::Kitten && used_kittens.contains(&step.name);
            if repeated || depth > ALIAS_EXPANSION_LIMIT {
                return Err(ResolveError::AliasCycle {
                    name: step.name,
                    limit: ALIAS_EXPANSION_LIMIT,
                });
            }
            match step.kind {
                AliasKind::Kitten if step.self_named => settled_kittens.push(step.name),
                AliasKind::Kitten => used_kittens.push(step.name),
                AliasKind::Action => {}
            }
            if split_combine(&step.expanded).is_some() {
                return self.expand_chain(&step.expanded, depth, used_kittens, settled_kittens);
            }
            current = step.expanded;
        }
        Ok(current)
    }

    /// Replace the leading alias reference of `action` once.
    ///
    /// Kitten aliases in `settled` have already been substituted and are left alone.
    fn substitute_head(&self, action: &str, settled: &[String]) -> Option<Substitution> {
        let (head, rest) = split_head(action);
        if head == KITTEN {
            let (kitten, args) = split_head(rest);
            if settled.iter().any(|name| name == kitten) {
                return None;
            }
            let expansion = self.kittens.get(kitten)?;
            return Some(Substitution {
                kind: AliasKind::Kitten,
                name: kitten.to_string(),
                self_named: split_head(expansion).0 == kitten,
                expanded: join_words(&[KITTEN, expansion, args]),
            });
        }
        let expansion = self.actions.get(head)?;
        Some(Substitution {
            kind: AliasKind::Action,
            name: head.to_string(),
            self_named: false,
            expanded: join_words(&[expansion, rest]),
        })
    }
}

struct Substitution {
    kind: AliasKind,
    name: String,
    /// The expansion starts with the alias's own name.
    self_named: bool,
    expanded: String,
}

fn split_head(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (s, ""),
    }
}

fn join_words(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(defs: &[(AliasKind, &str, &str)]) -> AliasTable {
        let mut table = AliasTable::new();
        for (kind, name, expansion) in defs {
            table.define(*kind, name, expansion);
        }
        table
    }

    #[test]
    fn test_simple_expansion() {
        let t = table(&[(AliasKind::Action, "A", "foo bar")]);
        assert_eq!(t.expand("A").unwrap(), "foo bar");
        assert_eq!(t.expand("A --baz").unwrap(), "foo bar --baz");
    }

    #[test]
    fn test_unknown_stays_literal() {
        let t = AliasTable::new();
        assert_eq!(t.expand("new_tab --cwd=current").unwrap(), "new_tab --cwd=current");
    }

    #[test]
    fn test_only_head_is_substituted() {
        let t = table(&[(AliasKind::Action, "A", "foo")]);
        assert_eq!(t.expand("launch A").unwrap(), "launch A");
    }

    #[test]
    fn test_chained_expansion() {
        let t = table(&[
            (AliasKind::Action, "A", "B one"),
            (AliasKind::Action, "B", "launch --type=tab"),
        ]);
        assert_eq!(t.expand("A two").unwrap(), "launch --type=tab one two");
    }

    #[test]
    fn test_kitten_alias() {
        let t = table(&[(AliasKind::Kitten, "hints_path", "hints --type path")]);
        assert_eq!(
            t.expand("kitten hints_path --program -").unwrap(),
            "kitten hints --type path --program -"
        );
        // action aliases don't apply to kitten names
        let t = table(&[(AliasKind::Action, "hints_path", "nope")]);
        assert_eq!(t.expand("kitten hints_path").unwrap(), "kitten hints_path");
    }

    #[test]
    fn test_self_named_kitten_substitutes_once() {
        let t = table(&[(AliasKind::Kitten, "hints", "hints --hints-offset=0")]);
        assert_eq!(
            t.expand("kitten hints --type url").unwrap(),
            "kitten hints --hints-offset=0 --type url"
        );
    }

    #[test]
    fn test_kitten_loop_is_cycle() {
        let t = table(&[
            (AliasKind::Kitten, "a", "b --one"),
            (AliasKind::Kitten, "b", "a --two"),
        ]);
        match t.expand("kitten a") {
            Err(ResolveError::AliasCycle { name, .. }) => assert_eq!(name, "a"),
            other => panic!("expected AliasCycle, got {other:?}"),
        }
    }

    #[test]
    fn test_kitten_alias_to_self_named_alias() {
        let t = table(&[
            (AliasKind::Kitten, "pick", "hints --type path"),
            (AliasKind::Kitten, "hints", "hints --hints-offset=0"),
        ]);
        assert_eq!(
            t.expand("kitten pick").unwrap(),
            "kitten hints --hints-offset=0 --type path"
        );
    }

    #[test]
    fn test_self_reference_is_cycle() {
        let t = table(&[(AliasKind::Action, "A", "A x")]);
        match t.expand("A") {
            Err(ResolveError::AliasCycle { name, limit }) => {
                assert_eq!(name, "A");
                assert_eq!(limit, ALIAS_EXPANSION_LIMIT);
            }
            other => panic!("expected AliasCycle, got {other:?}"),
        }
    }

    #[test]
    fn test_mutual_cycle() {
        let t = table(&[(AliasKind::Action, "A", "B"), (AliasKind::Action, "B", "A")]);
        assert!(matches!(t.expand("A"), Err(ResolveError::AliasCycle { .. })));
    }

    #[test]
    fn test_combine_parts_expand() {
        let t = table(&[(AliasKind::Action, "nt", "new_tab_with_cwd")]);
        assert_eq!(
            t.expand("combine : nt : next_layout").unwrap(),
            "combine : new_tab_with_cwd : next_layout"
        );
    }

    #[test]
    fn test_alias_to_combine() {
        let t = table(&[
            (AliasKind::Action, "both", "combine | x | y"),
            (AliasKind::Action, "x", "launch"),
        ]);
        assert_eq!(t.expand("both").unwrap(), "combine | launch | y");
    }

    #[test]
    fn test_combine_cycle() {
        let t = table(&[(AliasKind::Action, "A", "combine : A : x")]);
        assert!(matches!(t.expand("A"), Err(ResolveError::AliasCycle { .. })));
    }

    #[test]
    fn test_redefine_replaces() {
        let mut t = table(&[(AliasKind::Action, "A", "one")]);
        assert_eq!(t.define(AliasKind::Action, "A", "two").as_deref(), Some("one"));
        assert_eq!(t.expand("A").unwrap(), "two");
        assert_eq!(t.len(), 1);
    }
}

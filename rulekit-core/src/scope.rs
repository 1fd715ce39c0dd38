//! Scopes and processors (spec §3/§4.2).

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Error;
use crate::rule::{self, Rule};
use crate::stream::Stream;

/// An immutable mapping from rule name to rule, used to resolve
/// [`Rule::Reference`]s. Scopes compose by overlay: `self.overlay(other)`
/// keeps `self`'s bindings on conflict.
#[derive(Clone)]
pub struct Scope<Item, R> {
    rules: Arc<HashMap<Arc<str>, Rule<Item, R>>>,
}

impl<Item, R> Scope<Item, R> {
    pub fn new() -> Self {
        Scope { rules: Arc::new(HashMap::new()) }
    }

    pub fn builder() -> ScopeBuilder<Item, R> {
        ScopeBuilder { rules: HashMap::new() }
    }

    pub fn get(&self, name: &str) -> Option<&Rule<Item, R>> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Overlays `other` beneath `self`: entries in `self` win on conflict,
    /// `other`'s entries fill in the rest. This is the policy a
    /// [`Processor`] uses when merging a caller-supplied scope with its own.
    pub fn overlay(&self, other: &Scope<Item, R>) -> Scope<Item, R>
    where
        Item: Clone,
        R: Clone,
    {
        let mut merged: HashMap<Arc<str>, Rule<Item, R>> = (*other.rules).clone();
        for (name, rule) in self.rules.iter() {
            merged.insert(name.clone(), rule.clone());
        }
        Scope { rules: Arc::new(merged) }
    }
}

impl<Item, R> Default for Scope<Item, R> {
    fn default() -> Self {
        Scope::new()
    }
}

/// Builds a [`Scope`], rejecting nothing by default — duplicate-name
/// rejection is the lexer's concern (spec §4.4), not the generic scope's.
pub struct ScopeBuilder<Item, R> {
    rules: HashMap<Arc<str>, Rule<Item, R>>,
}

impl<Item, R> ScopeBuilder<Item, R> {
    pub fn with(mut self, name: impl Into<Arc<str>>, rule: Rule<Item, R>) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn build(self) -> Scope<Item, R> {
        Scope { rules: Arc::new(self.rules) }
    }
}

/// A scope paired with a distinguished root rule name — the top-level
/// invocation point (spec §4.2).
#[derive(Clone)]
pub struct Processor<Item, R> {
    scope: Scope<Item, R>,
    root: Arc<str>,
}

impl<Item, R> Processor<Item, R> {
    pub fn new(scope: Scope<Item, R>, root: impl Into<Arc<str>>) -> Self {
        Processor { scope, root: root.into() }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn scope(&self) -> &Scope<Item, R> {
        &self.scope
    }

    /// Applies the root rule, merging `caller_scope` beneath this
    /// processor's own bindings: the processor's bindings win on conflict
    /// (spec §4.2/§9 — the policy chosen where the source code drifts).
    pub fn run(&self, caller_scope: &Scope<Item, R>, state: Stream<Item>) -> rule::Apply<Item, R>
    where
        Item: Clone + std::fmt::Debug,
        R: Clone,
    {
        let effective = self.scope.overlay(caller_scope);
        let root = effective
            .get(&self.root)
            .ok_or_else(|| Error::unknown_rule(self.root.as_ref()))?;
        let debug = std::env::var_os("RULEKIT_DEBUG").is_some();
        if debug {
            eprintln!("[rulekit] entering root rule `{}`", self.root);
        }
        let outcome = rule::apply(root, &effective, state);
        if debug {
            match &outcome {
                Ok(_) => eprintln!("[rulekit] root rule `{}` succeeded", self.root),
                Err(e) => eprintln!("[rulekit] root rule `{}` failed: {e}", self.root),
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(c: char) -> Rule<char, String> {
        Rule::head(
            format!("{c:?}"),
            move |item: &char| *item == c,
            |item: &char| item.to_string(),
        )
    }

    #[test]
    fn processor_bindings_win_on_conflict() {
        let inner = Scope::builder().with("start", literal('a')).build();
        let processor = Processor::new(inner, "start");

        let outer = Scope::builder().with("start", literal('z')).build();
        let state = Stream::new(vec!['a']);
        let result = processor.run(&outer, state);
        assert!(result.is_ok(), "processor's own binding for `start` should win");
    }

    #[test]
    fn caller_scope_fills_undefined_entries() {
        let inner_rule: Rule<char, String> = Rule::reference("helper");
        let inner = Scope::builder().with("start", inner_rule).build();
        let processor = Processor::new(inner, "start");

        let outer = Scope::builder().with("helper", literal('a')).build();
        let state = Stream::new(vec!['a']);
        let result = processor.run(&outer, state);
        assert!(result.is_ok());
    }

    #[test]
    fn overlay_is_self_wins() {
        let a = Scope::builder().with("x", literal('a')).build();
        let b = Scope::builder().with("x", literal('b')).with("y", literal('b')).build();
        let merged = a.overlay(&b);
        assert!(merged.contains("x"));
        assert!(merged.contains("y"));
        let state = Stream::new(vec!['a']);
        assert!(rule::apply(merged.get("x").unwrap(), &merged, state).is_ok());
    }
}

//! The rule algebra: references, ordered choice, sequencing, repetition
//! (spec §3/§4.2).
//!
//! `Rule<Item, R>` is the central abstraction. The state it is applied
//! against is always a [`Stream<Item>`]; `Item` and `R` are what let the same
//! algebra serve characters-in/text-out (regex), characters-in/tokens-out
//! (lexer), and tokens-in/anything-out (parser).

use std::sync::Arc;

use crate::error::Error;
use crate::scope::Scope;
use crate::stream::Stream;

/// What a rule application returns on success: the stream advanced past
/// whatever was consumed, and the result produced.
pub type Apply<Item, R> = Result<(Stream<Item>, R), Error>;

/// Folds a sequence of results into one (spec's `ResultCombiner`).
pub type Combiner<R> = Arc<dyn Fn(Vec<R>) -> R + Send + Sync>;

/// A user-supplied semantic action: `(scope, state) -> (state, result)`,
/// used by parsers to build domain objects (spec §4.5).
pub type Action<Item, R> =
    Arc<dyn Fn(&Scope<Item, R>, Stream<Item>) -> Apply<Item, R> + Send + Sync>;

type HeadPredicate<Item> = Arc<dyn Fn(&Item) -> bool + Send + Sync>;
type HeadProject<Item, R> = Arc<dyn Fn(&Item) -> R + Send + Sync>;

/// The rule algebra. Cloning a `Rule` is cheap: composite variants hold
/// `Arc`/`Box` children, and references carry only a name, resolved through
/// a [`Scope`] at apply-time rather than through a direct pointer — this is
/// what lets grammars be cyclic without the rule graph owning cycles.
#[derive(Clone)]
pub enum Rule<Item, R> {
    /// Consumes one item from the head if `predicate` holds; `project`
    /// turns the consumed item into a result. `description` is used to
    /// build a `HeadMismatch` error.
    Head {
        description: Arc<str>,
        predicate: HeadPredicate<Item>,
        project: HeadProject<Item, R>,
    },
    /// Indirection through a scope, resolved by name at apply-time.
    Reference(Arc<str>),
    /// Ordered choice: first success wins; commits (no backtracking past
    /// the point a branch succeeded).
    Or(Vec<Rule<Item, R>>),
    /// Ordered sequence; results are folded by `combine`.
    And {
        rules: Vec<Rule<Item, R>>,
        combine: Combiner<R>,
    },
    /// Applies `rule` until it fails; never fails itself.
    ZeroOrMore { rule: Box<Rule<Item, R>>, combine: Combiner<R> },
    /// `And(rule, ZeroOrMore(rule))`; fails exactly when the first
    /// application fails.
    OneOrMore { rule: Box<Rule<Item, R>>, combine: Combiner<R> },
    /// Applies `rule` once; on failure, returns the original state and the
    /// combiner's identity (`combine(vec![])`).
    ZeroOrOne { rule: Box<Rule<Item, R>>, combine: Combiner<R> },
    /// Repeats `rule` while the stream is non-empty; fails on a failing
    /// application with items remaining, or on a non-consuming success
    /// with items remaining (`NonProgress`).
    UntilEmpty { rule: Box<Rule<Item, R>>, combine: Combiner<R> },
    /// A caller-supplied closure, used for parser semantic actions.
    Action(Action<Item, R>),
}

impl<Item, R> Rule<Item, R> {
    pub fn head(
        description: impl Into<Arc<str>>,
        predicate: impl Fn(&Item) -> bool + Send + Sync + 'static,
        project: impl Fn(&Item) -> R + Send + Sync + 'static,
    ) -> Self {
        Rule::Head {
            description: description.into(),
            predicate: Arc::new(predicate),
            project: Arc::new(project),
        }
    }

    pub fn reference(name: impl Into<Arc<str>>) -> Self {
        Rule::Reference(name.into())
    }

    pub fn or(rules: Vec<Rule<Item, R>>) -> Self {
        Rule::Or(rules)
    }

    pub fn and(rules: Vec<Rule<Item, R>>, combine: Combiner<R>) -> Self {
        Rule::And { rules, combine }
    }

    pub fn zero_or_more(rule: Rule<Item, R>, combine: Combiner<R>) -> Self {
        Rule::ZeroOrMore { rule: Box::new(rule), combine }
    }

    pub fn one_or_more(rule: Rule<Item, R>, combine: Combiner<R>) -> Self {
        Rule::OneOrMore { rule: Box::new(rule), combine }
    }

    pub fn zero_or_one(rule: Rule<Item, R>, combine: Combiner<R>) -> Self {
        Rule::ZeroOrOne { rule: Box::new(rule), combine }
    }

    pub fn until_empty(rule: Rule<Item, R>, combine: Combiner<R>) -> Self {
        Rule::UntilEmpty { rule: Box::new(rule), combine }
    }

    pub fn action(action: Action<Item, R>) -> Self {
        Rule::Action(action)
    }
}

/// Applies a rule: `apply(scope, state) -> (next_state, result) | Error`.
///
/// This is the one recursive entry point every variant ultimately goes
/// through; `Reference` is the only variant that consults `scope`.
pub fn apply<Item: std::fmt::Debug + Clone, R>(rule: &Rule<Item, R>, scope: &Scope<Item, R>, state: Stream<Item>) -> Apply<Item, R> {
    match rule {
        Rule::Head { description, predicate, project } => {
            if state.is_empty() {
                return Err(Error::empty_stream().with_state("<empty stream>"));
            }
            let head = state.head()?;
            if !predicate(head) {
                return Err(Error::head_mismatch(format!("expected {description} but got {head:?}"))
                    .with_state(format!("{head:?}")));
            }
            let result = project(head);
            Ok((state.tail()?, result))
        }

        Rule::Reference(name) => {
            let resolved = scope
                .get(name)
                .ok_or_else(|| Error::unknown_rule(name.as_ref()))?;
            apply(resolved, scope, state).map_err(|e| Error::rule_context(name.as_ref(), e))
        }

        Rule::Or(alternatives) => {
            if alternatives.is_empty() {
                return Err(Error::no_alternative_matched(Vec::new()));
            }
            let mut errors = Vec::with_capacity(alternatives.len());
            for alt in alternatives {
                match apply(alt, scope, state.clone()) {
                    Ok(ok) => return Ok(ok),
                    Err(e) => errors.push(e),
                }
            }
            Err(Error::no_alternative_matched(errors))
        }

        Rule::And { rules, combine } => {
            let mut current = state;
            let mut results = Vec::with_capacity(rules.len());
            for r in rules {
                let (next, result) = apply(r, scope, current)?;
                current = next;
                results.push(result);
            }
            Ok((current, combine(results)))
        }

        Rule::ZeroOrMore { rule, combine } => {
            let mut current = state;
            let mut results = Vec::new();
            loop {
                match apply(rule, scope, current.clone()) {
                    Ok((next, result)) => {
                        current = next;
                        results.push(result);
                    }
                    Err(_) => return Ok((current, combine(results))),
                }
            }
        }

        Rule::OneOrMore { rule, combine } => {
            let (mut current, first) = apply(rule, scope, state)?;
            let mut results = vec![first];
            loop {
                match apply(rule, scope, current.clone()) {
                    Ok((next, result)) => {
                        current = next;
                        results.push(result);
                    }
                    Err(_) => return Ok((current, combine(results))),
                }
            }
        }

        Rule::ZeroOrOne { rule, combine } => match apply(rule, scope, state.clone()) {
            Ok(ok) => Ok(ok),
            Err(_) => Ok((state, combine(Vec::new()))),
        },

        Rule::UntilEmpty { rule, combine } => {
            let mut current = state;
            let mut results = Vec::new();
            while !current.is_empty() {
                let before_len = current.len();
                let (next, result) = apply(rule, scope, current)?;
                if next.len() == before_len {
                    return Err(Error::non_progress());
                }
                current = next;
                results.push(result);
            }
            Ok((current, combine(results)))
        }

        Rule::Action(action) => action(scope, state),
    }
}

//! Regex primitives and composite rules over a [`CharLike`] stream
//! (spec §4.3). `Pattern<T>` instantiates the generic [`Rule`] algebra with
//! `Result = String`, folded by text concatenation.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::char_like::CharLike;
use crate::error::Error;
use crate::rule::{self, Combiner, Rule};
use crate::stream::Stream;

/// `Rule<T, String>` — a regex rule over a `CharLike` stream, producing the
/// matched text.
pub type Pattern<T> = Rule<T, String>;

/// Folds matched fragments by string concatenation — the regex layer's
/// monoid (identity: the empty string).
pub fn text_combiner<T>() -> Combiner<String>
where
    T: 'static,
{
    Arc::new(|parts: Vec<String>| parts.concat())
}

fn char_text<T: CharLike>(item: &T) -> String {
    item.code_point().to_string()
}

/// Matches exactly the character `c`.
pub fn literal<T>(c: char) -> Pattern<T>
where
    T: CharLike + Send + Sync + 'static,
{
    Rule::head(format!("{c:?}"), move |item: &T| item.code_point() == c, char_text)
}

/// Matches any single character.
pub fn any<T>() -> Pattern<T>
where
    T: CharLike + Send + Sync + 'static,
{
    Rule::head(".", |_item: &T| true, char_text)
}

/// Matches membership in a finite, non-empty set of characters.
/// Fails construction on an empty set (`InvalidConstruction`).
pub fn class<T>(chars: impl IntoIterator<Item = char>) -> Result<Pattern<T>, Error>
where
    T: CharLike + Send + Sync + 'static,
{
    let set: BTreeSet<char> = chars.into_iter().collect();
    if set.is_empty() {
        return Err(Error::invalid_construction("empty character class"));
    }
    let description = format!("{set:?}");
    Ok(Rule::head(description, move |item: &T| set.contains(&item.code_point()), char_text))
}

/// The whitespace character class (spec's `\w`).
pub fn whitespace<T>() -> Pattern<T>
where
    T: CharLike + Send + Sync + 'static,
{
    class(" \t\n\r\x0b\x0c".chars()).expect("whitespace class is non-empty")
}

/// Matches `lo <= ch <= hi`. Fails construction if `hi < lo`.
pub fn range<T>(lo: char, hi: char) -> Result<Pattern<T>, Error>
where
    T: CharLike + Send + Sync + 'static,
{
    if hi < lo {
        return Err(Error::invalid_construction(format!("reversed range [{lo}-{hi}]")));
    }
    let description = format!("[{lo}-{hi}]");
    Ok(Rule::head(description, move |item: &T| {
        let c = item.code_point();
        c >= lo && c <= hi
    }, char_text))
}

/// Succeeds iff `inner` fails against the current head and the state is
/// non-empty; consumes one item and produces its text. Fails on empty
/// state.
pub fn not<T>(inner: Pattern<T>) -> Pattern<T>
where
    T: CharLike + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    Rule::action(Arc::new(move |scope, state: Stream<T>| {
        if state.is_empty() {
            return Err(Error::empty_stream());
        }
        if rule::apply(&inner, scope, state.clone()).is_ok() {
            return Err(Error::not_violated().with_state(format!("{:?}", state.head()?)));
        }
        let text = char_text(state.head()?);
        Ok((state.tail()?, text))
    }))
}

/// Ordered choice over regex rules.
pub fn or<T>(alternatives: Vec<Pattern<T>>) -> Pattern<T> {
    Rule::or(alternatives)
}

/// Ordered sequence, concatenating matched text.
pub fn and<T>(rules: Vec<Pattern<T>>) -> Pattern<T>
where
    T: 'static,
{
    Rule::and(rules, text_combiner::<T>())
}

pub fn zero_or_more<T>(rule: Pattern<T>) -> Pattern<T>
where
    T: 'static,
{
    Rule::zero_or_more(rule, text_combiner::<T>())
}

pub fn one_or_more<T>(rule: Pattern<T>) -> Pattern<T>
where
    T: 'static,
{
    Rule::one_or_more(rule, text_combiner::<T>())
}

pub fn zero_or_one<T>(rule: Pattern<T>) -> Pattern<T>
where
    T: 'static,
{
    Rule::zero_or_one(rule, text_combiner::<T>())
}

//! Parser layer: the rule algebra instantiated over a token stream,
//! producing a caller-chosen result type (spec §4.5).

mod primitives;

use std::sync::Arc;

pub use primitives::{consume_token, get_token_value};

use crate::error::Error;
use crate::lexer::Token;
use crate::rule::Rule;
use crate::scope::{Processor, Scope};
use crate::stream::Stream;

/// A rule over a token stream producing `R`.
pub type ParserRule<R> = Rule<Token, R>;

/// A `Rule` built from [`get_token_value`]: matches one token named `name`,
/// producing its value.
pub fn token(name: impl Into<Arc<str>>) -> ParserRule<String> {
    let name = name.into();
    Rule::action(Arc::new(move |_scope, state| get_token_value(state, &name)))
}

/// A `Rule` built from [`consume_token`]: matches and discards one token
/// named `name`.
pub fn discard(name: impl Into<Arc<str>>) -> ParserRule<()> {
    let name = name.into();
    Rule::action(Arc::new(move |_scope, state| consume_token(state, &name).map(|next| (next, ()))))
}

/// Runs `processor`'s root rule to completion and enforces the
/// parser-level `UnconsumedInput` convention: the root rule succeeding with
/// a non-empty remaining token stream is itself a failure.
pub fn parse_all<R>(
    processor: &Processor<Token, R>,
    caller_scope: &Scope<Token, R>,
    tokens: Stream<Token>,
) -> Result<R, Error>
where
    R: Clone,
{
    let (remaining, result) = processor.run(caller_scope, tokens)?;
    if !remaining.is_empty() {
        return Err(Error::unconsumed_input());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::Position;

    fn tokens(names: &[&str]) -> Stream<Token> {
        Stream::new(names.iter().map(|n| Token::new(*n, *n, Position::start())).collect())
    }

    #[test]
    fn token_rule_matches_and_advances() {
        let scope: Scope<Token, String> = Scope::new();
        let rule = token("int");
        let (next, value) = crate::rule::apply(&rule, &scope, tokens(&["int"])).unwrap();
        assert_eq!(value, "int");
        assert!(next.is_empty());
    }

    #[test]
    fn parse_all_rejects_unconsumed_input() {
        let scope = Scope::builder().with("root", token("a")).build();
        let processor = Processor::new(scope, "root");
        let caller: Scope<Token, String> = Scope::new();
        let err = parse_all(&processor, &caller, tokens(&["a", "b"])).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::UnconsumedInput);
    }

    #[test]
    fn parse_all_succeeds_when_fully_consumed() {
        let scope = Scope::builder().with("root", token("a")).build();
        let processor = Processor::new(scope, "root");
        let caller: Scope<Token, String> = Scope::new();
        let result = parse_all(&processor, &caller, tokens(&["a"])).unwrap();
        assert_eq!(result, "a");
    }
}

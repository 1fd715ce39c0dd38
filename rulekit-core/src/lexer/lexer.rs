//! An ordered set of named regex rules applied repeatedly until the
//! character stream is empty (spec §4.4).

use std::sync::Arc;

use super::token::Token;
use crate::error::Error;
use crate::regex::{positioned_chars, Pattern, Position, PositionedChar};
use crate::rule::{self, Rule};
use crate::scope::{Processor, Scope};
use crate::stream::Stream;

/// Reserved prefix for rule names the lexer installs into its own
/// processor scope. A caller-supplied rule name starting with this prefix
/// is rejected at construction (spec §4.4/§6).
const RESERVED_PREFIX: &str = "_lexer";
const ROOT_RULE_NAME: &str = "_lexer_root";
const REGEXES_RULE_NAME: &str = "_lexer_regexes";

fn is_skip_rule(name: &str) -> bool {
    name.starts_with('_')
}

/// Builds a [`Lexer`], validating names as rules are added.
pub struct LexerBuilder {
    rules: Vec<(String, Pattern<PositionedChar>)>,
}

impl LexerBuilder {
    pub fn new() -> Self {
        LexerBuilder { rules: Vec::new() }
    }

    /// Registers a named rule, in order. Does not validate yet — duplicate
    /// names and reserved-prefix collisions are rejected in [`build`].
    pub fn rule(mut self, name: impl Into<String>, pattern: Pattern<PositionedChar>) -> Self {
        self.rules.push((name.into(), pattern));
        self
    }

    pub fn build(self) -> Result<Lexer, Error> {
        let mut seen = std::collections::HashSet::new();
        for (name, _) in &self.rules {
            if name.starts_with(RESERVED_PREFIX) {
                return Err(Error::invalid_construction(format!(
                    "lexer rule name `{name}` collides with the reserved `{RESERVED_PREFIX}` prefix"
                )));
            }
            if !seen.insert(name.clone()) {
                return Err(Error::invalid_construction(format!("duplicate lexer rule name `{name}`")));
            }
        }
        Ok(Lexer::from_rules(self.rules))
    }
}

impl Default for LexerBuilder {
    fn default() -> Self {
        LexerBuilder::new()
    }
}

/// Wraps a named regex rule as a lexer step: captures the position of the
/// first matched character, and emits a singleton token unless `name` is a
/// skip rule (leading underscore), in which case it emits nothing.
fn lexer_step(name: String, pattern: Pattern<PositionedChar>) -> Rule<PositionedChar, Vec<Token>> {
    Rule::action(Arc::new(move |_scope, state: Stream<PositionedChar>| {
        let position = state.head()?.position;
        let pattern_scope: Scope<PositionedChar, String> = Scope::new();
        let (next, text) = rule::apply(&pattern, &pattern_scope, state)?;
        if is_skip_rule(&name) {
            Ok((next, Vec::new()))
        } else {
            Ok((next, vec![Token::new(name.clone(), text, position)]))
        }
    }))
}

fn token_vec_combiner() -> rule::Combiner<Vec<Token>> {
    Arc::new(|parts: Vec<Vec<Token>>| parts.into_iter().flatten().collect())
}

/// An ordered list of `(name, regex_rule)` pairs, applied repeatedly at the
/// current head in definition order until the character stream is empty.
#[derive(Clone)]
pub struct Lexer {
    processor: Processor<PositionedChar, Vec<Token>>,
}

impl Lexer {
    pub fn builder() -> LexerBuilder {
        LexerBuilder::new()
    }

    fn from_rules(rules: Vec<(String, Pattern<PositionedChar>)>) -> Self {
        let alternatives: Vec<_> = rules.into_iter().map(|(name, pattern)| lexer_step(name, pattern)).collect();
        let scope = Scope::builder()
            .with(ROOT_RULE_NAME, Rule::until_empty(Rule::reference(REGEXES_RULE_NAME), token_vec_combiner()))
            .with(REGEXES_RULE_NAME, Rule::or(alternatives))
            .build();
        Lexer { processor: Processor::new(scope, ROOT_RULE_NAME) }
    }

    /// Tokenizes a pre-built, positioned character stream.
    pub fn tokenize_stream(&self, state: Stream<PositionedChar>) -> Result<Vec<Token>, Error> {
        let caller_scope = Scope::new();
        let (_, tokens) = self.processor.run(&caller_scope, state)?;
        Ok(tokens)
    }

    /// Builds the character stream (assigning positions) and tokenizes it.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, Error> {
        self.tokenize_stream(Stream::new(positioned_chars(input)))
    }
}

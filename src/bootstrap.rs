//! Compiles a pattern string into a [`Pattern<char>`] using only
//! `rulekit_core`'s own lexer and parser layers — the pattern
//! mini-language that feeds every other rule in this crate is itself a
//! grammar expressed on top of the same machinery it configures.
//!
//! Grammar, informally:
//!
//! ```text
//! root    := term+
//! term    := '^'? primary ('*' | '+' | '?' | '!')*
//! primary := char | '.' | '[' char '-' char ']' | '\' any | group
//! group   := '(' term+ ('|' term+)* ')'
//! ```
//!
//! `char` is any source character outside the operator alphabet; `\` plus
//! one more character either escapes an operator back to a literal or
//! selects the `\w` whitespace class.

use std::sync::Arc;

use rulekit_core::lexer::{Lexer, Token};
use rulekit_core::parser::{self, consume_token, get_token_value};
use rulekit_core::regex::{self, Pattern, PositionedChar};
use rulekit_core::rule::{self, Combiner};
use rulekit_core::{Error, Processor, Rule, Scope, Stream};

/// Characters that cannot appear as a bare literal: `. [ - ] \ ( ) | * + ? ! ^`.
const OPERATORS: &str = ".[-]\\()|*+?!^";

fn lexer() -> Lexer {
    let mut builder = Lexer::builder().rule(
        "char",
        regex::not(regex::class::<PositionedChar>(OPERATORS.chars()).expect("OPERATORS is non-empty")),
    );
    for op in OPERATORS.chars() {
        builder = builder.rule(op.to_string(), regex::literal::<PositionedChar>(op));
    }
    builder.build().expect("bootstrap lexer rule names are distinct and none starts with `_lexer`")
}

fn one_char(token_value: &str) -> char {
    token_value.chars().next().expect("a `char` or operator token always carries exactly one character")
}

fn parse_primary(scope: &Scope<Token, Pattern<char>>, state: Stream<Token>) -> rule::Apply<Token, Pattern<char>> {
    if let Ok((next, value)) = get_token_value(state.clone(), "char") {
        return Ok((next, regex::literal(one_char(&value))));
    }
    if let Ok(next) = consume_token(state.clone(), ".") {
        return Ok((next, regex::any()));
    }
    if let Ok(next) = consume_token(state.clone(), "[") {
        let (next, lo) = get_token_value(next, "char")?;
        let next = consume_token(next, "-")?;
        let (next, hi) = get_token_value(next, "char")?;
        let next = consume_token(next, "]")?;
        let pattern = regex::range(one_char(&lo), one_char(&hi))?;
        return Ok((next, pattern));
    }
    if let Ok(next) = consume_token(state.clone(), "\\") {
        let escaped = next.head()?.value.clone();
        let next = next.tail()?;
        let c = one_char(&escaped);
        if c == 'w' {
            return Ok((next, regex::whitespace()));
        }
        if OPERATORS.contains(c) {
            return Ok((next, regex::literal(c)));
        }
        return Err(Error::invalid_construction(format!("unknown escape `\\{c}`")));
    }
    rule::apply(&Rule::reference("group"), scope, state)
}

fn parse_group(scope: &Scope<Token, Pattern<char>>, state: Stream<Token>) -> rule::Apply<Token, Pattern<char>> {
    let mut state = consume_token(state, "(")?;
    let mut alternatives: Vec<Vec<Pattern<char>>> = Vec::new();
    let mut current: Vec<Pattern<char>> = Vec::new();
    loop {
        match rule::apply(&Rule::reference("term"), scope, state.clone()) {
            Ok((next, term)) => {
                current.push(term);
                state = next;
            }
            Err(_) => {
                if current.is_empty() {
                    return Err(Error::invalid_construction("empty group or alternative"));
                }
                alternatives.push(std::mem::take(&mut current));
                match consume_token(state.clone(), "|") {
                    Ok(next) => {
                        state = next;
                        continue;
                    }
                    Err(_) => break,
                }
            }
        }
    }
    let state = consume_token(state, ")")?;
    let pattern = if alternatives.len() == 1 {
        regex::and(alternatives.into_iter().next().unwrap())
    } else {
        regex::or(alternatives.into_iter().map(|alt| regex::and(alt)).collect())
    };
    Ok((state, pattern))
}

fn parse_term(scope: &Scope<Token, Pattern<char>>, state: Stream<Token>) -> rule::Apply<Token, Pattern<char>> {
    let (state, negate) = match consume_token(state.clone(), "^") {
        Ok(next) => (next, true),
        Err(_) => (state, false),
    };
    let (mut state, mut pattern) = rule::apply(&Rule::reference("primary"), scope, state)?;
    if negate {
        pattern = regex::not(pattern);
    }
    loop {
        if let Ok(next) = consume_token(state.clone(), "*") {
            pattern = regex::zero_or_more(pattern);
            state = next;
            continue;
        }
        if let Ok(next) = consume_token(state.clone(), "+") {
            pattern = regex::one_or_more(pattern);
            state = next;
            continue;
        }
        if let Ok(next) = consume_token(state.clone(), "?") {
            pattern = regex::zero_or_one(pattern);
            state = next;
            continue;
        }
        if let Ok(next) = consume_token(state.clone(), "!") {
            pattern = Rule::until_empty(pattern, regex::text_combiner::<char>());
            state = next;
            continue;
        }
        break;
    }
    Ok((state, pattern))
}

fn root_combine() -> Combiner<Pattern<char>> {
    Arc::new(|mut terms: Vec<Pattern<char>>| {
        if terms.len() == 1 {
            terms.pop().unwrap()
        } else {
            regex::and(terms)
        }
    })
}

fn grammar_scope() -> Scope<Token, Pattern<char>> {
    Scope::builder()
        .with("root", Rule::until_empty(Rule::reference("term"), root_combine()))
        .with("term", Rule::action(Arc::new(parse_term)))
        .with("primary", Rule::action(Arc::new(parse_primary)))
        .with("group", Rule::action(Arc::new(parse_group)))
        .build()
}

/// Compiles a pattern string such as `"(a|b)+\w[0-9]"` into a `Pattern<char>`.
///
/// Tokenizes `source` with a lexer built over the operator alphabet, then
/// parses the resulting tokens with the grammar above, running both
/// through `rulekit_core`'s generic `apply`.
pub fn load(source: &str) -> Result<Pattern<char>, Error> {
    let tokens = lexer().tokenize(source)?;
    let processor = Processor::new(grammar_scope(), "root");
    let caller_scope = Scope::new();
    parser::parse_all(&processor, &caller_scope, Stream::new(tokens))
}

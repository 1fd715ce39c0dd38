//! `rulekit`: a generic stream/rule/scope engine, instantiated as a regex
//! matcher, a lexer and a parser, plus a bootstrap pattern compiler built
//! out of that same lexer and parser.
//!
//! The engine itself lives in `rulekit_core`, re-exported here in full.
//! This crate adds [`load`], which turns a pattern string like
//! `"(a|b)+\w[0-9]"` into a `Pattern<char>` by running it through a small
//! grammar of its own — see `bootstrap`.

mod bootstrap;

pub use bootstrap::load;

pub use rulekit_core::error::{Error, ErrorKind};
pub use rulekit_core::lexer::{Lexer, LexerBuilder, Token};
pub use rulekit_core::parser::{self, parse_all, ParserRule};
pub use rulekit_core::regex::{self, Pattern, PositionedChar};
pub use rulekit_core::rule::{self, Rule};
pub use rulekit_core::scope::{Processor, Scope, ScopeBuilder};
pub use rulekit_core::stream::Stream;

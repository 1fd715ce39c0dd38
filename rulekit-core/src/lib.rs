//! A generic rule-processing engine: an immutable stream, a rule algebra
//! closed under named references, ordered choice, sequencing and
//! repetition, and three instantiations of that algebra — a regex matcher,
//! a lexer, and a parser — sharing one apply function.
//!
//! Set `RULEKIT_DEBUG=1` to have [`scope::Processor::run`] print which root
//! rule ran and whether it succeeded.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod regex;
pub mod rule;
pub mod scope;
pub mod stream;

pub use error::{Error, ErrorKind};
pub use rule::Rule;
pub use scope::{Processor, Scope};
pub use stream::Stream;

//! Lexer layer: character stream → token stream (spec §4.4).

mod lexer;
mod token;

pub use lexer::{Lexer, LexerBuilder};
pub use token::Token;

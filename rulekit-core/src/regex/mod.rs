//! Regex layer: the rule algebra instantiated over a `CharLike` stream,
//! producing matched text (spec §4.3).

mod char_like;
mod pattern;

pub use char_like::{positioned_chars, CharLike, Position, PositionedChar};
pub use pattern::{
    and, any, class, literal, not, one_or_more, or, range, text_combiner, whitespace,
    zero_or_more, zero_or_one, Pattern,
};

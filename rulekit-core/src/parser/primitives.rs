//! The two primitive operations parser semantic actions are built from
//! (spec §4.5).

use crate::error::Error;
use crate::lexer::Token;
use crate::stream::Stream;

/// Fails on an empty stream, or when the head token's `rule_name` does not
/// match `expected_name`; otherwise returns `(tail, head.value)`.
pub fn get_token_value(state: Stream<Token>, expected_name: &str) -> Result<(Stream<Token>, String), Error> {
    let head = state.head()?;
    if head.rule_name != expected_name {
        return Err(Error::head_mismatch(format!(
            "expected token `{expected_name}` but got `{}`",
            head.rule_name
        ))
        .with_state(format!("{head:?}")));
    }
    let value = head.value.clone();
    Ok((state.tail()?, value))
}

/// Same as [`get_token_value`], but discards the value.
pub fn consume_token(state: Stream<Token>, expected_name: &str) -> Result<Stream<Token>, Error> {
    let (next, _) = get_token_value(state, expected_name)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::Position;

    fn stream_of(names: &[&str]) -> Stream<Token> {
        Stream::new(
            names
                .iter()
                .map(|n| Token::new(*n, *n, Position::start()))
                .collect(),
        )
    }

    #[test]
    fn get_token_value_returns_tail_and_value() {
        let s = stream_of(&["int"]);
        let (next, value) = get_token_value(s, "int").unwrap();
        assert_eq!(value, "int");
        assert!(next.is_empty());
    }

    #[test]
    fn get_token_value_fails_on_name_mismatch() {
        let s = stream_of(&["int"]);
        assert!(get_token_value(s, "ident").is_err());
    }

    #[test]
    fn get_token_value_fails_with_empty_stream_kind_on_empty() {
        let s: Stream<Token> = Stream::new(vec![]);
        let err = get_token_value(s, "int").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::EmptyStream);
    }

    #[test]
    fn consume_token_discards_value() {
        let s = stream_of(&["(", "int"]);
        let next = consume_token(s, "(").unwrap();
        assert_eq!(next.len(), 1);
    }
}

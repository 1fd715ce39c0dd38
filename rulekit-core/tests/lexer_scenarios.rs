use rulekit_core::lexer::{Lexer, Token};
use rulekit_core::regex::{self, Position};

#[test]
fn r_and_s_rules_tokenize_in_order_with_positions() {
    let lexer = Lexer::builder()
        .rule("r", regex::one_or_more(regex::literal('a')))
        .rule("s", regex::one_or_more(regex::literal('b')))
        .build()
        .unwrap();

    let tokens = lexer.tokenize("aaaabbbaab").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new("r", "aaaa", Position { line: 0, column: 0 }),
            Token::new("s", "bbb", Position { line: 0, column: 4 }),
            Token::new("r", "aa", Position { line: 0, column: 7 }),
            Token::new("s", "b", Position { line: 0, column: 9 }),
        ]
    );
}

#[test]
fn skip_rule_advances_position_without_emitting_a_token() {
    let lexer = Lexer::builder()
        .rule("_ws", regex::one_or_more(regex::whitespace()))
        .rule("word", regex::one_or_more(regex::class('a'..='z').unwrap()))
        .build()
        .unwrap();

    let tokens = lexer.tokenize("  foo   bar").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], Token::new("word", "foo", Position { line: 0, column: 2 }));
    assert_eq!(tokens[1], Token::new("word", "bar", Position { line: 0, column: 8 }));
}

#[test]
fn unmatched_position_fails_rather_than_skipping_ahead() {
    let lexer = Lexer::builder().rule("word", regex::one_or_more(regex::class('a'..='z').unwrap())).build().unwrap();
    let err = lexer.tokenize("foo!bar").unwrap_err();
    // UntilEmpty's inner rule failed with input remaining, not EmptyStream.
    assert_ne!(err.kind, rulekit_core::ErrorKind::EmptyStream);
}

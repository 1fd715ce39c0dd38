use rulekit_core::rule::apply;
use rulekit_core::{Rule, Scope, Stream};

fn literal(c: char) -> Rule<char, String> {
    Rule::head(format!("{c:?}"), move |item: &char| *item == c, |item: &char| item.to_string())
}

#[test]
fn successful_application_yields_a_suffix_of_the_input() {
    let scope: Scope<char, String> = Scope::new();
    let rule = Rule::one_or_more(literal('a'), rulekit_core::regex::text_combiner::<char>());
    let state = Stream::new("aaab".chars().collect());
    let (next, _) = apply(&rule, &scope, state.clone()).unwrap();
    // every item left in `next` appears, in order, at the tail of `state`.
    let tail: Vec<char> = state.iter().skip(state.len() - next.len()).cloned().collect();
    let remaining: Vec<char> = next.iter().cloned().collect();
    assert_eq!(tail, remaining);
}

#[test]
fn or_and_repetition_do_not_consume_on_failure() {
    let scope: Scope<char, String> = Scope::new();
    let state = Stream::new("zzz".chars().collect());

    let or_rule = Rule::or(vec![literal('a'), literal('b')]);
    assert!(apply(&or_rule, &scope, state.clone()).is_err());

    let one_or_more = Rule::one_or_more(literal('a'), rulekit_core::regex::text_combiner::<char>());
    assert!(apply(&one_or_more, &scope, state.clone()).is_err());

    // neither failing application should have advanced the original stream.
    assert_eq!(state.len(), 3);
    assert_eq!(*state.head().unwrap(), 'z');
}

#[test]
fn concat_head_and_identity() {
    let empty: Stream<char> = Stream::new(vec![]);
    let a = Stream::new(vec!['x', 'y']);
    assert_eq!(Stream::concat(&empty, &a), a);
    assert_eq!(Stream::concat(&a, &empty), a);
    let b = Stream::new(vec!['z']);
    let combined = Stream::concat(&a, &b);
    assert_eq!(*combined.head().unwrap(), 'x');
}

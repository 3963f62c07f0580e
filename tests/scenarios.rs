//! End-to-end scenarios exercising the driver against whole patterns,
//! rather than individual combinators in isolation (see the `#[cfg(test)]`
//! modules next to each combinator for those).

use seqex::{any, literal, literal_seq, predicate, recursive, Pattern};

#[test]
fn s1_parentheses() {
    let p: Pattern<char, ()> = recursive(|inner| {
        literal('(')
            .then(inner)
            .then(&literal(')'))
            .map(|_| ())
            .then(&inner.repeat_greedy())
            .map(|_| ())
    });
    let input: Vec<char> = "(())()".chars().collect();
    let m = p.find(&input).expect("expected a match");
    assert_eq!(m.index(), 0);
    assert_eq!(m.length(), 6);
}

#[test]
fn s2_atomic_prevents_backtracking() {
    // Without atomic, a*a backtracks from the longest a-run down to find a
    // trailing literal 'a'. With atomic, that backtracking is cut off.
    let greedy_backtracking = literal('a').repeat_greedy().then(&literal('a'));
    let atomic_possessive = literal('a').repeat_greedy().atomic().then(&literal('a'));
    let input: Vec<char> = "aaaa".chars().collect();

    assert!(greedy_backtracking.is_match_at(&input, 0));
    assert!(!atomic_possessive.is_match_at(&input, 0));
}

#[test]
fn s3_repetition_priority() {
    let greedy = literal('a').repeat_greedy().then(&literal('a'));
    let lazy = literal('a').repeat().then(&literal('a'));
    let input: Vec<char> = "aaaa".chars().collect();

    let greedy_first = greedy.forward(&input, 0).next().unwrap();
    assert_eq!(greedy_first.len, 4);

    let lazy_first = lazy.forward(&input, 0).next().unwrap();
    assert_eq!(lazy_first.len, 1);
}

#[test]
fn s4_or_vs_one_of() {
    let a = literal_seq("abc".chars()).or(&literal_seq("ab".chars()));
    let a_prime = literal_seq("abc".chars()).one_of(&literal_seq("ab".chars()));
    let input: Vec<char> = "abd".chars().collect();

    assert!(a.is_match_at(&input, 0));
    assert!(a_prime.is_match_at(&input, 0));

    assert!(a.then(&literal('d')).is_match_at(&input, 0));
    assert!(!a_prime.then(&literal('d')).is_match_at(&input, 0));
}

#[test]
fn s5_reverse_matching() {
    let p = literal_seq("ab".chars());
    let input: Vec<char> = "xabyab".chars().collect();

    let forward: Vec<(usize, usize)> = p.find_iter(&input).map(|m| (m.index(), m.length())).collect();
    assert_eq!(forward, vec![(1, 2), (4, 2)]);

    let backward: Vec<(usize, usize)> = p
        .rfind_iter(&input, input.len())
        .unwrap()
        .map(|m| (m.index(), m.length()))
        .collect();
    assert_eq!(backward, vec![(4, 2), (1, 2)]);

    // find_iter and rfind_iter agree on the window for the same match.
    assert_eq!(forward[0], backward[1]);
    assert_eq!(forward[1], backward[0]);
}

#[test]
fn s6_numbers_over_integer_tokens() {
    let positive_run = predicate(|&x: &i64| x > 0).repeat_at_least_greedy(1);
    let input = [0i64, 3, 5, 0, 7];
    let hits: Vec<(usize, usize)> = positive_run.find_iter(&input).map(|m| (m.index(), m.length())).collect();
    assert_eq!(hits, vec![(1, 2), (4, 1)]);
}

#[test]
fn result_threading_through_composition() {
    let digit = predicate(|c: &char| c.is_ascii_digit());
    let number = digit
        .repeat_at_least_greedy(1)
        .map_match(|len, _| len as i64);
    let input: Vec<char> = "42".chars().collect();
    assert_eq!(number.find_value(&input), Some(2));
}

#[test]
fn any_consumes_exactly_one_element_either_direction() {
    let input = [1, 2, 3];
    let p = any::<i32>();
    assert!(p.is_match_at(&input, 1));
    assert!(p.is_match_up_to(&input, 2).unwrap());
}

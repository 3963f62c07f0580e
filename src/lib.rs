//! A combinator-based pattern-matching engine over arbitrary typed element
//! sequences, with forward and backward (reverse) matching and typed
//! results threaded through composition.
//!
//! Patterns are built programmatically from small constructors
//! ([`literal`], [`predicate`], [`any`], ...) combined with methods on
//! [`Pattern`] (`then`, `or`, `repeat_greedy`, `atomic`, `look_ahead`, ...)
//! — there is no textual pattern syntax to parse. A [`Pattern<E, V>`]
//! doubles as a parser combinator: `V` is whatever typed result your
//! combinators choose to carry (`()` if you only care whether and where
//! something matched).
//!
//! ```
//! use seqex::{literal, predicate};
//!
//! let digits = predicate(|c: &char| c.is_ascii_digit())
//!     .repeat_at_least_greedy(1)
//!     .map(|ds| ds.into_iter().collect::<String>());
//! let dash = literal('-');
//! let phone = digits.clone().then_with(&dash, |a, _| a).then_with(&digits, |a, b| format!("{a}-{b}"));
//!
//! let input: Vec<char> = "555-1234".chars().collect();
//! assert_eq!(phone.find_value(&input), Some("555-1234".to_string()));
//! ```
//!
//! See [`Pattern`] for the full combinator surface and [`driver`] for the
//! methods that turn a pattern and an input into answers.

mod config;
mod driver;
mod error;
mod pattern;
mod token;

pub use config::FindConfig;
pub use driver::Match;
pub use error::Error;
pub use pattern::{
    any, empty, end, literal, literal_seq, literal_seq_with, literal_with, not_any_of, not_element,
    one_of, ors, predicate, recursive, sequence, start, try_recursive, AndMode, Pattern,
};
pub use token::{MatchValue, Token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_example_matches_forward_and_finds_all() {
        let word = predicate(|c: &char| c.is_alphabetic()).repeat_at_least_greedy(1);
        let input: Vec<char> = "two words".chars().collect();
        let hits: Vec<(usize, usize)> = word.find_iter(&input).map(|m| (m.index(), m.length())).collect();
        assert_eq!(hits, vec![(0, 3), (4, 5)]);
    }

    #[test]
    fn scenario_s1_parentheses() {
        let p: Pattern<char, ()> = recursive(|inner| {
            literal('(')
                .then(inner)
                .then(&literal(')'))
                .map(|_| ())
                .then(&inner.repeat_greedy())
                .map(|_| ())
        });
        let input: Vec<char> = "(())()".chars().collect();
        let m = p.find(&input).unwrap();
        assert_eq!((m.index(), m.length()), (0, 6));
    }

    #[test]
    fn scenario_s4_or_vs_one_of() {
        let a = literal_seq("abc".chars()).or(&literal_seq("ab".chars()));
        let a_prime = literal_seq("abc".chars()).one_of(&literal_seq("ab".chars()));
        let input: Vec<char> = "abd".chars().collect();

        assert!(a.is_match_at(&input, 0));
        assert!(a_prime.is_match_at(&input, 0));

        assert!(a.then(&literal('d')).is_match_at(&input, 0));
        assert!(!a_prime.then(&literal('d')).is_match_at(&input, 0));
    }
}

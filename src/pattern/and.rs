//! Conjunction: require two independent patterns to both match the same
//! span, in one of three alignments.

use crate::token::{BoxTokenIter, MatchValue, Token};

use super::{MatcherNode, Pattern};

/// How [`Pattern::and`] and friends require their two operands to align.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndMode {
    /// Both operands are run from the same start; any pair of their
    /// successes is yielded, lengths need not match.
    Normal,
    /// Both operands must consume exactly the same length.
    Exact,
    /// The second operand is run backward from where the first operand's
    /// match ended, i.e. it must match the *same span*, end-to-start.
    Reverse,
}

struct AndNode<E, V, W> {
    left: Pattern<E, V>,
    right: Pattern<E, W>,
    mode: AndMode,
}

/// The outer window's own edges, as plain `usize`s, regardless of which
/// direction produced `len` (forward: non-negative; backward: non-positive).
fn window_bounds(start: usize, len: isize) -> (usize, usize) {
    let end = (start as isize + len) as usize;
    if len >= 0 {
        (start, end)
    } else {
        (end, start)
    }
}

/// `other`'s first match anywhere inside `window`, scanning candidate start
/// positions left to right ("runs other's driver over that slice").
fn first_match_in<E: 'static, W: MatchValue>(other: &Pattern<E, W>, window: &[E]) -> Option<W> {
    (0..=window.len()).find_map(|pos| other.forward(window, pos).next()).map(|t| t.value)
}

/// `other` matched exactly across the whole of `window` (same start and end).
fn exact_match_in<E: 'static, W: MatchValue>(other: &Pattern<E, W>, window: &[E]) -> Option<W> {
    other
        .forward(window, 0)
        .find(|t| t.len as usize == window.len())
        .map(|t| t.value)
}

/// `other`'s first match in `window`, searched reverse-first (candidate end
/// positions from the end of the window backward).
fn first_reverse_match_in<E: 'static, W: MatchValue>(other: &Pattern<E, W>, window: &[E]) -> Option<W> {
    (0..=window.len())
        .rev()
        .find_map(|pos| other.backward(window, pos).next())
        .map(|t| t.value)
}

impl<E: 'static, V: MatchValue, W: MatchValue> AndNode<E, V, W> {
    fn combine<'i>(&self, input: &'i [E], len: isize, start: usize, v: V) -> Option<Token<(V, W)>> {
        let (a, b) = window_bounds(start, len);
        let window = &input[a..b];
        let matched = match self.mode {
            AndMode::Normal => first_match_in(&self.right, window),
            AndMode::Exact => exact_match_in(&self.right, window),
            AndMode::Reverse => first_reverse_match_in(&self.right, window),
        };
        matched.map(|w| Token::new(len, (v, w)))
    }
}

impl<E: 'static, V: MatchValue, W: MatchValue> MatcherNode<E, (V, W)> for AndNode<E, V, W> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, (V, W)> {
        let this = AndNode { left: self.left.clone(), right: self.right.clone(), mode: self.mode };
        Box::new(
            self.left
                .forward(input, start)
                .filter_map(move |t1| this.combine(input, t1.len, start, t1.value.clone())),
        )
    }

    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, (V, W)> {
        let this = AndNode { left: self.left.clone(), right: self.right.clone(), mode: self.mode };
        Box::new(
            self.left
                .backward(input, start)
                .filter_map(move |t1| this.combine(input, t1.len, start, t1.value.clone())),
        )
    }

    fn supports_backward(&self) -> bool {
        self.left.supports_backward()
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    /// Succeeds wherever `self` succeeds, additionally requiring that the
    /// matched window contain a match for `other` somewhere inside it.
    /// The outer token keeps `self`'s own length and carries `other`'s
    /// first-match result alongside `self`'s ([`AndMode::Normal`]).
    pub fn and<W: MatchValue>(&self, other: &Pattern<E, W>) -> Pattern<E, (V, W)> {
        Pattern::from_node(AndNode { left: self.clone(), right: other.clone(), mode: AndMode::Normal })
    }

    /// Like [`Pattern::and`], but `other` must match the window exactly —
    /// same start, same end — rather than merely somewhere inside it
    /// ([`AndMode::Exact`]).
    pub fn and_exact<W: MatchValue>(&self, other: &Pattern<E, W>) -> Pattern<E, (V, W)> {
        Pattern::from_node(AndNode { left: self.clone(), right: other.clone(), mode: AndMode::Exact })
    }

    /// Like [`Pattern::and`], but `other` is searched reverse-first within
    /// the window ([`AndMode::Reverse`]). Useful for patterns defined more
    /// naturally in the other direction, e.g. pairing a forward prefix check
    /// with a backward suffix check over the same run.
    pub fn and_reverse<W: MatchValue>(&self, other: &Pattern<E, W>) -> Pattern<E, (V, W)> {
        Pattern::from_node(AndNode { left: self.clone(), right: other.clone(), mode: AndMode::Reverse })
    }
}

#[cfg(test)]
mod tests {
    use crate::{any, literal_seq, predicate};

    #[test]
    fn and_requires_both_to_match_from_same_start() {
        let digits = predicate(|c: &char| c.is_ascii_digit())
            .repeat_at_least_greedy(1)
            .map(|_| ());
        let at_least_two = any().then(&any()).map(|_| ());
        let p = digits.and(&at_least_two);
        let input: Vec<char> = "123".chars().collect();
        assert!(p.forward(&input, 0).next().is_some());

        let short_input: Vec<char> = "1".chars().collect();
        assert!(p.forward(&short_input, 0).next().is_none());
    }

    #[test]
    fn and_exact_requires_equal_length() {
        let a = literal_seq("ab".chars());
        let b = any().then(&any()).map(|_| ());
        let p = a.and_exact(&b);
        let input: Vec<char> = "ab".chars().collect();
        assert!(p.forward(&input, 0).next().is_some());
    }
}

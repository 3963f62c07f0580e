//! Turning a [`crate::Pattern`] plus an input into booleans, matches, and
//! replacement output.
//!
//! Every method here is an inherent method on `Pattern<E, V>`, following the
//! teacher's convention of putting the primary user-facing surface on the
//! type itself rather than a separate free-function module.

use crate::config::FindConfig;
use crate::error::{self, Error};
use crate::pattern::Pattern;
use crate::token::MatchValue;

/// A single match: the window it covers in `original`, and the result
/// carried by the pattern that produced it.
///
/// `index` always points at the first element of the matched window
/// regardless of which direction found it — a backward match is normalized
/// by adding its (negative) length to its start index before it is ever
/// wrapped in a `Match`, so `find_iter` and `rfind_iter` report the same
/// shape for the same window.
#[derive(Debug, Clone, Copy)]
pub struct Match<'i, E, V> {
    original: &'i [E],
    index: usize,
    length: usize,
    value: V,
}

impl<'i, E, V> Match<'i, E, V> {
    fn new(original: &'i [E], index: usize, length: usize, value: V) -> Self {
        Match { original, index, length, value }
    }

    /// The index of the first matched element.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of elements matched.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The full input this match was found in.
    pub fn original(&self) -> &'i [E] {
        self.original
    }

    /// The matched elements, i.e. `self.original()[self.index()..][..self.length()]`.
    pub fn matched(&self) -> &'i [E] {
        &self.original[self.index..self.index + self.length]
    }

    /// The result carried by the pattern.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume the match, taking ownership of its carried result.
    pub fn into_value(self) -> V {
        self.value
    }
}

fn normalize(start: usize, len: isize) -> (usize, usize) {
    if len >= 0 {
        (start, len as usize)
    } else {
        let index = (start as isize + len) as usize;
        (index, (-len) as usize)
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    fn require_backward(&self) -> Result<(), Error> {
        if self.supports_backward() {
            Ok(())
        } else {
            Err(error::unsupported_direction(
                "this pattern contains a forward-only combinator (e.g. then_with_selector) \
                 and cannot be driven backward",
            ))
        }
    }

    /// `∃ i ∈ [0, N]` such that `self` matches starting at `i`.
    pub fn is_match(&self, input: &[E]) -> bool {
        self.is_match_from(input, 0)
    }

    /// `∃ i ∈ [start_at, N]` such that `self` matches starting at `i`.
    pub fn is_match_from(&self, input: &[E], start_at: usize) -> bool {
        (start_at..=input.len()).any(|i| self.forward(input, i).next().is_some())
    }

    /// Whether `self` matches starting exactly at `i`.
    pub fn is_match_at(&self, input: &[E], i: usize) -> bool {
        self.forward(input, i).next().is_some()
    }

    /// Whether `self` matches ending exactly at `j`.
    pub fn is_match_up_to(&self, input: &[E], j: usize) -> Result<bool, Error> {
        self.require_backward()?;
        Ok(self.backward(input, j).next().is_some())
    }

    /// Whether `self` matches the exact window `[i, j)` — neither more nor
    /// less. Implemented by stripping the input to `[..j]` before matching
    /// forward from `i`, so combinators that look ahead (e.g.
    /// [`Pattern::look_ahead`]) cannot see past `j` and manufacture a
    /// spurious match.
    pub fn is_match_exact(&self, input: &[E], i: usize, j: usize) -> bool {
        if j > input.len() || i > j {
            return false;
        }
        let window = &input[..j];
        let want = (j - i) as isize;
        self.forward(window, i).any(|t| t.len == want)
    }

    /// `∃ k ∈ [0, end_at]` such that `self` matches backward from `end_at - k`.
    pub fn is_match_reverse(&self, input: &[E]) -> Result<bool, Error> {
        self.is_match_reverse_from(input, input.len())
    }

    /// `∃ k ∈ [0, end_at]` such that `self` matches backward from `end_at - k`.
    pub fn is_match_reverse_from(&self, input: &[E], end_at: usize) -> Result<bool, Error> {
        self.require_backward()?;
        Ok((0..=end_at).any(|k| self.backward(input, end_at - k).next().is_some()))
    }

    /// The first non-overlapping match at or after `0`.
    pub fn find<'i>(&self, input: &'i [E]) -> Option<Match<'i, E, V>> {
        self.find_from(input, 0)
    }

    /// The first non-overlapping match at or after `start_at`.
    pub fn find_from<'i>(&self, input: &'i [E], start_at: usize) -> Option<Match<'i, E, V>> {
        self.find_iter_from(input, start_at).next()
    }

    /// Only the carried result of [`Pattern::find`].
    pub fn find_value(&self, input: &[E]) -> Option<V> {
        self.find(input).map(Match::into_value)
    }

    /// Only the carried result of [`Pattern::find_from`].
    pub fn find_from_value(&self, input: &[E], start_at: usize) -> Option<V> {
        self.find_from(input, start_at).map(Match::into_value)
    }

    /// Every non-overlapping match at or after `0`, lazily.
    ///
    /// ```
    /// use seqex::literal_seq;
    /// let p = literal_seq("ab".chars());
    /// let input: Vec<char> = "xabyab".chars().collect();
    /// let hits: Vec<(usize, usize)> = p.find_iter(&input).map(|m| (m.index(), m.length())).collect();
    /// assert_eq!(hits, vec![(1, 2), (4, 2)]);
    /// ```
    pub fn find_iter<'i>(&self, input: &'i [E]) -> impl Iterator<Item = Match<'i, E, V>> + 'i {
        self.find_iter_from(input, 0)
    }

    /// Every non-overlapping match at or after `start_at`, lazily.
    pub fn find_iter_from<'i>(
        &self,
        input: &'i [E],
        start_at: usize,
    ) -> impl Iterator<Item = Match<'i, E, V>> + 'i {
        ForwardMatches { pattern: self.clone(), input, pos: start_at }
    }

    /// Only the carried results of [`Pattern::find_iter`].
    pub fn find_iter_value<'i>(&self, input: &'i [E]) -> impl Iterator<Item = V> + 'i {
        self.find_iter(input).map(Match::into_value)
    }

    /// Only the carried results of [`Pattern::find_iter_from`].
    pub fn find_iter_from_value<'i>(
        &self,
        input: &'i [E],
        start_at: usize,
    ) -> impl Iterator<Item = V> + 'i {
        self.find_iter_from(input, start_at).map(Match::into_value)
    }

    /// The first token from `self.forward(input, i)` whose length is
    /// exactly `j - i`, if any.
    pub fn find_exact<'i>(&self, input: &'i [E], i: usize, j: usize) -> Option<Match<'i, E, V>> {
        if j > input.len() || i > j {
            return None;
        }
        let window = &input[..j];
        let want = (j - i) as isize;
        let t = self.forward(window, i).find(|t| t.len == want)?;
        Some(Match::new(input, i, (j - i), t.value))
    }

    /// Only the carried result of [`Pattern::find_exact`].
    pub fn find_exact_value(&self, input: &[E], i: usize, j: usize) -> Option<V> {
        self.find_exact(input, i, j).map(Match::into_value)
    }

    /// The first non-overlapping match at or before `end_at`, walking
    /// backward.
    pub fn rfind<'i>(&self, input: &'i [E], end_at: usize) -> Result<Option<Match<'i, E, V>>, Error> {
        Ok(self.rfind_iter(input, end_at)?.next())
    }

    /// Only the carried result of [`Pattern::rfind`].
    pub fn rfind_value(&self, input: &[E], end_at: usize) -> Result<Option<V>, Error> {
        Ok(self.rfind(input, end_at)?.map(Match::into_value))
    }

    /// Every non-overlapping match at or before `end_at`, walking backward,
    /// lazily. Yields [`Match`] objects normalized the same way as
    /// [`Pattern::find_iter`] (`index` = window start, `length` =
    /// non-negative window size), so the two agree on indices for matches
    /// found in the same window.
    ///
    /// ```
    /// use seqex::literal_seq;
    /// let p = literal_seq("ab".chars());
    /// let input: Vec<char> = "xabyab".chars().collect();
    /// let hits: Vec<(usize, usize)> =
    ///     p.rfind_iter(&input, input.len()).unwrap().map(|m| (m.index(), m.length())).collect();
    /// assert_eq!(hits, vec![(4, 2), (1, 2)]);
    /// ```
    pub fn rfind_iter<'i>(
        &self,
        input: &'i [E],
        end_at: usize,
    ) -> Result<impl Iterator<Item = Match<'i, E, V>> + 'i, Error> {
        self.require_backward()?;
        Ok(BackwardMatches { pattern: self.clone(), input, pos: end_at as isize })
    }

    /// Only the carried results of [`Pattern::rfind_iter`].
    pub fn rfind_iter_value<'i>(
        &self,
        input: &'i [E],
        end_at: usize,
    ) -> Result<impl Iterator<Item = V> + 'i, Error> {
        Ok(self.rfind_iter(input, end_at)?.map(Match::into_value))
    }

    /// Build the replacement output for `find_iter`'s matches, constrained
    /// by `config`. Unmatched spans are copied as-is; `f` is called once
    /// per match it replaces.
    pub fn replace(&self, input: &[E], mut f: impl FnMut(&Match<'_, E, V>) -> Vec<E>, config: &FindConfig) -> Vec<E>
    where
        E: Clone,
    {
        let end_at = config.end_at.unwrap_or(input.len());
        let mut out = Vec::new();
        out.extend_from_slice(&input[..config.start_at]);
        let mut last = config.start_at;
        let mut count = 0usize;
        for m in self.find_iter_from(input, config.start_at) {
            if m.index() >= end_at {
                break;
            }
            if let Some(max) = config.max_matches {
                if count >= max {
                    break;
                }
            }
            out.extend_from_slice(&input[last..m.index()]);
            out.extend(f(&m));
            last = m.index() + m.length();
            count += 1;
        }
        out.extend_from_slice(&input[last..]);
        out
    }

    /// Like [`Pattern::replace`], but scans backward from `config.end_at`
    /// (or the input's end) and stops at `config.start_at` (or `0`).
    pub fn replace_reverse(
        &self,
        input: &[E],
        mut f: impl FnMut(&Match<'_, E, V>) -> Vec<E>,
        config: &FindConfig,
    ) -> Result<Vec<E>, Error>
    where
        E: Clone,
    {
        let end_at = config.end_at.unwrap_or(input.len());
        let start_at = config.start_at;
        let mut matches: Vec<Match<'_, E, V>> = self
            .rfind_iter(input, end_at)?
            .take_while(|m| m.index() >= start_at)
            .collect();
        if let Some(max) = config.max_matches {
            matches.truncate(max);
        }
        matches.reverse();

        let mut out = Vec::new();
        let mut last = 0usize;
        for m in &matches {
            out.extend_from_slice(&input[last..m.index()]);
            out.extend(f(m));
            last = m.index() + m.length();
        }
        out.extend_from_slice(&input[last..]);
        Ok(out)
    }
}

struct ForwardMatches<'i, E, V> {
    pattern: Pattern<E, V>,
    input: &'i [E],
    pos: usize,
}

impl<'i, E: 'static, V: MatchValue> Iterator for ForwardMatches<'i, E, V> {
    type Item = Match<'i, E, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos > self.input.len() {
                return None;
            }
            if let Some(t) = self.pattern.forward(self.input, self.pos).next() {
                let (index, length) = normalize(self.pos, t.len);
                let matched = Match::new(self.input, index, length, t.value);
                self.pos += if t.len > 0 { t.len as usize } else { 1 };
                return Some(matched);
            }
            self.pos += 1;
        }
    }
}

struct BackwardMatches<'i, E, V> {
    pattern: Pattern<E, V>,
    input: &'i [E],
    pos: isize,
}

impl<'i, E: 'static, V: MatchValue> Iterator for BackwardMatches<'i, E, V> {
    type Item = Match<'i, E, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos < 0 {
                return None;
            }
            let pos = self.pos as usize;
            if let Some(t) = self.pattern.backward(self.input, pos).next() {
                let (index, length) = normalize(pos, t.len);
                let matched = Match::new(self.input, index, length, t.value);
                self.pos -= if t.len < 0 { -t.len } else { 1 };
                return Some(matched);
            }
            self.pos -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{literal_seq, predicate};

    #[test]
    fn find_iter_is_non_overlapping_scenario_s5() {
        let p = literal_seq("ab".chars());
        let input: Vec<char> = "xabyab".chars().collect();
        let hits: Vec<(usize, usize)> = p.find_iter(&input).map(|m| (m.index(), m.length())).collect();
        assert_eq!(hits, vec![(1, 2), (4, 2)]);
    }

    #[test]
    fn rfind_iter_agrees_with_find_iter_on_indices() {
        let p = literal_seq("ab".chars());
        let input: Vec<char> = "xabyab".chars().collect();
        let rev: Vec<(usize, usize)> =
            p.rfind_iter(&input, input.len()).unwrap().map(|m| (m.index(), m.length())).collect();
        assert_eq!(rev, vec![(4, 2), (1, 2)]);
    }

    #[test]
    fn find_iter_over_integer_tokens_scenario_s6() {
        let p = predicate(|&x: &i64| x > 0).repeat_at_least_greedy(1);
        let input = [0i64, 3, 5, 0, 7];
        let hits: Vec<(usize, usize)> = p.find_iter(&input).map(|m| (m.index(), m.length())).collect();
        assert_eq!(hits, vec![(1, 2), (4, 1)]);
    }

    #[test]
    fn is_match_exact_rejects_matches_extending_past_window() {
        let p = literal_seq("ab".chars()).then(&literal_seq("c".chars()).optional());
        let input: Vec<char> = "abc".chars().collect();
        assert!(p.is_match_exact(&input, 0, 2));
    }

    #[test]
    fn then_with_selector_surfaces_unsupported_direction_through_driver() {
        use crate::literal;
        let p = literal('a').then_with_selector(|_, _| literal('b'), |_, _| ());
        let input = ['a', 'b'];
        let err = p.is_match_up_to(&input, 2).unwrap_err();
        assert!(matches!(err, crate::Error::UnsupportedDirection { .. }));
    }

    #[test]
    fn replace_splices_matches() {
        use crate::config::FindConfig;
        let p = literal_seq("ab".chars());
        let input: Vec<char> = "xabyab".chars().collect();
        let out = p.replace(&input, |_| vec!['Z'], &FindConfig::builder().build());
        assert_eq!(out, "xZyZ".chars().collect::<Vec<_>>());
    }
}

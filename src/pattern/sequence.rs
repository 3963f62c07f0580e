//! Sequencing (`A · B`) and the free n-ary `sequence`/`ors`/`one_of`
//! constructors.

use std::rc::Rc;

use crate::token::{BoxTokenIter, MatchValue, Token};

use super::{MatcherNode, Pattern};

struct ThenNode<E, A, B> {
    left: Pattern<E, A>,
    right: Pattern<E, B>,
}

impl<E: 'static, A: MatchValue, B: MatchValue> MatcherNode<E, (A, B)> for ThenNode<E, A, B> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, (A, B)> {
        let right = self.right.clone();
        Box::new(self.left.forward(input, start).flat_map(move |t1| {
            let a = t1.value;
            let right = right.clone();
            let next_start = (start as isize + t1.len) as usize;
            right.forward(input, next_start).map(move |t2| {
                Token::new(t1.len + t2.len, (a.clone(), t2.value))
            })
        }))
    }

    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, (A, B)> {
        let left = self.left.clone();
        Box::new(self.right.backward(input, start).flat_map(move |t2| {
            let b = t2.value;
            let left = left.clone();
            let next_start = (start as isize + t2.len) as usize;
            left.backward(input, next_start).map(move |t1| {
                Token::new(t1.len + t2.len, (t1.value, b.clone()))
            })
        }))
    }

    fn supports_backward(&self) -> bool {
        self.left.supports_backward() && self.right.supports_backward()
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    /// Sequence `self` then `other`, tupling their results.
    ///
    /// For every token from `self`, every token `other` yields starting
    /// where `self`'s token ended is combined, in that order — this is the
    /// compositional heart of the engine (§4.2).
    ///
    /// ```
    /// use seqex::literal;
    /// let ab = literal('a').then(&literal('b'));
    /// assert!(ab.is_match_exact(&['a', 'b'], 0, 2));
    /// ```
    pub fn then<W: MatchValue>(&self, other: &Pattern<E, W>) -> Pattern<E, (V, W)> {
        Pattern::from_node(ThenNode { left: self.clone(), right: other.clone() })
    }

    /// Sequence `self` then `other`, combining results with `f` instead of
    /// tupling them. Sugar for `self.then(other).map(move |(a, b)| f(a, b))`.
    pub fn then_with<W: MatchValue, C: MatchValue>(
        &self,
        other: &Pattern<E, W>,
        f: impl Fn(V, W) -> C + 'static,
    ) -> Pattern<E, C> {
        self.then(other).map(move |(a, b)| f(a, b))
    }
}

/// Fold `ps` left-to-right with [`Pattern::then`], producing a pattern whose
/// result is the in-order `Vec` of every component's result.
///
/// Panics if `ps` is empty; an empty sequence has no sensible result type
/// without one being named explicitly — use [`super::empty`] directly for
/// that case.
pub fn sequence<E: 'static, V: MatchValue>(
    ps: impl IntoIterator<Item = Pattern<E, V>>,
) -> Pattern<E, Vec<V>> {
    let mut iter = ps.into_iter();
    let first = iter.next().expect("sequence() requires at least one pattern");
    let mut acc: Pattern<E, Vec<V>> = first.map(|v| vec![v]);
    for p in iter {
        acc = acc.then_with(&p, |mut vs, v| {
            vs.push(v);
            vs
        });
    }
    acc
}

struct OrNode<E, V> {
    left: Pattern<E, V>,
    right: Pattern<E, V>,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, V> for OrNode<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        Box::new(self.left.forward(input, start).chain(self.right.forward(input, start)))
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        Box::new(self.left.backward(input, start).chain(self.right.backward(input, start)))
    }
    fn supports_backward(&self) -> bool {
        self.left.supports_backward() && self.right.supports_backward()
    }
}

struct OneOfNode<E, V> {
    left: Pattern<E, V>,
    right: Pattern<E, V>,
}

/// An iterator that commits to its first source's tokens if it yields any,
/// and otherwise falls through to the second source. This is what makes
/// `OneOf` different from plain iterator concatenation: `Or`'s `chain`
/// always tries both; this type only ever pulls from `right` if `left`
/// turned out empty on the very first pull.
enum OneOfIter<'i, V> {
    Undecided { left: BoxTokenIter<'i, V>, right: Option<BoxTokenIter<'i, V>> },
    Committed(BoxTokenIter<'i, V>),
}

impl<'i, V> Iterator for OneOfIter<'i, V> {
    type Item = Token<V>;
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            OneOfIter::Committed(it) => it.next(),
            OneOfIter::Undecided { left, right } => match left.next() {
                Some(t) => {
                    let mut taken = Box::new(std::iter::empty()) as BoxTokenIter<'i, V>;
                    std::mem::swap(&mut taken, left);
                    *self = OneOfIter::Committed(Box::new(std::iter::once(t).chain(taken)));
                    match self {
                        OneOfIter::Committed(it) => it.next(),
                        _ => unreachable!(),
                    }
                }
                None => {
                    let right = right.take().expect("OneOfIter polled after falling through");
                    *self = OneOfIter::Committed(right);
                    match self {
                        OneOfIter::Committed(it) => it.next(),
                        _ => unreachable!(),
                    }
                }
            },
        }
    }
}

impl<E: 'static, V: MatchValue> MatcherNode<E, V> for OneOfNode<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        Box::new(OneOfIter::Undecided {
            left: self.left.forward(input, start),
            right: Some(self.right.forward(input, start)),
        })
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        Box::new(OneOfIter::Undecided {
            left: self.left.backward(input, start),
            right: Some(self.right.backward(input, start)),
        })
    }
    fn supports_backward(&self) -> bool {
        self.left.supports_backward() && self.right.supports_backward()
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    /// Ordered alternation: try `self`, then `other`, backtracking into
    /// both on demand (§4.3). Equivalent to traditional `self|other`.
    ///
    /// ```
    /// use seqex::literal_seq;
    /// let input: Vec<char> = "abd".chars().collect();
    /// let a = literal_seq("abc".chars()).or(&literal_seq("ab".chars()));
    /// assert!(a.forward(&input, 0).next().is_some());
    /// ```
    pub fn or(&self, other: &Pattern<E, V>) -> Pattern<E, V> {
        Pattern::from_node(OrNode { left: self.clone(), right: other.clone() })
    }

    /// Committed alternation: if `self` matches at all, `other` is never
    /// tried, even on backtracking (§4.3). The possessive counterpart of
    /// [`Pattern::or`].
    pub fn one_of(&self, other: &Pattern<E, V>) -> Pattern<E, V> {
        Pattern::from_node(OneOfNode { left: self.clone(), right: other.clone() })
    }
}

/// Fold `ps` left-to-right with [`Pattern::or`]. Panics if `ps` is empty.
pub fn ors<E: 'static, V: MatchValue>(ps: impl IntoIterator<Item = Pattern<E, V>>) -> Pattern<E, V> {
    let mut iter = ps.into_iter();
    let mut acc = iter.next().expect("ors() requires at least one pattern");
    for p in iter {
        acc = acc.or(&p);
    }
    acc
}

/// Fold `ps` left-to-right with [`Pattern::one_of`]. Panics if `ps` is empty.
pub fn one_of<E: 'static, V: MatchValue>(ps: impl IntoIterator<Item = Pattern<E, V>>) -> Pattern<E, V> {
    let mut iter = ps.into_iter();
    let mut acc = iter.next().expect("one_of() requires at least one pattern");
    for p in iter {
        acc = acc.one_of(&p);
    }
    acc
}

struct MapNode<E, V, W> {
    inner: Pattern<E, V>,
    f: Rc<dyn Fn(V) -> W>,
}

impl<E: 'static, V: MatchValue, W: MatchValue> MatcherNode<E, W> for MapNode<E, V, W> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, W> {
        let f = self.f.clone();
        Box::new(self.inner.forward(input, start).map(move |t| t.map(|v| f(v))))
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, W> {
        let f = self.f.clone();
        Box::new(self.inner.backward(input, start).map(move |t| t.map(|v| f(v))))
    }
    fn supports_backward(&self) -> bool {
        self.inner.supports_backward()
    }
}

struct MapMatchNode<E, V, W> {
    inner: Pattern<E, V>,
    f: Rc<dyn Fn(isize, V) -> W>,
}

impl<E: 'static, V: MatchValue, W: MatchValue> MatcherNode<E, W> for MapMatchNode<E, V, W> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, W> {
        let f = self.f.clone();
        Box::new(self.inner.forward(input, start).map(move |t| {
            let len = t.len;
            Token::new(len, (f)(len, t.value))
        }))
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, W> {
        let f = self.f.clone();
        Box::new(self.inner.backward(input, start).map(move |t| {
            let len = t.len;
            Token::new(len, (f)(len, t.value))
        }))
    }
    fn supports_backward(&self) -> bool {
        self.inner.supports_backward()
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    /// Project this pattern's result through `f`, leaving lengths and
    /// ordering untouched (§4.7).
    pub fn map<W: MatchValue>(&self, f: impl Fn(V) -> W + 'static) -> Pattern<E, W> {
        Pattern::from_node(MapNode { inner: self.clone(), f: Rc::new(f) })
    }

    /// Like [`Pattern::map`], but `f` also receives the match's (signed)
    /// length.
    pub fn map_match<W: MatchValue>(&self, f: impl Fn(isize, V) -> W + 'static) -> Pattern<E, W> {
        Pattern::from_node(MapMatchNode { inner: self.clone(), f: Rc::new(f) })
    }
}

struct ThenWithSelectorNode<E, A, B, C> {
    left: Pattern<E, A>,
    selector: Rc<dyn Fn(&A, isize) -> Pattern<E, B>>,
    combine: Rc<dyn Fn(A, B) -> C>,
}

impl<E: 'static, A: MatchValue, B: MatchValue, C: MatchValue> MatcherNode<E, C>
    for ThenWithSelectorNode<E, A, B, C>
{
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, C> {
        let selector = self.selector.clone();
        let combine = self.combine.clone();
        Box::new(self.left.forward(input, start).flat_map(move |t1| {
            let right = (selector)(&t1.value, t1.len);
            let combine = combine.clone();
            let a = t1.value.clone();
            let next_start = (start as isize + t1.len) as usize;
            right.forward(input, next_start).map(move |t2| {
                Token::new(t1.len + t2.len, (combine)(a.clone(), t2.value))
            })
        }))
    }

    fn backward<'i>(&self, _input: &'i [E], _start: usize) -> BoxTokenIter<'i, C> {
        Box::new(std::iter::empty())
    }

    fn supports_backward(&self) -> bool {
        false
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    /// Sequence `self` then a pattern chosen by inspecting `self`'s own
    /// result (data-dependent continuation, the monadic-bind shape of
    /// sequencing). Forward-only: there is no way to discover what to run
    /// backward before backward matching has determined what `self`
    /// matched, so [`Pattern::backward`] on the result always yields
    /// nothing and the driver reports [`crate::Error::UnsupportedDirection`].
    pub fn then_with_selector<W: MatchValue, C: MatchValue>(
        &self,
        selector: impl Fn(&V, isize) -> Pattern<E, W> + 'static,
        combine: impl Fn(V, W) -> C + 'static,
    ) -> Pattern<E, C> {
        Pattern::from_node(ThenWithSelectorNode {
            left: self.clone(),
            selector: Rc::new(selector),
            combine: Rc::new(combine),
        })
    }
}

struct AtomicNode<E, V> {
    inner: Pattern<E, V>,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, V> for AtomicNode<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        Box::new(self.inner.forward(input, start).take(1))
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        Box::new(self.inner.backward(input, start).take(1))
    }
    fn supports_backward(&self) -> bool {
        self.inner.supports_backward()
    }
}

struct OnMatchNode<E, V> {
    inner: Pattern<E, V>,
    action: Rc<dyn Fn(&Token<V>)>,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, V> for OnMatchNode<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        let action = self.action.clone();
        Box::new(self.inner.forward(input, start).map(move |t| {
            (action)(&t);
            t
        }))
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        let action = self.action.clone();
        Box::new(self.inner.backward(input, start).map(move |t| {
            (action)(&t);
            t
        }))
    }
    fn supports_backward(&self) -> bool {
        self.inner.supports_backward()
    }
}

struct FilterNode<E, V> {
    inner: Pattern<E, V>,
    pred: Rc<dyn Fn(&Token<V>) -> bool>,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, V> for FilterNode<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        let pred = self.pred.clone();
        Box::new(self.inner.forward(input, start).filter(move |t| (pred)(t)))
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        let pred = self.pred.clone();
        Box::new(self.inner.backward(input, start).filter(move |t| (pred)(t)))
    }
    fn supports_backward(&self) -> bool {
        self.inner.supports_backward()
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    /// Truncate this pattern's token stream to its first token only (§4.5).
    /// The combinator equivalent of a possessive group: once `self` has
    /// matched one way, no other alternative is offered to backtracking.
    ///
    /// ```
    /// use seqex::literal;
    /// let p = literal('a').repeat_greedy().atomic();
    /// let input: Vec<char> = "aaa".chars().collect();
    /// assert_eq!(p.forward(&input, 0).count(), 1);
    /// ```
    pub fn atomic(&self) -> Pattern<E, V> {
        Pattern::from_node(AtomicNode { inner: self.clone() })
    }

    /// Invoke `action` for every token this pattern yields, without
    /// otherwise affecting matching (§4.7). `action` may panic; this crate
    /// does not catch it.
    pub fn on_match(&self, action: impl Fn(&Token<V>) + 'static) -> Pattern<E, V> {
        Pattern::from_node(OnMatchNode { inner: self.clone(), action: Rc::new(action) })
    }

    /// Keep only the tokens for which `pred` returns `true` (§4.7). The
    /// combinator equivalent of a conditional assertion over length and
    /// result together.
    pub fn filter(&self, pred: impl Fn(&Token<V>) -> bool + 'static) -> Pattern<E, V> {
        Pattern::from_node(FilterNode { inner: self.clone(), pred: Rc::new(pred) })
    }
}

#[cfg(test)]
mod tests {
    use crate::{literal, predicate};

    #[test]
    fn then_is_additive_in_length() {
        let ab = literal('a').then(&literal('b'));
        let input = ['a', 'b', 'c'];
        let lens: Vec<isize> = ab.forward(&input, 0).map(|t| t.len).collect();
        assert_eq!(lens, vec![2]);
    }

    #[test]
    fn then_tuples_results() {
        let p = predicate(|&x: &i64| x > 0)
            .map(|_| 1i64)
            .then(&predicate(|&x: &i64| x > 0).map(|_| 2i64));
        let input = [3i64, 4];
        let t = p.forward(&input, 0).next().unwrap();
        assert_eq!(t.value, (1, 2));
    }

    #[test]
    fn or_backtracks_into_both_branches() {
        let a = literal('a').or(&literal('b'));
        let input = ['b'];
        assert!(a.forward(&input, 0).next().is_some());
    }

    #[test]
    fn one_of_commits_to_first_success() {
        use crate::literal_seq;
        let committed = literal_seq("abc".chars()).one_of(&literal_seq("ab".chars()));
        let ordered = literal_seq("abc".chars()).or(&literal_seq("ab".chars()));
        let input: Vec<char> = "abd".chars().collect();

        let committed_then_d = committed.then(&literal('d'));
        let ordered_then_d = ordered.then(&literal('d'));

        assert!(ordered_then_d.forward(&input, 0).next().is_some());
        assert!(committed_then_d.forward(&input, 0).next().is_none());
    }

    #[test]
    fn then_with_selector_picks_right_pattern_from_left_result() {
        let p = predicate(|c: &char| *c == 'a' || *c == 'b')
            .map(|_| ())
            .then_with_selector(
                |_v, len| if len == 1 { literal('x') } else { literal('y') },
                |_, _| (),
            );
        let input = ['a', 'x'];
        assert!(p.forward(&input, 0).next().is_some());
    }

    #[test]
    fn then_with_selector_does_not_support_backward() {
        let p = literal('a').then_with_selector(|_, _| literal('b'), |_, _| ());
        assert!(!p.supports_backward());
        let input = ['a', 'b'];
        assert!(p.backward(&input, 2).next().is_none());
    }

    #[test]
    fn atomic_truncates_to_first_token() {
        let p = literal('a').repeat_greedy().atomic();
        let input: Vec<char> = "aaa".chars().collect();
        assert_eq!(p.forward(&input, 0).count(), 1);
    }

    #[test]
    fn on_match_runs_for_every_yielded_token() {
        use std::cell::Cell;
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let p = literal('a').repeat().on_match(move |_| count2.set(count2.get() + 1));
        let input: Vec<char> = "aa".chars().collect();
        let n = p.forward(&input, 0).count();
        assert_eq!(count.get(), n);
    }

    #[test]
    fn filter_drops_tokens_failing_predicate() {
        let p = literal('a').repeat_greedy().filter(|t| t.len == 2);
        let input: Vec<char> = "aaa".chars().collect();
        let lens: Vec<isize> = p.forward(&input, 0).map(|t| t.len).collect();
        assert_eq!(lens, vec![2]);
    }
}

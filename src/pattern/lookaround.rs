//! Zero-width look-around assertions.
//!
//! All four forms only ever report success or failure; none of them
//! advance the position they're tested at, and none of them surface the
//! asserted pattern's result (their own result type is always `()`) since
//! doing so would conflate "something nearby matched" with "this is part of
//! the match here," which the specification keeps distinct.

use crate::token::{BoxTokenIter, MatchValue, Token};

use super::{MatcherNode, Pattern};

struct LookAheadNode<E, V> {
    inner: Pattern<E, V>,
    negative: bool,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, ()> for LookAheadNode<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, ()> {
        let found = self.inner.forward(input, start).next().is_some();
        if found != self.negative {
            Box::new(std::iter::once(Token::new(0, ())))
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, ()> {
        // Zero-width, direction-agnostic by definition: "ahead" always
        // means toward increasing indices regardless of which way the
        // enclosing pattern is currently being walked.
        self.forward(input, start)
    }
}

struct LookBehindNode<E, V> {
    inner: Pattern<E, V>,
    negative: bool,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, ()> for LookBehindNode<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, ()> {
        let found = self.inner.backward(input, start).next().is_some();
        if found != self.negative {
            Box::new(std::iter::once(Token::new(0, ())))
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, ()> {
        self.forward(input, start)
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    /// Zero-width assertion that `self` matches starting here, without
    /// consuming anything.
    ///
    /// ```
    /// use seqex::literal;
    /// let p = literal('a').look_ahead().then(&literal('a'));
    /// assert!(p.is_match_at(&['a', 'b'], 0));
    /// ```
    pub fn look_ahead(&self) -> Pattern<E, ()> {
        Pattern::from_node(LookAheadNode { inner: self.clone(), negative: false })
    }

    /// Zero-width assertion that `self` does *not* match starting here.
    pub fn look_ahead_negative(&self) -> Pattern<E, ()> {
        Pattern::from_node(LookAheadNode { inner: self.clone(), negative: true })
    }

    /// Zero-width assertion that `self` matches ending here, reading
    /// backward from the current position.
    pub fn look_behind(&self) -> Pattern<E, ()> {
        Pattern::from_node(LookBehindNode { inner: self.clone(), negative: false })
    }

    /// Zero-width assertion that `self` does *not* match ending here.
    pub fn look_behind_negative(&self) -> Pattern<E, ()> {
        Pattern::from_node(LookBehindNode { inner: self.clone(), negative: true })
    }
}

#[cfg(test)]
mod tests {
    use crate::literal;

    #[test]
    fn look_ahead_does_not_consume() {
        let input = ['a', 'b'];
        let p = literal('a').look_ahead();
        let t = p.forward(&input, 0).next().unwrap();
        assert_eq!(t.len, 0);
    }

    #[test]
    fn look_ahead_negative_excludes_match() {
        let input = ['a', 'b'];
        let p = literal('a').look_ahead_negative();
        assert!(p.forward(&input, 0).next().is_none());
        assert!(p.forward(&input, 1).next().is_some());
    }

    #[test]
    fn look_behind_checks_backward() {
        let input = ['a', 'b'];
        let p = literal('a').look_behind();
        assert!(p.forward(&input, 1).next().is_some());
        assert!(p.forward(&input, 0).next().is_none());
    }

    #[test]
    fn look_behind_negative_excludes_match() {
        let input = ['a', 'b'];
        let p = literal('a').look_behind_negative();
        assert!(p.forward(&input, 0).next().is_some());
        assert!(p.forward(&input, 1).next().is_none());
    }
}

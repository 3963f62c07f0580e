//! Bounded and unbounded repetition, with optional separators.
//!
//! Both walk directions are expressed as a single recursive function built
//! from `flat_map`/`chain`/`once` rather than a hand-rolled state machine:
//! at each repetition count, the node either tries to extend (match one
//! more repetition and recurse) or stops (if enough repetitions have
//! already happened), and greediness is just which of those two
//! possibilities is tried — and therefore yielded — first.

use crate::error::{self, Error};
use crate::token::{BoxTokenIter, MatchValue, Token};

use super::{MatcherNode, Pattern};

fn repeat_forward<'i, E: 'static, V: MatchValue>(
    inner: &Pattern<E, V>,
    input: &'i [E],
    start: usize,
    count: usize,
    min: usize,
    max: Option<usize>,
    greedy: bool,
) -> BoxTokenIter<'i, Vec<V>> {
    let can_extend = max.map_or(true, |m| count < m);
    let stop_iter: BoxTokenIter<'i, Vec<V>> = if count >= min {
        Box::new(std::iter::once(Token::new(0, Vec::new())))
    } else {
        Box::new(std::iter::empty())
    };
    let extend_iter: BoxTokenIter<'i, Vec<V>> = if can_extend {
        let inner2 = inner.clone();
        Box::new(inner.forward(input, start).flat_map(move |t1| {
            let next_start = (start as isize + t1.len) as usize;
            let v = t1.value.clone();
            let len1 = t1.len;
            repeat_forward(&inner2, input, next_start, count + 1, min, max, greedy).map(move |trest| {
                let mut vs = Vec::with_capacity(trest.value.len() + 1);
                vs.push(v.clone());
                vs.extend(trest.value);
                Token::new(len1 + trest.len, vs)
            })
        }))
    } else {
        Box::new(std::iter::empty())
    };

    if greedy {
        Box::new(extend_iter.chain(stop_iter))
    } else {
        Box::new(stop_iter.chain(extend_iter))
    }
}

fn repeat_backward<'i, E: 'static, V: MatchValue>(
    inner: &Pattern<E, V>,
    input: &'i [E],
    start: usize,
    count: usize,
    min: usize,
    max: Option<usize>,
    greedy: bool,
) -> BoxTokenIter<'i, Vec<V>> {
    let can_extend = max.map_or(true, |m| count < m);
    let stop_iter: BoxTokenIter<'i, Vec<V>> = if count >= min {
        Box::new(std::iter::once(Token::new(0, Vec::new())))
    } else {
        Box::new(std::iter::empty())
    };
    let extend_iter: BoxTokenIter<'i, Vec<V>> = if can_extend {
        let inner2 = inner.clone();
        Box::new(inner.backward(input, start).flat_map(move |t1| {
            let next_start = (start as isize + t1.len) as usize;
            let v = t1.value.clone();
            let len1 = t1.len;
            repeat_backward(&inner2, input, next_start, count + 1, min, max, greedy).map(move |trest| {
                // `trest` covers positions further from `start` than `t1`
                // does, i.e. earlier in the source; append `t1`'s value
                // last so the accumulated `Vec` stays in source order even
                // though the walk visits it right-to-left.
                let mut vs = trest.value;
                vs.push(v.clone());
                Token::new(len1 + trest.len, vs)
            })
        }))
    } else {
        Box::new(std::iter::empty())
    };

    if greedy {
        Box::new(extend_iter.chain(stop_iter))
    } else {
        Box::new(stop_iter.chain(extend_iter))
    }
}

struct RepeatNode<E, V> {
    inner: Pattern<E, V>,
    min: usize,
    max: Option<usize>,
    greedy: bool,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, Vec<V>> for RepeatNode<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, Vec<V>> {
        repeat_forward(&self.inner, input, start, 0, self.min, self.max, self.greedy)
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, Vec<V>> {
        repeat_backward(&self.inner, input, start, 0, self.min, self.max, self.greedy)
    }
    fn supports_backward(&self) -> bool {
        self.inner.supports_backward()
    }
}

fn sep_repeat_forward<'i, E: 'static, V: MatchValue, S: MatchValue>(
    inner: &Pattern<E, V>,
    sep: &Pattern<E, S>,
    input: &'i [E],
    start: usize,
    count: usize,
    max: Option<usize>,
    greedy: bool,
) -> BoxTokenIter<'i, Vec<V>> {
    let can_extend = max.map_or(true, |m| count < m);
    let stop_iter: BoxTokenIter<'i, Vec<V>> = if count >= 1 {
        Box::new(std::iter::once(Token::new(0, Vec::new())))
    } else {
        Box::new(std::iter::empty())
    };
    let extend_iter: BoxTokenIter<'i, Vec<V>> = if can_extend {
        let inner2 = inner.clone();
        let sep2 = sep.clone();
        if count == 0 {
            Box::new(inner.forward(input, start).flat_map(move |t1| {
                let next_start = (start as isize + t1.len) as usize;
                let v = t1.value.clone();
                let len1 = t1.len;
                sep_repeat_forward(&inner2, &sep2, input, next_start, count + 1, max, greedy).map(move |trest| {
                    let mut vs = Vec::with_capacity(trest.value.len() + 1);
                    vs.push(v.clone());
                    vs.extend(trest.value);
                    Token::new(len1 + trest.len, vs)
                })
            }))
        } else {
            Box::new(sep.forward(input, start).flat_map(move |tsep| {
                let after_sep = (start as isize + tsep.len) as usize;
                let inner3 = inner2.clone();
                let sep3 = sep2.clone();
                let sep_len = tsep.len;
                inner2.forward(input, after_sep).flat_map(move |t1| {
                    let next_start = (after_sep as isize + t1.len) as usize;
                    let v = t1.value.clone();
                    let len1 = t1.len;
                    sep_repeat_forward(&inner3, &sep3, input, next_start, count + 1, max, greedy).map(move |trest| {
                        let mut vs = Vec::with_capacity(trest.value.len() + 1);
                        vs.push(v.clone());
                        vs.extend(trest.value);
                        Token::new(sep_len + len1 + trest.len, vs)
                    })
                })
            }))
        }
    } else {
        Box::new(std::iter::empty())
    };

    if greedy {
        Box::new(extend_iter.chain(stop_iter))
    } else {
        Box::new(stop_iter.chain(extend_iter))
    }
}

fn sep_repeat_backward<'i, E: 'static, V: MatchValue, S: MatchValue>(
    inner: &Pattern<E, V>,
    sep: &Pattern<E, S>,
    input: &'i [E],
    start: usize,
    count: usize,
    max: Option<usize>,
    greedy: bool,
) -> BoxTokenIter<'i, Vec<V>> {
    let can_extend = max.map_or(true, |m| count < m);
    let stop_iter: BoxTokenIter<'i, Vec<V>> = if count >= 1 {
        Box::new(std::iter::once(Token::new(0, Vec::new())))
    } else {
        Box::new(std::iter::empty())
    };
    let extend_iter: BoxTokenIter<'i, Vec<V>> = if can_extend {
        let inner2 = inner.clone();
        let sep2 = sep.clone();
        if count == 0 {
            Box::new(inner.backward(input, start).flat_map(move |t1| {
                let next_start = (start as isize + t1.len) as usize;
                let v = t1.value.clone();
                let len1 = t1.len;
                sep_repeat_backward(&inner2, &sep2, input, next_start, count + 1, max, greedy).map(move |trest| {
                    let mut vs = trest.value;
                    vs.push(v.clone());
                    Token::new(len1 + trest.len, vs)
                })
            }))
        } else {
            Box::new(sep.backward(input, start).flat_map(move |tsep| {
                let before_sep = (start as isize + tsep.len) as usize;
                let inner3 = inner2.clone();
                let sep3 = sep2.clone();
                let sep_len = tsep.len;
                inner2.backward(input, before_sep).flat_map(move |t1| {
                    let next_start = (before_sep as isize + t1.len) as usize;
                    let v = t1.value.clone();
                    let len1 = t1.len;
                    sep_repeat_backward(&inner3, &sep3, input, next_start, count + 1, max, greedy).map(move |trest| {
                        let mut vs = trest.value;
                        vs.push(v.clone());
                        Token::new(sep_len + len1 + trest.len, vs)
                    })
                })
            }))
        }
    } else {
        Box::new(std::iter::empty())
    };

    if greedy {
        Box::new(extend_iter.chain(stop_iter))
    } else {
        Box::new(stop_iter.chain(extend_iter))
    }
}

struct SepRepeatNode<E, V, S> {
    inner: Pattern<E, V>,
    sep: Pattern<E, S>,
    max: Option<usize>,
    greedy: bool,
}

impl<E: 'static, V: MatchValue, S: MatchValue> MatcherNode<E, Vec<V>> for SepRepeatNode<E, V, S> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, Vec<V>> {
        sep_repeat_forward(&self.inner, &self.sep, input, start, 0, self.max, self.greedy)
    }
    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, Vec<V>> {
        sep_repeat_backward(&self.inner, &self.sep, input, start, 0, self.max, self.greedy)
    }
    fn supports_backward(&self) -> bool {
        self.inner.supports_backward() && self.sep.supports_backward()
    }
}

impl<E: 'static, V: MatchValue> Pattern<E, V> {
    /// `{0,1}`, lazy: try zero repetitions before one.
    pub fn optional(&self) -> Pattern<E, Vec<V>> {
        Pattern::from_node(RepeatNode { inner: self.clone(), min: 0, max: Some(1), greedy: false })
    }

    /// `{0,1}`, greedy: try one repetition before zero.
    pub fn optional_greedy(&self) -> Pattern<E, Vec<V>> {
        Pattern::from_node(RepeatNode { inner: self.clone(), min: 0, max: Some(1), greedy: true })
    }

    /// `{0,∞}`, lazy.
    pub fn repeat(&self) -> Pattern<E, Vec<V>> {
        Pattern::from_node(RepeatNode { inner: self.clone(), min: 0, max: None, greedy: false })
    }

    /// `{0,∞}`, greedy.
    ///
    /// ```
    /// use seqex::literal;
    /// let p = literal('a').repeat_greedy().map(|vs| vs.len());
    /// let input: Vec<char> = "aaa".chars().collect();
    /// assert_eq!(p.forward(&input, 0).next().unwrap().value, 3);
    /// ```
    pub fn repeat_greedy(&self) -> Pattern<E, Vec<V>> {
        Pattern::from_node(RepeatNode { inner: self.clone(), min: 0, max: None, greedy: true })
    }

    /// `{min,∞}`, lazy.
    pub fn repeat_at_least(&self, min: usize) -> Pattern<E, Vec<V>> {
        Pattern::from_node(RepeatNode { inner: self.clone(), min, max: None, greedy: false })
    }

    /// `{min,∞}`, greedy.
    pub fn repeat_at_least_greedy(&self, min: usize) -> Pattern<E, Vec<V>> {
        Pattern::from_node(RepeatNode { inner: self.clone(), min, max: None, greedy: true })
    }

    /// `{min,max}`, lazy. Fails to construct if `max < min`.
    pub fn repeat_between(&self, min: usize, max: usize) -> Result<Pattern<E, Vec<V>>, Error> {
        if max < min {
            return Err(error::invalid("repeat_between: max < min"));
        }
        Ok(Pattern::from_node(RepeatNode { inner: self.clone(), min, max: Some(max), greedy: false }))
    }

    /// `{min,max}`, greedy. Fails to construct if `max < min`.
    pub fn repeat_between_greedy(&self, min: usize, max: usize) -> Result<Pattern<E, Vec<V>>, Error> {
        if max < min {
            return Err(error::invalid("repeat_between_greedy: max < min"));
        }
        Ok(Pattern::from_node(RepeatNode { inner: self.clone(), min, max: Some(max), greedy: true }))
    }

    /// `{n,n}`. Greediness is immaterial since `min == max`.
    pub fn times(&self, n: usize) -> Pattern<E, Vec<V>> {
        Pattern::from_node(RepeatNode { inner: self.clone(), min: n, max: Some(n), greedy: true })
    }

    /// `self · (sep · self)*` with a lazy star: one or more `self` matches,
    /// each but the first preceded by `sep`. `sep`'s results are discarded.
    pub fn repeat_with_separator<S: MatchValue>(&self, sep: &Pattern<E, S>) -> Pattern<E, Vec<V>> {
        Pattern::from_node(SepRepeatNode { inner: self.clone(), sep: sep.clone(), max: None, greedy: false })
    }

    /// Like [`Pattern::repeat_with_separator`], but with a greedy star.
    pub fn repeat_with_separator_greedy<S: MatchValue>(&self, sep: &Pattern<E, S>) -> Pattern<E, Vec<V>> {
        Pattern::from_node(SepRepeatNode { inner: self.clone(), sep: sep.clone(), max: None, greedy: true })
    }
}

//! Self-referential patterns.
//!
//! A naive `recursive` would store the pattern built by its generator
//! closure behind an `Rc<RefCell<Option<Pattern<E, V>>>>` and hand the same
//! `Rc` to both the caller and every internal self-reference inside the
//! generated tree. That's a cycle: the cell owns the tree, and the tree (via
//! every recursive call site) owns a strong reference back to the cell. It
//! would never drop.
//!
//! Instead, construction uses two node kinds. [`RecursiveRoot`] holds the
//! strong `Rc<RefCell<...>>` and is the only thing returned to the caller.
//! Every internal self-reference inside the generated tree is a
//! [`RecursiveRef`], which closes over a `Weak` of the same cell. Once
//! `recursive` returns, the only strong owner left is the caller's
//! `Pattern`; when that's dropped, the cell and everything inside it (the
//! tree, which is full of `Weak`s pointing nowhere now) is freed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::Error;
use crate::token::{BoxTokenIter, MatchValue};

use super::{MatcherNode, Pattern};

type Cell<E, V> = Rc<RefCell<Option<Pattern<E, V>>>>;

struct RecursiveRoot<E, V> {
    cell: Cell<E, V>,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, V> for RecursiveRoot<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        let inner = self.cell.borrow();
        let inner = inner.as_ref().expect("recursive pattern used before its generator returned");
        // Clone the handle so the borrow of `self.cell` doesn't have to
        // outlive the returned iterator.
        let inner = inner.clone();
        inner.forward(input, start)
    }

    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        let inner = self.cell.borrow();
        let inner = inner.as_ref().expect("recursive pattern used before its generator returned");
        let inner = inner.clone();
        inner.backward(input, start)
    }

    fn supports_backward(&self) -> bool {
        self.cell
            .borrow()
            .as_ref()
            .map(Pattern::supports_backward)
            .unwrap_or(true)
    }
}

struct RecursiveRef<E, V> {
    cell: Weak<RefCell<Option<Pattern<E, V>>>>,
}

impl<E: 'static, V: MatchValue> MatcherNode<E, V> for RecursiveRef<E, V> {
    fn forward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        let cell = self.cell.upgrade().expect("recursive pattern outlived its owner");
        let inner = cell.borrow();
        let inner = inner.as_ref().expect("recursive pattern referenced itself before its generator returned").clone();
        inner.forward(input, start)
    }

    fn backward<'i>(&self, input: &'i [E], start: usize) -> BoxTokenIter<'i, V> {
        let cell = self.cell.upgrade().expect("recursive pattern outlived its owner");
        let inner = cell.borrow();
        let inner = inner.as_ref().expect("recursive pattern referenced itself before its generator returned").clone();
        inner.backward(input, start)
    }

    fn supports_backward(&self) -> bool {
        match self.cell.upgrade() {
            Some(cell) => cell.borrow().as_ref().map(Pattern::supports_backward).unwrap_or(true),
            None => true,
        }
    }
}

/// Build a self-referential pattern, e.g. for balanced or nested grammars
/// that an acyclic combinator tree can't express.
///
/// `f` receives a handle standing in for the pattern being built (valid to
/// embed inside the tree `f` returns, but not to *drive* before `recursive`
/// itself returns) and must return the completed tree.
///
/// ```
/// use seqex::{any, literal, recursive};
///
/// // A run of balanced '(' ... ')' pairs, possibly nested, e.g. "(()())".
/// let balanced: seqex::Pattern<char, ()> = recursive(|inner| {
///     let empty_run = seqex::empty();
///     let group = literal('(').then(inner).then(&literal(')')).map(|_| ());
///     group.then(&empty_run.or(&inner.clone())).map(|_| ()).or(&empty_run)
/// });
/// assert!(balanced.is_match_exact(&"(()())".chars().collect::<Vec<_>>(), 0, 6));
/// assert!(!balanced.is_match_exact(&"(()".chars().collect::<Vec<_>>(), 0, 3));
/// ```
pub fn recursive<E: 'static, V: MatchValue>(
    f: impl FnOnce(&Pattern<E, V>) -> Pattern<E, V>,
) -> Pattern<E, V> {
    try_recursive(|inner| Ok(f(inner))).expect("infallible generator")
}

/// Like [`recursive`], but `f` may fail, e.g. to validate parameters that
/// depend on the self-reference's presence.
pub fn try_recursive<E: 'static, V: MatchValue>(
    f: impl FnOnce(&Pattern<E, V>) -> Result<Pattern<E, V>, Error>,
) -> Result<Pattern<E, V>, Error> {
    let cell: Cell<E, V> = Rc::new(RefCell::new(None));
    let weak_ref = Pattern::from_node(RecursiveRef { cell: Rc::downgrade(&cell) });
    let built = f(&weak_ref)?;
    *cell.borrow_mut() = Some(built);
    Ok(Pattern::from_node(RecursiveRoot { cell }))
}

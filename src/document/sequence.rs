//! Sequence document: insert/delete edits over an ordered list.
//!
//! An operation is a list of oplets applied left to right, each against the
//! state the previous oplet produced. Operations are compared and composed
//! through a normal form:
//!
//! 1. **Local rewriting.** Adjacent oplets are commuted (shifting indices)
//!    until every delete precedes every insert, deletes are in strictly
//!    descending index order and inserts in strictly ascending index order.
//!    An insert immediately deleted again cancels; a delete immediately
//!    re-inserted at the same index cancels. Inserting one element and then
//!    deleting a different one at the same index is incomposable.
//! 2. **Gap cancellation.** In normal form each delete removes an element of
//!    the base state and each insert fills a gap between surviving elements.
//!    A delete and an insert of equivalent values that address the same gap
//!    cancel. This is the local cancel applied after commuting the pair
//!    together, and it is what lets `(a * b) * !b` collapse back to `a` when
//!    `a` and `b` touch distant indices.
//!
//! When no value occurs twice among an operation's oplets and the state it
//! applies to, normal forms of operations with the same effect agree oplet by
//! oplet, so `equals` compares them positionally. Repeated values break this:
//! `[Ins(1,x)]` and `[Ins(0,x)]` have the same effect on `[x]` but stay
//! unequal, and gap cancellation may pair a delete with a different copy of
//! its value than the one the edit meant.
//!
//! # Transform
//!
//! Transform walks the grid of `a`'s oplets against `b`'s oplets, rebasing
//! one pair at a time:
//!
//! ```text
//! Ins(m,u) / Ins(n,v)   m < n, or m = n and u < v  ->  Ins(m,u)
//!                       otherwise                  ->  Ins(m+1,u)
//! Ins(m,u) / Del(n,v)   m <= n                     ->  Ins(m,u)
//!                       m > n                      ->  Ins(m-1,u)
//! Del(m,u) / Ins(n,v)   m < n                      ->  Del(m,u)
//!                       m >= n                     ->  Del(m+1,u)
//! Del(m,u) / Del(n,v)   m < n                      ->  Del(m,u)
//!                       m > n                      ->  Del(m-1,u)
//!                       m = n and u ~ v            ->  nothing
//!                       m = n otherwise            ->  untransformable
//! ```
//!
//! Concurrent inserts at one index are ordered by element value, so both
//! replicas place them identically. Equivalent values are both kept, each
//! shifted right of the other. An insert at the index of a concurrently
//! deleted element survives at that index.
//!
//! Proof sketch, for operations whose values are distinct:
//!
//! - AP: compose is concatenation followed by normalization, and every
//!   rewrite step preserves the effect on any state the list applies to.
//! - IP1: `(a * b) * !b` concatenates `b` with its mirror image, which the
//!   rewriting cancels oplet by oplet from the middle outwards once the
//!   oplets are commuted next to each other (gap cancellation performs the
//!   commutation and the cancel in one step).
//! - CP1: each pair rule above is a commuting square on states, and the grid
//!   tiles `a * (b / a)` and `b * (a / b)` from those squares.

use std::marker::PhantomData;

use smallvec::SmallVec;
use thiserror::Error;

use crate::algebra::{DocumentModel, Groupoid, Ordered, Unital};
use crate::error::{Error, Result};

/// A single sequence edit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Oplet<T> {
    /// Insert `value` so that it ends up at `index`.
    Insert { index: usize, value: T },
    /// Delete `value`, currently at `index`.
    Delete { index: usize, value: T },
}

impl<T> Oplet<T> {
    /// The index this oplet addresses.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Oplet::Insert { index, .. } | Oplet::Delete { index, .. } => return *index,
        }
    }

    /// The element inserted or deleted.
    #[inline]
    pub fn value(&self) -> &T {
        match self {
            Oplet::Insert { value, .. } | Oplet::Delete { value, .. } => return value,
        }
    }

    #[inline]
    pub fn is_insert(&self) -> bool {
        return matches!(self, Oplet::Insert { .. });
    }

    /// The same oplet addressing `index` instead.
    fn at(self, index: usize) -> Oplet<T> {
        match self {
            Oplet::Insert { value, .. } => return Oplet::Insert { index, value },
            Oplet::Delete { value, .. } => return Oplet::Delete { index, value },
        }
    }

    /// The oplet undoing this one.
    fn flipped(self) -> Oplet<T> {
        match self {
            Oplet::Insert { index, value } => return Oplet::Delete { index, value },
            Oplet::Delete { index, value } => return Oplet::Insert { index, value },
        }
    }
}

/// A sequence operation. Most edits are a handful of oplets.
pub type SequenceOp<T> = SmallVec<[Oplet<T>; 4]>;

/// Insert `values` as a contiguous run starting at `index`.
pub fn insert_at<T>(index: usize, values: impl IntoIterator<Item = T>) -> SequenceOp<T> {
    return values
        .into_iter()
        .enumerate()
        .map(|(offset, value)| Oplet::Insert {
            index: index + offset,
            value,
        })
        .collect();
}

/// Delete the contiguous run `values` starting at `index`.
///
/// The run is removed back to front, so every oplet addresses the index the
/// element has in the original state.
pub fn delete_at<T>(index: usize, values: impl IntoIterator<Item = T>) -> SequenceOp<T> {
    let mut op: SequenceOp<T> = values
        .into_iter()
        .enumerate()
        .map(|(offset, value)| Oplet::Delete {
            index: index + offset,
            value,
        })
        .collect();
    op.reverse();
    return op;
}

/// Failure applying an operation to a concrete list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ApplyError {
    /// The oplet addresses an index past the end of the list.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// A delete names a different element than the one at its index.
    #[error("element at index {index} does not match the deleted value")]
    Mismatch { index: usize },
}

/// Outcome of rewriting one adjacent pair.
enum Rewrite<T> {
    Keep,
    Swap(Oplet<T>, Oplet<T>),
    Cancel,
}

/// The sequence document over elements of type `T` ordered by `O`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequenceDocument<T, O> {
    order: O,
    _elements: PhantomData<fn(&T) -> bool>,
}

/// Build a sequence document whose concurrent inserts are ordered by `order`.
pub fn sequence_document<T: Clone, O: Ordered<T>>(order: O) -> SequenceDocument<T, O> {
    return SequenceDocument::new(order);
}

impl<T: Clone, O: Ordered<T>> SequenceDocument<T, O> {
    pub fn new(order: O) -> SequenceDocument<T, O> {
        return SequenceDocument {
            order,
            _elements: PhantomData,
        };
    }

    /// The element order.
    pub fn order(&self) -> &O {
        return &self.order;
    }

    /// Reduce `op` to normal form, or `Error::Incomposable` if it inserts one
    /// element and deletes a different one at the same index.
    pub fn normalize(&self, op: &SequenceOp<T>) -> Result<SequenceOp<T>> {
        let mut ops = op.clone();
        loop {
            self.rewrite_locally(&mut ops)?;
            if !self.cancel_gaps(&mut ops) {
                return Ok(ops);
            }
        }
    }

    /// Apply `op` to `state`, returning the new state.
    pub fn apply(&self, op: &SequenceOp<T>, state: &[T]) -> Result<Vec<T>, ApplyError> {
        let mut items = state.to_vec();
        for oplet in op {
            match oplet {
                Oplet::Insert { index, value } => {
                    if *index > items.len() {
                        return Err(ApplyError::OutOfRange {
                            index: *index,
                            len: items.len(),
                        });
                    }
                    items.insert(*index, value.clone());
                }
                Oplet::Delete { index, value } => {
                    let Some(current) = items.get(*index) else {
                        return Err(ApplyError::OutOfRange {
                            index: *index,
                            len: items.len(),
                        });
                    };
                    if !self.order.equals(current, value) {
                        return Err(ApplyError::Mismatch { index: *index });
                    }
                    items.remove(*index);
                }
            }
        }
        return Ok(items);
    }

    /// Rewrite adjacent pairs until a full pass changes nothing.
    fn rewrite_locally(&self, ops: &mut SequenceOp<T>) -> Result<()> {
        loop {
            let mut changed = false;
            let mut i = 0;
            while i + 1 < ops.len() {
                match self.rewrite_pair(&ops[i], &ops[i + 1])? {
                    Rewrite::Keep => i += 1,
                    Rewrite::Swap(first, second) => {
                        ops[i] = first;
                        ops[i + 1] = second;
                        changed = true;
                        i += 1;
                    }
                    Rewrite::Cancel => {
                        ops.drain(i..i + 2);
                        changed = true;
                        i = i.saturating_sub(1);
                    }
                }
            }
            if !changed {
                return Ok(());
            }
        }
    }

    fn rewrite_pair(&self, x: &Oplet<T>, y: &Oplet<T>) -> Result<Rewrite<T>> {
        match (x, y) {
            (Oplet::Insert { index: i, .. }, Oplet::Insert { index: j, .. }) => {
                if i >= j {
                    return Ok(Rewrite::Swap(y.clone(), x.clone().at(i + 1)));
                }
                return Ok(Rewrite::Keep);
            }
            (Oplet::Insert { index: i, value: u }, Oplet::Delete { index: j, value: v }) => {
                if i < j {
                    return Ok(Rewrite::Swap(y.clone().at(j - 1), x.clone()));
                }
                if i > j {
                    return Ok(Rewrite::Swap(y.clone(), x.clone().at(i - 1)));
                }
                if self.order.equals(u, v) {
                    return Ok(Rewrite::Cancel);
                }
                log::trace!("sequence compose: index {i} deletes a different element than it inserted");
                return Err(Error::Incomposable);
            }
            (Oplet::Delete { index: i, value: u }, Oplet::Insert { index: j, value: v }) => {
                if i == j && self.order.equals(u, v) {
                    return Ok(Rewrite::Cancel);
                }
                return Ok(Rewrite::Keep);
            }
            (Oplet::Delete { index: i, .. }, Oplet::Delete { index: j, .. }) => {
                if i <= j {
                    return Ok(Rewrite::Swap(y.clone().at(j + 1), x.clone()));
                }
                return Ok(Rewrite::Keep);
            }
        }
    }

    /// Cancel one delete/insert pair addressing the same gap. `ops` must be
    /// locally normal. Returns whether anything was removed.
    fn cancel_gaps(&self, ops: &mut SequenceOp<T>) -> bool {
        let deletes = ops.iter().take_while(|oplet| !oplet.is_insert()).count();
        let mut found = None;
        'search: for d in (0..deletes).rev() {
            // Deletes after `d` remove elements before it.
            let delete_gap = ops[d].index() - (deletes - 1 - d);
            for (offset, insert) in ops[deletes..].iter().enumerate() {
                // Inserts before this one fill earlier gaps.
                let insert_gap = insert.index() - offset;
                if insert_gap > delete_gap {
                    break;
                }
                if insert_gap == delete_gap && self.order.equals(ops[d].value(), insert.value()) {
                    found = Some((d, deletes + offset));
                    break 'search;
                }
            }
        }
        let Some((delete, insert)) = found else {
            return false;
        };
        ops.remove(insert);
        ops.remove(delete);
        return true;
    }

    /// Rebase `x` past `y` and `y` past `x`. `None` means the oplet vanished.
    fn transform_pair(&self, x: Oplet<T>, y: Oplet<T>) -> Result<(Option<Oplet<T>>, Option<Oplet<T>>)> {
        let (m, n) = (x.index(), y.index());
        match (x.is_insert(), y.is_insert()) {
            (true, true) => {
                let x_first = m < n || (m == n && self.order.less_than(x.value(), y.value()));
                let y_first = m > n || (m == n && self.order.less_than(y.value(), x.value()));
                if x_first {
                    return Ok((Some(x), Some(y.at(n + 1))));
                }
                if y_first {
                    return Ok((Some(x.at(m + 1)), Some(y)));
                }
                // Equivalent values at one index: each lands right of the other.
                return Ok((Some(x.at(m + 1)), Some(y.at(n + 1))));
            }
            (true, false) => {
                if m <= n {
                    return Ok((Some(x), Some(y.at(n + 1))));
                }
                return Ok((Some(x.at(m - 1)), Some(y)));
            }
            (false, true) => {
                if n <= m {
                    return Ok((Some(x.at(m + 1)), Some(y)));
                }
                return Ok((Some(x), Some(y.at(n - 1))));
            }
            (false, false) => {
                if m < n {
                    return Ok((Some(x), Some(y.at(n - 1))));
                }
                if m > n {
                    return Ok((Some(x.at(m - 1)), Some(y)));
                }
                if self.order.equals(x.value(), y.value()) {
                    return Ok((None, None));
                }
                log::trace!("sequence transform: index {m} deleted as two different elements");
                return Err(Error::Untransformable);
            }
        }
    }
}

impl<T: Clone, O: Ordered<T>> Groupoid for SequenceDocument<T, O> {
    type Op = SequenceOp<T>;

    fn invert(&self, op: &SequenceOp<T>) -> SequenceOp<T> {
        return op.iter().rev().cloned().map(Oplet::flipped).collect();
    }

    fn compose(&self, a: &SequenceOp<T>, b: &SequenceOp<T>) -> Result<SequenceOp<T>> {
        let mut joined = a.clone();
        joined.extend(b.iter().cloned());
        return self.normalize(&joined);
    }

    fn equals(&self, a: &SequenceOp<T>, b: &SequenceOp<T>) -> bool {
        let (Ok(a), Ok(b)) = (self.normalize(a), self.normalize(b)) else {
            return false;
        };
        if a.len() != b.len() {
            return false;
        }
        return a.iter().zip(b.iter()).all(|(x, y)| match (x, y) {
            (Oplet::Insert { index: i, value: u }, Oplet::Insert { index: j, value: v })
            | (Oplet::Delete { index: i, value: u }, Oplet::Delete { index: j, value: v }) => {
                i == j && self.order.equals(u, v)
            }
            _ => false,
        });
    }
}

impl<T: Clone, O: Ordered<T>> DocumentModel for SequenceDocument<T, O> {
    fn transform(&self, a: &SequenceOp<T>, b: &SequenceOp<T>) -> Result<SequenceOp<T>> {
        let mut rest: SequenceOp<T> = b.clone();
        let mut rebased = SequenceOp::new();

        for x in a.iter().cloned() {
            let mut current = Some(x);
            let mut next_rest = SequenceOp::with_capacity(rest.len());
            for y in rest.drain(..) {
                let Some(x) = current.take() else {
                    // `x` is gone; the rest of `b` is unaffected by it.
                    next_rest.push(y);
                    continue;
                };
                let (x, y) = self.transform_pair(x, y)?;
                current = x;
                next_rest.extend(y);
            }
            rebased.extend(current);
            rest = next_rest;
        }

        return self.normalize(&rebased).map_err(|_| Error::Untransformable);
    }
}

impl<T: Clone, O: Ordered<T>> Unital for SequenceDocument<T, O> {
    fn identity(&self) -> SequenceOp<T> {
        return SequenceOp::new();
    }
}

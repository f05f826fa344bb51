//! Optional document: adjoin an explicit "no change" to any model.
//!
//! Operations are `Option<D::Op>` with `None` as a new identity ι. `None` is
//! neutral for compose, inverts to itself, transforms to itself and leaves
//! any operation unchanged when transformed past. Every other case defers to
//! `D`, so the laws of `D` carry over and IdnP1/IdnP2 hold for the adjoined ι
//! by construction.
//!
//! `None` equals `Some(u)` whenever `u` is a unit of `D`, that is
//! `u * !u ~ u`. Without this, `!a * (a * None)` would yield `Some(!a * a)`
//! and IP1 would fail for every absent operand.
//!
//! This gives models without a natural identity, such as a bare sequence of
//! tuples, an absent value to fill sparse positions with.

use crate::algebra::{DocumentModel, Groupoid, Unital};
use crate::error::Result;

/// `D` with an adjoined identity `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OptionalDocument<D> {
    inner: D,
}

impl<D: DocumentModel> OptionalDocument<D> {
    pub fn new(inner: D) -> OptionalDocument<D> {
        return OptionalDocument { inner };
    }

    /// The wrapped model.
    pub fn inner(&self) -> &D {
        return &self.inner;
    }

    /// Whether `op` is a unit of the wrapped model.
    fn is_unit(&self, op: &D::Op) -> bool {
        match self.inner.compose(op, &self.inner.invert(op)) {
            Ok(unit) => return self.inner.equals(op, &unit),
            Err(_) => return false,
        }
    }
}

impl<D: DocumentModel> Groupoid for OptionalDocument<D> {
    type Op = Option<D::Op>;

    fn invert(&self, op: &Self::Op) -> Self::Op {
        return op.as_ref().map(|op| self.inner.invert(op));
    }

    fn compose(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op> {
        match (a, b) {
            (None, _) => return Ok(b.clone()),
            (_, None) => return Ok(a.clone()),
            (Some(a), Some(b)) => return self.inner.compose(a, b).map(Some),
        }
    }

    fn equals(&self, a: &Self::Op, b: &Self::Op) -> bool {
        match (a, b) {
            (None, None) => return true,
            (Some(a), Some(b)) => return self.inner.equals(a, b),
            (Some(op), None) | (None, Some(op)) => return self.is_unit(op),
        }
    }
}

impl<D: DocumentModel> DocumentModel for OptionalDocument<D> {
    fn transform(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op> {
        match (a, b) {
            (None, _) => return Ok(None),
            (Some(_), None) => return Ok(a.clone()),
            (Some(a), Some(b)) => return self.inner.transform(a, b).map(Some),
        }
    }
}

impl<D: DocumentModel> Unital for OptionalDocument<D> {
    fn identity(&self) -> Self::Op {
        return None;
    }
}

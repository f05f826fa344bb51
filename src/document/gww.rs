//! Greatest-write-wins (GWW) document.
//!
//! Given a totally ordered set `S`, the operations are
//!
//! ```text
//! T := { ι } ∪ { (x, y) | x, y ∈ S, x ≠ y }
//! ```
//!
//! where `(x, y)` replaces the value `x` by `y`.
//!
//! ```text
//! !ι = ι                      !(x, y) = (y, x)
//! a * ι = ι * a = a
//! (x, y) * (y, x) = ι
//! (x, y) * (y, z) = (x, z)    (x ≠ z)
//! (x, y) * (z, w)             incomposable when y ≠ z
//! ι / a = ι                   a / ι = a
//! (x, y) / (x, z) = ι         (y ≤ z)
//! (x, y) / (x, z) = (z, y)    (y > z)
//! (x, y) / (z, w)             untransformable when x ≠ z
//! ```
//!
//! Proof sketch:
//!
//! - AP: for `a = (x, y)`, `b = (y, z)`, `c = (z, w)` both sides reduce to
//!   `x = w ? ι : (x, w)`; every case with an ι is immediate from IdnP1.
//! - IP1 and InvP1: `(x, y) * (y, x) = ι`, so `(a * b) * !b = a` chains back.
//! - CP1: for `a = (x, y)`, `b = (x, z)`,
//!   `a * (b / a) = (x, max(y, z)) = b * (a / b)`; the larger write wins on
//!   both replicas regardless of arrival order.
//!
//! GWW does not satisfy InvP2 (`(1, 2) / (1, 3) / (3, 1) = ι ≠ (1, 2)`), so
//! callers must transform operations one at a time rather than transforming
//! composed operations.

use std::marker::PhantomData;

use crate::algebra::{DocumentModel, Groupoid, Ordered, Unital};
use crate::error::{Error, Result};

/// A GWW operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gww<S> {
    /// ι: no change.
    Identity,
    /// Replace `from` by `to`.
    ///
    /// A write whose endpoints are equal behaves as `Identity`.
    Write { from: S, to: S },
}

impl<S> Gww<S> {
    /// A write replacing `from` by `to`.
    pub fn write(from: S, to: S) -> Gww<S> {
        return Gww::Write { from, to };
    }
}

impl<S> Default for Gww<S> {
    fn default() -> Self {
        return Gww::Identity;
    }
}

/// The greatest-write-wins document over `S` ordered by `O`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GwwDocument<S, O> {
    order: O,
    _values: PhantomData<fn(&S) -> bool>,
}

/// Build a GWW document from a total order.
pub fn gww_document<S, O: Ordered<S>>(order: O) -> GwwDocument<S, O> {
    return GwwDocument::new(order);
}

impl<S, O: Ordered<S>> GwwDocument<S, O> {
    /// Build a GWW document from a total order.
    pub fn new(order: O) -> GwwDocument<S, O> {
        return GwwDocument {
            order,
            _values: PhantomData,
        };
    }

    /// The value order deciding which write wins.
    pub fn order(&self) -> &O {
        return &self.order;
    }

    /// The endpoints of a non-trivial write, or `None` for anything equal
    /// to ι.
    fn endpoints<'a>(&self, op: &'a Gww<S>) -> Option<(&'a S, &'a S)> {
        match op {
            Gww::Identity => return None,
            Gww::Write { from, to } => {
                if self.order.equals(from, to) {
                    return None;
                }
                return Some((from, to));
            }
        }
    }
}

impl<S: Clone, O: Ordered<S>> Groupoid for GwwDocument<S, O> {
    type Op = Gww<S>;

    fn invert(&self, op: &Gww<S>) -> Gww<S> {
        match op {
            Gww::Identity => return Gww::Identity,
            Gww::Write { from, to } => return Gww::write(to.clone(), from.clone()),
        }
    }

    fn compose(&self, a: &Gww<S>, b: &Gww<S>) -> Result<Gww<S>> {
        match (self.endpoints(a), self.endpoints(b)) {
            (None, None) => return Ok(Gww::Identity),
            (None, Some(_)) => return Ok(b.clone()),
            (Some(_), None) => return Ok(a.clone()),
            (Some((x, y)), Some((z, w))) => {
                if !self.order.equals(y, z) {
                    log::trace!("gww compose: write does not start where the previous one ended");
                    return Err(Error::Incomposable);
                }
                if self.order.equals(x, w) {
                    return Ok(Gww::Identity);
                }
                return Ok(Gww::write(x.clone(), w.clone()));
            }
        }
    }

    fn equals(&self, a: &Gww<S>, b: &Gww<S>) -> bool {
        match (self.endpoints(a), self.endpoints(b)) {
            (None, None) => return true,
            (Some((x, y)), Some((z, w))) => {
                return self.order.equals(x, z) && self.order.equals(y, w);
            }
            _ => return false,
        }
    }
}

impl<S: Clone, O: Ordered<S>> DocumentModel for GwwDocument<S, O> {
    fn transform(&self, a: &Gww<S>, b: &Gww<S>) -> Result<Gww<S>> {
        match (self.endpoints(a), self.endpoints(b)) {
            (None, _) => return Ok(Gww::Identity),
            (Some(_), None) => return Ok(a.clone()),
            (Some((x, y)), Some((z, w))) => {
                if !self.order.equals(x, z) {
                    log::trace!("gww transform: writes start from different values");
                    return Err(Error::Untransformable);
                }
                if self.order.less_than(w, y) {
                    return Ok(Gww::write(w.clone(), y.clone()));
                }
                return Ok(Gww::Identity);
            }
        }
    }
}

impl<S: Clone, O: Ordered<S>> Unital for GwwDocument<S, O> {
    fn identity(&self) -> Gww<S> {
        return Gww::Identity;
    }
}

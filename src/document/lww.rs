//! Last-write-wins (LWW) document.
//!
//! LWW is GWW over timestamped values: `(t, v)` sorts before `(t', v')` when
//! `t < t'`, or when `t = t'` and `v < v'`. The write carrying the latest
//! timestamp wins, and writes sharing a timestamp fall back to the value
//! order so that every replica picks the same winner.
//!
//! All laws follow from the GWW proof sketch since the lexicographic order on
//! `(timestamp, value)` is a strict total order whenever the value order is.
//!
//! Timestamps come from the caller. `crate::clock::LamportClock` is one way to
//! produce them.

use crate::algebra::{Equivalence, Ordered, equivalent_by_order};
use crate::document::gww::{Gww, GwwDocument};

/// A value stamped with the logical time it was written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timestamped<S> {
    pub timestamp: u64,
    pub value: S,
}

impl<S> Timestamped<S> {
    pub fn new(timestamp: u64, value: S) -> Timestamped<S> {
        return Timestamped { timestamp, value };
    }
}

/// Order timestamped values by timestamp, then by value using `O`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimestampOrder<O> {
    values: O,
}

impl<O> TimestampOrder<O> {
    pub fn new(values: O) -> TimestampOrder<O> {
        return TimestampOrder { values };
    }

    /// The tie-breaking value order.
    pub fn values(&self) -> &O {
        return &self.values;
    }
}

impl<S, O: Ordered<S>> Equivalence<Timestamped<S>> for TimestampOrder<O> {
    #[inline]
    fn equals(&self, a: &Timestamped<S>, b: &Timestamped<S>) -> bool {
        return equivalent_by_order(self, a, b);
    }
}

impl<S, O: Ordered<S>> Ordered<Timestamped<S>> for TimestampOrder<O> {
    #[inline]
    fn less_than(&self, a: &Timestamped<S>, b: &Timestamped<S>) -> bool {
        if a.timestamp != b.timestamp {
            return a.timestamp < b.timestamp;
        }
        return self.values.less_than(&a.value, &b.value);
    }
}

/// An LWW operation.
pub type Lww<S> = Gww<Timestamped<S>>;

/// The last-write-wins document over `S` with ties broken by `O`.
pub type LwwDocument<S, O> = GwwDocument<Timestamped<S>, TimestampOrder<O>>;

/// Build an LWW document breaking timestamp ties with `order`.
pub fn lww_document<S, O: Ordered<S>>(order: O) -> LwwDocument<S, O> {
    return GwwDocument::new(TimestampOrder::new(order));
}

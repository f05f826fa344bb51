//! Record document: a sparse keyed map of sub-operations.
//!
//! Given a document model `D` with identity ι, a record operation maps keys
//! to operations of `D`. A missing key stands for ι, and results never carry
//! an entry equal to ι, so two records describing the same change have the
//! same keys.
//!
//! ```text
//! !a[k]       = !(a[k])
//! (a * b)[k]  = a[k] * b[k]
//! (a / b)[k]  = a[k] / b[k]
//! ```
//!
//! Every law holds key by key because it holds in `D` and ι is neutral in
//! `D` (IdnP1, IdnP2). Compose and transform are fail-fast: if any key is
//! undefined the whole record is.

use std::hash::Hash;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::algebra::{DocumentModel, Groupoid, Unital};
use crate::error::Result;

/// A record operation: keys absent from the map are unchanged.
pub type RecordOp<Op, K = String> = FxHashMap<K, Op>;

/// The document model of records whose values follow `D`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordDocument<D, K = String> {
    inner: D,
    _keys: PhantomData<fn(&K) -> bool>,
}

impl<D: Unital, K: Eq + Hash + Clone> RecordDocument<D, K> {
    /// Records whose values are edited through `inner`.
    pub fn new(inner: D) -> RecordDocument<D, K> {
        return RecordDocument {
            inner,
            _keys: PhantomData,
        };
    }

    /// The per-key model.
    pub fn inner(&self) -> &D {
        return &self.inner;
    }

    /// A copy of `op` without identity entries.
    pub fn prune(&self, op: &RecordOp<D::Op, K>) -> RecordOp<D::Op, K> {
        return op
            .iter()
            .filter(|(_, value)| !self.inner.is_identity(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
    }

    /// Store `value` at `key`, or drop the key when `value` is ι.
    fn put(&self, record: &mut RecordOp<D::Op, K>, key: &K, value: D::Op) {
        if self.inner.is_identity(&value) {
            record.remove(key);
        } else {
            record.insert(key.clone(), value);
        }
    }
}

impl<D: Unital, K: Eq + Hash + Clone> Groupoid for RecordDocument<D, K> {
    type Op = RecordOp<D::Op, K>;

    fn invert(&self, op: &Self::Op) -> Self::Op {
        let mut inverted = RecordOp::default();
        for (key, value) in op {
            self.put(&mut inverted, key, self.inner.invert(value));
        }
        return inverted;
    }

    fn compose(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op> {
        let identity = self.inner.identity();
        let mut composed = self.prune(a);
        for (key, second) in b {
            let first = a.get(key).unwrap_or(&identity);
            let value = self.inner.compose(first, second).inspect_err(|_| {
                log::trace!("record compose: a key is incomposable, aborting");
            })?;
            self.put(&mut composed, key, value);
        }
        return Ok(composed);
    }

    fn equals(&self, a: &Self::Op, b: &Self::Op) -> bool {
        for (key, value) in a {
            let matches = match b.get(key) {
                Some(other) => self.inner.equals(value, other),
                None => self.inner.is_identity(value),
            };
            if !matches {
                return false;
            }
        }
        return b
            .iter()
            .filter(|(key, _)| !a.contains_key(*key))
            .all(|(_, value)| self.inner.is_identity(value));
    }
}

impl<D: Unital, K: Eq + Hash + Clone> DocumentModel for RecordDocument<D, K> {
    fn transform(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op> {
        let mut transformed = self.prune(a);
        for (key, first) in a {
            let Some(second) = b.get(key) else {
                continue;
            };
            let value = self.inner.transform(first, second).inspect_err(|_| {
                log::trace!("record transform: a key is untransformable, aborting");
            })?;
            self.put(&mut transformed, key, value);
        }
        return Ok(transformed);
    }
}

impl<D: Unital, K: Eq + Hash + Clone> Unital for RecordDocument<D, K> {
    fn identity(&self) -> Self::Op {
        return RecordOp::default();
    }
}

//! Struct documents: named-field products with sparse operations.
//!
//! `struct_document!` declares a document model whose fields each carry their
//! own `Unital` model, together with an operation struct holding one
//! `Option<Op>` per field. `None` stands for the field's identity, and results
//! store `None` wherever a field's operation is equal to ι, the same pruning
//! a record applies to its keys. Field operators are fail-fast in declaration
//! order.
//!
//! ```
//! use otdoc::algebra::{Groupoid, Natural};
//! use otdoc::document::accumulator::{AccumulatorDocument, DecimalSum};
//! use otdoc::document::gww::{Gww, GwwDocument};
//! use otdoc::struct_document;
//!
//! struct_document! {
//!     pub struct ScoreDocument => ScoreOp {
//!         points: AccumulatorDocument<DecimalSum>,
//!         leader: GwwDocument<u32, Natural>,
//!     }
//! }
//!
//! let doc = ScoreDocument {
//!     points: AccumulatorDocument::new(DecimalSum::new(0)),
//!     leader: GwwDocument::new(Natural),
//! };
//! let a = ScoreOp { points: Some(3.0), leader: None };
//! let b = ScoreOp { points: Some(4.0), leader: Some(Gww::write(1, 2)) };
//! let both = doc.compose(&a, &b).unwrap();
//! assert_eq!(both.points, Some(7.0));
//! assert_eq!(both.leader, Some(Gww::write(1, 2)));
//! ```

use crate::algebra::Unital;
use crate::error::Result;

/// `Some(op)` unless `op` is the identity.
#[inline]
fn sparse<D: Unital>(doc: &D, op: D::Op) -> Option<D::Op> {
    if doc.is_identity(&op) {
        return None;
    }
    return Some(op);
}

#[doc(hidden)]
pub fn invert_field<D: Unital>(doc: &D, op: &Option<D::Op>) -> Option<D::Op> {
    let op = op.as_ref()?;
    return sparse(doc, doc.invert(op));
}

#[doc(hidden)]
pub fn compose_field<D: Unital>(
    doc: &D,
    name: &str,
    a: &Option<D::Op>,
    b: &Option<D::Op>,
) -> Result<Option<D::Op>> {
    match (a, b) {
        (None, None) => return Ok(None),
        (Some(a), None) => return Ok(sparse(doc, a.clone())),
        (None, Some(b)) => return Ok(sparse(doc, b.clone())),
        (Some(a), Some(b)) => {
            let composed = doc.compose(a, b).inspect_err(|_| {
                log::trace!("struct compose: field `{name}` is incomposable, aborting");
            })?;
            return Ok(sparse(doc, composed));
        }
    }
}

#[doc(hidden)]
pub fn transform_field<D: Unital>(
    doc: &D,
    name: &str,
    a: &Option<D::Op>,
    b: &Option<D::Op>,
) -> Result<Option<D::Op>> {
    match (a, b) {
        (None, _) => return Ok(None),
        (Some(a), None) => return Ok(sparse(doc, a.clone())),
        (Some(a), Some(b)) => {
            let transformed = doc.transform(a, b).inspect_err(|_| {
                log::trace!("struct transform: field `{name}` is untransformable, aborting");
            })?;
            return Ok(sparse(doc, transformed));
        }
    }
}

#[doc(hidden)]
pub fn equals_field<D: Unital>(doc: &D, a: &Option<D::Op>, b: &Option<D::Op>) -> bool {
    match (a, b) {
        (None, None) => return true,
        (Some(op), None) | (None, Some(op)) => return doc.is_identity(op),
        (Some(a), Some(b)) => return doc.equals(a, b),
    }
}

/// Declare a struct document and its operation type.
///
/// ```text
/// struct_document! {
///     pub struct Document => Op {
///         field: FieldModel,
///         ...
///     }
/// }
/// ```
///
/// Every `FieldModel` must implement `Unital`. The document struct gets one
/// public field per model; the operation struct gets one public
/// `Option<FieldModel::Op>` per field and derives `Clone`, `Debug` and
/// `Default` (all fields unchanged).
#[macro_export]
macro_rules! struct_document {
    (
        $(#[$meta:meta])*
        $vis:vis struct $document:ident => $op:ident {
            $($field:ident : $model:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $document {
            $(pub $field: $model,)+
        }

        #[derive(Clone, Debug, Default)]
        $vis struct $op {
            $(pub $field: ::core::option::Option<<$model as $crate::algebra::Groupoid>::Op>,)+
        }

        impl $crate::algebra::Groupoid for $document {
            type Op = $op;

            fn invert(&self, op: &$op) -> $op {
                return $op {
                    $($field: $crate::document::structure::invert_field(&self.$field, &op.$field),)+
                };
            }

            fn compose(&self, a: &$op, b: &$op) -> $crate::Result<$op> {
                return ::core::result::Result::Ok($op {
                    $($field: $crate::document::structure::compose_field(
                        &self.$field,
                        ::core::stringify!($field),
                        &a.$field,
                        &b.$field,
                    )?,)+
                });
            }

            fn equals(&self, a: &$op, b: &$op) -> bool {
                return $($crate::document::structure::equals_field(&self.$field, &a.$field, &b.$field))&&+;
            }
        }

        impl $crate::algebra::DocumentModel for $document {
            fn transform(&self, a: &$op, b: &$op) -> $crate::Result<$op> {
                return ::core::result::Result::Ok($op {
                    $($field: $crate::document::structure::transform_field(
                        &self.$field,
                        ::core::stringify!($field),
                        &a.$field,
                        &b.$field,
                    )?,)+
                });
            }
        }

        impl $crate::algebra::Unital for $document {
            fn identity(&self) -> $op {
                return $op {
                    $($field: ::core::option::Option::None,)+
                };
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::algebra::{DocumentModel, Groupoid, Natural, Unital};
    use crate::document::gww::{Gww, GwwDocument};
    use crate::document::lww::{Timestamped, TimestampOrder};
    use crate::document::sequence::{SequenceDocument, insert_at};
    use crate::error::Error;

    crate::struct_document! {
        /// A titled list of tags.
        struct NoteDocument => NoteOp {
            title: GwwDocument<Timestamped<String>, TimestampOrder<Natural>>,
            tags: SequenceDocument<String, Natural>,
            pinned: GwwDocument<bool, Natural>,
        }
    }

    fn doc() -> NoteDocument {
        return NoteDocument {
            title: GwwDocument::new(TimestampOrder::new(Natural)),
            tags: SequenceDocument::new(Natural),
            pinned: GwwDocument::new(Natural),
        };
    }

    fn stamp(timestamp: u64, value: &str) -> Timestamped<String> {
        return Timestamped::new(timestamp, value.to_string());
    }

    #[test]
    fn fields_compose_and_prune() {
        let doc = doc();
        let a = NoteOp {
            title: Some(Gww::write(stamp(0, ""), stamp(1, "draft"))),
            pinned: Some(Gww::write(false, true)),
            ..NoteOp::default()
        };
        let b = NoteOp {
            pinned: Some(Gww::write(true, false)),
            tags: Some(insert_at(0, ["todo".to_string()])),
            ..NoteOp::default()
        };
        let composed = doc.compose(&a, &b).unwrap();
        assert_eq!(composed.title, a.title);
        assert!(composed.pinned.is_none());
        assert_eq!(composed.tags.map(|tags| tags.len()), Some(1));
    }

    #[test]
    fn failing_field_fails_the_struct() {
        let doc = doc();
        let a = NoteOp {
            pinned: Some(Gww::write(false, true)),
            ..NoteOp::default()
        };
        let b = NoteOp {
            pinned: Some(Gww::write(false, true)),
            ..NoteOp::default()
        };
        assert_eq!(doc.compose(&a, &b).err(), Some(Error::Incomposable));
    }

    #[test]
    fn missing_and_identity_fields_are_equal() {
        let doc = doc();
        let explicit = NoteOp {
            pinned: Some(Gww::Identity),
            ..NoteOp::default()
        };
        assert!(doc.equals(&explicit, &NoteOp::default()));
        assert!(doc.is_identity(&explicit));
    }

    #[test]
    fn transform_keeps_unshared_fields() {
        let doc = doc();
        let a = NoteOp {
            title: Some(Gww::write(stamp(0, ""), stamp(2, "mine"))),
            pinned: Some(Gww::write(false, true)),
            ..NoteOp::default()
        };
        let b = NoteOp {
            title: Some(Gww::write(stamp(0, ""), stamp(1, "theirs"))),
            ..NoteOp::default()
        };
        let rebased = doc.transform(&a, &b).unwrap();
        assert_eq!(rebased.title, Some(Gww::write(stamp(1, "theirs"), stamp(2, "mine"))));
        assert_eq!(rebased.pinned, a.pinned);
        assert!(doc.transform(&b, &a).unwrap().title.is_none());
    }
}

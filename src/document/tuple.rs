//! Tuple document: the positional product of document models.
//!
//! For models `D0, D1, ...` the operations are tuples `(a0, a1, ...)` and every
//! operator works component-wise. Each law holds because it holds in every
//! component. No identity is required; when every component is `Unital`, so
//! is the tuple, with `(ι0, ι1, ...)` as its identity.
//!
//! Compose and transform are fail-fast: the first undefined component makes
//! the whole tuple undefined, and later components are not evaluated.
//!
//! Implemented for arities 1 through 6.

use crate::algebra::{DocumentModel, Groupoid, Unital};
use crate::error::Result;

/// The product of the document models in the tuple `Ds`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TupleDocument<Ds> {
    pub documents: Ds,
}

impl<Ds> TupleDocument<Ds> {
    pub fn new(documents: Ds) -> TupleDocument<Ds> {
        return TupleDocument { documents };
    }
}

#[inline]
fn field<T>(operator: &str, index: usize, result: Result<T>) -> Result<T> {
    if result.is_err() {
        log::trace!("tuple {operator}: field {index} is undefined, aborting");
    }
    return result;
}

macro_rules! tuple_document {
    ($(($idx:tt, $D:ident)),+) => {
        impl<$($D: Groupoid),+> Groupoid for TupleDocument<($($D,)+)> {
            type Op = ($($D::Op,)+);

            fn invert(&self, op: &Self::Op) -> Self::Op {
                return ($(self.documents.$idx.invert(&op.$idx),)+);
            }

            fn compose(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op> {
                return Ok(($(
                    field("compose", $idx, self.documents.$idx.compose(&a.$idx, &b.$idx))?,
                )+));
            }

            fn equals(&self, a: &Self::Op, b: &Self::Op) -> bool {
                return $(self.documents.$idx.equals(&a.$idx, &b.$idx))&&+;
            }
        }

        impl<$($D: DocumentModel),+> DocumentModel for TupleDocument<($($D,)+)> {
            fn transform(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op> {
                return Ok(($(
                    field("transform", $idx, self.documents.$idx.transform(&a.$idx, &b.$idx))?,
                )+));
            }
        }

        impl<$($D: Unital),+> Unital for TupleDocument<($($D,)+)> {
            fn identity(&self) -> Self::Op {
                return ($(self.documents.$idx.identity(),)+);
            }
        }
    };
}

tuple_document!((0, D0));
tuple_document!((0, D0), (1, D1));
tuple_document!((0, D0), (1, D1), (2, D2));
tuple_document!((0, D0), (1, D1), (2, D2), (3, D3));
tuple_document!((0, D0), (1, D1), (2, D2), (3, D3), (4, D4));
tuple_document!((0, D0), (1, D1), (2, D2), (3, D3), (4, D4), (5, D5));

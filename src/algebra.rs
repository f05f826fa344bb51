//! Algebraic contracts every document model is built from.
//!
//! # Relations
//!
//! - `Equivalence<T>`: reflexive, symmetric and transitive. Two operations can
//!   be equal without being structurally identical.
//! - `Ordered<T>`: a strict total order. Its equivalence is derived:
//!   `a ~ b` iff `!(a < b) && !(b < a)`.
//!
//! # Structures
//!
//! - `Groupoid`: a total `invert` and a partial `compose`.
//! - `Group`: an identity and a total `combine`; `AbelianGroup` marks
//!   `combine` as commutative.
//! - `DocumentModel`: a groupoid with a partial `transform`.
//! - `Unital`: a document model with an identity operation ι.
//!
//! # Laws
//!
//! Writing `*` for compose, `/` for transform and `!` for invert:
//!
//! - **AP**: `(a * b) * c ~ a * (b * c)` for composable triples.
//! - **IP1**: `(a * b) * !b ~ a` and `!a * (a * b) ~ b`.
//! - **CP1**: `a * (b / a) ~ b * (a / b)` whenever both transforms exist.
//! - `~` is a congruence: replacing an operand by an equal one yields an equal
//!   result wherever both results exist.
//!
//! Models with an identity additionally satisfy:
//!
//! - **IdnP1**: `a * ι ~ ι * a ~ a`.
//! - **IdnP2**: `ι / a ~ ι` and `a / ι ~ a`.
//! - **InvP1**: `a * !a ~ !a * a ~ ι`.
//!
//! Nothing here checks the laws at runtime. Each concrete model carries a
//! proof sketch in its module docs, and `crate::laws` checks them on samples.

use crate::error::Result;

/// An equivalence relation over `T`.
pub trait Equivalence<T: ?Sized> {
    /// Whether `a` and `b` are in the same equivalence class.
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// A strict total order over `T`.
///
/// Implementors must keep `equals` consistent with the order, i.e. equal to
/// `equivalent_by_order`. `ByOrder` and `Natural` do this for you.
pub trait Ordered<T: ?Sized>: Equivalence<T> {
    /// Whether `a` sorts strictly before `b`.
    fn less_than(&self, a: &T, b: &T) -> bool;
}

/// The equivalence induced by a strict order.
pub fn equivalent_by_order<T: ?Sized, O: Ordered<T> + ?Sized>(order: &O, a: &T, b: &T) -> bool {
    return !order.less_than(a, b) && !order.less_than(b, a);
}

/// The standard library's notion of equality and order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: PartialEq + ?Sized> Equivalence<T> for Natural {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        return a == b;
    }
}

impl<T: PartialOrd + ?Sized> Ordered<T> for Natural {
    #[inline]
    fn less_than(&self, a: &T, b: &T) -> bool {
        return a < b;
    }
}

/// An equivalence given by a closure.
///
/// ```
/// use otdoc::algebra::{ByEquality, Equivalence};
///
/// let case_insensitive = ByEquality(|a: &String, b: &String| a.eq_ignore_ascii_case(b));
/// assert!(case_insensitive.equals(&"Hello".to_string(), &"hELLO".to_string()));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ByEquality<F>(pub F);

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Equivalence<T> for ByEquality<F> {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        return (self.0)(a, b);
    }
}

/// A strict order given by a `less_than` closure, with derived equivalence.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByOrder<F>(pub F);

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Equivalence<T> for ByOrder<F> {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        return equivalent_by_order(self, a, b);
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Ordered<T> for ByOrder<F> {
    #[inline]
    fn less_than(&self, a: &T, b: &T) -> bool {
        return (self.0)(a, b);
    }
}

/// A set of operations with a total inverse and a partial composition.
///
/// `equals` is the groupoid's equivalence on operations. Every law is stated
/// up to this equivalence rather than structural equality.
pub trait Groupoid {
    /// The operation type. Operations are immutable values.
    type Op: Clone;

    /// The operation that undoes `op`.
    fn invert(&self, op: &Self::Op) -> Self::Op;

    /// `a` followed by `b`, or `Error::Incomposable`.
    fn compose(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op>;

    /// Whether two operations have the same effect.
    fn equals(&self, a: &Self::Op, b: &Self::Op) -> bool;
}

/// A groupoid whose composition is total and has an identity.
pub trait Group {
    /// The element type.
    type Element: Clone;

    /// The neutral element.
    fn identity(&self) -> Self::Element;

    /// The element that combines with `a` to the identity.
    fn inverse(&self, a: &Self::Element) -> Self::Element;

    /// The total, associative group operation.
    fn combine(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Equivalence of elements.
    fn equals(&self, a: &Self::Element, b: &Self::Element) -> bool;
}

/// A group whose `combine` is commutative.
///
/// This is a promise about `combine`; the accumulator document's convergence
/// argument depends on it.
pub trait AbelianGroup: Group {}

/// A groupoid with a partial inclusive transform.
///
/// `transform(a, b)` re-expresses `a`, defined on some state, so that it
/// applies after `b`, defined on the same state.
pub trait DocumentModel: Groupoid {
    /// `a` rebased past `b`, or `Error::Untransformable`.
    fn transform(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op>;
}

/// A document model with an identity operation.
pub trait Unital: DocumentModel {
    /// The operation that changes nothing.
    fn identity(&self) -> Self::Op;

    /// Whether `op` is equal to the identity.
    fn is_identity(&self, op: &Self::Op) -> bool {
        return self.equals(op, &self.identity());
    }
}

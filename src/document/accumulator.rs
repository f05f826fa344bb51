//! Accumulator documents built from abelian groups.
//!
//! Any abelian group `(G, ι, inverse, combine)` is a document model with
//! `transform(a, b) = a`:
//!
//! - AP, IP1, IdnP1 and InvP1 are the group axioms.
//! - IdnP2: `ι / a = ι` and `a / ι = a` hold by definition.
//! - CP1: `a * (b / a) = a * b = b * a = b * (a / b)` by commutativity.
//!
//! Concurrent increments simply add up, which is what counters, balances and
//! scores want.
//!
//! # Groups
//!
//! - `DecimalSum`: real addition rounded to a fixed number of decimal digits.
//!   Rounding maps every `f64` to the representative of its equivalence
//!   class, so `0.1 + 0.2` and `0.3` are the same operation.
//! - `ModularSum`: addition of integers modulo `n`.

use std::num::NonZeroU64;

use crate::algebra::{AbelianGroup, DocumentModel, Group, Groupoid, Unital};
use crate::error::Result;

/// The document model of an abelian group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccumulatorDocument<G> {
    group: G,
}

impl<G: AbelianGroup> AccumulatorDocument<G> {
    /// Lift `group` into a document model.
    pub fn new(group: G) -> AccumulatorDocument<G> {
        return AccumulatorDocument { group };
    }

    /// The underlying group.
    pub fn group(&self) -> &G {
        return &self.group;
    }
}

impl<G: AbelianGroup> Groupoid for AccumulatorDocument<G> {
    type Op = G::Element;

    fn invert(&self, op: &Self::Op) -> Self::Op {
        return self.group.inverse(op);
    }

    fn compose(&self, a: &Self::Op, b: &Self::Op) -> Result<Self::Op> {
        return Ok(self.group.combine(a, b));
    }

    fn equals(&self, a: &Self::Op, b: &Self::Op) -> bool {
        return self.group.equals(a, b);
    }
}

impl<G: AbelianGroup> DocumentModel for AccumulatorDocument<G> {
    fn transform(&self, a: &Self::Op, _b: &Self::Op) -> Result<Self::Op> {
        return Ok(a.clone());
    }
}

impl<G: AbelianGroup> Unital for AccumulatorDocument<G> {
    fn identity(&self) -> Self::Op {
        return self.group.identity();
    }
}

/// Addition of reals rounded to `digits` decimal places.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecimalSum {
    digits: i32,
    scale: f64,
}

impl DecimalSum {
    /// A sum rounded to `digits` decimal places.
    pub fn new(digits: u8) -> DecimalSum {
        let digits = i32::from(digits);
        return DecimalSum {
            digits,
            scale: 10f64.powi(digits),
        };
    }

    /// Number of decimal places kept.
    pub fn digits(&self) -> u8 {
        return self.digits as u8;
    }

    /// The representative of `x`'s equivalence class.
    #[inline]
    pub fn round(&self, x: f64) -> f64 {
        return (x * self.scale).round() / self.scale;
    }
}

impl Group for DecimalSum {
    type Element = f64;

    fn identity(&self) -> f64 {
        return 0.0;
    }

    fn inverse(&self, a: &f64) -> f64 {
        return self.round(-self.round(*a));
    }

    // Operands are rounded first so every value acts as its representative.
    fn combine(&self, a: &f64, b: &f64) -> f64 {
        return self.round(self.round(*a) + self.round(*b));
    }

    fn equals(&self, a: &f64, b: &f64) -> bool {
        // Compare scaled integers so -0.0 and 0.0 coincide.
        return (a * self.scale).round() == (b * self.scale).round();
    }
}

impl AbelianGroup for DecimalSum {}

/// Addition of integers modulo `n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModularSum {
    modulus: NonZeroU64,
}

impl ModularSum {
    /// Integers modulo `modulus`.
    pub fn new(modulus: NonZeroU64) -> ModularSum {
        return ModularSum { modulus };
    }

    /// The modulus `n`.
    pub fn modulus(&self) -> u64 {
        return self.modulus.get();
    }

    /// The representative of `x` in `0..n`.
    #[inline]
    pub fn reduce(&self, x: u64) -> u64 {
        return x % self.modulus.get();
    }
}

impl Group for ModularSum {
    type Element = u64;

    fn identity(&self) -> u64 {
        return 0;
    }

    fn inverse(&self, a: &u64) -> u64 {
        let n = self.modulus.get();
        return (n - self.reduce(*a)) % n;
    }

    fn combine(&self, a: &u64, b: &u64) -> u64 {
        let n = u128::from(self.modulus.get());
        let sum = (u128::from(*a) + u128::from(*b)) % n;
        return sum as u64;
    }

    fn equals(&self, a: &u64, b: &u64) -> bool {
        return self.reduce(*a) == self.reduce(*b);
    }
}

impl AbelianGroup for ModularSum {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laws::{self, Verdict};

    fn cents() -> AccumulatorDocument<DecimalSum> {
        return AccumulatorDocument::new(DecimalSum::new(2));
    }

    #[test]
    fn decimal_compose_adds() {
        let doc = cents();
        let sum = doc.compose(&1.0, &3.0).unwrap();
        assert!(doc.equals(&sum, &4.0));
    }

    #[test]
    fn decimal_compose_is_associative() {
        let doc = cents();
        let left = doc.compose(&doc.compose(&1.0, &3.0).unwrap(), &10.0).unwrap();
        let right = doc.compose(&1.0, &doc.compose(&3.0, &10.0).unwrap()).unwrap();
        assert!(doc.equals(&left, &14.0));
        assert!(doc.equals(&right, &14.0));
    }

    #[test]
    fn decimal_rounding_defines_equality() {
        let doc = cents();
        assert!(doc.equals(&doc.compose(&0.1, &0.2).unwrap(), &0.3));
        assert!(doc.equals(&0.001, &0.0));
        assert!(doc.equals(&-0.0, &0.0));
        assert!(!doc.equals(&0.01, &0.0));
    }

    #[test]
    fn decimal_inverse_cancels() {
        let doc = cents();
        let op = 2.75;
        let undone = doc.compose(&op, &doc.invert(&op)).unwrap();
        assert!(doc.is_identity(&undone));
    }

    #[test]
    fn decimal_off_grid_operands_act_as_rounded() {
        let doc = cents();
        assert!(doc.equals(&0.006, &0.01));
        assert!(doc.equals(&doc.compose(&0.006, &0.006).unwrap(), &doc.compose(&0.01, &0.006).unwrap()));
        assert_eq!(laws::check_congruence(&doc, &0.006, &0.01, &0.006), Ok(Verdict::Held));
        assert_eq!(laws::check_associativity(&doc, &0.006, &0.006, &-0.006), Ok(Verdict::Held));
        assert_eq!(laws::check_inverse_cancellation(&doc, &0.006, &-0.004), Ok(Verdict::Held));
    }

    #[test]
    fn transform_is_identity_lift() {
        let doc = cents();
        assert_eq!(doc.transform(&5.0, &-3.0), Ok(5.0));
    }

    #[test]
    fn modular_sum_wraps() {
        let doc = AccumulatorDocument::new(ModularSum::new(NonZeroU64::new(7).unwrap()));
        assert_eq!(doc.compose(&5, &4), Ok(2));
        assert_eq!(doc.invert(&3), 4);
        assert_eq!(doc.invert(&0), 0);
        assert!(doc.equals(&9, &2));
        assert!(doc.is_identity(&doc.compose(&3, &4).unwrap()));
    }

    #[test]
    fn modular_sum_does_not_overflow() {
        let group = ModularSum::new(NonZeroU64::new(u64::MAX).unwrap());
        assert_eq!(group.combine(&(u64::MAX - 1), &2), 1);
    }
}

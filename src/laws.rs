//! Mechanical law checks for document models.
//!
//! Each `check_*` function evaluates one law on one sample and reports one of
//! three outcomes:
//!
//! - `Ok(Verdict::Held)`: the law's premises hold and so does its conclusion.
//! - `Ok(Verdict::Vacuous)`: a premise failed (an operator was undefined on
//!   the sample), so the sample says nothing about the law.
//! - `Err(LawViolation)`: the premises hold but the conclusion does not.
//!
//! `Samples` bundles operations by the role they play and runs every
//! applicable check over them, which is how the test suites of this crate
//! validate each model.

use std::fmt;

use thiserror::Error;

use crate::algebra::{DocumentModel, Unital};
use crate::error::{Error, Result};

/// The laws the oracle knows how to check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Law {
    /// AP: `(a * b) * c ~ a * (b * c)`.
    Associativity,
    /// IP1: `(a * b) * !b ~ a` and `!a * (a * b) ~ b`.
    InverseCancellation,
    /// CP1: `a * (b / a) ~ b * (a / b)`.
    Convergence,
    /// IdnP1: `a * ι ~ ι * a ~ a`.
    Identity,
    /// IdnP2: `ι / a ~ ι` and `a / ι ~ a`.
    IdentityTransform,
    /// InvP1: `a * !a ~ !a * a ~ ι`.
    Inverse,
    Reflexivity,
    Symmetry,
    Transitivity,
    /// Equal operands give equal results.
    Congruence,
    /// A pair expected to be incomposable composed.
    Incomposable,
    /// A pair expected to be untransformable transformed.
    Untransformable,
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Law::Associativity => "associativity (AP)",
            Law::InverseCancellation => "inverse cancellation (IP1)",
            Law::Convergence => "convergence (CP1)",
            Law::Identity => "identity (IdnP1)",
            Law::IdentityTransform => "identity transform (IdnP2)",
            Law::Inverse => "inverse (InvP1)",
            Law::Reflexivity => "reflexivity of equals",
            Law::Symmetry => "symmetry of equals",
            Law::Transitivity => "transitivity of equals",
            Law::Congruence => "congruence of equals",
            Law::Incomposable => "expected incomposable",
            Law::Untransformable => "expected untransformable",
        };
        return f.write_str(name);
    }
}

/// A law failed on a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("{law} violated{}", by_sample(.sample))]
pub struct LawViolation {
    pub law: Law,
    /// Index of the offending sample within its group, when known.
    pub sample: Option<usize>,
}

impl LawViolation {
    pub fn new(law: Law) -> LawViolation {
        return LawViolation { law, sample: None };
    }

    /// The same violation, attributed to sample `index`.
    pub fn at(self, index: usize) -> LawViolation {
        return LawViolation {
            sample: Some(index),
            ..self
        };
    }
}

fn by_sample(sample: &Option<usize>) -> String {
    match sample {
        Some(index) => return format!(" by sample {index}"),
        None => return String::new(),
    }
}

/// Outcome of a check whose law was not violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Held,
    Vacuous,
}

pub type Check = Result<Verdict, LawViolation>;

fn held_if(law: Law, holds: bool) -> Check {
    if holds {
        return Ok(Verdict::Held);
    }
    return Err(LawViolation::new(law));
}

fn vacuous(law: Law) -> Check {
    log::debug!("{law}: sample skipped, an operator is undefined on it");
    return Ok(Verdict::Vacuous);
}

/// Both results exist and are equal.
fn both_equal<D: DocumentModel>(doc: &D, left: &Result<D::Op>, right: &Result<D::Op>) -> bool {
    match (left, right) {
        (Ok(left), Ok(right)) => return doc.equals(left, right),
        _ => return false,
    }
}

/// Results that both exist are equal.
fn agree<D: DocumentModel>(doc: &D, left: &Result<D::Op>, right: &Result<D::Op>) -> bool {
    match (left, right) {
        (Ok(left), Ok(right)) => return doc.equals(left, right),
        _ => return true,
    }
}

pub fn check_reflexivity<D: DocumentModel>(doc: &D, a: &D::Op) -> Check {
    return held_if(Law::Reflexivity, doc.equals(a, a));
}

pub fn check_symmetry<D: DocumentModel>(doc: &D, a: &D::Op, b: &D::Op) -> Check {
    return held_if(Law::Symmetry, doc.equals(a, b) == doc.equals(b, a));
}

pub fn check_transitivity<D: DocumentModel>(doc: &D, a: &D::Op, b: &D::Op, c: &D::Op) -> Check {
    if !doc.equals(a, b) || !doc.equals(b, c) {
        return Ok(Verdict::Vacuous);
    }
    return held_if(Law::Transitivity, doc.equals(a, c));
}

/// AP on a triple whose adjacent pairs compose.
pub fn check_associativity<D: DocumentModel>(doc: &D, a: &D::Op, b: &D::Op, c: &D::Op) -> Check {
    let (Ok(ab), Ok(bc)) = (doc.compose(a, b), doc.compose(b, c)) else {
        return vacuous(Law::Associativity);
    };
    let left = doc.compose(&ab, c);
    let right = doc.compose(a, &bc);
    return held_if(Law::Associativity, both_equal(doc, &left, &right));
}

/// IP1 on a composable pair.
pub fn check_inverse_cancellation<D: DocumentModel>(doc: &D, a: &D::Op, b: &D::Op) -> Check {
    let Ok(ab) = doc.compose(a, b) else {
        return vacuous(Law::InverseCancellation);
    };
    let undo_b = doc.compose(&ab, &doc.invert(b));
    let undo_a = doc.compose(&doc.invert(a), &ab);
    let holds = both_equal(doc, &undo_b, &Ok(a.clone())) && both_equal(doc, &undo_a, &Ok(b.clone()));
    return held_if(Law::InverseCancellation, holds);
}

/// CP1 on a pair of concurrent operations.
pub fn check_convergence<D: DocumentModel>(doc: &D, a: &D::Op, b: &D::Op) -> Check {
    let (Ok(a_after_b), Ok(b_after_a)) = (doc.transform(a, b), doc.transform(b, a)) else {
        return vacuous(Law::Convergence);
    };
    let left = doc.compose(a, &b_after_a);
    let right = doc.compose(b, &a_after_b);
    return held_if(Law::Convergence, both_equal(doc, &left, &right));
}

/// Replacing `a` by an equal `a2` next to `b` does not change any defined
/// result of compose or transform.
pub fn check_congruence<D: DocumentModel>(doc: &D, a: &D::Op, a2: &D::Op, b: &D::Op) -> Check {
    if !doc.equals(a, a2) {
        return Ok(Verdict::Vacuous);
    }
    let holds = agree(doc, &doc.compose(a, b), &doc.compose(a2, b))
        && agree(doc, &doc.compose(b, a), &doc.compose(b, a2))
        && agree(doc, &doc.transform(a, b), &doc.transform(a2, b))
        && agree(doc, &doc.transform(b, a), &doc.transform(b, a2))
        && doc.equals(&doc.invert(a), &doc.invert(a2));
    return held_if(Law::Congruence, holds);
}

pub fn check_identity<D: Unital>(doc: &D, a: &D::Op) -> Check {
    let identity = doc.identity();
    let expected = Ok(a.clone());
    let holds = both_equal(doc, &doc.compose(a, &identity), &expected)
        && both_equal(doc, &doc.compose(&identity, a), &expected);
    return held_if(Law::Identity, holds);
}

pub fn check_identity_transform<D: Unital>(doc: &D, a: &D::Op) -> Check {
    let identity = doc.identity();
    let holds = both_equal(doc, &doc.transform(&identity, a), &Ok(identity.clone()))
        && both_equal(doc, &doc.transform(a, &identity), &Ok(a.clone()));
    return held_if(Law::IdentityTransform, holds);
}

pub fn check_inverse<D: Unital>(doc: &D, a: &D::Op) -> Check {
    let inverse = doc.invert(a);
    let identity = Ok(doc.identity());
    let holds = both_equal(doc, &doc.compose(a, &inverse), &identity)
        && both_equal(doc, &doc.compose(&inverse, a), &identity);
    return held_if(Law::Inverse, holds);
}

pub fn expect_incomposable<D: DocumentModel>(doc: &D, a: &D::Op, b: &D::Op) -> Check {
    return held_if(Law::Incomposable, doc.compose(a, b).err() == Some(Error::Incomposable));
}

pub fn expect_untransformable<D: DocumentModel>(doc: &D, a: &D::Op, b: &D::Op) -> Check {
    return held_if(Law::Untransformable, doc.transform(a, b).err() == Some(Error::Untransformable));
}

/// Tally of checks that did not fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Report {
    pub held: usize,
    pub vacuous: usize,
}

impl Report {
    fn record(&mut self, check: Check, index: usize) -> Result<(), LawViolation> {
        match check.map_err(|violation| violation.at(index))? {
            Verdict::Held => self.held += 1,
            Verdict::Vacuous => self.vacuous += 1,
        }
        return Ok(());
    }
}

/// Sample operations grouped by the checks they feed.
#[derive(Clone, Debug)]
pub struct Samples<Op> {
    /// Operations defined on one common state. Every pair and triple of them
    /// is checked for the equivalence laws, CP1 and congruence.
    pub singletons: Vec<Op>,
    /// Triples `(a, b, c)` where `b` applies after `a` and `c` after `b`.
    /// Checked for AP and IP1.
    pub composable: Vec<(Op, Op, Op)>,
    /// Concurrent pairs defined on the same state.
    pub transformable: Vec<(Op, Op)>,
    /// Pairs that must not compose.
    pub incomposable: Vec<(Op, Op)>,
    /// Pairs that must not transform.
    pub untransformable: Vec<(Op, Op)>,
}

impl<Op> Default for Samples<Op> {
    fn default() -> Self {
        return Samples {
            singletons: Vec::new(),
            composable: Vec::new(),
            transformable: Vec::new(),
            incomposable: Vec::new(),
            untransformable: Vec::new(),
        };
    }
}

impl<Op: Clone> Samples<Op> {
    /// Run every check that applies to a document model.
    pub fn verify<D: DocumentModel<Op = Op>>(&self, doc: &D) -> Result<Report, LawViolation> {
        let mut report = Report::default();
        let singles = &self.singletons;
        let n = singles.len();

        for (i, a) in singles.iter().enumerate() {
            report.record(check_reflexivity(doc, a), i)?;
            for (j, b) in singles.iter().enumerate() {
                let pair = i * n + j;
                report.record(check_symmetry(doc, a, b), pair)?;
                report.record(check_convergence(doc, a, b), pair)?;
                for (k, c) in singles.iter().enumerate() {
                    let triple = pair * n + k;
                    report.record(check_transitivity(doc, a, b, c), triple)?;
                    report.record(check_congruence(doc, a, b, c), triple)?;
                }
            }
        }

        for (i, (a, b, c)) in self.composable.iter().enumerate() {
            report.record(check_associativity(doc, a, b, c), i)?;
            report.record(check_inverse_cancellation(doc, a, b), i)?;
            report.record(check_inverse_cancellation(doc, b, c), i)?;
        }
        for (i, (a, b)) in self.transformable.iter().enumerate() {
            report.record(check_convergence(doc, a, b), i)?;
        }
        for (i, (a, b)) in self.incomposable.iter().enumerate() {
            report.record(expect_incomposable(doc, a, b), i)?;
        }
        for (i, (a, b)) in self.untransformable.iter().enumerate() {
            report.record(expect_untransformable(doc, a, b), i)?;
        }
        return Ok(report);
    }

    /// `verify` plus the identity laws.
    pub fn verify_unital<D: Unital<Op = Op>>(&self, doc: &D) -> Result<Report, LawViolation> {
        let mut report = self.verify(doc)?;
        for (i, a) in self.singletons.iter().enumerate() {
            report.record(check_identity(doc, a), i)?;
            report.record(check_identity_transform(doc, a), i)?;
            report.record(check_inverse(doc, a), i)?;
        }
        return Ok(report);
    }
}

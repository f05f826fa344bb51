//! Conformance test suite for document models.
//!
//! Every model shipped by the crate must pass these tests. They verify:
//!
//! 1. The laws (AP, IP1, CP1, equivalence, congruence) on sample operations
//! 2. The identity laws for models with an identity
//! 3. The worked examples each model is expected to reproduce
//!
//! # Usage
//!
//! To test a new model, add it to the `run_law_suite!` invocations at the
//! bottom of this file.

use std::fmt::Debug;
use std::num::NonZeroU64;

use otdoc::algebra::{DocumentModel, Groupoid, Natural, Unital};
use otdoc::document::accumulator::{AccumulatorDocument, DecimalSum, ModularSum};
use otdoc::document::gww::{Gww, gww_document};
use otdoc::document::lww::{Lww, Timestamped, lww_document};
use otdoc::document::record::{RecordDocument, RecordOp};
use otdoc::document::sequence::{Oplet, SequenceOp, delete_at, insert_at, sequence_document};
use otdoc::laws::Samples;
use otdoc::Error;

// =============================================================================
// Generic checks
// =============================================================================

/// Run the full oracle over `samples` and fail with the violated law.
pub fn assert_laws<D: Unital>(doc: &D, samples: &Samples<D::Op>) {
    match samples.verify_unital(doc) {
        Ok(report) => assert!(report.held > 0, "no sample exercised a law"),
        Err(violation) => panic!("{violation}"),
    }
}

/// `a * !a` is the identity for every sample.
pub fn assert_round_trip<D: Unital>(doc: &D, ops: &[D::Op])
where
    D::Op: Debug,
{
    for op in ops {
        let undone = doc.compose(op, &doc.invert(op));
        match undone {
            Ok(undone) => assert!(doc.is_identity(&undone), "{op:?} * !{op:?} = {undone:?}"),
            Err(err) => panic!("{op:?} * !{op:?} failed: {err}"),
        }
    }
}

// =============================================================================
// Samples per model
// =============================================================================

fn cents() -> AccumulatorDocument<DecimalSum> {
    return AccumulatorDocument::new(DecimalSum::new(2));
}

fn cents_samples() -> Samples<f64> {
    return Samples {
        singletons: vec![0.0, 1.0, 3.0, -2.5, 0.25],
        composable: vec![(1.0, 3.0, 10.0), (0.1, 0.2, -0.3)],
        transformable: vec![(1.0, 3.0), (-2.5, 0.25)],
        ..Samples::default()
    };
}

fn mod_seven() -> AccumulatorDocument<ModularSum> {
    return AccumulatorDocument::new(ModularSum::new(NonZeroU64::new(7).unwrap()));
}

fn mod_seven_samples() -> Samples<u64> {
    return Samples {
        singletons: vec![0, 3, 5, 6, 9],
        composable: vec![(3, 5, 6)],
        transformable: vec![(3, 6)],
        ..Samples::default()
    };
}

fn gww_samples() -> Samples<Gww<u8>> {
    return Samples {
        singletons: vec![
            Gww::Identity,
            Gww::write(0, 1),
            Gww::write(0, 2),
            Gww::write(1, 2),
            Gww::write(2, 0),
        ],
        composable: vec![
            (Gww::write(0, 1), Gww::write(1, 2), Gww::write(2, 3)),
            (Gww::write(0, 1), Gww::write(1, 0), Gww::write(0, 4)),
            (Gww::Identity, Gww::write(3, 4), Gww::Identity),
        ],
        transformable: vec![(Gww::write(0, 1), Gww::write(0, 2)), (Gww::write(5, 9), Gww::write(5, 9))],
        incomposable: vec![(Gww::write(0, 1), Gww::write(0, 2))],
        untransformable: vec![(Gww::write(0, 1), Gww::write(1, 2))],
    };
}

fn at(timestamp: u64, value: &'static str) -> Timestamped<&'static str> {
    return Timestamped::new(timestamp, value);
}

fn lww_samples() -> Samples<Lww<&'static str>> {
    return Samples {
        singletons: vec![
            Gww::Identity,
            Gww::write(at(0, "x"), at(1, "y")),
            Gww::write(at(0, "x"), at(1, "z")),
            Gww::write(at(0, "x"), at(2, "a")),
            Gww::write(at(1, "y"), at(2, "z")),
        ],
        composable: vec![(
            Gww::write(at(0, "x"), at(1, "y")),
            Gww::write(at(1, "y"), at(2, "z")),
            Gww::write(at(2, "z"), at(3, "w")),
        )],
        transformable: vec![(Gww::write(at(0, "x"), at(1, "y")), Gww::write(at(0, "x"), at(2, "a")))],
        incomposable: vec![(Gww::write(at(0, "x"), at(1, "y")), Gww::write(at(1, "z"), at(2, "a")))],
        untransformable: vec![(Gww::write(at(0, "x"), at(1, "y")), Gww::write(at(1, "y"), at(2, "z")))],
    };
}

fn ins(index: usize, value: i32) -> Oplet<i32> {
    return Oplet::Insert { index, value };
}

fn del(index: usize, value: i32) -> Oplet<i32> {
    return Oplet::Delete { index, value };
}

fn seq(oplets: &[Oplet<i32>]) -> SequenceOp<i32> {
    return oplets.iter().cloned().collect();
}

/// Operations on the base state `[0, 1, 2, 3, 4]`.
fn sequence_samples() -> Samples<SequenceOp<i32>> {
    return Samples {
        singletons: vec![
            seq(&[]),
            insert_at(0, [100]),
            delete_at(1, [1]),
            seq(&[del(1, 1), ins(3, 101)]),
            insert_at(2, [102, 103]),
            delete_at(2, [2, 3]),
            seq(&[ins(5, 104), del(0, 0)]),
        ],
        composable: vec![
            // [0, 1, 2, 3, 4] -> [0, 100, 1, 2, 3, 4] -> [100, 1, 2, 3, 4] -> [101, 100, 2, 3, 4]
            (insert_at(1, [100]), delete_at(0, [0]), seq(&[del(1, 1), ins(0, 101)])),
            (seq(&[ins(1, 2), del(0, 1)]), seq(&[del(0, 2), ins(1, 2)]), seq(&[])),
            (seq(&[]), seq(&[ins(1, 2), del(0, 1)]), seq(&[del(0, 2), ins(1, 2)])),
        ],
        transformable: vec![
            (insert_at(2, [200]), insert_at(2, [300])),
            (delete_at(1, [1, 2]), delete_at(2, [2, 3])),
            (insert_at(3, [200]), delete_at(2, [2, 3])),
        ],
        incomposable: vec![(seq(&[ins(0, 1)]), seq(&[del(0, 2)]))],
        untransformable: vec![(seq(&[del(1, 1)]), seq(&[del(1, 7)]))],
    };
}

type Register = RecordDocument<otdoc::document::gww::GwwDocument<&'static str, Natural>>;

fn register() -> Register {
    return RecordDocument::new(gww_document(Natural));
}

fn record(entries: &[(&str, Gww<&'static str>)]) -> RecordOp<Gww<&'static str>> {
    return entries
        .iter()
        .map(|(key, op)| (key.to_string(), op.clone()))
        .collect();
}

fn record_samples() -> Samples<RecordOp<Gww<&'static str>>> {
    return Samples {
        singletons: vec![
            record(&[]),
            record(&[("foo", Gww::write("a", "b"))]),
            record(&[("foo", Gww::write("a", "c")), ("bar", Gww::write("x", "y"))]),
            record(&[("bar", Gww::write("x", "z"))]),
            record(&[("foo", Gww::Identity)]),
        ],
        composable: vec![(
            record(&[("foo", Gww::write("a", "b"))]),
            record(&[("foo", Gww::write("b", "c")), ("bar", Gww::write("x", "y"))]),
            record(&[("bar", Gww::write("y", "x"))]),
        )],
        transformable: vec![(
            record(&[("foo", Gww::write("a", "b")), ("bar", Gww::write("x", "y"))]),
            record(&[("foo", Gww::write("a", "c")), ("baz", Gww::write("p", "q"))]),
        )],
        incomposable: vec![(
            record(&[("foo", Gww::write("a", "b"))]),
            record(&[("foo", Gww::write("c", "d")), ("bar", Gww::write("x", "y"))]),
        )],
        untransformable: vec![(
            record(&[("foo", Gww::write("a", "b"))]),
            record(&[("foo", Gww::write("b", "c"))]),
        )],
    };
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn accumulator_adds() {
    let doc = cents();
    assert!(doc.equals(&doc.compose(&1.00, &3.00).unwrap(), &4.00));
    let left = doc.compose(&doc.compose(&1.0, &3.0).unwrap(), &10.0).unwrap();
    let right = doc.compose(&1.0, &doc.compose(&3.0, &10.0).unwrap()).unwrap();
    assert!(doc.equals(&left, &14.0));
    assert!(doc.equals(&right, &14.0));
}

#[test]
fn gww_examples() {
    let doc = gww_document::<u8, _>(Natural);
    assert_eq!(doc.compose(&Gww::write(0, 1), &Gww::write(1, 2)), Ok(Gww::write(0, 2)));
    assert_eq!(doc.compose(&Gww::write(0, 1), &Gww::write(0, 2)), Err(Error::Incomposable));
    assert_eq!(doc.transform(&Gww::write(0, 1), &Gww::write(1, 2)), Err(Error::Untransformable));
    assert_eq!(doc.transform(&Gww::write(0, 1), &Gww::write(0, 2)), Ok(Gww::Identity));
    assert_eq!(doc.transform(&Gww::write(0, 2), &Gww::write(0, 1)), Ok(Gww::write(1, 2)));
}

#[test]
fn lww_chain_composes() {
    let doc = lww_document::<&str, _>(Natural);
    let first = Gww::write(at(0, "x"), at(1, "y"));
    let second = Gww::write(at(1, "y"), at(2, "z"));
    let third = Gww::write(at(2, "z"), at(3, "w"));
    let chained = doc.compose(&doc.compose(&first, &second).unwrap(), &third).unwrap();
    assert_eq!(chained, Gww::write(at(0, "x"), at(3, "w")));
}

#[test]
fn sequence_insert_delete_cancels() {
    let doc = sequence_document::<i32, _>(Natural);
    let composed = doc.compose(&seq(&[ins(0, 1)]), &seq(&[del(0, 1)])).unwrap();
    assert!(doc.is_identity(&composed));

    let a = seq(&[ins(1, 2), del(0, 1)]);
    assert!(doc.is_identity(&doc.compose(&a, &doc.invert(&a)).unwrap()));
}

#[test]
fn sequence_reordered_pair_composes() {
    let doc = sequence_document::<i32, _>(Natural);
    let a = seq(&[ins(1, 2), del(0, 1)]);
    let b = seq(&[del(0, 2), ins(1, 2)]);
    let composed = doc.compose(&a, &b).unwrap();
    assert!(doc.equals(&composed, &seq(&[del(0, 1), ins(1, 2)])));
}

#[test]
fn record_examples() {
    let doc = register();
    let a = record(&[("foo", Gww::write("a", "b"))]);
    let b = record(&[("foo", Gww::write("b", "c")), ("bar", Gww::write("x", "y"))]);
    let expected = record(&[("foo", Gww::write("a", "c")), ("bar", Gww::write("x", "y"))]);
    assert!(doc.equals(&doc.compose(&a, &b).unwrap(), &expected));

    let c = record(&[("foo", Gww::write("c", "d")), ("bar", Gww::write("x", "y"))]);
    assert_eq!(doc.compose(&a, &c), Err(Error::Incomposable));
}

// =============================================================================
// Test Runner Macro
// =============================================================================

macro_rules! run_law_suite {
    ($name:ident, $make_doc:expr, $samples:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn laws_hold() {
                assert_laws(&$make_doc, &$samples);
            }

            #[test]
            fn round_trip_is_identity() {
                let samples = $samples;
                assert_round_trip(&$make_doc, &samples.singletons);
            }
        }
    };
}

run_law_suite!(decimal_sum, cents(), cents_samples());
run_law_suite!(modular_sum, mod_seven(), mod_seven_samples());
run_law_suite!(gww, gww_document::<u8, _>(Natural), gww_samples());
run_law_suite!(lww, lww_document::<&'static str, _>(Natural), lww_samples());
run_law_suite!(sequence, sequence_document::<i32, _>(Natural), sequence_samples());
run_law_suite!(record, register(), record_samples());

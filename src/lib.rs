//! otdoc - Operational-transformation document models.
//!
//! A document model describes how edits to a shared value are inverted,
//! composed and transformed so that replicas applying concurrent edits in
//! different orders converge. This crate provides the algebraic contract,
//! primitive models (accumulators, greatest/last-write-wins registers,
//! sequences) and combinators that lift them to records, tuples, structs and
//! optional values.
//!
//! # Quick Start
//!
//! ```
//! use otdoc::algebra::{DocumentModel, Groupoid, Natural};
//! use otdoc::document::sequence::{insert_at, sequence_document};
//!
//! let doc = sequence_document::<char, _>(Natural);
//! let base: Vec<char> = "helo".chars().collect();
//!
//! // Two replicas edit the same state concurrently.
//! let alice = insert_at(3, ['l']);
//! let bob = insert_at(4, ['!']);
//!
//! // Each applies its own edit, then the other's, rebased past its own.
//! let at_alice = doc.compose(&alice, &doc.transform(&bob, &alice).unwrap()).unwrap();
//! let at_bob = doc.compose(&bob, &doc.transform(&alice, &bob).unwrap()).unwrap();
//! assert!(doc.equals(&at_alice, &at_bob));
//!
//! let text: String = doc.apply(&at_alice, &base).unwrap().into_iter().collect();
//! assert_eq!(text, "hello!");
//! ```

pub mod algebra;
pub mod clock;
pub mod document;
pub mod error;
pub mod laws;

pub use error::{Error, Result};

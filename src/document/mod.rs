//! Concrete document models and the combinators that lift them.
//!
//! Primitives:
//! - `accumulator`: abelian groups (counters, sums)
//! - `gww`: greatest-write-wins registers
//! - `lww`: last-write-wins registers (GWW over timestamps)
//! - `sequence`: insert/delete edits over lists
//!
//! Combinators:
//! - `record`: sparse keyed maps of one model
//! - `tuple`: positional products of different models
//! - `structure`: named-field products (`struct_document!`)
//! - `optional`: adjoin an absent identity to any model

pub mod accumulator;
pub mod gww;
pub mod lww;
pub mod optional;
pub mod record;
pub mod sequence;
pub mod structure;
pub mod tuple;

pub use accumulator::{AccumulatorDocument, DecimalSum, ModularSum};
pub use gww::{Gww, GwwDocument, gww_document};
pub use lww::{Lww, LwwDocument, TimestampOrder, Timestamped, lww_document};
pub use optional::OptionalDocument;
pub use record::{RecordDocument, RecordOp};
pub use sequence::{ApplyError, Oplet, SequenceDocument, SequenceOp, delete_at, insert_at, sequence_document};
pub use tuple::TupleDocument;

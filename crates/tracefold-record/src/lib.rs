//! Append-only provenance record for TraceFold.
//!
//! This crate is the heart of TraceFold. A [`Record`] is a key-value
//! document whose every write is an audited, atomic [`EditEvent`] in an
//! append-only history. The current value of a field is always the last
//! write in history (last-write-wins), and nothing is ever deleted: a
//! field's earlier values remain recoverable from the event log.
//!
//! Records are plain values. Branching a record is `clone()` — the copy
//! shares no mutable state with the source, so independent pipeline stages
//! can append to their own branches without synchronization.

pub mod event;
pub mod record;

pub use event::EditEvent;
pub use record::Record;

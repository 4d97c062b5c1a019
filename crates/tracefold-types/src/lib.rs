//! Foundation types for TraceFold.
//!
//! This crate provides the core value, identity, temporal, and audit types
//! used throughout the TraceFold system. Every other TraceFold crate depends
//! on `tracefold-types`.
//!
//! # Key Types
//!
//! - [`FieldValue`] — Scalar value carried by a record field (string, number,
//!   boolean, or written null)
//! - [`OriginId`] — UUID v7 lineage-root identifier for a record
//! - [`EventTime`] — Wall-clock audit timestamp (milliseconds since epoch)
//! - [`Audit`] — Actor/location/timestamp metadata attached to every edit

pub mod audit;
pub mod error;
pub mod identity;
pub mod temporal;
pub mod value;

pub use audit::Audit;
pub use error::TypeError;
pub use identity::OriginId;
pub use temporal::EventTime;
pub use value::FieldValue;

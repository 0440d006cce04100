//! # Lodestone DB Core
//!
//! Client-side ordering core for the Lodestone document database: a
//! polymorphic value model with a stable total order that matches the
//! server's semantics exactly, so range queries, sort orders, and cursor
//! bounds evaluate locally the way the server would evaluate them.
//!
//! This crate provides:
//! - The [`Value`] union and its wire-representation variants
//! - Normalization of heterogeneous wire forms ([`normalize`])
//! - The total-order comparator and strict equality ([`compare`])
//! - Canonical ids and hashes ([`canonical`])
//! - Per-type range bound sentinels ([`bounds`])
//!
//! ## Design principles
//!
//! 1. **Pure and synchronous**: no I/O, no shared mutable state; every
//!    operation is a function of its arguments.
//! 2. **Normalize once, everywhere**: comparison, hashing, and encoding all
//!    route wire forms through the same [`normalize`] functions, so a
//!    timestamp sent as an ISO string and as a seconds/nanos pair behaves
//!    identically.
//! 3. **Two failure classes only**: malformed wire data panics (defect in
//!    the upstream parser); permissive wire defaults (non-numeric fields
//!    reading as 0) pass through silently and are documented as such.
//!
//! The order-preserving byte encoding of this order lives in the companion
//! `lodestone-db-index` crate.

pub mod bounds;
pub mod bytes;
pub mod canonical;
pub mod compare;
pub mod error;
pub mod normalize;
pub mod resource_path;
pub mod value;

// Re-export main types
pub use bounds::{lower_bound, upper_bound};
pub use bytes::{compare_bytes, compare_utf8};
pub use canonical::{canonical_hash, canonical_id};
pub use compare::{compare_values, values_equal};
pub use error::{Error, Result};
pub use normalize::{
    normalize_byte_string, normalize_number, normalize_timestamp, NormalizedTimestamp,
};
pub use resource_path::{compare_resource_names, document_path_segments};
pub use value::{
    ArrayValue, BytesValue, GeoPoint, MapValue, NullValue, TimestampValue, TypeOrder, Value,
    WireNumber, MAX_SAFE_INTEGER, MAX_VALUE_SENTINEL, MIN_SAFE_INTEGER, RESERVED_TYPE_KEY,
    VECTOR_TYPE_SENTINEL, VECTOR_VALUES_KEY,
};

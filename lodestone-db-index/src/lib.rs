//! # Lodestone DB Index
//!
//! Order-preserving index key encoding for the Lodestone client. Given a
//! value from `lodestone-db-core` and a direction, this crate produces a
//! byte sequence whose lexicographic order equals the value comparator's
//! order, bit-compatible with the keys the server computes, so locally
//! encoded bounds line up against server-built indexes.
//!
//! ```
//! use lodestone_db_core::Value;
//! use lodestone_db_index::{encode_index_value, Direction};
//!
//! let smaller = encode_index_value(&Value::from(1i64), Direction::Ascending);
//! let larger = encode_index_value(&Value::from(2i64), Direction::Ascending);
//! assert!(smaller < larger);
//! ```

pub mod encoder;
pub mod ordered_code;
pub mod writer;

pub use encoder::{Direction, DirectionalEncoder, DirectionalIndexByteEncoder, IndexByteEncoder};
pub use ordered_code::OrderedCodeWriter;
pub use writer::{encode_index_value, IndexValueWriter};

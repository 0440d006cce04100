//! Canonical ids and canonical hashes
//!
//! [`canonical_id`] renders a value as a deterministic, human-readable
//! identifier (used for target serialization and as a cache/dedup key);
//! map keys are sorted so that wire field order never changes the id.
//!
//! [`canonical_hash`] is the 64-bit companion for statistics and dedup
//! structures. Wire-representation variants of one logical value hash
//! identically (both timestamp forms, both blob forms, `-0.0` and `0.0`,
//! every NaN bit pattern), while values distinguishable under strict
//! equality, such as `Integer(1)` vs `Double(1.0)`, hash under distinct
//! type tags.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use xxhash_rust::xxh64::{xxh64, Xxh64};

use crate::normalize::{normalize_byte_string, normalize_timestamp};
use crate::value::{MapValue, Value};

/// Canonical NaN bit pattern (quiet NaN) for deterministic hashing.
const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

/// Generate the canonical id for a value.
pub fn canonical_id(value: &Value) -> String {
    match value {
        Value::Null(_) => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Double(d) => format_double(*d),
        Value::Timestamp(ts) => {
            let normalized = normalize_timestamp(ts);
            format!("time({},{})", normalized.seconds, normalized.nanos)
        }
        Value::String(s) => s.clone(),
        Value::Bytes(b) => STANDARD.encode(normalize_byte_string(b)),
        Value::Reference(name) => name.clone(),
        Value::GeoPoint(g) => format!(
            "geo({},{})",
            format_double(g.latitude),
            format_double(g.longitude)
        ),
        Value::Array(arr) => {
            let elements: Vec<String> = arr.values.iter().map(canonical_id).collect();
            format!("[{}]", elements.join(","))
        }
        Value::Map(map) => canonify_map(map),
    }
}

fn canonify_map(map: &MapValue) -> String {
    // Sort keys so identical maps generate matching ids regardless of wire
    // field order.
    let mut entries: Vec<String> = Vec::with_capacity(map.len());
    for key in map.sorted_keys() {
        if let Some(value) = map.get(key) {
            entries.push(format!("{key}:{}", canonical_id(value)));
        }
    }
    format!("{{{}}}", entries.join(","))
}

/// Double rendering for canonical ids: integral doubles print without a
/// fraction, both zeros print as `0`, and the non-finite values use their
/// wire spellings.
fn format_double(d: f64) -> String {
    if d.is_nan() {
        "NaN".to_string()
    } else if d == f64::INFINITY {
        "Infinity".to_string()
    } else if d == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if d == 0.0 {
        "0".to_string()
    } else {
        d.to_string()
    }
}

/// Canonical 64-bit hash of a value (xxHash64).
///
/// Consistent with [`crate::compare::values_equal`]: strictly-equal values
/// always hash alike, and the type tags keep colliding payloads apart
/// (string `"true"` vs boolean `true`, integer 1 vs double 1.0).
pub fn canonical_hash(value: &Value) -> u64 {
    match value {
        Value::Null(_) => xxh64(b"\x00null", 0),
        Value::Boolean(b) => {
            if *b {
                xxh64(b"\x01true", 0)
            } else {
                xxh64(b"\x01false", 0)
            }
        }
        Value::Integer(n) => {
            let mut buf = [0u8; 9];
            buf[0] = 0x02; // type tag
            buf[1..].copy_from_slice(&n.to_le_bytes());
            xxh64(&buf, 0)
        }
        Value::Double(d) => {
            let mut buf = [0u8; 9];
            buf[0] = 0x03; // type tag
            buf[1..].copy_from_slice(&canonical_double_bits(*d).to_le_bytes());
            xxh64(&buf, 0)
        }
        Value::Timestamp(ts) => {
            // Hash the normalized instant so both wire forms agree.
            let normalized = normalize_timestamp(ts);
            let mut hasher = Xxh64::new(0);
            hasher.update(&[0x04]);
            hasher.update(&normalized.seconds.to_le_bytes());
            hasher.update(&normalized.nanos.to_le_bytes());
            hasher.digest()
        }
        Value::String(s) => {
            // tag + length + bytes for unambiguous encoding
            let mut hasher = Xxh64::new(0);
            hasher.update(&[0x05]);
            hasher.update(&(s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
            hasher.digest()
        }
        Value::Bytes(b) => {
            let buf = normalize_byte_string(b);
            let mut hasher = Xxh64::new(0);
            hasher.update(&[0x06]);
            hasher.update(&(buf.len() as u64).to_le_bytes());
            hasher.update(&buf);
            hasher.digest()
        }
        Value::Reference(name) => {
            let mut hasher = Xxh64::new(0);
            hasher.update(&[0x07]);
            hasher.update(&(name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
            hasher.digest()
        }
        Value::GeoPoint(g) => {
            let mut hasher = Xxh64::new(0);
            hasher.update(&[0x08]);
            hasher.update(&canonical_double_bits(g.latitude).to_le_bytes());
            hasher.update(&canonical_double_bits(g.longitude).to_le_bytes());
            hasher.digest()
        }
        Value::Array(arr) => {
            let mut hasher = Xxh64::new(0);
            hasher.update(&[0x09]);
            hasher.update(&(arr.values.len() as u64).to_le_bytes());
            for element in &arr.values {
                hasher.update(&canonical_hash(element).to_le_bytes());
            }
            hasher.digest()
        }
        Value::Map(map) => {
            // Sorted keys: hash is insertion-order independent, like the id.
            let mut hasher = Xxh64::new(0);
            hasher.update(&[0x0A]);
            hasher.update(&(map.len() as u64).to_le_bytes());
            for key in map.sorted_keys() {
                hasher.update(&(key.len() as u64).to_le_bytes());
                hasher.update(key.as_bytes());
                if let Some(value) = map.get(key) {
                    hasher.update(&canonical_hash(value).to_le_bytes());
                }
            }
            hasher.digest()
        }
    }
}

fn canonical_double_bits(d: f64) -> u64 {
    if d.is_nan() {
        CANONICAL_NAN_BITS // one pattern for ALL NaN values
    } else if d == 0.0 {
        0u64 // -0.0 and +0.0 hash alike
    } else {
        d.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{BytesValue, GeoPoint, TimestampValue, WireNumber};

    #[test]
    fn test_canonical_ids() {
        assert_eq!(canonical_id(&Value::null()), "null");
        assert_eq!(canonical_id(&Value::Boolean(true)), "true");
        assert_eq!(canonical_id(&Value::Boolean(false)), "false");
        assert_eq!(canonical_id(&Value::Integer(1)), "1");
        assert_eq!(canonical_id(&Value::Double(1.1)), "1.1");
        assert_eq!(canonical_id(&Value::Double(1.0)), "1");
        assert_eq!(
            canonical_id(&Value::Timestamp(TimestampValue::Pair {
                seconds: Some(WireNumber::Number(30.0)),
                nanos: Some(WireNumber::Number(60.0)),
            })),
            "time(30,60)"
        );
        assert_eq!(canonical_id(&Value::from("a")), "a");
        assert_eq!(
            canonical_id(&Value::Bytes(BytesValue::Raw(vec![1, 2, 3]))),
            "AQID"
        );
        assert_eq!(
            canonical_id(&Value::Reference(
                "projects/p1/databases/d1/documents/c1/doc1".to_string()
            )),
            "projects/p1/databases/d1/documents/c1/doc1"
        );
        assert_eq!(
            canonical_id(&Value::GeoPoint(GeoPoint {
                latitude: 30.0,
                longitude: 60.0
            })),
            "geo(30,60)"
        );
        assert_eq!(
            canonical_id(&Value::array([
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3)
            ])),
            "[1,2,3]"
        );
        assert_eq!(
            canonical_id(&Value::map([
                ("a", Value::Integer(1)),
                ("b", Value::Integer(2)),
                ("c", Value::from("3")),
            ])),
            "{a:1,b:2,c:3}"
        );
        assert_eq!(
            canonical_id(&Value::map([(
                "a",
                Value::array([
                    Value::from("b"),
                    Value::map([(
                        "c",
                        Value::GeoPoint(GeoPoint {
                            latitude: 30.0,
                            longitude: 60.0
                        })
                    )])
                ])
            )])),
            "{a:[b,{c:geo(30,60)}]}"
        );
    }

    #[test]
    fn test_canonical_ids_ignore_field_order() {
        let forward = Value::map([
            ("a", Value::Integer(1)),
            ("b", Value::Integer(2)),
            ("c", Value::from("3")),
        ]);
        let reverse = Value::map([
            ("c", Value::from("3")),
            ("b", Value::Integer(2)),
            ("a", Value::Integer(1)),
        ]);
        assert_eq!(canonical_id(&forward), canonical_id(&reverse));
    }

    #[test]
    fn test_canonical_hash_is_representation_independent() {
        let iso = Value::Timestamp(TimestampValue::Iso("2007-04-05T14:30:01.100Z".to_string()));
        let pair = Value::Timestamp(TimestampValue::Pair {
            seconds: Some(WireNumber::Number(1_175_783_401.0)),
            nanos: Some(WireNumber::Number(100_000_000.0)),
        });
        assert_eq!(canonical_hash(&iso), canonical_hash(&pair));

        let base64 = Value::Bytes(BytesValue::Base64("AAEC".to_string()));
        let raw = Value::Bytes(BytesValue::Raw(vec![0, 1, 2]));
        assert_eq!(canonical_hash(&base64), canonical_hash(&raw));

        assert_eq!(
            canonical_hash(&Value::Double(-0.0)),
            canonical_hash(&Value::Double(0.0))
        );
    }

    #[test]
    fn test_canonical_hash_type_tags_separate_lookalikes() {
        assert_ne!(
            canonical_hash(&Value::from("true")),
            canonical_hash(&Value::Boolean(true))
        );
        assert_ne!(
            canonical_hash(&Value::Integer(1)),
            canonical_hash(&Value::Double(1.0))
        );
    }

    #[test]
    fn test_canonical_hash_map_order_independent() {
        let forward = Value::map([("a", Value::Integer(1)), ("b", Value::Integer(2))]);
        let reverse = Value::map([("b", Value::Integer(2)), ("a", Value::Integer(1))]);
        assert_eq!(canonical_hash(&forward), canonical_hash(&reverse));
    }
}

//! Total order and strict equality over values
//!
//! [`compare_values`] implements a strict total order covering every value
//! class, with the fixed type precedence of [`TypeOrder`]. Within the
//! number class, Integer and Double compare by mathematical value (an i64 is
//! routed through f64, exact within the ±2^53 safe-integer range, like the
//! wire peers) and NaN forms its own minimal order class below `-Infinity`.
//!
//! [`values_equal`] is deliberately *stricter* than order-equality:
//! `Integer(1)` and `Double(1.0)` are order-equal but not equal, and NaN is
//! unequal to everything including itself. Because the two relations
//! disagree on those points, `Value` implements neither `PartialEq` nor
//! `Ord`; callers choose the relation explicitly.

use std::cmp::Ordering;

use crate::bytes::{compare_bytes, compare_utf8};
use crate::normalize::{normalize_byte_string, normalize_timestamp};
use crate::resource_path::compare_resource_names;
use crate::value::{GeoPoint, MapValue, TypeOrder, Value, VECTOR_VALUES_KEY};

/// Total order over values.
///
/// Classes order per [`TypeOrder`]; within a class:
///
/// - booleans: `false < true`
/// - numbers: `NaN < -Infinity < finite ascending < +Infinity`
/// - timestamps: normalized `(seconds, nanos)`
/// - strings: UTF-8 byte order
/// - bytes: byte order on normalized buffers
/// - references: resource-name segments
/// - geo points: latitude, then longitude
/// - arrays: element-wise, shorter-is-less
/// - vectors: length first, then element-wise
/// - maps: sorted keys pairwise (smaller key first, shorter map first on a
///   shared key prefix), recursing on values
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    let left_type = left.type_order();
    let right_type = right.type_order();
    if left_type != right_type {
        return left_type.cmp(&right_type);
    }

    match (left, right) {
        (Value::Null(_), Value::Null(_)) => Ordering::Equal,
        (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
        (a, b) if a.is_number() && b.is_number() => {
            numeric_compare(number_as_double(a), number_as_double(b))
        }
        (Value::Timestamp(a), Value::Timestamp(b)) => {
            normalize_timestamp(a).cmp(&normalize_timestamp(b))
        }
        (Value::String(a), Value::String(b)) => compare_utf8(a, b),
        (Value::Bytes(a), Value::Bytes(b)) => {
            compare_bytes(&normalize_byte_string(a), &normalize_byte_string(b))
        }
        (Value::Reference(a), Value::Reference(b)) => compare_resource_names(a, b),
        (Value::GeoPoint(a), Value::GeoPoint(b)) => compare_geo_points(a, b),
        (Value::Array(a), Value::Array(b)) => compare_arrays(&a.values, &b.values),
        (Value::Map(a), Value::Map(b)) => match left_type {
            TypeOrder::Max => Ordering::Equal,
            TypeOrder::Vector => compare_vectors(a, b),
            _ => compare_maps(a, b),
        },
        _ => panic!("mismatched value variants in comparison: {left:?} vs {right:?}"),
    }
}

/// Strict equality over values.
///
/// Requires the same variant tag (Integer ≠ Double even when numerically
/// equal) and the same normalized payload; recurses structurally for
/// arrays and maps. `-0.0` and `0.0` are equal; NaN is unequal to itself.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    if left.type_order() != right.type_order() {
        return false;
    }

    match (left, right) {
        (Value::Null(_), Value::Null(_)) => true,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Double(a), Value::Double(b)) => a == b,
        (Value::Timestamp(a), Value::Timestamp(b)) => {
            normalize_timestamp(a) == normalize_timestamp(b)
        }
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bytes(a), Value::Bytes(b)) => {
            normalize_byte_string(a) == normalize_byte_string(b)
        }
        (Value::Reference(a), Value::Reference(b)) => a == b,
        (Value::GeoPoint(a), Value::GeoPoint(b)) => {
            a.latitude == b.latitude && a.longitude == b.longitude
        }
        (Value::Array(a), Value::Array(b)) => {
            a.values.len() == b.values.len()
                && a.values
                    .iter()
                    .zip(&b.values)
                    .all(|(l, r)| values_equal(l, r))
        }
        (Value::Map(a), Value::Map(b)) => map_equals(a, b),
        // Same type order but different variants: Integer vs Double.
        _ => false,
    }
}

/// The numeric payload of an Integer or Double value.
pub(crate) fn number_as_double(value: &Value) -> f64 {
    match value {
        Value::Integer(i) => *i as f64,
        Value::Double(d) => *d,
        other => panic!("not a number value: {other:?}"),
    }
}

/// f64 comparison with NaN as its own minimal class.
///
/// `-0.0` and `0.0` compare equal.
fn numeric_compare(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn compare_geo_points(a: &GeoPoint, b: &GeoPoint) -> Ordering {
    numeric_compare(a.latitude, b.latitude)
        .then_with(|| numeric_compare(a.longitude, b.longitude))
}

fn compare_arrays(left: &[Value], right: &[Value]) -> Ordering {
    for (l, r) in left.iter().zip(right) {
        let ord = compare_values(l, r);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

/// Vectors sort by declared length first, then element-wise.
fn compare_vectors(left: &MapValue, right: &MapValue) -> Ordering {
    let left_components = vector_array(left);
    let right_components = vector_array(right);
    left_components
        .len()
        .cmp(&right_components.len())
        .then_with(|| compare_arrays(left_components, right_components))
}

fn vector_array(map: &MapValue) -> &[Value] {
    match map.get(VECTOR_VALUES_KEY) {
        Some(Value::Array(arr)) => &arr.values,
        _ => &[],
    }
}

fn compare_maps(left: &MapValue, right: &MapValue) -> Ordering {
    // Wire order may differ between otherwise-identical maps (local edits
    // reorder fields), so both field lists are sorted before the walk.
    let left_fields = sorted_fields(left);
    let right_fields = sorted_fields(right);

    for ((lk, lv), (rk, rv)) in left_fields.iter().zip(&right_fields) {
        let key_ord = compare_utf8(lk, rk);
        if key_ord != Ordering::Equal {
            return key_ord;
        }
        let value_ord = compare_values(lv, rv);
        if value_ord != Ordering::Equal {
            return value_ord;
        }
    }

    left_fields.len().cmp(&right_fields.len())
}

fn sorted_fields(map: &MapValue) -> Vec<(&str, &Value)> {
    let mut fields: Vec<(&str, &Value)> = map
        .fields
        .iter()
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    fields.sort_unstable_by(|a, b| compare_utf8(a.0, b.0));
    fields
}

fn map_equals(left: &MapValue, right: &MapValue) -> bool {
    left.len() == right.len()
        && left
            .fields
            .iter()
            .all(|(k, v)| right.get(k).map_or(false, |w| values_equal(v, w)))
}

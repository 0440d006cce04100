//! Per-type synthetic range bounds
//!
//! Half-open range scans over one value type need sentinel values that
//! bracket the whole type: `[lower_bound(t), upper_bound(t))`. The lower
//! bound is inclusive (it compares less than or equal to every value of the
//! type and greater than every value of preceding types); the upper bound
//! is the following type's lower bound, so it compares strictly greater
//! than every value of the type. The ladder ends at the max sentinel, which
//! sorts after everything including plain maps.

use crate::value::{
    BytesValue, GeoPoint, MapValue, TimestampValue, TypeOrder, Value, WireNumber,
    MIN_SAFE_INTEGER,
};

/// Inclusive lower bound for a value type.
pub fn lower_bound(type_order: TypeOrder) -> Value {
    match type_order {
        TypeOrder::Null => Value::min_value(),
        TypeOrder::Boolean => Value::Boolean(false),
        // NaN is the minimal number class member.
        TypeOrder::Number => Value::Double(f64::NAN),
        TypeOrder::Timestamp => min_timestamp(),
        TypeOrder::String => Value::String(String::new()),
        TypeOrder::Bytes => Value::Bytes(BytesValue::Raw(Vec::new())),
        TypeOrder::Reference => min_reference(),
        TypeOrder::GeoPoint => min_geo_point(),
        TypeOrder::Array => Value::Array(Default::default()),
        // Zero-length vector sentinel: sorts just below any concrete vector.
        TypeOrder::Vector => Value::vector([]),
        TypeOrder::Map => Value::Map(MapValue::default()),
        TypeOrder::Max => Value::max_value(),
    }
}

/// Exclusive upper bound for a value type (the next type's lower bound).
pub fn upper_bound(type_order: TypeOrder) -> Value {
    match type_order {
        TypeOrder::Null => Value::Boolean(false),
        TypeOrder::Boolean => Value::Double(f64::NAN),
        TypeOrder::Number => min_timestamp(),
        TypeOrder::Timestamp => Value::String(String::new()),
        TypeOrder::String => Value::Bytes(BytesValue::Raw(Vec::new())),
        TypeOrder::Bytes => min_reference(),
        TypeOrder::Reference => min_geo_point(),
        TypeOrder::GeoPoint => Value::Array(Default::default()),
        TypeOrder::Array => Value::vector([]),
        TypeOrder::Vector => Value::Map(MapValue::default()),
        TypeOrder::Map | TypeOrder::Max => Value::max_value(),
    }
}

fn min_timestamp() -> Value {
    Value::Timestamp(TimestampValue::Pair {
        seconds: Some(WireNumber::Number(MIN_SAFE_INTEGER as f64)),
        nanos: None,
    })
}

fn min_reference() -> Value {
    // Empty project and database ids order before any real resource name.
    Value::Reference("projects//databases//documents".to_string())
}

fn min_geo_point() -> Value {
    Value::GeoPoint(GeoPoint {
        latitude: -90.0,
        longitude: -180.0,
    })
}

//! Shared helpers for index encoding tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::cmp::Ordering;

use lodestone_db_core::{BytesValue, GeoPoint, TimestampValue, Value, WireNumber};
use lodestone_db_index::{encode_index_value, Direction};

pub fn compare_encoded(left: &Value, right: &Value, direction: Direction) -> Ordering {
    encode_index_value(left, direction).cmp(&encode_index_value(right, direction))
}

pub fn blob(bytes: &[u8]) -> Value {
    Value::Bytes(BytesValue::Raw(bytes.to_vec()))
}

pub fn ts_iso(iso: &str) -> Value {
    Value::Timestamp(TimestampValue::Iso(iso.to_string()))
}

pub fn ts_pair(seconds: f64, nanos: Option<f64>) -> Value {
    Value::Timestamp(TimestampValue::Pair {
        seconds: Some(WireNumber::Number(seconds)),
        nanos: nanos.map(WireNumber::Number),
    })
}

pub fn ts_pair_text(seconds: &str, nanos: Option<f64>) -> Value {
    Value::Timestamp(TimestampValue::Pair {
        seconds: Some(WireNumber::Text(seconds.to_string())),
        nanos: nanos.map(WireNumber::Number),
    })
}

pub fn reference(project: &str, database: &str, path: &str) -> Value {
    Value::Reference(format!(
        "projects/{project}/databases/{database}/documents/{path}"
    ))
}

pub fn geo(latitude: f64, longitude: f64) -> Value {
    Value::GeoPoint(GeoPoint {
        latitude,
        longitude,
    })
}

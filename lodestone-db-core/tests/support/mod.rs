//! Shared helpers for value ordering and equality tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use lodestone_db_core::{
    compare_values, values_equal, BytesValue, GeoPoint, TimestampValue, Value, WireNumber,
};

pub fn blob(bytes: &[u8]) -> Value {
    Value::Bytes(BytesValue::Raw(bytes.to_vec()))
}

pub fn base64_blob(encoded: &str) -> Value {
    Value::Bytes(BytesValue::Base64(encoded.to_string()))
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

/// Assert that the groups are strictly ordered: every member compares equal
/// to every member of its own group and strictly less than every member of
/// every later group, with the reversed comparison agreeing. Covers
/// reflexivity and antisymmetry pairwise; transitivity follows from
/// consistency with the group indices.
pub fn expect_correct_comparison_groups(groups: &[Vec<Value>]) {
    for (i, left_group) in groups.iter().enumerate() {
        for (j, right_group) in groups.iter().enumerate() {
            let expected = i.cmp(&j);
            for left in left_group {
                for right in right_group {
                    assert_eq!(
                        compare_values(left, right),
                        expected,
                        "compare({left}, {right}) in groups {i}/{j}"
                    );
                    assert_eq!(
                        compare_values(right, left),
                        expected.reverse(),
                        "compare({right}, {left}) in groups {j}/{i}"
                    );
                }
            }
        }
    }
}

/// Assert that each set's members are all equal to each other and unequal
/// to every member of every other set.
pub fn expect_equality_sets(sets: &[Vec<Value>]) {
    for (i, left_set) in sets.iter().enumerate() {
        for (j, right_set) in sets.iter().enumerate() {
            for left in left_set {
                for right in right_set {
                    assert_eq!(
                        values_equal(left, right),
                        i == j,
                        "values_equal({left}, {right}) in sets {i}/{j}"
                    );
                }
            }
        }
    }
}

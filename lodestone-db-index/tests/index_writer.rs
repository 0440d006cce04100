//! Index value writer tests: wire-format normalization, sentinel map
//! shapes, truncation ordering, and the encoder's order-sensitivity rules.

mod support;

use std::cmp::Ordering;

use lodestone_db_core::{compare_values, Value};
use lodestone_db_index::{encode_index_value, Direction};
use support::{blob, compare_encoded, reference, ts_iso, ts_pair, ts_pair_text};

#[test]
fn timestamp_wire_formats_encode_identically() {
    let value1 = ts_iso("2016-01-02T10:20:50.850Z");
    let value2 = ts_iso("2016-01-02T10:20:50.850000Z");
    let value3 = ts_iso("2016-01-02T10:20:50.850000000Z");
    let value4 = ts_pair(1_451_730_050.0, Some(850_000_000.0));
    // proto-JSON int64 seconds arrive as a string
    let value5 = ts_pair_text("1451730050", Some(850_000_000.0));

    for direction in [Direction::Ascending, Direction::Descending] {
        for other in [&value2, &value3, &value4, &value5] {
            assert_eq!(
                compare_encoded(&value1, other, direction),
                Ordering::Equal,
                "{value1} vs {other} ({direction:?})"
            );
        }
    }
}

#[test]
fn timestamps_with_zero_nanos_encode_identically() {
    let value1 = ts_iso("2016-01-02T10:20:50Z");
    let value2 = ts_iso("2016-01-02T10:20:50.000000000Z");
    let value3 = ts_pair(1_451_730_050.0, Some(0.0));
    let value4 = ts_pair(1_451_730_050.0, None);

    for direction in [Direction::Ascending, Direction::Descending] {
        for other in [&value2, &value3, &value4] {
            assert_eq!(compare_encoded(&value1, other, direction), Ordering::Equal);
        }
    }
}

#[test]
fn timestamps_compare_across_formats() {
    let value1 = ts_iso("2016-01-02T10:20:50Z");
    let value2 = ts_iso("2016-01-02T10:20:50.000001Z");
    let value3 = ts_pair(1_451_730_050.0, Some(999_999_999.0));
    let value4 = ts_pair(1_451_730_050.0, Some(1.0));

    let ascending = [
        (&value1, &value2, Ordering::Less),
        (&value1, &value3, Ordering::Less),
        (&value1, &value4, Ordering::Less),
        (&value2, &value3, Ordering::Less),
        (&value2, &value4, Ordering::Greater),
        (&value3, &value4, Ordering::Greater),
    ];
    for (left, right, expected) in ascending {
        assert_eq!(
            compare_encoded(left, right, Direction::Ascending),
            expected,
            "{left} vs {right} ascending"
        );
        assert_eq!(
            compare_encoded(left, right, Direction::Descending),
            expected.reverse(),
            "{left} vs {right} descending"
        );
    }
}

#[test]
fn vector_sorts_as_its_own_type_with_unique_rules() {
    let vector1 = Value::vector([100.0]);
    let vector2 = Value::vector([1.0, 2.0]);
    let vector3 = Value::vector([1.0, 3.0]);
    let map1 = Value::map([(
        "value",
        Value::array([Value::Double(1.0), Value::Double(2.0)]),
    )]);
    let array1 = Value::array([Value::Double(1.0), Value::Double(2.0)]);

    for (left, right) in [
        // Array sorts before vector
        (&array1, &vector1),
        // Vector sorts before map
        (&vector3, &map1),
        // Shorter vectors sort before longer vectors
        (&vector1, &vector2),
        // Vectors of the same length sort by component value
        (&vector2, &vector3),
    ] {
        assert_eq!(
            compare_encoded(left, right, Direction::Ascending),
            Ordering::Less,
            "{left} vs {right} ascending"
        );
        assert_eq!(
            compare_encoded(left, right, Direction::Descending),
            Ordering::Greater,
            "{left} vs {right} descending"
        );
    }
}

#[test]
fn max_value_encodes_above_everything() {
    let max = Value::max_value();
    let contenders = [
        Value::map([("zzzz", Value::from("zzzz"))]),
        Value::vector([f64::MAX]),
        Value::from("\u{10FFFF}"),
        Value::Double(f64::INFINITY),
    ];
    for value in &contenders {
        assert_eq!(
            compare_encoded(value, &max, Direction::Ascending),
            Ordering::Less
        );
        assert_eq!(
            compare_encoded(value, &max, Direction::Descending),
            Ordering::Greater
        );
    }
    assert_eq!(
        compare_encoded(&max, &Value::max_value(), Direction::Ascending),
        Ordering::Equal
    );
}

#[test]
fn map_encoding_is_wire_order_sensitive() {
    // The comparator sorts keys; the encoder deliberately does not, since
    // the server encoding is order-sensitive at this layer.
    let ab = Value::map([("a", Value::Integer(1)), ("b", Value::Integer(2))]);
    let ba = Value::map([("b", Value::Integer(2)), ("a", Value::Integer(1))]);

    assert_eq!(compare_values(&ab, &ba), Ordering::Equal);
    assert_ne!(
        encode_index_value(&ab, Direction::Ascending),
        encode_index_value(&ba, Direction::Ascending)
    );
}

#[test]
fn truncated_prefix_always_sorts_before_complete_value() {
    // The truncation marker is below every type label, so a value that
    // stops early orders before the value that keeps going.
    let pairs = [
        (Value::from("ab"), Value::from("abc")),
        (blob(&[1, 2]), blob(&[1, 2, 3])),
        (
            Value::array([Value::Integer(1)]),
            Value::array([Value::Integer(1), Value::Integer(2)]),
        ),
        (
            Value::map([("a", Value::Integer(1))]),
            Value::map([("a", Value::Integer(1)), ("b", Value::Integer(2))]),
        ),
        (
            reference("p1", "d1", "c1/doc1"),
            reference("p1", "d1", "c1/doc1/c2/doc2"),
        ),
    ];
    for (prefix, complete) in &pairs {
        assert_eq!(
            compare_encoded(prefix, complete, Direction::Ascending),
            Ordering::Less,
            "{prefix} vs {complete}"
        );
        assert_eq!(
            compare_encoded(prefix, complete, Direction::Descending),
            Ordering::Greater,
            "{prefix} vs {complete} descending"
        );
    }
}

#[test]
fn negative_zero_collapses_to_positive_zero() {
    assert_eq!(
        encode_index_value(&Value::Double(-0.0), Direction::Ascending),
        encode_index_value(&Value::Double(0.0), Direction::Ascending)
    );
    // Integer zero routes through the same number payload.
    assert_eq!(
        encode_index_value(&Value::Integer(0), Direction::Ascending),
        encode_index_value(&Value::Double(-0.0), Direction::Ascending)
    );
}

#[test]
fn nan_gets_its_own_label_below_all_numbers() {
    let nan = Value::Double(f64::NAN);
    assert_eq!(
        compare_encoded(&nan, &Value::Double(f64::NEG_INFINITY), Direction::Ascending),
        Ordering::Less
    );
    assert_eq!(
        compare_encoded(&Value::Boolean(true), &nan, Direction::Ascending),
        Ordering::Less
    );
    // Every NaN bit pattern encodes identically.
    let other_nan = Value::Double(f64::from_bits(0x7ff8_0000_0000_0001));
    assert_eq!(
        encode_index_value(&nan, Direction::Ascending),
        encode_index_value(&other_nan, Direction::Ascending)
    );
}

#[test]
fn descending_encoding_is_bytewise_complement() {
    let value = Value::map([
        ("name", Value::from("lodestone")),
        ("tags", Value::array([Value::from("a"), Value::Integer(2)])),
    ]);
    let ascending = encode_index_value(&value, Direction::Ascending);
    let descending = encode_index_value(&value, Direction::Descending);
    let complemented: Vec<u8> = ascending.iter().map(|b| !b).collect();
    assert_eq!(descending, complemented);
}

#[test]
fn wire_json_values_encode_like_in_memory_values() {
    let cases = [
        (r#"{"integerValue":"1"}"#, Value::Integer(1)),
        (r#"{"doubleValue":1.5}"#, Value::Double(1.5)),
        (
            r#"{"timestampValue":"2016-01-02T10:20:50.850Z"}"#,
            ts_pair(1_451_730_050.0, Some(850_000_000.0)),
        ),
        (r#"{"bytesValue":"AAEC"}"#, blob(&[0, 1, 2])),
        (
            r#"{"mapValue":{"fields":{"__type__":{"stringValue":"__vector__"},"value":{"arrayValue":{"values":[{"doubleValue":1},{"doubleValue":2}]}}}}}"#,
            Value::vector([1.0, 2.0]),
        ),
    ];
    for (json, in_memory) in &cases {
        let from_wire = Value::from_wire_json(json).unwrap();
        assert_eq!(
            encode_index_value(&from_wire, Direction::Ascending),
            encode_index_value(in_memory, Direction::Ascending),
            "{json}"
        );
    }

    // Pair-form timestamps deserialize from structured JSON too.
    let wire = serde_json::json!({
        "timestampValue": { "seconds": "1451730050", "nanos": 850_000_000 }
    });
    let from_wire: Value = serde_json::from_value(wire).unwrap();
    assert_eq!(
        encode_index_value(&from_wire, Direction::Ascending),
        encode_index_value(&ts_iso("2016-01-02T10:20:50.850Z"), Direction::Ascending)
    );
}

//! Index value writer
//!
//! Single-pass recursive writer turning a [`Value`] into a type-tagged,
//! order-preserving byte sequence. The layout is a wire contract with the
//! server's index key builder; the label table, the truncation marker, and
//! the per-type payload shapes below are not implementation details.
//!
//! ## Layout
//!
//! ```text
//! value      := type-label payload? truncation-marker?
//! type-label := number            (one of the INDEX_TYPE_* constants)
//! boolean    := label 1|0
//! number     := label double      (-0.0 collapsed to 0.0; NaN has its own
//!                                  label and no payload)
//! timestamp  := label seconds-as-string nanos-as-number
//! string     := label utf8 TRUNC
//! blob       := label bytes TRUNC
//! reference  := label (SEGMENT-label segment-string)* TRUNC
//! geopoint   := label latitude longitude
//! array      := label value* TRUNC
//! vector     := label length-as-labeled-number labeled-key value
//! map        := label (labeled-key value)* TRUNC    (fields in wire order)
//! max        := max-label
//! ```
//!
//! A truncated prefix of a value must always sort before the complete
//! value, so the truncation marker (2) is smaller than every type label.
//! This holds even though this implementation never truncates. After a
//! complete top-level value the sink writes one infinity marker, splitting
//! successive index values packed into one key.

use lodestone_db_core::normalize::{normalize_byte_string, normalize_timestamp};
use lodestone_db_core::resource_path::document_path_segments;
use lodestone_db_core::value::{MapValue, Value, MAX_SAFE_INTEGER, VECTOR_VALUES_KEY};

use crate::encoder::{Direction, DirectionalIndexByteEncoder, IndexByteEncoder};

const INDEX_TYPE_NULL: f64 = 5.0;
const INDEX_TYPE_BOOLEAN: f64 = 10.0;
const INDEX_TYPE_NAN: f64 = 13.0;
const INDEX_TYPE_NUMBER: f64 = 15.0;
const INDEX_TYPE_TIMESTAMP: f64 = 20.0;
const INDEX_TYPE_STRING: f64 = 25.0;
const INDEX_TYPE_BLOB: f64 = 30.0;
const INDEX_TYPE_REFERENCE: f64 = 37.0;
const INDEX_TYPE_GEOPOINT: f64 = 45.0;
const INDEX_TYPE_ARRAY: f64 = 50.0;
const INDEX_TYPE_VECTOR: f64 = 53.0;
const INDEX_TYPE_MAP: f64 = 55.0;
const INDEX_TYPE_REFERENCE_SEGMENT: f64 = 60.0;
const INDEX_TYPE_MAX_VALUE: f64 = MAX_SAFE_INTEGER as f64;

// Terminates every truncatable value; must be smaller than all type labels
// so a truncated prefix sorts before the complete value.
const NOT_TRUNCATED: f64 = 2.0;

/// Stateless index value writer.
///
/// Holds no fields, so the shared [`IndexValueWriter::INSTANCE`] can be
/// used from any thread; each call operates purely on its arguments.
#[derive(Debug)]
pub struct IndexValueWriter;

impl IndexValueWriter {
    /// Shared instance.
    pub const INSTANCE: IndexValueWriter = IndexValueWriter;

    /// Write one index value, followed by the infinity separator that
    /// delimits successive index values packed into one key.
    pub fn write_index_value<E: DirectionalIndexByteEncoder>(
        &self,
        value: &Value,
        encoder: &mut E,
    ) {
        self.write_index_value_aux(value, encoder);
        encoder.write_infinity();
    }

    fn write_index_value_aux<E: DirectionalIndexByteEncoder>(
        &self,
        value: &Value,
        encoder: &mut E,
    ) {
        match value {
            Value::Null(_) => {
                self.write_value_type_label(encoder, INDEX_TYPE_NULL);
            }
            Value::Boolean(b) => {
                self.write_value_type_label(encoder, INDEX_TYPE_BOOLEAN);
                encoder.write_number(if *b { 1.0 } else { 0.0 });
            }
            Value::Integer(i) => {
                self.write_value_type_label(encoder, INDEX_TYPE_NUMBER);
                encoder.write_number(*i as f64);
            }
            Value::Double(d) => {
                if d.is_nan() {
                    self.write_value_type_label(encoder, INDEX_TYPE_NAN);
                } else {
                    self.write_value_type_label(encoder, INDEX_TYPE_NUMBER);
                    // -0.0, 0 and 0.0 are all considered the same.
                    encoder.write_number(if *d == 0.0 { 0.0 } else { *d });
                }
            }
            Value::Timestamp(ts) => {
                self.write_value_type_label(encoder, INDEX_TYPE_TIMESTAMP);
                let normalized = normalize_timestamp(ts);
                // Zero or absent seconds encode as the empty string.
                if normalized.seconds == 0 {
                    encoder.write_string("");
                } else {
                    encoder.write_string(&normalized.seconds.to_string());
                }
                encoder.write_number(normalized.nanos as f64);
            }
            Value::String(s) => {
                self.write_index_string(s, encoder);
                self.write_truncation_marker(encoder);
            }
            Value::Bytes(b) => {
                self.write_value_type_label(encoder, INDEX_TYPE_BLOB);
                encoder.write_bytes(&normalize_byte_string(b));
                self.write_truncation_marker(encoder);
            }
            Value::Reference(name) => {
                self.write_index_entity_ref(name, encoder);
                self.write_truncation_marker(encoder);
            }
            Value::GeoPoint(g) => {
                self.write_value_type_label(encoder, INDEX_TYPE_GEOPOINT);
                encoder.write_number(g.latitude);
                encoder.write_number(g.longitude);
            }
            Value::Array(arr) => {
                self.write_index_array(&arr.values, encoder);
                self.write_truncation_marker(encoder);
            }
            Value::Map(map) => {
                if value.is_max_value() {
                    self.write_value_type_label(encoder, INDEX_TYPE_MAX_VALUE);
                } else if value.is_vector_value() {
                    self.write_index_vector(map, encoder);
                } else {
                    self.write_index_map(map, encoder);
                    self.write_truncation_marker(encoder);
                }
            }
        }
    }

    fn write_index_string<E: DirectionalIndexByteEncoder>(&self, value: &str, encoder: &mut E) {
        self.write_value_type_label(encoder, INDEX_TYPE_STRING);
        self.write_unlabeled_index_string(value, encoder);
    }

    fn write_unlabeled_index_string<E: DirectionalIndexByteEncoder>(
        &self,
        value: &str,
        encoder: &mut E,
    ) {
        encoder.write_string(value);
    }

    /// Map fields go out in wire order. Sorting happens only in the
    /// comparator, never here: the server encoding is order-sensitive at
    /// this layer.
    fn write_index_map<E: DirectionalIndexByteEncoder>(&self, map: &MapValue, encoder: &mut E) {
        self.write_value_type_label(encoder, INDEX_TYPE_MAP);
        for (key, value) in &map.fields {
            self.write_index_string(key, encoder);
            self.write_index_value_aux(value, encoder);
        }
    }

    fn write_index_vector<E: DirectionalIndexByteEncoder>(&self, map: &MapValue, encoder: &mut E) {
        self.write_value_type_label(encoder, INDEX_TYPE_VECTOR);

        // Vectors sort first by length.
        let components = match map.get(VECTOR_VALUES_KEY) {
            Some(components) => components,
            None => panic!("vector map has no {VECTOR_VALUES_KEY:?} array"),
        };
        let length = match components {
            Value::Array(arr) => arr.values.len(),
            _ => 0,
        };
        self.write_value_type_label(encoder, INDEX_TYPE_NUMBER);
        encoder.write_number(length as f64);

        // Then by position value.
        self.write_index_string(VECTOR_VALUES_KEY, encoder);
        self.write_index_value_aux(components, encoder);
    }

    fn write_index_array<E: DirectionalIndexByteEncoder>(
        &self,
        values: &[Value],
        encoder: &mut E,
    ) {
        self.write_value_type_label(encoder, INDEX_TYPE_ARRAY);
        for element in values {
            self.write_index_value_aux(element, encoder);
        }
    }

    /// References nest their document path into the byte stream segment by
    /// segment (rather than as one opaque string) so prefix relationships
    /// between paths survive the encoding.
    fn write_index_entity_ref<E: DirectionalIndexByteEncoder>(
        &self,
        name: &str,
        encoder: &mut E,
    ) {
        self.write_value_type_label(encoder, INDEX_TYPE_REFERENCE);
        for segment in document_path_segments(name) {
            self.write_value_type_label(encoder, INDEX_TYPE_REFERENCE_SEGMENT);
            self.write_unlabeled_index_string(segment, encoder);
        }
    }

    fn write_value_type_label<E: DirectionalIndexByteEncoder>(
        &self,
        encoder: &mut E,
        type_order: f64,
    ) {
        encoder.write_number(type_order);
    }

    fn write_truncation_marker<E: DirectionalIndexByteEncoder>(&self, encoder: &mut E) {
        encoder.write_number(NOT_TRUNCATED);
    }
}

/// Encode one value into its order-preserving index byte form.
///
/// One of the two entry points collaborators use (the other being
/// `lodestone_db_core::compare_values`).
pub fn encode_index_value(value: &Value, direction: Direction) -> Vec<u8> {
    let mut encoder = IndexByteEncoder::new();
    let mut sink = encoder.for_direction(direction);
    IndexValueWriter::INSTANCE.write_index_value(value, &mut sink);
    let bytes = encoder.into_bytes();
    tracing::trace!(len = bytes.len(), ?direction, "encoded index value");
    bytes
}

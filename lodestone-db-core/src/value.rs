//! Value - polymorphic document value type
//!
//! The object stored under a document field can hold various types:
//! booleans, 64-bit integers and doubles, timestamps, strings, byte blobs,
//! references to other documents, geo points, and nested arrays/maps.
//!
//! ## Wire representation
//!
//! `Value` (de)serializes as the proto-JSON wire shape: a single-key object
//! tagged with the field type, e.g. `{"integerValue": "1"}` or
//! `{"timestampValue": "2016-01-02T10:20:50.850Z"}`. Several types arrive in
//! more than one wire form (timestamps as ISO strings or seconds/nanos
//! pairs, blobs as base64 strings or raw bytes, int64 as JSON number or
//! decimal string). The enum keeps those variants as data; see
//! [`crate::normalize`] for the canonicalization used by comparison and
//! encoding.
//!
//! ## Ordering
//!
//! Values order by type class first (see [`TypeOrder`]), then within the
//! class; the full rules live in [`crate::compare`].
//!
//! ## Sentinels
//!
//! Two reserved map shapes are recognized by predicate, never by a dedicated
//! constructor, because the wire format still encodes them as maps:
//!
//! - a **vector** is a map with `__type__ = "__vector__"` and a `value`
//!   array of doubles ([`Value::is_vector_value`]);
//! - the **max value** is a map with `__type__ = "__max__"`
//!   ([`Value::is_max_value`]); it sorts after every other value.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::normalize;

/// Reserved map key carrying a type sentinel.
pub const RESERVED_TYPE_KEY: &str = "__type__";

/// `__type__` sentinel marking a map as a vector.
pub const VECTOR_TYPE_SENTINEL: &str = "__vector__";

/// Reserved map key holding a vector's component array.
pub const VECTOR_VALUES_KEY: &str = "value";

/// `__type__` sentinel marking the internal max value.
pub const MAX_VALUE_SENTINEL: &str = "__max__";

/// Largest integer exactly representable as an f64 (2^53 - 1).
///
/// Integers beyond this boundary lose precision when routed through the
/// double-based comparison and encoding paths.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Smallest integer exactly representable as an f64 (-(2^53 - 1)).
pub const MIN_SAFE_INTEGER: i64 = -9_007_199_254_740_991;

/// Polymorphic document value.
///
/// Exactly one variant is populated per value (closed union). All values are
/// immutable once translated from the wire; there is no persistent identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    /// Null marker.
    #[serde(rename = "nullValue")]
    Null(NullValue),
    /// Boolean value.
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    /// 64-bit signed integer. Wire form is a JSON number or decimal string.
    #[serde(rename = "integerValue", with = "int64_wire")]
    Integer(i64),
    /// 64-bit floating point. Wire form is a JSON number or a string
    /// (`"NaN"`, `"Infinity"`, `"-Infinity"`, or a decimal literal).
    #[serde(rename = "doubleValue", with = "double_wire")]
    Double(f64),
    /// Timestamp in one of its wire forms (not yet normalized).
    #[serde(rename = "timestampValue")]
    Timestamp(TimestampValue),
    /// UTF-8 string.
    #[serde(rename = "stringValue")]
    String(String),
    /// Byte blob in one of its wire forms (not yet normalized).
    #[serde(rename = "bytesValue")]
    Bytes(BytesValue),
    /// Reference to a document, as a full resource name
    /// `projects/{p}/databases/{d}/documents/{path...}`.
    #[serde(rename = "referenceValue")]
    Reference(String),
    /// Geographic point.
    #[serde(rename = "geoPointValue")]
    GeoPoint(GeoPoint),
    /// Ordered list of values.
    #[serde(rename = "arrayValue")]
    Array(ArrayValue),
    /// Map of string keys to values. Field order is the wire order.
    #[serde(rename = "mapValue")]
    Map(MapValue),
}

/// Wire form of the null marker.
///
/// Serializes as the proto-JSON `"NULL_VALUE"` string and deserializes from
/// any content (`null`, `"NULL_VALUE"`, ...); the payload carries no
/// information.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullValue;

impl Serialize for NullValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("NULL_VALUE")
    }
}

impl<'de> Deserialize<'de> for NullValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NullValue)
    }
}

/// Wire representation of a timestamp: either an ISO-8601 UTC string or a
/// seconds/nanos pair whose fields may each arrive as number or string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampValue {
    /// ISO-8601 UTC string, e.g. `"2016-01-02T10:20:50.850Z"`.
    Iso(String),
    /// Structured `{seconds, nanos}` pair.
    Pair {
        /// Seconds since the Unix epoch.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seconds: Option<WireNumber>,
        /// Nanosecond fraction, `0..=999_999_999`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nanos: Option<WireNumber>,
    },
}

/// A numeric wire field that may arrive as a JSON number or as a decimal
/// string (proto-JSON encodes int64 as a string).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    /// JSON number.
    Number(f64),
    /// Decimal string.
    Text(String),
}

/// Wire representation of a byte blob: base64 text or raw bytes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BytesValue {
    /// Standard base64 with padding.
    Base64(String),
    /// Raw byte buffer.
    Raw(Vec<u8>),
}

/// Geographic point. Missing wire fields default to 0.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoPoint {
    /// Latitude in degrees, `-90..=90`.
    pub latitude: f64,
    /// Longitude in degrees, `-180..=180`.
    pub longitude: f64,
}

/// Ordered list payload of [`Value::Array`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayValue {
    /// Elements in wire order.
    pub values: Vec<Value>,
}

/// Map payload of [`Value::Map`].
///
/// Fields preserve wire order: the index encoder is order-sensitive at this
/// layer, so no implicit sorting happens here. Comparison and canonical ids
/// sort keys themselves. Keys are unique (guaranteed by the wire format).
#[derive(Clone, Debug, Default)]
pub struct MapValue {
    /// `(key, value)` pairs in wire order.
    pub fields: Vec<(String, Value)>,
}

impl MapValue {
    /// Build from `(key, value)` pairs, preserving their order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            fields: pairs.into_iter().collect(),
        }
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the map has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keys in sorted order (for order-insensitive iteration).
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.fields.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }
}

// The wire shape is `{"fields": {"k": <value>, ...}}` with field order
// significant, so (de)serialization goes through a Vec, not a map type.
impl Serialize for MapValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut st = serializer.serialize_struct("MapValue", 1)?;
        st.serialize_field("fields", &WireFieldsRef(&self.fields))?;
        st.end()
    }
}

struct WireFieldsRef<'a>(&'a [(String, Value)]);

impl Serialize for WireFieldsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MapValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapValueVisitor;

        impl<'de> serde::de::Visitor<'de> for MapValueVisitor {
            type Value = MapValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map value object")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<MapValue, A::Error> {
                let mut fields = Vec::new();
                while let Some(key) = access.next_key::<String>()? {
                    if key == "fields" {
                        fields = access.next_value::<WireFields>()?.0;
                    } else {
                        access.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(MapValue { fields })
            }
        }

        deserializer.deserialize_map(MapValueVisitor)
    }
}

struct WireFields(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for WireFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WireFieldsVisitor;

        impl<'de> serde::de::Visitor<'de> for WireFieldsVisitor {
            type Value = WireFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field name to value")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<WireFields, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    pairs.push((key, value));
                }
                Ok(WireFields(pairs))
            }
        }

        deserializer.deserialize_map(WireFieldsVisitor)
    }
}

mod int64_wire {
    //! Serde helpers for `integerValue`: proto-JSON writes int64 as a
    //! decimal string but accepts JSON numbers too.

    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(v: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(v)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        struct Int64Visitor;

        impl serde::de::Visitor<'_> for Int64Visitor {
            type Value = i64;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an int64 as number or decimal string")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i64, E> {
                Ok(v)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i64, E> {
                i64::try_from(v).map_err(|_| E::custom("integer value out of i64 range"))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<i64, E> {
                Ok(v as i64)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<i64, E> {
                v.trim()
                    .parse::<i64>()
                    .map_err(|_| E::custom(format!("invalid int64 string: {v:?}")))
            }
        }

        deserializer.deserialize_any(Int64Visitor)
    }
}

mod double_wire {
    //! Serde helpers for `doubleValue`: proto-JSON allows numbers or the
    //! strings `"NaN"` / `"Infinity"` / `"-Infinity"` / decimal literals.

    use crate::normalize::parse_wire_double;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if v.is_nan() {
            serializer.serialize_str("NaN")
        } else if v.is_infinite() {
            serializer.serialize_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            serializer.serialize_f64(*v)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        struct DoubleVisitor;

        impl serde::de::Visitor<'_> for DoubleVisitor {
            type Value = f64;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a double as number or string")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<f64, E> {
                Ok(v as f64)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<f64, E> {
                Ok(v as f64)
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<f64, E> {
                Ok(v)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<f64, E> {
                Ok(parse_wire_double(v))
            }
        }

        deserializer.deserialize_any(DoubleVisitor)
    }
}

/// Type precedence used by the total order.
///
/// Lower variant sorts earlier. Integer, Double, and NaN share the `Number`
/// class; vector and max are map shapes promoted to their own classes by the
/// sentinel predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeOrder {
    Null = 0,
    Boolean = 1,
    Number = 2,
    Timestamp = 3,
    String = 4,
    Bytes = 5,
    Reference = 6,
    GeoPoint = 7,
    Array = 8,
    Vector = 9,
    Map = 10,
    Max = 11,
}

impl Value {
    /// The null value (also the global minimum, see [`Value::min_value`]).
    pub fn null() -> Self {
        Value::Null(NullValue)
    }

    /// Minimum possible value: sorts before every other value.
    pub fn min_value() -> Self {
        Value::null()
    }

    /// Maximum possible value: the reserved `__type__ = "__max__"` map,
    /// which sorts after every other value (including plain maps).
    pub fn max_value() -> Self {
        Value::Map(MapValue::from_pairs([(
            RESERVED_TYPE_KEY.to_string(),
            Value::String(MAX_VALUE_SENTINEL.to_string()),
        )]))
    }

    /// Build a vector value: the reserved map shape
    /// `{__type__: "__vector__", value: [components...]}`.
    pub fn vector(components: impl IntoIterator<Item = f64>) -> Self {
        let values = components.into_iter().map(Value::Double).collect();
        Value::Map(MapValue::from_pairs([
            (
                RESERVED_TYPE_KEY.to_string(),
                Value::String(VECTOR_TYPE_SENTINEL.to_string()),
            ),
            (
                VECTOR_VALUES_KEY.to_string(),
                Value::Array(ArrayValue { values }),
            ),
        ]))
    }

    /// Build an array value from elements.
    pub fn array(values: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(ArrayValue {
            values: values.into_iter().collect(),
        })
    }

    /// Build a map value from `(key, value)` pairs in wire order.
    pub fn map<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(MapValue::from_pairs(
            pairs.into_iter().map(|(k, v)| (k.into(), v)),
        ))
    }

    /// Extract the type-precedence class for this value.
    pub fn type_order(&self) -> TypeOrder {
        match self {
            Value::Null(_) => TypeOrder::Null,
            Value::Boolean(_) => TypeOrder::Boolean,
            Value::Integer(_) | Value::Double(_) => TypeOrder::Number,
            Value::Timestamp(_) => TypeOrder::Timestamp,
            Value::String(_) => TypeOrder::String,
            Value::Bytes(_) => TypeOrder::Bytes,
            Value::Reference(_) => TypeOrder::Reference,
            Value::GeoPoint(_) => TypeOrder::GeoPoint,
            Value::Array(_) => TypeOrder::Array,
            Value::Map(map) => {
                if map_sentinel(map) == Some(MAX_VALUE_SENTINEL) {
                    TypeOrder::Max
                } else if map_sentinel(map) == Some(VECTOR_TYPE_SENTINEL) {
                    TypeOrder::Vector
                } else {
                    TypeOrder::Map
                }
            }
        }
    }

    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// Check if this is any numeric value (Integer or Double, NaN included).
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Double(_))
    }

    /// Check if this is a NaN double.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Double(d) if d.is_nan())
    }

    /// Check if this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this is any map shape (plain map, vector, or max sentinel).
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this map value is a vector (`__type__ = "__vector__"`).
    ///
    /// Vector-ness is a predicate over maps, not a variant: the wire format
    /// encodes vectors as maps with reserved keys.
    pub fn is_vector_value(&self) -> bool {
        self.type_order() == TypeOrder::Vector
    }

    /// Check if this map value is the internal max sentinel.
    pub fn is_max_value(&self) -> bool {
        self.type_order() == TypeOrder::Max
    }

    /// The component array of a vector value, if this is one.
    pub fn vector_components(&self) -> Option<&[Value]> {
        match self {
            Value::Map(map) if self.is_vector_value() => match map.get(VECTOR_VALUES_KEY) {
                Some(Value::Array(arr)) => Some(&arr.values),
                _ => Some(&[]),
            },
            _ => None,
        }
    }

    /// Approximate in-memory size of the user data, in bytes.
    ///
    /// Ignores object overhead. Exact constants are approximations; the
    /// contract is monotonicity: adding characters, bytes, elements, or
    /// fields never decreases the estimate.
    pub fn estimate_byte_size(&self) -> usize {
        match self {
            Value::Null(_) | Value::Boolean(_) => 4,
            Value::Integer(_) | Value::Double(_) => 8,
            // seconds + nanos
            Value::Timestamp(_) => 16,
            Value::String(s) => s.len(),
            Value::Bytes(b) => normalize::normalize_byte_string(b).len(),
            Value::Reference(name) => name.len(),
            // latitude + longitude
            Value::GeoPoint(_) => 16,
            Value::Array(arr) => arr.values.iter().map(Value::estimate_byte_size).sum(),
            Value::Map(map) => map
                .fields
                .iter()
                .map(|(k, v)| k.len() + v.estimate_byte_size())
                .sum(),
        }
    }

    /// Parse a value from its wire JSON form.
    pub fn from_wire_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize a value to its wire JSON form.
    pub fn to_wire_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn map_sentinel(map: &MapValue) -> Option<&str> {
    match map.get(RESERVED_TYPE_KEY) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::canonical::canonical_id(self))
    }
}

// === Convenient From implementations ===

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(BytesValue::Raw(bytes))
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::array(values)
    }
}

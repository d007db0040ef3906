//! Document field encoding: plain JSON <-> typed document values

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as Json};

pub type Fields = BTreeMap<String, Value>;

/// Typed document value, serialized as `{"<kind>Value": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[serde(rename = "stringValue")]
    String(String),
    #[serde(rename = "integerValue", with = "int64")]
    Integer(i64),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    #[serde(rename = "nullValue")]
    Null(()),
    #[serde(rename = "timestampValue")]
    Timestamp(String),
    #[serde(rename = "arrayValue")]
    Array(ArrayValue),
    #[serde(rename = "mapValue")]
    Map(MapValue),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: Fields,
}

/// Stored document as returned by the REST API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

// int64 travels as a decimal string; accept bare numbers too
mod int64 {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s.parse().map_err(D::Error::custom),
        }
    }
}

// Integral numbers up to 2^53 are treated as integers, like a JS number
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Value {
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::String(s) => Value::String(s.clone()),
            Json::Bool(b) => Value::Boolean(*b),
            Json::Null => Value::Null(()),
            Json::Number(n) => number_value(n),
            Json::Array(items) => Value::Array(ArrayValue {
                values: items.iter().map(Value::from_json).collect(),
            }),
            Json::Object(map) => Value::Map(MapValue { fields: to_fields(map) }),
        }
    }

    pub fn to_json(&self) -> Json {
        match self {
            Value::String(s) | Value::Timestamp(s) => Json::String(s.clone()),
            Value::Integer(i) => Json::from(*i),
            Value::Double(d) => Number::from_f64(*d).map(Json::Number).unwrap_or(Json::Null),
            Value::Boolean(b) => Json::Bool(*b),
            Value::Null(()) => Json::Null,
            Value::Array(array) => Json::Array(array.values.iter().map(Value::to_json).collect()),
            Value::Map(map) => Json::Object(from_fields(&map.fields)),
        }
    }
}

fn number_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return Value::Integer(i);
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        Value::Integer(f as i64)
    } else {
        Value::Double(f)
    }
}

/// Encode a plain JSON record as document fields
pub fn to_fields(record: &Map<String, Json>) -> Fields {
    record
        .iter()
        .map(|(k, v)| (k.clone(), Value::from_json(v)))
        .collect()
}

/// Decode document fields back into a plain JSON record
pub fn from_fields(fields: &Fields) -> Map<String, Json> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

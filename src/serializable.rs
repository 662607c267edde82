use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ModelError, Result};

/// A value with a JSON wire representation.
///
/// Receive-only values fail [`to_json`](Serializable::to_json) with
/// [`ModelError::NonSerializable`]; send-only values fail
/// [`from_json`](Serializable::from_json) with
/// [`ModelError::SendElementOnly`].
pub trait Serializable: Sized {
    fn to_json(&self) -> Result<Value>;

    fn from_json(value: &Value) -> Result<Self>;
}

/// Decodes `value` through the type's serde derive. Missing or ill-typed
/// fields become [`ModelError::Parameter`].
pub fn decode_fields<T: DeserializeOwned>(value: &Value) -> Result<T> {
    Ok(T::deserialize(value)?)
}

pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    match value.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ModelError::Parameter(format!(
            "field `{key}` expected a string, got {other}"
        ))),
        None => Err(ModelError::missing(key)),
    }
}

pub(crate) fn i64_field(value: &Value, key: &str) -> Result<i64> {
    match value.get(key) {
        Some(v) => v.as_i64().ok_or_else(|| {
            ModelError::Parameter(format!("field `{key}` expected an integer, got {v}"))
        }),
        None => Err(ModelError::missing(key)),
    }
}

/// Field deserializers for values the gateway sends either as strings or
/// as numbers.
pub(crate) mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    impl StringOrNumber {
        fn into_string(self) -> String {
            match self {
                Self::String(s) => s,
                Self::Number(n) => n.to_string(),
            }
        }
    }

    pub fn string<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(StringOrNumber::deserialize(d)?.into_string())
    }

    /// Required on the wire, kept optional so outbound values can omit it.
    pub fn required_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Some(StringOrNumber::deserialize(d)?.into_string()))
    }

    pub fn opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<StringOrNumber>::deserialize(d)?.map(StringOrNumber::into_string))
    }

    pub fn opt_u64<'de, D>(d: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<StringOrNumber>::deserialize(d)? {
            None => Ok(None),
            Some(StringOrNumber::Number(n)) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid size: {n}"))),
            Some(StringOrNumber::String(s)) => s.parse().map(Some).map_err(D::Error::custom),
        }
    }

    /// Makes an `Option<T>` field required on the wire.
    pub fn required<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        T::deserialize(d).map(Some)
    }
}

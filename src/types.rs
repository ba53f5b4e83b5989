use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::Codec;
use crate::coerce::coerce;
use crate::error::{CoerceResult, CoercionError};
use crate::value::{Kind, Mapping, Number, Value};

fn integer(value: &Value) -> CoerceResult<Number> {
    match coerce(value, Kind::Integer)? {
        Value::Number(n) => Ok(n),
        other => Err(CoercionError::mismatch(Kind::Integer, other.kind())),
    }
}

fn float(value: &Value) -> CoerceResult<f64> {
    match coerce(value, Kind::Float)? {
        Value::Number(n) => Ok(n.as_f64()),
        other => Err(CoercionError::mismatch(Kind::Float, other.kind())),
    }
}

fn sequence(value: &Value) -> CoerceResult<&[Value]> {
    match value {
        Value::Null => Err(CoercionError::Null),
        Value::Sequence(items) => Ok(items),
        other => Err(CoercionError::mismatch(Kind::Sequence, other.kind())),
    }
}

fn mapping(value: &Value) -> CoerceResult<&Mapping> {
    match value {
        Value::Null => Err(CoercionError::Null),
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(CoercionError::mismatch(Kind::Mapping, other.kind())),
    }
}

macro_rules! impl_codec_signed {
    ($($ty:ty),*) => {
        $(
            impl Codec for $ty {
                const KIND: Kind = Kind::Integer;

                fn decode_value(value: &Value) -> CoerceResult<Self> {
                    let n = integer(value)?;
                    n.as_i64()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| CoercionError::OutOfRange(n.to_string()))
                }

                fn encode_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

macro_rules! impl_codec_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Codec for $ty {
                const KIND: Kind = Kind::Integer;

                fn decode_value(value: &Value) -> CoerceResult<Self> {
                    let n = integer(value)?;
                    n.as_u64()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| CoercionError::OutOfRange(n.to_string()))
                }

                fn encode_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_codec_signed!(i8, i16, i32, i64, isize);
impl_codec_unsigned!(u8, u16, u32, u64, usize);

impl Codec for f64 {
    const KIND: Kind = Kind::Float;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        float(value)
    }

    fn encode_value(&self) -> Value {
        Value::from(*self)
    }
}

impl Codec for f32 {
    const KIND: Kind = Kind::Float;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        let n = float(value)?;
        let narrowed = n as f32;
        if narrowed.is_finite() {
            Ok(narrowed)
        } else {
            Err(CoercionError::OutOfRange(n.to_string()))
        }
    }

    fn encode_value(&self) -> Value {
        Value::from(*self)
    }
}

impl Codec for bool {
    const KIND: Kind = Kind::Bool;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        match coerce(value, Self::KIND)? {
            Value::Bool(b) => Ok(b),
            other => Err(CoercionError::mismatch(Self::KIND, other.kind())),
        }
    }

    fn encode_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Codec for String {
    const KIND: Kind = Kind::String;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        if let Value::String(s) = value {
            return Ok(s.clone());
        }
        match coerce(value, Self::KIND)? {
            Value::String(s) => Ok(s),
            other => Err(CoercionError::mismatch(Self::KIND, other.kind())),
        }
    }

    fn encode_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Codec for Arc<str> {
    const KIND: Kind = Kind::String;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        if let Value::String(s) = value {
            return Ok(Arc::from(s.as_str()));
        }
        String::decode_value(value).map(Arc::from)
    }

    fn encode_value(&self) -> Value {
        Value::from(&**self)
    }
}

impl<T: Codec> Codec for Vec<T> {
    const KIND: Kind = Kind::Sequence;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        sequence(value)?.iter().map(T::decode_value).collect()
    }

    fn encode_value(&self) -> Value {
        Value::Sequence(self.iter().map(T::encode_value).collect())
    }
}

impl Codec for bytes::Bytes {
    const KIND: Kind = Kind::Sequence;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        sequence(value)?
            .iter()
            .map(u8::decode_value)
            .collect::<CoerceResult<Vec<u8>>>()
            .map(bytes::Bytes::from)
    }

    fn encode_value(&self) -> Value {
        Value::Sequence(self.iter().map(|b| Value::from(*b)).collect())
    }
}

impl<V: Codec, S: BuildHasher + Default> Codec for HashMap<String, V, S> {
    const KIND: Kind = Kind::Mapping;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        mapping(value)?
            .iter()
            .map(|(k, v)| V::decode_value(v).map(|v| (k.clone(), v)))
            .collect()
    }

    fn encode_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.clone(), v.encode_value()))
                .collect(),
        )
    }
}

impl<V: Codec> Codec for BTreeMap<String, V> {
    const KIND: Kind = Kind::Mapping;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        mapping(value)?
            .iter()
            .map(|(k, v)| V::decode_value(v).map(|v| (k.clone(), v)))
            .collect()
    }

    fn encode_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.clone(), v.encode_value()))
                .collect(),
        )
    }
}

impl<V: Codec, S: BuildHasher + Default> Codec for IndexMap<String, V, S> {
    const KIND: Kind = Kind::Mapping;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        mapping(value)?
            .iter()
            .map(|(k, v)| V::decode_value(v).map(|v| (k.clone(), v)))
            .collect()
    }

    fn encode_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.clone(), v.encode_value()))
                .collect(),
        )
    }
}

#[cfg(feature = "chrono")]
impl Codec for chrono::DateTime<chrono::Utc> {
    const KIND: Kind = Kind::String;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        match value {
            Value::String(s) => chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|_| CoercionError::InvalidTimestamp(s.clone())),
            Value::Number(n) => n
                .to_integer()
                .and_then(|secs| secs.as_i64())
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .ok_or_else(|| CoercionError::InvalidTimestamp(n.to_string())),
            Value::Null => Err(CoercionError::Null),
            other => Err(CoercionError::mismatch(Kind::String, other.kind())),
        }
    }

    fn encode_value(&self) -> Value {
        Value::String(self.to_rfc3339())
    }
}

#[cfg(feature = "smallvec")]
impl<A> Codec for smallvec::SmallVec<A>
where
    A: smallvec::Array,
    A::Item: Codec,
{
    const KIND: Kind = Kind::Sequence;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        sequence(value)?
            .iter()
            .map(<A::Item as Codec>::decode_value)
            .collect()
    }

    fn encode_value(&self) -> Value {
        Value::Sequence(self.iter().map(Codec::encode_value).collect())
    }
}

//! Field values that sqlx can bind to a PostgreSQL statement.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A column value bound as a statement parameter. Each variant reports its own Postgres type.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::BigInt(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl<'q> Encode<'q, Postgres> for FieldValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            FieldValue::Null => <Option<i32> as Encode<Postgres>>::encode_by_ref(&None, buf)?,
            FieldValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf)?,
            FieldValue::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            FieldValue::BigInt(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            FieldValue::Float(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            FieldValue::Text(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            FieldValue::Null | FieldValue::Int(_) => <i32 as Type<Postgres>>::type_info(),
            FieldValue::Bool(_) => <bool as Type<Postgres>>::type_info(),
            FieldValue::BigInt(_) => <i64 as Type<Postgres>>::type_info(),
            FieldValue::Float(_) => <f64 as Type<Postgres>>::type_info(),
            FieldValue::Text(_) => <String as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for FieldValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}

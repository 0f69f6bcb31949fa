use serde::Serialize;
use std::fmt;

/// A value bound to a query placeholder.
///
/// Search values are either text (names, numbers, LIKE patterns, SIC tokens)
/// or integers (LIMIT/OFFSET). Serializes untagged, so a plan's parameter
/// list reads as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

impl BindValue {
    /// The text payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BindValue::Text(s) => Some(s),
            BindValue::Int(_) => None,
        }
    }

    /// The integer payload, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            BindValue::Int(n) => Some(*n),
            BindValue::Text(_) => None,
        }
    }
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindValue::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            BindValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::Int(value)
    }
}

impl From<u32> for BindValue {
    fn from(value: u32) -> Self {
        BindValue::Int(i64::from(value))
    }
}

#[cfg(feature = "postgres")]
mod pg {
    use super::BindValue;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type};

    impl ToSql for BindValue {
        /// Text bound to an integer column (a SIC code against
        /// `sic_code_1_num`) is parsed into that width; integers bound to a
        /// text column are written as their decimal form.
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                BindValue::Text(s) if *ty == Type::INT2 => s.parse::<i16>()?.to_sql(ty, out),
                BindValue::Text(s) if *ty == Type::INT4 => s.parse::<i32>()?.to_sql(ty, out),
                BindValue::Text(s) if *ty == Type::INT8 => s.parse::<i64>()?.to_sql(ty, out),
                BindValue::Text(s) => s.to_sql(ty, out),
                BindValue::Int(n) if *ty == Type::INT2 => i16::try_from(*n)?.to_sql(ty, out),
                BindValue::Int(n) if *ty == Type::INT4 => i32::try_from(*n)?.to_sql(ty, out),
                BindValue::Int(n) if *ty == Type::INT8 => n.to_sql(ty, out),
                BindValue::Int(n) => n.to_string().to_sql(ty, out),
            }
        }

        fn accepts(ty: &Type) -> bool {
            <String as ToSql>::accepts(ty)
                || <i16 as ToSql>::accepts(ty)
                || <i32 as ToSql>::accepts(ty)
                || <i64 as ToSql>::accepts(ty)
        }

        tokio_postgres::types::to_sql_checked!();
    }

}

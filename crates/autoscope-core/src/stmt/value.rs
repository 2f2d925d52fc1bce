use super::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// An argument passed to a scope, or a parameter bound into a fragment.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// Date and time without a zone
    DateTime(NaiveDateTime),

    /// Instant in UTC
    Timestamp(DateTime<Utc>),

    /// Reference to a stored record
    Record(Record),

    /// A list of values
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Null, an empty or whitespace-only string, or an empty list.
    ///
    /// Blank arguments cause the applicator to skip a scope entirely.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date(_) | Self::Time(_) | Self::DateTime(_) | Self::Timestamp(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Interprets the value as a non-negative row count. Numeric strings are
    /// accepted since scope arguments frequently arrive from request params.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::I64(v) => u64::try_from(*v).ok(),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The text form used when building `LIKE` patterns.
    pub fn to_pattern_text(&self) -> Option<String> {
        match self {
            Self::String(v) => Some(v.clone()),
            Self::I64(v) => Some(v.to_string()),
            Self::F64(v) => Some(v.to_string()),
            _ => None,
        }
    }

    /// Replaces a record reference with its primary key. Other values are
    /// returned unchanged.
    pub fn into_key(self) -> Value {
        match self {
            Self::Record(record) => *record.key,
            value => value,
        }
    }

    /// Expands nested lists in place order and drops nulls.
    pub fn flatten_compact(values: &[Value]) -> Vec<Value> {
        let mut out = vec![];
        for value in values {
            match value {
                Self::List(items) => out.extend(Self::flatten_compact(items)),
                Self::Null => {}
                value => out.push(value.clone()),
            }
        }
        out
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<u32> for Value {
    fn from(src: u32) -> Self {
        Self::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Record> for Value {
    fn from(src: Record) -> Self {
        Self::Record(src)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(src: Vec<T>) -> Self {
        Self::List(src.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        src.map(Into::into).unwrap_or(Self::Null)
    }
}

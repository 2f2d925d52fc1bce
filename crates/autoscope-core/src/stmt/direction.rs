use super::Value;
use crate::{Error, Result};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Parses `asc` / `desc` in any case. Null means "no direction".
    pub fn from_value(value: &Value) -> Result<Option<Direction>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) if s.eq_ignore_ascii_case("asc") => Ok(Some(Direction::Asc)),
            Value::String(s) if s.eq_ignore_ascii_case("desc") => Ok(Some(Direction::Desc)),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            other => Err(Error::invalid_arguments(format!(
                "order direction must be `asc` or `desc`; got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

use autoscope_core::{stmt::Value, Error, Result};

/// Arguments of one scope invocation, with arity and type checks that name
/// the scope in their errors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Args<'a> {
    scope: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub(crate) fn new(scope: &'a str, values: &'a [Value]) -> Self {
        Self { scope, values }
    }

    pub(crate) fn values(&self) -> &'a [Value] {
        self.values
    }

    pub(crate) fn exactly<const N: usize>(&self) -> Result<&'a [Value; N]> {
        self.values
            .try_into()
            .map_err(|_| self.arity_error(&N.to_string()))
    }

    pub(crate) fn at_most(&self, max: usize) -> Result<&'a [Value]> {
        self.between(0, max)
    }

    pub(crate) fn between(&self, min: usize, max: usize) -> Result<&'a [Value]> {
        if (min..=max).contains(&self.values.len()) {
            Ok(self.values)
        } else {
            Err(self.arity_error(&format!("{min}..={max}")))
        }
    }

    /// A single value usable as a bound parameter.
    pub(crate) fn scalar(&self, value: &Value) -> Result<Value> {
        match value {
            Value::List(_) => Err(self.invalid(format!("expected a single value, got {value:?}"))),
            value => Ok(value.clone()),
        }
    }

    pub(crate) fn string(&self, value: &'a Value, what: &str) -> Result<&'a str> {
        value
            .as_str()
            .ok_or_else(|| self.invalid(format!("expected {what} to be a string, got {value:?}")))
    }

    pub(crate) fn count(&self, value: &Value) -> Result<u64> {
        value
            .as_count()
            .ok_or_else(|| self.invalid(format!("expected a row count, got {value:?}")))
    }

    pub(crate) fn invalid(&self, message: impl std::fmt::Display) -> Error {
        Error::invalid_arguments(format!("`{}`: {message}", self.scope))
    }

    fn arity_error(&self, expected: &str) -> Error {
        Error::invalid_arguments(format!(
            "wrong number of arguments for `{}` (given {}, expected {expected})",
            self.scope,
            self.values.len()
        ))
    }
}

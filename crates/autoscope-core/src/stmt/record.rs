use super::Value;
use crate::schema::ModelId;

/// A reference to a stored row: the model it belongs to and its primary key.
///
/// Scopes that accept "a record or an identifier" bind the record's key.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub model: ModelId,
    pub key: Box<Value>,
}

impl Record {
    pub fn new(model: ModelId, key: impl Into<Value>) -> Self {
        Self {
            model,
            key: Box::new(key.into()),
        }
    }
}

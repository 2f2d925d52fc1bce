use super::{Association, Column, Lifecycle, Name};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: Name,

    pub table_name: String,

    pub primary_key: String,

    /// Includes columns inherited from the parent model
    pub columns: Vec<Column>,

    /// Includes associations inherited from the parent model
    pub associations: Vec<Association>,

    pub lifecycle: Option<Lifecycle>,

    /// Column holding a human readable name for the row, used when another
    /// model orders by an association to this one.
    pub display_name: Option<String>,

    /// Set when the model extends another and shares its table
    pub parent: Option<ModelId>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub usize);

impl Model {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|assoc| assoc.name == name)
    }

    /// The primary key qualified with the table: `teams.id`.
    pub fn qualified_primary_key(&self) -> String {
        format!("{}.{}", self.table_name, self.primary_key)
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}

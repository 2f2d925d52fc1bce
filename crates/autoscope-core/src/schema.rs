mod association;
pub use association::{Association, AssociationKind, Through};

mod builder;
pub use builder::{AssociationDef, Builder, ModelBuilder};

mod column;
pub use column::{Column, ColumnType};

mod lifecycle;
pub use lifecycle::Lifecycle;

mod model;
pub use model::{Model, ModelId};

mod name;
pub use name::Name;

use crate::{driver::Capability, stmt, Error, Result};
use indexmap::IndexMap;

/// In-memory model metadata.
///
/// This is the [`Metadata`](crate::Metadata) provider used when the schema
/// is declared up front rather than introspected from a live database.
#[derive(Debug)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,

    /// Database the schema targets
    pub capability: Capability,

    /// Records addressable by name, per model. Backs `find_by_name`.
    pub(crate) named: IndexMap<ModelId, IndexMap<String, stmt::Value>>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Get a model by ID
    pub fn model(&self, id: impl Into<ModelId>) -> Result<&Model> {
        let id = id.into();
        self.models
            .get(&id)
            .ok_or_else(|| Error::invalid_schema(format!("no model with {id:?}")))
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models
            .values()
            .find(|model| model.name.upper_camel_case() == name)
    }
}

use crate::schema::{Association, Column, Lifecycle, Model, ModelId, Name, Schema};
use crate::{driver::Capability, stmt, Result};

/// Describes models to the scope compiler.
///
/// Implementations report storage problems as
/// [`crate::Error::metadata_unavailable`]; the compiler treats those as "no
/// automatic scope" instead of failing. The per-attribute lookups default to
/// reading the [`Model`] returned by [`model`](Metadata::model).
pub trait Metadata: Send + Sync {
    /// The database the models are stored in.
    fn capability(&self) -> &Capability;

    fn model(&self, model: ModelId) -> Result<&Model>;

    /// Looks up a record of `model` by its display name.
    fn find_by_name(&self, model: ModelId, name: &str) -> Result<Option<stmt::Record>>;

    fn model_name(&self, model: ModelId) -> Result<&Name> {
        Ok(&self.model(model)?.name)
    }

    fn columns(&self, model: ModelId) -> Result<&[Column]> {
        Ok(&self.model(model)?.columns)
    }

    fn column(&self, model: ModelId, name: &str) -> Result<Option<&Column>> {
        Ok(self.model(model)?.column(name))
    }

    fn associations(&self, model: ModelId) -> Result<&[Association]> {
        Ok(&self.model(model)?.associations)
    }

    fn association(&self, model: ModelId, name: &str) -> Result<Option<&Association>> {
        Ok(self.model(model)?.association(name))
    }

    fn primary_key(&self, model: ModelId) -> Result<&str> {
        Ok(&self.model(model)?.primary_key)
    }

    fn table_name(&self, model: ModelId) -> Result<&str> {
        Ok(&self.model(model)?.table_name)
    }

    fn lifecycle(&self, model: ModelId) -> Result<Option<&Lifecycle>> {
        Ok(self.model(model)?.lifecycle.as_ref())
    }

    fn display_name(&self, model: ModelId) -> Result<Option<&str>> {
        Ok(self.model(model)?.display_name.as_deref())
    }
}

impl Metadata for Schema {
    fn capability(&self) -> &Capability {
        &self.capability
    }

    fn model(&self, model: ModelId) -> Result<&Model> {
        Schema::model(self, model)
    }

    fn find_by_name(&self, model: ModelId, name: &str) -> Result<Option<stmt::Record>> {
        // Subclasses share their parent's rows.
        let mut current = Some(self.model(model)?);

        while let Some(m) = current {
            if let Some(key) = self.named.get(&m.id).and_then(|names| names.get(name)) {
                return Ok(Some(stmt::Record::new(model, key.clone())));
            }
            current = match m.parent {
                Some(parent) => Some(self.model(parent)?),
                None => None,
            };
        }

        Ok(None)
    }
}

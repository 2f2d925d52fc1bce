mod association;
pub use association::AssociationDef;

use super::{Association, Column, ColumnType, Lifecycle, Model, ModelId, Name, Schema};
use crate::{driver::Capability, stmt, Error, Result};
use indexmap::IndexMap;

/// Declares models and builds a [`Schema`].
///
/// Models are referenced by their upper camel case name, so associations may
/// point at models declared later. Names are resolved in [`Builder::build`].
#[derive(Debug, Default)]
pub struct Builder {
    /// If set, prefix all conventional table names with this string
    table_name_prefix: Option<String>,

    models: IndexMap<String, ModelBuilder>,

    named: Vec<(String, String, stmt::Value)>,
}

#[derive(Debug)]
pub struct ModelBuilder {
    name: Name,
    table_name: Option<String>,
    primary_key: Option<String>,
    columns: Vec<Column>,
    associations: Vec<AssociationDef>,
    lifecycle: Option<Lifecycle>,
    display_name: Option<String>,
    parent: Option<String>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    builder: &'a Builder,

    /// Maps model names to identifiers. Identifiers are reserved before the
    /// models are built.
    model_lookup: IndexMap<String, ModelId>,

    /// Declaring model of each model, as an index into `builder.models`
    parents: Vec<Option<usize>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Declares a model, or returns the existing declaration.
    pub fn model(&mut self, name: &str) -> &mut ModelBuilder {
        let name = Name::new(name);
        self.models
            .entry(name.upper_camel_case())
            .or_insert_with(|| ModelBuilder::new(name))
    }

    /// Registers a record that `find_by_name` resolves.
    pub fn named_record(
        &mut self,
        model: &str,
        name: &str,
        key: impl Into<stmt::Value>,
    ) -> &mut Self {
        self.named
            .push((Name::new(model).upper_camel_case(), name.to_string(), key.into()));
        self
    }

    pub fn build(&self, capability: &Capability) -> Result<Schema> {
        let model_lookup: IndexMap<_, _> = self
            .models
            .keys()
            .enumerate()
            .map(|(index, name)| (name.clone(), ModelId(index)))
            .collect();

        let mut cx = BuildSchema {
            builder: self,
            model_lookup,
            parents: vec![],
        };

        cx.parents = self
            .models
            .values()
            .map(|model| cx.parent_index(model))
            .collect::<Result<_>>()?;

        let mut models = IndexMap::new();

        // Parents are always built before their subclasses.
        for index in cx.build_order()? {
            let model = cx.build_model(index, &models)?;
            models.insert(model.id, model);
        }

        models.sort_keys();

        let mut named: IndexMap<ModelId, IndexMap<String, stmt::Value>> = IndexMap::new();

        for (model, name, key) in &self.named {
            let id = cx.model_id(model)?;
            named
                .entry(id)
                .or_default()
                .insert(name.clone(), key.clone());
        }

        Ok(Schema {
            models,
            capability: *capability,
            named,
        })
    }
}

impl ModelBuilder {
    fn new(name: Name) -> Self {
        Self {
            name,
            table_name: None,
            primary_key: None,
            columns: vec![],
            associations: vec![],
            lifecycle: None,
            display_name: None,
            parent: None,
        }
    }

    pub fn table_name(&mut self, table_name: &str) -> &mut Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    pub fn primary_key(&mut self, column: &str) -> &mut Self {
        self.primary_key = Some(column.to_string());
        self
    }

    pub fn column(&mut self, name: &str, ty: ColumnType) -> &mut Self {
        self.columns.push(Column::new(name, ty));
        self
    }

    pub fn lifecycle<I>(&mut self, state_column: &str, states: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lifecycle = Some(Lifecycle::new(state_column, states));
        self
    }

    pub fn display_name(&mut self, column: &str) -> &mut Self {
        self.display_name = Some(column.to_string());
        self
    }

    /// Single-table inheritance: the model shares `parent`'s table and
    /// inherits its columns, associations and lifecycle.
    pub fn extends(&mut self, parent: &str) -> &mut Self {
        self.parent = Some(Name::new(parent).upper_camel_case());
        self
    }

    pub fn association(&mut self, association: AssociationDef) -> &mut Self {
        self.associations.push(association);
        self
    }

    pub fn belongs_to(&mut self, name: &str) -> &mut Self {
        self.association(AssociationDef::belongs_to(name))
    }

    pub fn has_one(&mut self, name: &str) -> &mut Self {
        self.association(AssociationDef::has_one(name))
    }

    pub fn has_many(&mut self, name: &str) -> &mut Self {
        self.association(AssociationDef::has_many(name))
    }
}

impl BuildSchema<'_> {
    fn model_id(&self, name: &str) -> Result<ModelId> {
        self.model_lookup
            .get(name)
            .copied()
            .ok_or_else(|| Error::invalid_schema(format!("no model named `{name}`")))
    }

    fn parent_index(&self, model: &ModelBuilder) -> Result<Option<usize>> {
        let Some(parent) = &model.parent else {
            return Ok(None);
        };

        match self.builder.models.get_index_of(parent) {
            Some(index) => Ok(Some(index)),
            None => Err(Error::invalid_schema(format!(
                "`{}` extends unknown model `{parent}`",
                model.name
            ))),
        }
    }

    /// Model indices ordered so every parent precedes its subclasses.
    fn build_order(&self) -> Result<Vec<usize>> {
        let mut order = vec![];

        for index in 0..self.parents.len() {
            let mut lineage = vec![index];
            let mut current = index;

            while let Some(parent) = self.parents[current] {
                if lineage.contains(&parent) {
                    return Err(Error::invalid_schema(format!(
                        "inheritance cycle through `{}`",
                        self.builder.models[parent].name
                    )));
                }
                lineage.push(parent);
                current = parent;
            }

            for index in lineage.into_iter().rev() {
                if !order.contains(&index) {
                    order.push(index);
                }
            }
        }

        Ok(order)
    }

    fn build_model(&self, index: usize, built: &IndexMap<ModelId, Model>) -> Result<Model> {
        let def = &self.builder.models[index];
        let id = ModelId(index);
        let parent = self.parents[index].map(|parent| &built[&ModelId(parent)]);

        let table_name = match (&def.table_name, parent) {
            (Some(table_name), _) => table_name.clone(),
            (None, Some(parent)) => parent.table_name.clone(),
            (None, None) => format!(
                "{}{}",
                self.builder.table_name_prefix.as_deref().unwrap_or(""),
                def.name.plural_snake_case()
            ),
        };

        let primary_key = def
            .primary_key
            .clone()
            .or_else(|| parent.map(|parent| parent.primary_key.clone()))
            .unwrap_or_else(|| "id".to_string());

        let mut columns = parent.map(|p| p.columns.clone()).unwrap_or_default();
        columns.extend(def.columns.iter().cloned());

        let mut associations = parent.map(|p| p.associations.clone()).unwrap_or_default();

        // Direct associations first; through associations resolve against
        // them.
        for assoc in def.associations.iter().filter(|assoc| assoc.through.is_none()) {
            let resolved = assoc.resolve_direct(self, &def.name)?;
            associations.retain(|existing| existing.name != resolved.name);
            associations.push(resolved);
        }

        for assoc in def.associations.iter().filter(|assoc| assoc.through.is_some()) {
            let resolved = assoc.resolve_through(self, &def.name, &associations)?;
            associations.retain(|existing| existing.name != resolved.name);
            associations.push(resolved);
        }

        Ok(Model {
            id,
            name: def.name.clone(),
            table_name,
            primary_key,
            columns,
            associations,
            lifecycle: def
                .lifecycle
                .clone()
                .or_else(|| parent.and_then(|p| p.lifecycle.clone())),
            display_name: def
                .display_name
                .clone()
                .or_else(|| parent.and_then(|p| p.display_name.clone())),
            parent: parent.map(|p| p.id),
        })
    }

    /// `index` and its ancestors, root first. Cycles are rejected by
    /// `build_order` before any model is built.
    fn lineage(&self, index: usize) -> Vec<usize> {
        let mut lineage = vec![index];
        let mut current = index;
        while let Some(parent) = self.parents[current] {
            lineage.push(parent);
            current = parent;
        }
        lineage.reverse();
        lineage
    }

    /// All direct associations declared on `model` or its ancestors. Used to
    /// find the source of a through association on a join model that may not
    /// be built yet.
    fn direct_associations(&self, model: ModelId) -> Result<Vec<Association>> {
        let mut out: Vec<Association> = vec![];

        for index in self.lineage(model.0) {
            let def = &self.builder.models[index];
            for assoc in def.associations.iter().filter(|a| a.through.is_none()) {
                let resolved = assoc.resolve_direct(self, &def.name)?;
                out.retain(|existing| existing.name != resolved.name);
                out.push(resolved);
            }
        }

        Ok(out)
    }
}

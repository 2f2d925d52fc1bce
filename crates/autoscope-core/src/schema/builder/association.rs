use super::BuildSchema;
use crate::schema::{Association, AssociationKind, Name, Through};
use crate::{Error, Result};
use std_util::str;

/// An association as declared, before model names are resolved.
///
/// Unspecified options follow naming conventions:
/// - the target model is the upper camel case of the association name,
///   singularized for `has_many`;
/// - `belongs_to` foreign keys are `<association>_id` on the owner;
/// - `has_one` / `has_many` foreign keys are `<owner>_id` on the target;
/// - polymorphic discriminators are `<association>_type`;
/// - a through association's source is the join model's association named
///   after the singular, then the plural, of the association name.
#[derive(Debug, Clone)]
pub struct AssociationDef {
    name: String,
    kind: AssociationKind,
    class_name: Option<String>,
    foreign_key: Option<String>,
    pub(super) through: Option<String>,
    source: Option<String>,
    conditions: Option<String>,
    polymorphic: bool,
    counter_cache: Option<String>,
}

impl AssociationDef {
    fn new(name: &str, kind: AssociationKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            class_name: None,
            foreign_key: None,
            through: None,
            source: None,
            conditions: None,
            polymorphic: false,
            counter_cache: None,
        }
    }

    pub fn belongs_to(name: &str) -> Self {
        Self::new(name, AssociationKind::BelongsTo)
    }

    pub fn has_one(name: &str) -> Self {
        Self::new(name, AssociationKind::HasOne)
    }

    pub fn has_many(name: &str) -> Self {
        Self::new(name, AssociationKind::HasMany)
    }

    pub fn class_name(mut self, class_name: &str) -> Self {
        self.class_name = Some(Name::new(class_name).upper_camel_case());
        self
    }

    pub fn foreign_key(mut self, column: &str) -> Self {
        self.foreign_key = Some(column.to_string());
        self
    }

    pub fn through(mut self, association: &str) -> Self {
        self.through = Some(association.to_string());
        self
    }

    pub fn source(mut self, association: &str) -> Self {
        self.source = Some(association.to_string());
        self
    }

    pub fn conditions(mut self, sql: &str) -> Self {
        self.conditions = Some(sql.to_string());
        self
    }

    pub fn polymorphic(mut self) -> Self {
        self.polymorphic = true;
        self
    }

    pub fn counter_cache(mut self, column: &str) -> Self {
        self.counter_cache = Some(column.to_string());
        self
    }

    fn target_name(&self) -> String {
        if let Some(class_name) = &self.class_name {
            return class_name.clone();
        }

        match self.kind {
            AssociationKind::HasMany => str::upper_camel_case(&str::singularize(&self.name)),
            _ => str::upper_camel_case(&self.name),
        }
    }

    pub(super) fn resolve_direct(&self, cx: &BuildSchema<'_>, owner: &Name) -> Result<Association> {
        debug_assert!(self.through.is_none());

        if self.polymorphic && self.kind != AssociationKind::BelongsTo {
            return Err(Error::invalid_schema(format!(
                "`{owner}.{}`: only belongs_to associations can be polymorphic",
                self.name
            )));
        }

        let target = if self.polymorphic {
            None
        } else {
            Some(cx.model_id(&self.target_name()).map_err(|err| {
                err.context(Error::invalid_schema(format!(
                    "association `{owner}.{}`",
                    self.name
                )))
            })?)
        };

        let foreign_key = self.foreign_key.clone().unwrap_or_else(|| match self.kind {
            AssociationKind::BelongsTo => format!("{}_id", self.name),
            _ => format!("{}_id", owner.snake_case()),
        });

        Ok(Association {
            name: self.name.clone(),
            kind: self.kind,
            target,
            foreign_key,
            through: None,
            conditions: self.conditions.clone(),
            discriminator: self.polymorphic.then(|| format!("{}_type", self.name)),
            counter_cache: self.counter_cache.clone(),
        })
    }

    /// Resolves a through association against the owner's already resolved
    /// associations and the join model's direct associations.
    pub(super) fn resolve_through(
        &self,
        cx: &BuildSchema<'_>,
        owner: &Name,
        owner_associations: &[Association],
    ) -> Result<Association> {
        let Some(through_name) = &self.through else {
            return self.resolve_direct(cx, owner);
        };

        let through = owner_associations
            .iter()
            .find(|assoc| &assoc.name == through_name && !assoc.is_through())
            .ok_or_else(|| {
                Error::invalid_schema(format!(
                    "`{owner}.{}` goes through `{through_name}`, which is not a direct association of `{owner}`",
                    self.name
                ))
            })?;

        let join_model = through.target.ok_or_else(|| {
            Error::invalid_schema(format!(
                "`{owner}.{}` cannot go through polymorphic `{through_name}`",
                self.name
            ))
        })?;

        let join_associations = cx.direct_associations(join_model)?;

        let candidates = match &self.source {
            Some(source) => vec![source.clone()],
            None => vec![str::singularize(&self.name), self.name.clone()],
        };

        let source = candidates
            .iter()
            .find_map(|name| join_associations.iter().find(|assoc| &assoc.name == name))
            .ok_or_else(|| {
                Error::invalid_schema(format!(
                    "`{owner}.{}`: no source association {candidates:?} on the join model",
                    self.name
                ))
            })?;

        if source.kind == AssociationKind::HasOne {
            return Err(Error::invalid_schema(format!(
                "`{owner}.{}`: has_one sources are not supported",
                self.name
            )));
        }

        Ok(Association {
            name: self.name.clone(),
            kind: self.kind,
            target: source.target,
            foreign_key: through.foreign_key.clone(),
            through: Some(Through {
                through: through.name.clone(),
                source: source.name.clone(),
            }),
            conditions: self.conditions.clone(),
            discriminator: None,
            counter_cache: self.counter_cache.clone(),
        })
    }
}

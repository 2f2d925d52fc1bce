use super::{resolve_key, Args};
use autoscope_core::{
    schema::{Association, ModelId},
    stmt::{Fragment, Value},
    Error, Metadata, Result,
};

/// Tests for related rows with a correlated `EXISTS` subquery.
#[derive(Debug, Clone, PartialEq)]
pub struct Exists {
    pub subquery: ExistsSubquery,

    /// Model the arguments identify rows of
    pub target: ModelId,

    pub arity: Arity,

    /// How multiple record arguments are joined
    pub combine: Combine,

    /// Wraps the whole test in `NOT (..)`
    pub negated: bool,
}

/// The two forms of an association's existence subquery.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsSubquery {
    /// Holds when any associated row exists
    pub any: String,

    /// Holds when the associated row keyed by one `?` parameter exists
    pub record: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one record argument
    One,

    /// Any number of record arguments, including none
    Many,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    All,
    Any,
}

impl Exists {
    pub(crate) fn call(&self, metadata: &dyn Metadata, args: Args<'_>) -> Result<Fragment> {
        let (condition, params) = match self.arity {
            Arity::Many => {
                let records = Value::flatten_compact(args.values());

                if records.is_empty() {
                    (self.subquery.any.clone(), vec![])
                } else {
                    let params = records
                        .iter()
                        .map(|record| resolve_key(metadata, self.target, record))
                        .collect::<Result<Vec<_>>>()?;

                    let separator = match self.combine {
                        Combine::All => " AND ",
                        Combine::Any => " OR ",
                    };

                    let condition = vec![self.subquery.record.as_str(); params.len()].join(separator);
                    (condition, params)
                }
            }
            Arity::One => {
                let [record] = args.exactly()?;

                if record.is_null() || record.is_list() {
                    return Err(args.invalid(format!("expected one record, got {record:?}")));
                }

                (
                    self.subquery.record.clone(),
                    vec![resolve_key(metadata, self.target, record)?],
                )
            }
        };

        let condition = if self.negated {
            format!("NOT ({condition})")
        } else {
            condition
        };

        Ok(Fragment::condition(condition, params))
    }
}

impl ExistsSubquery {
    /// Builds the subqueries testing `assoc` from rows of `owner`.
    ///
    /// Direct associations probe the target table. Through associations
    /// probe the join table, additionally joining the target table when the
    /// join model reaches it through a has-many.
    pub fn new(metadata: &dyn Metadata, owner: ModelId, assoc: &Association) -> Result<Self> {
        let owner_key = format!(
            "{}.{}",
            metadata.table_name(owner)?,
            metadata.primary_key(owner)?
        );

        let filter = assoc
            .conditions
            .as_ref()
            .map(|conditions| format!(" AND {conditions}"))
            .unwrap_or_default();

        let Some(through) = &assoc.through else {
            let target = target_of(assoc)?;
            let table = metadata.table_name(target)?;
            let pk = metadata.primary_key(target)?;
            let base = format!(
                "SELECT * FROM {table} WHERE {table}.{} = {owner_key}{filter}",
                assoc.foreign_key
            );

            return Ok(Self::from_base(&base, &format!("{table}.{pk}")));
        };

        let through_assoc = metadata
            .association(owner, &through.through)?
            .ok_or_else(|| missing_association(metadata, owner, &through.through))?;
        let join = target_of(through_assoc)?;
        let join_table = metadata.table_name(join)?;

        let source = metadata
            .association(join, &through.source)?
            .ok_or_else(|| missing_association(metadata, join, &through.source))?;

        if source.is_belongs_to() {
            let base = format!(
                "SELECT * FROM {join_table} WHERE {join_table}.{} = {owner_key}{filter}",
                through_assoc.foreign_key
            );
            Ok(Self::from_base(&base, &format!("{join_table}.{}", source.foreign_key)))
        } else {
            let target = target_of(assoc)?;
            let table = metadata.table_name(target)?;
            let pk = metadata.primary_key(target)?;
            let base = format!(
                "SELECT * FROM {join_table} INNER JOIN {table} ON {table}.{} = {join_table}.{} \
                 WHERE {join_table}.{} = {owner_key}{filter}",
                source.foreign_key,
                metadata.primary_key(join)?,
                through_assoc.foreign_key,
            );
            Ok(Self::from_base(&base, &format!("{table}.{pk}")))
        }
    }

    fn from_base(base: &str, key_column: &str) -> Self {
        Self {
            any: format!("EXISTS ({base})"),
            record: format!("EXISTS ({base} AND {key_column} = ?)"),
        }
    }
}

pub(crate) fn target_of(assoc: &Association) -> Result<ModelId> {
    assoc.target.ok_or_else(|| {
        Error::invalid_schema(format!(
            "association `{}` is polymorphic and has no fixed target",
            assoc.name
        ))
    })
}

fn missing_association(metadata: &dyn Metadata, model: ModelId, name: &str) -> Error {
    match metadata.model_name(model) {
        Ok(model) => Error::invalid_schema(format!("`{model}` has no association `{name}`")),
        Err(err) => err,
    }
}

use super::{exists::target_of, is_sql_identifier, Args};
use autoscope_core::{
    schema::{Association, ModelId},
    stmt::{Direction, Fragment},
    Error, Metadata, Result,
};
use std_util::str;

/// `order_by(field[, direction])`
pub(super) fn order_by(metadata: &dyn Metadata, model: ModelId, args: Args<'_>) -> Result<Fragment> {
    let values = args.between(1, 2)?;
    let field = args.string(&values[0], "the field")?;

    let direction = match values.get(1) {
        Some(direction) => Direction::from_value(direction)?,
        None => None,
    };

    let (column, include) = resolve_field(metadata, model, field, args)?;

    let order = match direction {
        Some(direction) => format!("{column} {direction}"),
        None => column,
    };

    let fragment = Fragment::order(order);

    Ok(match include {
        Some(include) => fragment.with_include(include),
        None => fragment,
    })
}

/// The expression to order by and, when it reads another table, the
/// relation to eager-load for it.
fn resolve_field(
    metadata: &dyn Metadata,
    model: ModelId,
    field: &str,
    args: Args<'_>,
) -> Result<(String, Option<String>)> {
    let table = metadata.table_name(model)?;

    if metadata.column(model, field)?.is_some() {
        return Ok((format!("{table}.{field}"), None));
    }

    if let Some(assoc) = metadata.association(model, field)? {
        let display = match assoc.target {
            Some(target) if assoc.is_one() => metadata
                .display_name(target)?
                .map(|display| (target, display)),
            _ => None,
        };

        let Some((target, display)) = display else {
            return Err(args.invalid(format!(
                "cannot order by `{field}`: the association has no display name column"
            )));
        };

        return Ok((
            format!("{}.{display}", metadata.table_name(target)?),
            Some(field.to_string()),
        ));
    }

    if let Some((assoc, aggregate)) = field.split_once('.') {
        let is_count =
            aggregate.eq_ignore_ascii_case("count") || aggregate.eq_ignore_ascii_case("size");

        if is_count {
            if let Some(assoc) = metadata.association(model, assoc)?.filter(|a| a.is_many()) {
                return Ok((count_expr(metadata, model, assoc)?, None));
            }
        }
    }

    if !is_sql_identifier(field) {
        return Err(args.invalid(format!("cannot order by {field:?}")));
    }

    Ok((field.to_string(), None))
}

/// The row count of a has-many association: the counter cache column when
/// the target's inverse association keeps one, otherwise a correlated
/// `COUNT(*)` subquery.
fn count_expr(metadata: &dyn Metadata, owner: ModelId, assoc: &Association) -> Result<String> {
    let owner_table = metadata.table_name(owner)?;
    let owner_key = format!("{owner_table}.{}", metadata.primary_key(owner)?);
    let target = target_of(assoc)?;
    let target_table = metadata.table_name(target)?;
    let target_pk = metadata.primary_key(target)?;
    let owner_name = metadata.model_name(owner)?.snake_case();

    let Some(through) = &assoc.through else {
        if let Some(counter_cache) = counter_cache(metadata, target, &owner_name)? {
            return Ok(format!("{owner_table}.{counter_cache}"));
        }

        return Ok(format!(
            "(SELECT COUNT(*) AS count_all FROM {target_table} WHERE {target_table}.{} = {owner_key})",
            assoc.foreign_key
        ));
    };

    let Some(through_assoc) = metadata.association(owner, &through.through)? else {
        return Err(missing_through(&assoc.name, &through.through));
    };
    let join = target_of(through_assoc)?;
    let join_table = metadata.table_name(join)?;

    let Some(source) = metadata.association(join, &through.source)? else {
        return Err(missing_through(&assoc.name, &through.source));
    };

    if source.is_belongs_to() {
        // Many-to-many: the target counts its owners through the same join
        // model, under the owner's plural name.
        if let Some(counter_cache) = counter_cache(metadata, target, &str::pluralize(&owner_name))? {
            return Ok(format!("{owner_table}.{counter_cache}"));
        }

        Ok(format!(
            "(SELECT COUNT(*) AS count_all FROM {target_table} \
             INNER JOIN {join_table} ON {target_table}.{target_pk} = {join_table}.{} \
             WHERE {join_table}.{} = {owner_key})",
            source.foreign_key, through_assoc.foreign_key
        ))
    } else {
        if let Some(counter_cache) = counter_cache(metadata, target, &owner_name)? {
            return Ok(format!("{owner_table}.{counter_cache}"));
        }

        Ok(format!(
            "(SELECT COUNT(*) AS count_all FROM {target_table} \
             INNER JOIN {join_table} ON {target_table}.{} = {join_table}.{} \
             WHERE {join_table}.{} = {owner_key})",
            source.foreign_key,
            metadata.primary_key(join)?,
            through_assoc.foreign_key
        ))
    }
}

fn counter_cache(metadata: &dyn Metadata, target: ModelId, inverse: &str) -> Result<Option<String>> {
    Ok(metadata
        .association(target, inverse)?
        .and_then(|assoc| assoc.counter_cache.clone()))
}

fn missing_through(assoc: &str, missing: &str) -> Error {
    Error::invalid_schema(format!(
        "`{assoc}` goes through missing association `{missing}`"
    ))
}

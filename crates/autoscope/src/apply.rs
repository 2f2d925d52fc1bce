use crate::Registry;
use autoscope_core::{
    err,
    stmt::{Query, Value},
    Metadata, Result,
};

/// Applies named scopes to `query`, in order.
///
/// A list argument is spread into positional arguments; a scalar is passed
/// as the only argument. A scope whose argument is blank (null, an
/// empty or whitespace-only string, an empty list, or a list whose first
/// element is blank) is skipped, so unset filters coming from request
/// parameters do not restrict the query.
pub fn apply<I, S>(
    registry: &Registry,
    metadata: &dyn Metadata,
    mut query: Query,
    scopes: I,
) -> Result<Query>
where
    I: IntoIterator<Item = (S, Value)>,
    S: AsRef<str>,
{
    for (name, arg) in scopes {
        let name = name.as_ref();

        let args = match arg {
            Value::List(items) => match items.first() {
                Some(first) if !first.is_blank() => items,
                _ => continue,
            },
            arg if arg.is_blank() => continue,
            arg => vec![arg],
        };

        let fragment = registry
            .call(metadata, query.model, name, &args)
            .map_err(|e| e.context(err!("applying scope `{name}`")))?;

        query.merge(fragment);
    }

    Ok(query)
}

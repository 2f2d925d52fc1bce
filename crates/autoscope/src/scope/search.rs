use super::{is_sql_identifier, Args};
use autoscope_core::{
    stmt::{Fragment, Value},
    Metadata, Result,
};

/// `search(query, field, ...)`
///
/// Every whitespace separated word of the query must match at least one of
/// the fields, case-insensitively, anywhere in the value. Fields containing
/// a `.` are used as given; others are qualified with `table`.
pub(super) fn search(metadata: &dyn Metadata, table: &str, args: Args<'_>) -> Result<Fragment> {
    let [query, fields @ ..] = args.values() else {
        return Err(args.invalid("expected a query followed by at least one field"));
    };

    let fields = Value::flatten_compact(fields)
        .into_iter()
        .map(|field| match field {
            Value::String(field) if is_sql_identifier(&field) => Ok(field),
            other => Err(args.invalid(format!("cannot search field {other:?}"))),
        })
        .collect::<Result<Vec<_>>>()?;

    if fields.is_empty() {
        return Err(args.invalid("expected at least one field to search"));
    }

    let query = match query {
        Value::Null => "",
        Value::String(query) => query.as_str(),
        other => return Err(args.invalid(format!("expected a query string, got {other:?}"))),
    };

    let words: Vec<_> = query.split_whitespace().collect();

    if words.is_empty() {
        return Ok(Fragment::empty());
    }

    let capability = metadata.capability();

    let word_clause = fields
        .iter()
        .map(|field| {
            let column = if field.contains('.') {
                field.clone()
            } else {
                format!("{table}.{field}")
            };
            format!("({})", capability.case_insensitive_like(&column, "?"))
        })
        .collect::<Vec<_>>()
        .join(" OR ");

    let condition = vec![format!("({word_clause})"); words.len()].join(" AND ");

    let params = words
        .iter()
        .flat_map(|word| std::iter::repeat(Value::String(format!("%{word}%"))).take(fields.len()))
        .collect();

    Ok(Fragment::condition(condition, params))
}

use super::Compiler;
use crate::scope::Pattern;
use autoscope_core::{
    stmt::{BinaryOp, Fragment, Value},
    Result,
};

/// Column holding a row's creation time, used by `by_most_recent` and
/// `recent`.
const CREATED_AT: &str = "created_at";

/// `state_is_<state>` on a model with a lifecycle declaring `<state>`
pub(super) fn lifecycle_state(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    let Some(state) = cx.name.strip_prefix("state_is_") else {
        return Ok(None);
    };

    let Some(lifecycle) = cx.metadata.lifecycle(cx.model)? else {
        return Ok(None);
    };

    if !lifecycle.has_state(state) {
        return Ok(None);
    }

    // Every row is in the only state there is.
    if lifecycle.states.len() == 1 {
        return Ok(Some(Pattern::Static(Fragment::empty())));
    }

    Ok(Some(Pattern::Static(Fragment::condition(
        format!("{} = ?", cx.qualify(&lifecycle.state_column)),
        vec![Value::from(state)],
    ))))
}

/// `is(record)` / `is_not(record)` on the primary key
pub(super) fn identity(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    let op = match cx.name {
        "is" => BinaryOp::Eq,
        "is_not" => BinaryOp::Ne,
        _ => return Ok(None),
    };

    let column = cx.qualify(cx.metadata.primary_key(cx.model)?);
    Ok(Some(Pattern::Compare { column, op }))
}

pub(super) fn builtin(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    let pattern = match cx.name {
        "by_most_recent" => Pattern::Static(Fragment::order(format!(
            "{} DESC",
            cx.qualify(CREATED_AT)
        ))),
        "recent" => Pattern::Recent {
            order: cx
                .column(CREATED_AT)?
                .map(|_| format!("{} DESC", cx.qualify(CREATED_AT))),
        },
        "limit" => Pattern::Limit,
        "order_by" => Pattern::OrderBy,
        "include" | "includes" => Pattern::Include,
        "search" => Pattern::Search {
            table: cx.table.to_string(),
        },
        _ => return Ok(None),
    };

    Ok(Some(pattern))
}

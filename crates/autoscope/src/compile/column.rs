use super::Compiler;
use crate::scope::{Pattern, Wildcard};
use autoscope_core::{
    stmt::{BinaryOp, Fragment, Value},
    Result,
};

const COMPARISONS: &[(&str, BinaryOp)] = &[("_is", BinaryOp::Eq), ("_is_not", BinaryOp::Ne)];

const MATCHES: &[(&str, Wildcard, bool)] = &[
    ("_contains", Wildcard::Contains, false),
    ("_does_not_contain", Wildcard::Contains, true),
    ("_starts", Wildcard::Starts, false),
    ("_does_not_start", Wildcard::Starts, true),
    ("_ends", Wildcard::Ends, false),
    ("_does_not_end", Wildcard::Ends, true),
];

/// Column suffixes tried, in order, to find the column behind a temporal
/// scope.
const TEMPORAL_SUFFIXES: &[&str] = &["_at", "_date", "_on"];

/// `<col>_is` / `<col>_is_not`
pub(super) fn compare(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    for &(suffix, op) in COMPARISONS {
        if let Some(column) = column_with_suffix(cx, suffix)? {
            return Ok(Some(Pattern::Compare { column, op }));
        }
    }
    Ok(None)
}

pub(super) fn string_match(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    for &(suffix, wildcard, negated) in MATCHES {
        if let Some(column) = column_with_suffix(cx, suffix)? {
            return Ok(Some(Pattern::Match {
                column,
                wildcard,
                negated,
            }));
        }
    }
    Ok(None)
}

/// `is_<col>` / `not_<col>` on a boolean column
pub(super) fn boolean(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    for (prefix, op) in [("is_", BinaryOp::Eq), ("not_", BinaryOp::Ne)] {
        let Some(name) = cx.name.strip_prefix(prefix) else {
            continue;
        };

        if cx.column(name)?.is_some_and(|column| column.is_boolean()) {
            return Ok(Some(Pattern::Static(Fragment::condition(
                format!("{} {op} ?", cx.qualify(name)),
                vec![Value::Bool(true)],
            ))));
        }
    }
    Ok(None)
}

/// `<base>_before`, `<base>_after`, `<base>_between`
pub(super) fn temporal(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    let (base, op) = if let Some(base) = cx.name.strip_suffix("_before") {
        (base, Some(BinaryOp::Lt))
    } else if let Some(base) = cx.name.strip_suffix("_after") {
        (base, Some(BinaryOp::Gt))
    } else if let Some(base) = cx.name.strip_suffix("_between") {
        (base, None)
    } else {
        return Ok(None);
    };

    let Some(column) = temporal_column(cx, base)? else {
        return Ok(None);
    };

    let column = cx.qualify(&column);

    Ok(Some(match op {
        Some(op) => Pattern::Compare { column, op },
        None => Pattern::Between { column },
    }))
}

fn column_with_suffix(cx: &Compiler<'_>, suffix: &str) -> Result<Option<String>> {
    let Some(name) = cx.name.strip_suffix(suffix) else {
        return Ok(None);
    };
    Ok(cx.column(name)?.map(|column| cx.qualify(&column.name)))
}

/// The first of `<base>_at`, `<base>_date`, `<base>_on` that exists, when it
/// holds dates or times.
fn temporal_column(cx: &Compiler<'_>, base: &str) -> Result<Option<String>> {
    for suffix in TEMPORAL_SUFFIXES {
        let name = format!("{base}{suffix}");

        let Some(column) = cx.column(&name)? else {
            continue;
        };

        if !column.is_temporal() {
            tracing::debug!(
                column = %name,
                ty = ?column.ty,
                "not a temporal column; skipping temporal scope"
            );
            return Ok(None);
        }

        return Ok(Some(name));
    }

    Ok(None)
}

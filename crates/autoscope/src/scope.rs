mod args;
use args::Args;

mod exists;
pub(crate) use exists::target_of;
pub use exists::{Arity, Combine, Exists, ExistsSubquery};

mod order_by;

mod reference;
pub use reference::Reference;

mod search;

use crate::compile::DEFAULT_RECENT_LIMIT;
use autoscope_core::{
    schema::ModelId,
    stmt::{BinaryOp, Fragment, Value},
    Error, Metadata, Result,
};

/// A compiled scope: the pattern a name matched for one model.
///
/// Scopes are pure functions of the model metadata they were compiled
/// against. Invoking one with [`call`](Scope::call) only reads metadata
/// again for patterns resolved per call (`order_by`, named-record
/// arguments, `search`'s match operator).
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    /// Model the scope was compiled for
    pub model: ModelId,

    pub name: String,

    pub pattern: Pattern,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `with_*`, `any_of_*`, `without_*`, and `<has_one>_is[_not]`
    Exists(Exists),

    /// `<belongs_to>_is` / `<belongs_to>_is_not`
    Reference(Reference),

    /// `<column> <op> ?`. Covers `_is`, `_is_not`, `_before`, `_after`, and
    /// the primary key comparisons `is` / `is_not`.
    Compare { column: String, op: BinaryOp },

    /// `_contains`, `_starts`, `_ends` and their `_does_not_*` negations
    Match {
        column: String,
        wildcard: Wildcard,
        negated: bool,
    },

    /// `<column> >= ? AND <column> <= ?`
    Between { column: String },

    /// A fixed fragment. Arguments are accepted and ignored.
    Static(Fragment),

    /// Row cap defaulting to [`DEFAULT_RECENT_LIMIT`], newest first when the
    /// model has a creation timestamp
    Recent { order: Option<String> },

    Limit,

    /// Ordering resolved per call from a field name and optional direction
    OrderBy,

    /// Eager-load the named relations
    Include,

    /// Multi-word, multi-field case-insensitive search
    Search { table: String },
}

/// Where a `LIKE` pattern places its wildcards around the argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    /// `%arg%`
    Contains,

    /// `arg%`
    Starts,

    /// `%arg`
    Ends,
}

impl Scope {
    /// Builds the fragment for one invocation of the scope.
    pub fn call(&self, metadata: &dyn Metadata, args: &[Value]) -> Result<Fragment> {
        let args = Args::new(&self.name, args);

        match &self.pattern {
            Pattern::Exists(exists) => exists.call(metadata, args),
            Pattern::Reference(reference) => reference.call(metadata, args),
            Pattern::Compare { column, op } => {
                let [value] = args.exactly()?;
                Ok(Fragment::condition(
                    format!("{column} {op} ?"),
                    vec![args.scalar(value)?.into_key()],
                ))
            }
            Pattern::Match {
                column,
                wildcard,
                negated,
            } => {
                let [value] = args.exactly()?;
                let text = value.to_pattern_text().ok_or_else(|| {
                    args.invalid(format!("expected a string to match against, got {value:?}"))
                })?;
                let op = if *negated { "NOT LIKE" } else { "LIKE" };
                Ok(Fragment::condition(
                    format!("{column} {op} ?"),
                    vec![Value::String(wildcard.wrap(&text))],
                ))
            }
            Pattern::Between { column } => {
                let [low, high] = args.exactly()?;
                Ok(Fragment::condition(
                    format!("{column} >= ? AND {column} <= ?"),
                    vec![args.scalar(low)?, args.scalar(high)?],
                ))
            }
            Pattern::Static(fragment) => Ok(fragment.clone()),
            Pattern::Recent { order } => {
                let count = match args.at_most(1)? {
                    [] | [Value::Null] => DEFAULT_RECENT_LIMIT,
                    [count] => args.count(count)?,
                    _ => unreachable!(),
                };
                let fragment = Fragment::limit(count);
                Ok(match order {
                    Some(order) => fragment.with_order(order),
                    None => fragment,
                })
            }
            Pattern::Limit => {
                let [count] = args.exactly()?;
                Ok(Fragment::limit(args.count(count)?))
            }
            Pattern::OrderBy => order_by::order_by(metadata, self.model, args),
            Pattern::Include => {
                let relations = Value::flatten_compact(args.values())
                    .into_iter()
                    .map(|relation| match relation {
                        Value::String(relation) => Ok(relation),
                        other => Err(args.invalid(format!(
                            "relations must be named by strings, got {other:?}"
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Fragment::includes(relations))
            }
            Pattern::Search { table } => search::search(metadata, table, args),
        }
    }

    /// True when the scope ignores its arguments.
    pub fn is_static(&self) -> bool {
        matches!(self.pattern, Pattern::Static(_))
    }
}

impl Wildcard {
    pub fn wrap(self, text: &str) -> String {
        match self {
            Wildcard::Contains => format!("%{text}%"),
            Wildcard::Starts => format!("{text}%"),
            Wildcard::Ends => format!("%{text}"),
        }
    }
}

/// Resolves an argument naming a row of `target` to the key bound into a
/// fragment. Strings are looked up by display name, records are replaced by
/// their key, anything else is taken to already be a key.
pub(crate) fn resolve_key(metadata: &dyn Metadata, target: ModelId, value: &Value) -> Result<Value> {
    match value {
        Value::String(name) => match metadata.find_by_name(target, name)? {
            Some(record) => Ok(*record.key),
            None => Err(Error::record_not_found(format!(
                "{} named {name:?}",
                metadata.model_name(target)?
            ))),
        },
        Value::List(_) => Err(Error::invalid_arguments(format!(
            "expected a record or identifier, got {value:?}"
        ))),
        value => Ok(value.clone().into_key()),
    }
}

/// Plain identifiers, optionally table qualified: `title`, `posts.title`.
pub(crate) fn is_sql_identifier(src: &str) -> bool {
    !src.is_empty()
        && src.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

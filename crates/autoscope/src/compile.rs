mod association;
mod builtin;
mod column;

use crate::scope::{Arity, Combine, Exists, ExistsSubquery, Pattern, Scope};
use autoscope_core::{
    schema::{Association, Column, ModelId},
    Metadata, Result,
};
use tracing::{debug, warn};

/// Rows returned by `recent` when no count is given.
pub const DEFAULT_RECENT_LIMIT: u64 = 6;

/// One naming convention. Returns `None` when the name does not follow it
/// for the model being compiled.
struct Rule {
    name: &'static str,
    compile: fn(&Compiler<'_>) -> Result<Option<Pattern>>,
}

impl Rule {
    const fn new(name: &'static str, compile: fn(&Compiler<'_>) -> Result<Option<Pattern>>) -> Rule {
        Rule { name, compile }
    }
}

/// Tried in order; the first rule producing a pattern wins. Association
/// rules come first so `with_team` means the association even when a
/// `with_team` column exists.
const RULES: &[Rule] = &[
    Rule::new("with_many", association::with_many),
    Rule::new("with_one", association::with_one),
    Rule::new("any_of", association::any_of),
    Rule::new("without_many", association::without_many),
    Rule::new("without_one", association::without_one),
    Rule::new("reference", association::reference),
    Rule::new("column_compare", column::compare),
    Rule::new("column_match", column::string_match),
    Rule::new("boolean", column::boolean),
    Rule::new("temporal", column::temporal),
    Rule::new("lifecycle_state", builtin::lifecycle_state),
    Rule::new("identity", builtin::identity),
    Rule::new("builtin", builtin::builtin),
];

/// Compiles `name` into a scope for `model`.
///
/// Returns `Ok(None)` when no naming convention matches, and also when the
/// metadata provider reports itself unavailable: a model whose table cannot
/// be read yet simply has no automatic scopes.
pub fn compile(metadata: &dyn Metadata, model: ModelId, name: &str) -> Result<Option<Scope>> {
    match try_compile(metadata, model, name) {
        Ok(Some((rule, pattern))) => {
            debug!(model = ?model, scope = name, rule, "compiled automatic scope");
            Ok(Some(Scope {
                model,
                name: name.to_string(),
                pattern,
            }))
        }
        Ok(None) => Ok(None),
        Err(err) if err.is_metadata_unavailable() => {
            warn!(
                model = ?model,
                scope = name,
                error = %err,
                "model metadata unavailable; skipping automatic scope"
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn try_compile(
    metadata: &dyn Metadata,
    model: ModelId,
    name: &str,
) -> Result<Option<(&'static str, Pattern)>> {
    let cx = Compiler {
        metadata,
        model,
        name,
        table: metadata.table_name(model)?,
    };

    for rule in RULES {
        if let Some(pattern) = (rule.compile)(&cx)? {
            return Ok(Some((rule.name, pattern)));
        }
    }

    Ok(None)
}

/// State shared by the rules while compiling one name.
struct Compiler<'a> {
    metadata: &'a dyn Metadata,
    model: ModelId,
    name: &'a str,
    table: &'a str,
}

impl<'a> Compiler<'a> {
    fn column(&self, name: &str) -> Result<Option<&'a Column>> {
        self.metadata.column(self.model, name)
    }

    fn association(&self, name: &str) -> Result<Option<&'a Association>> {
        self.metadata.association(self.model, name)
    }

    fn many_association(&self, name: &str) -> Result<Option<&'a Association>> {
        Ok(self.association(name)?.filter(|assoc| assoc.is_many()))
    }

    /// `table.column`
    fn qualify(&self, column: &str) -> String {
        format!("{}.{column}", self.table)
    }

    fn exists(
        &self,
        assoc: &Association,
        arity: Arity,
        combine: Combine,
        negated: bool,
    ) -> Result<Pattern> {
        Ok(Pattern::Exists(Exists {
            subquery: ExistsSubquery::new(self.metadata, self.model, assoc)?,
            target: crate::scope::target_of(assoc)?,
            arity,
            combine,
            negated,
        }))
    }
}

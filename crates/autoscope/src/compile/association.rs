use super::Compiler;
use crate::scope::{Arity, Combine, Pattern, Reference};
use autoscope_core::{stmt::BinaryOp, Result};
use std_util::str;

/// `with_<has_many>(records...)`
pub(super) fn with_many(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    many(cx, "with_", Arity::Many, Combine::All, false)
}

/// `with_<singular of has_many>(record)`
pub(super) fn with_one(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    many(cx, "with_", Arity::One, Combine::All, false)
}

pub(super) fn any_of(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    many(cx, "any_of_", Arity::Many, Combine::Any, false)
}

pub(super) fn without_many(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    many(cx, "without_", Arity::Many, Combine::All, true)
}

pub(super) fn without_one(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    many(cx, "without_", Arity::One, Combine::All, true)
}

fn many(
    cx: &Compiler<'_>,
    prefix: &str,
    arity: Arity,
    combine: Combine,
    negated: bool,
) -> Result<Option<Pattern>> {
    let Some(assoc) = cx.name.strip_prefix(prefix) else {
        return Ok(None);
    };

    // The single-record forms name the association in the singular.
    let assoc = match arity {
        Arity::Many => cx.many_association(assoc)?,
        Arity::One => cx.many_association(&str::pluralize(assoc))?,
    };

    match assoc {
        Some(assoc) => cx.exists(assoc, arity, combine, negated).map(Some),
        None => Ok(None),
    }
}

/// `<assoc>_is(record)` / `<assoc>_is_not(record)` on a belongs-to or
/// has-one association.
pub(super) fn reference(cx: &Compiler<'_>) -> Result<Option<Pattern>> {
    for (suffix, op) in [("_is", BinaryOp::Eq), ("_is_not", BinaryOp::Ne)] {
        let Some(name) = cx.name.strip_suffix(suffix) else {
            continue;
        };

        let Some(assoc) = cx.association(name)?.filter(|assoc| assoc.is_one()) else {
            continue;
        };

        if assoc.is_belongs_to() {
            return Ok(Some(Pattern::Reference(Reference {
                foreign_key: cx.qualify(&assoc.foreign_key),
                discriminator: assoc.discriminator.as_deref().map(|column| cx.qualify(column)),
                target: assoc.target,
                op,
            })));
        }

        // The foreign key of a has-one lives on the target's table.
        return cx.exists(assoc, Arity::One, Combine::All, op.is_ne()).map(Some);
    }

    Ok(None)
}

//! Convention-based query scopes.
//!
//! A scope name such as `name_contains`, `with_players` or
//! `published_before` is compiled, on first use, into a reusable
//! [`Scope`] by matching it against a model's columns and associations.
//! Compiled scopes are cached per model in a [`Registry`] and produce
//! [`Fragment`](stmt::Fragment)s that fold into a [`Query`](stmt::Query).

mod apply;
pub use apply::apply;

mod compile;
pub use compile::{compile, DEFAULT_RECENT_LIMIT};

mod registry;
pub use registry::Registry;

mod scope;
pub use scope::{Arity, Combine, Exists, ExistsSubquery, Pattern, Reference, Scope, Wildcard};

pub use autoscope_core::{driver, schema, stmt, Capability, Error, Metadata, Result, Schema};

#[macro_use]
mod fmt;
use fmt::ToSql;

mod flavor;
use flavor::Flavor;

mod params;
pub use params::{Params, Placeholder};

mod query;

mod template;
use template::Template;

use autoscope_core::{bail, stmt::Query, Metadata, Result};

/// Serialize a scoped query to a SQL string
pub struct Serializer<'a> {
    /// Describes the models queries select from
    metadata: &'a dyn Metadata,

    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl<'a> Serializer<'a> {
    /// Renders `query` as a `SELECT` statement, pushing its bound values
    /// into `params` in placeholder order.
    pub fn serialize(&self, query: &Query, params: &mut impl Params) -> Result<String> {
        let table = self.metadata.table_name(query.model)?;

        let placeholders: usize = query
            .conditions
            .iter()
            .map(|condition| Template(condition, &[]).placeholders())
            .sum();

        if placeholders != query.params.len() {
            bail!(
                "query conditions have {placeholders} placeholders but {} bound values",
                query.params.len()
            );
        }

        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        query::Select { table, query }.to_sql(&mut fmt);

        ret.push(';');
        Ok(ret)
    }
}

impl std::fmt::Debug for Serializer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serializer")
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}

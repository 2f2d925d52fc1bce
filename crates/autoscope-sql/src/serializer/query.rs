use super::{Formatter, Params, Template, ToSql};

use autoscope_core::stmt::Query;

pub(super) struct Select<'a> {
    pub(super) table: &'a str,
    pub(super) query: &'a Query,
}

/// The WHERE clause: conditions AND-ed, each parenthesized once there is
/// more than one.
struct Conditions<'a>(&'a Query);

impl ToSql for Select<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let Select { table, query } = self;

        fmt!(f, "SELECT * FROM " table);

        if !query.conditions.is_empty() {
            fmt!(f, " WHERE " Conditions(query));
        }

        if let Some(order) = &query.order {
            fmt!(f, " ORDER BY " order.as_str());
        }

        if let Some(limit) = query.limit {
            fmt!(f, " LIMIT " limit);
        }
    }
}

impl ToSql for Conditions<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let query = self.0;
        let parenthesize = query.conditions.len() > 1;
        let mut params = &query.params[..];
        let mut s = "";

        for condition in &query.conditions {
            let template = Template(condition, &[]);
            let (values, rest) = params.split_at(template.placeholders().min(params.len()));
            params = rest;

            fmt!(f, s);

            if parenthesize {
                fmt!(f, "(" Template(condition, values) ")");
            } else {
                fmt!(f, Template(condition, values));
            }

            s = " AND ";
        }
    }
}

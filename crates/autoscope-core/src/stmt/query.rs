use super::{Fragment, Value};
use crate::schema::ModelId;
use indexmap::IndexSet;

/// A query under construction: the accumulation of every fragment applied
/// to it.
///
/// Conditions are AND-ed in the order they were added. The most recent
/// non-empty ordering wins, as does the most recent limit. Includes are
/// unioned, keeping first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Model whose table the query selects from
    pub model: ModelId,

    pub conditions: Vec<String>,

    pub params: Vec<Value>,

    pub order: Option<String>,

    pub limit: Option<u64>,

    pub includes: IndexSet<String>,
}

impl Query {
    /// An unrestricted query over `model`.
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            conditions: vec![],
            params: vec![],
            order: None,
            limit: None,
            includes: IndexSet::new(),
        }
    }

    pub fn add_condition(&mut self, template: impl Into<String>, values: Vec<Value>) -> &mut Self {
        let template = template.into();
        if !template.is_empty() {
            self.conditions.push(template);
        }
        self.params.extend(values);
        self
    }

    pub fn set_order(&mut self, expr: impl Into<String>) -> &mut Self {
        let expr = expr.into();
        if !expr.is_empty() {
            self.order = Some(expr);
        }
        self
    }

    pub fn add_includes<I>(&mut self, relations: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.includes.extend(relations.into_iter().map(Into::into));
        self
    }

    pub fn set_limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Folds a fragment into the query.
    pub fn merge(&mut self, fragment: Fragment) -> &mut Self {
        let Fragment {
            condition,
            params,
            order,
            limit,
            includes,
        } = fragment;

        self.add_condition(condition.unwrap_or_default(), params);

        if let Some(order) = order {
            self.set_order(order);
        }

        if let Some(limit) = limit {
            self.set_limit(limit);
        }

        self.add_includes(includes)
    }

    /// The combined WHERE condition, each clause parenthesized so OR-ed
    /// fragments keep their meaning once AND-ed together.
    pub fn condition(&self) -> Option<String> {
        match &self.conditions[..] {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(
                many.iter()
                    .map(|condition| format!("({condition})"))
                    .collect::<Vec<_>>()
                    .join(" AND "),
            ),
        }
    }
}

use super::Value;

/// The unit a scope produces: a condition template with positional `?`
/// placeholders, the values bound to them, and optional ordering, row limit
/// and eager-load directives.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fragment {
    /// `None` means "no restriction".
    pub condition: Option<String>,

    /// Bound in placeholder order.
    pub params: Vec<Value>,

    pub order: Option<String>,

    pub limit: Option<u64>,

    /// Relations to eager-load alongside the result rows.
    pub includes: Vec<String>,
}

impl Fragment {
    /// A fragment that places no restriction on the query.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn condition(condition: impl Into<String>, params: Vec<Value>) -> Self {
        let condition = condition.into();
        Self {
            condition: (!condition.is_empty()).then_some(condition),
            params,
            ..Self::default()
        }
    }

    pub fn order(order: impl Into<String>) -> Self {
        Self::default().with_order(order)
    }

    pub fn limit(limit: u64) -> Self {
        Self::default().with_limit(limit)
    }

    pub fn includes(includes: Vec<String>) -> Self {
        Self {
            includes,
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        let order = order.into();
        self.order = (!order.is_empty()).then_some(order);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.includes.push(include.into());
        self
    }

    /// True when merging this fragment leaves a query unchanged.
    pub fn is_empty(&self) -> bool {
        self.condition.is_none()
            && self.params.is_empty()
            && self.order.is_none()
            && self.limit.is_none()
            && self.includes.is_empty()
    }
}

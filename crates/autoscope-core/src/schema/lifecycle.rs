/// A finite-state lifecycle attached to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifecycle {
    /// Column holding the current state name
    pub state_column: String,

    /// Declared states, in declaration order
    pub states: Vec<String>,
}

impl Lifecycle {
    pub fn new<I>(state_column: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            state_column: state_column.into(),
            states: states.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.iter().any(|state| state == name)
    }
}

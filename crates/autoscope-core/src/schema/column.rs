#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

/// Declared column type, as far as scope patterns care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Boolean,
    Date,
    DateTime,
    Time,
    Timestamp,
    Numeric,
    Other,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.ty.is_boolean()
    }

    pub fn is_temporal(&self) -> bool {
        self.ty.is_temporal()
    }
}

impl ColumnType {
    pub fn is_boolean(self) -> bool {
        matches!(self, Self::Boolean)
    }

    /// Date, time and timestamp columns; the ones `_before` / `_after` /
    /// `_between` scopes accept.
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            Self::Date | Self::DateTime | Self::Time | Self::Timestamp
        )
    }
}

/// What the backing database supports, as far as fragment generation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// The database provides a native case-insensitive `ILIKE` operator.
    /// When false, case-insensitive matching is spelled
    /// `LOWER(lhs) LIKE LOWER(rhs)`.
    pub native_ilike: bool,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        native_ilike: false,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        native_ilike: true,
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        // Case sensitivity follows the column collation, so stay explicit.
        native_ilike: false,
    };

    /// Case-insensitive pattern match of `lhs` against `rhs`.
    pub fn case_insensitive_like(&self, lhs: &str, rhs: &str) -> String {
        if self.native_ilike {
            format!("{lhs} ILIKE {rhs}")
        } else {
            format!("LOWER({lhs}) LIKE LOWER({rhs})")
        }
    }
}

impl Default for Capability {
    fn default() -> Self {
        Self::SQLITE
    }
}

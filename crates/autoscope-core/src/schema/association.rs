use super::ModelId;

#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    /// Name the owner declares the association under
    pub name: String,

    pub kind: AssociationKind,

    /// Associated model. `None` for polymorphic `BelongsTo`, where the target
    /// varies per row.
    pub target: Option<ModelId>,

    /// For `BelongsTo`, the column on the owner's table. For `HasOne` and
    /// `HasMany`, the column on the target's table (or the join table for
    /// through associations) referencing the owner.
    pub foreign_key: String,

    /// Set when the association pivots through another of the owner's
    /// associations.
    pub through: Option<Through>,

    /// Static SQL filter ANDed into existence subqueries
    pub conditions: Option<String>,

    /// Type discriminator column of a polymorphic `BelongsTo`
    pub discriminator: Option<String>,

    /// Column on the other side holding a precomputed row count
    pub counter_cache: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    BelongsTo,
    HasOne,
    HasMany,
}

/// Names the hops of a through association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Through {
    /// The owner's association leading to the join model
    pub through: String,

    /// The join model's association leading to the final target
    pub source: String,
}

impl Association {
    pub fn is_many(&self) -> bool {
        matches!(self.kind, AssociationKind::HasMany)
    }

    /// `BelongsTo` or `HasOne`.
    pub fn is_one(&self) -> bool {
        !self.is_many()
    }

    pub fn is_belongs_to(&self) -> bool {
        matches!(self.kind, AssociationKind::BelongsTo)
    }

    pub fn is_polymorphic(&self) -> bool {
        self.discriminator.is_some()
    }

    pub fn is_through(&self) -> bool {
        self.through.is_some()
    }
}

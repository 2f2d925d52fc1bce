#![allow(dead_code)]

use autoscope::{
    schema::{AssociationDef, ColumnType, Model, ModelId},
    stmt::{Fragment, Record, Value},
    Capability, Error, Metadata, Result, Schema,
};

pub const TEAM: ModelId = ModelId(0);
pub const PLAYER: ModelId = ModelId(1);
pub const SPONSOR: ModelId = ModelId(2);
pub const MEMBERSHIP: ModelId = ModelId(3);
pub const AWARD: ModelId = ModelId(4);
pub const VENUE: ModelId = ModelId(5);
pub const COMMENT: ModelId = ModelId(6);
pub const DRAFT: ModelId = ModelId(7);
pub const VETERAN: ModelId = ModelId(8);
pub const TAG: ModelId = ModelId(9);

/// A small league: teams with players, sponsors joined through
/// memberships, and a few odd models for the edge cases.
pub fn schema() -> Schema {
    schema_for(Capability::SQLITE)
}

pub fn schema_for(capability: Capability) -> Schema {
    let mut builder = Schema::builder();

    builder
        .model("Team")
        .column("name", ColumnType::String)
        .column("city", ColumnType::String)
        .column("active", ColumnType::Boolean)
        .column("founded_on", ColumnType::Date)
        .column("kickoff_at", ColumnType::String)
        .column("created_at", ColumnType::DateTime)
        .column("players_count", ColumnType::Numeric)
        .display_name("name")
        .has_many("players")
        .has_many("memberships")
        .association(AssociationDef::has_many("sponsors").through("memberships"))
        .association(AssociationDef::has_many("awards").through("players"))
        .has_one("venue")
        .association(
            AssociationDef::has_many("captains")
                .class_name("Player")
                .conditions("players.captain = 1"),
        );

    builder
        .model("Player")
        .column("name", ColumnType::String)
        .column("position", ColumnType::String)
        .column("captain", ColumnType::Boolean)
        .column("joined_at", ColumnType::DateTime)
        .column("created_at", ColumnType::DateTime)
        .column("state", ColumnType::String)
        .display_name("name")
        .lifecycle("state", ["active", "injured", "retired"])
        .association(AssociationDef::belongs_to("team").counter_cache("players_count"))
        .has_many("awards");

    builder
        .model("Sponsor")
        .column("name", ColumnType::String)
        .display_name("name")
        .has_many("memberships")
        .association(AssociationDef::has_many("teams").through("memberships"));

    builder
        .model("Membership")
        .column("created_at", ColumnType::DateTime)
        .belongs_to("team")
        .belongs_to("sponsor");

    builder
        .model("Award")
        .column("title", ColumnType::String)
        .belongs_to("player");

    builder
        .model("Venue")
        .column("name", ColumnType::String)
        .belongs_to("team");

    builder
        .model("Comment")
        .column("body", ColumnType::String)
        .association(AssociationDef::belongs_to("commentable").polymorphic());

    builder
        .model("Draft")
        .column("title", ColumnType::String)
        .column("status", ColumnType::String)
        .lifecycle("status", ["draft"]);

    builder
        .model("Veteran")
        .extends("Player")
        .column("seasons", ColumnType::Numeric);

    builder.model("Tag").column("label", ColumnType::String);

    builder
        .named_record("Player", "alice", 1)
        .named_record("Player", "bob", 2)
        .named_record("Sponsor", "acme", 10);

    builder.build(&capability).unwrap()
}

/// Compiles `name` for `model` and invokes it with `args`.
pub fn call(schema: &Schema, model: ModelId, name: &str, args: &[Value]) -> Result<Fragment> {
    let scope = autoscope::compile(schema, model, name)?
        .unwrap_or_else(|| panic!("`{name}` did not compile"));
    scope.call(schema, args)
}

pub fn record(model: ModelId, key: i64) -> Value {
    Value::Record(Record::new(model, key))
}

pub fn condition(fragment: &Fragment) -> &str {
    fragment.condition.as_deref().unwrap_or("")
}

/// A metadata provider whose backing store cannot be reached.
pub struct Offline;

impl Metadata for Offline {
    fn capability(&self) -> &Capability {
        &Capability::SQLITE
    }

    fn model(&self, _model: ModelId) -> Result<&Model> {
        Err(Error::metadata_unavailable("connection refused"))
    }

    fn find_by_name(&self, _model: ModelId, _name: &str) -> Result<Option<Record>> {
        Err(Error::metadata_unavailable("connection refused"))
    }
}

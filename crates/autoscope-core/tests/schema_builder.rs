use autoscope_core::schema::{AssociationDef, AssociationKind, ColumnType, Model, Through};
use autoscope_core::{Capability, Schema};
use pretty_assertions::assert_eq;
use std_util::{assert_err, assert_none, assert_ok, assert_some};

fn model<'a>(schema: &'a Schema, name: &str) -> &'a Model {
    assert_some!(schema.model_by_name(name))
}

#[test]
fn conventional_names() {
    let mut builder = Schema::builder();
    builder.model("TeamMember").column("name", ColumnType::String);
    builder.model("person");
    let schema = assert_ok!(builder.build(&Capability::SQLITE));

    let member = model(&schema, "TeamMember");
    assert_eq!(member.name.upper_camel_case(), "TeamMember");
    assert_eq!(member.table_name, "team_members");
    assert_eq!(member.primary_key, "id");
    assert_eq!(member.qualified_primary_key(), "team_members.id");

    // Names are normalized on declaration
    let person = model(&schema, "Person");
    assert_eq!(person.name.snake_case(), "person");
}

#[test]
fn explicit_names_and_prefix() {
    let mut builder = Schema::builder();
    builder.table_name_prefix("app_");
    builder.model("Team").primary_key("team_id");
    builder.model("Legacy").table_name("tbl_legacy");
    let schema = assert_ok!(builder.build(&Capability::POSTGRESQL));

    let team = model(&schema, "Team");
    assert_eq!(team.table_name, "app_teams");
    assert_eq!(team.primary_key, "team_id");

    assert_eq!(model(&schema, "Legacy").table_name, "tbl_legacy");
    assert_eq!(schema.capability, Capability::POSTGRESQL);
}

#[test]
fn models_keep_declaration_order() {
    let mut builder = Schema::builder();
    builder.model("Team");
    builder.model("Player");
    builder.model("Award");
    let schema = assert_ok!(builder.build(&Capability::SQLITE));

    let names: Vec<_> = schema
        .models()
        .map(|model| model.name.upper_camel_case())
        .collect();
    assert_eq!(names, ["Team", "Player", "Award"]);
}

// ---------------------------------------------------------------------------
// Associations
// ---------------------------------------------------------------------------

#[test]
fn association_conventions() {
    let mut builder = Schema::builder();
    builder.model("Team").has_many("players").has_one("venue");
    builder.model("Player").belongs_to("team");
    builder.model("Venue").belongs_to("team");
    let schema = assert_ok!(builder.build(&Capability::SQLITE));

    let team = model(&schema, "Team");
    let player = model(&schema, "Player");

    let players = assert_some!(team.association("players"));
    assert_eq!(players.kind, AssociationKind::HasMany);
    assert_eq!(players.target, Some(player.id));
    assert_eq!(players.foreign_key, "team_id");
    assert!(players.is_many());

    let venue = assert_some!(team.association("venue"));
    assert!(venue.is_one());
    assert!(!venue.is_belongs_to());
    assert_eq!(venue.foreign_key, "team_id");

    let team_assoc = assert_some!(player.association("team"));
    assert!(team_assoc.is_belongs_to());
    assert_eq!(team_assoc.foreign_key, "team_id");
    assert_eq!(team_assoc.target, Some(team.id));
}

#[test]
fn association_options() {
    let mut builder = Schema::builder();
    builder.model("Team").association(
        AssociationDef::has_many("captains")
            .class_name("player")
            .foreign_key("club_id")
            .conditions("players.captain = 1"),
    );
    builder.model("Player").association(
        AssociationDef::belongs_to("club")
            .class_name("Team")
            .counter_cache("players_count"),
    );
    builder
        .model("Comment")
        .association(AssociationDef::belongs_to("commentable").polymorphic());
    let schema = assert_ok!(builder.build(&Capability::SQLITE));

    let captains = assert_some!(model(&schema, "Team").association("captains"));
    assert_eq!(captains.target, Some(model(&schema, "Player").id));
    assert_eq!(captains.foreign_key, "club_id");
    assert_eq!(captains.conditions.as_deref(), Some("players.captain = 1"));

    let club = assert_some!(model(&schema, "Player").association("club"));
    assert_eq!(club.foreign_key, "club_id");
    assert_eq!(club.counter_cache.as_deref(), Some("players_count"));

    let commentable = assert_some!(model(&schema, "Comment").association("commentable"));
    assert!(commentable.is_polymorphic());
    assert_none!(commentable.target);
    assert_eq!(commentable.discriminator.as_deref(), Some("commentable_type"));
}

#[test]
fn through_associations() {
    let mut builder = Schema::builder();
    builder
        .model("Team")
        .has_many("memberships")
        .has_many("players")
        .association(AssociationDef::has_many("sponsors").through("memberships"))
        .association(AssociationDef::has_many("awards").through("players"));
    builder.model("Membership").belongs_to("team").belongs_to("sponsor");
    builder.model("Sponsor");
    builder.model("Player").belongs_to("team").has_many("awards");
    builder.model("Award").belongs_to("player");
    let schema = assert_ok!(builder.build(&Capability::SQLITE));

    let team = model(&schema, "Team");

    let sponsors = assert_some!(team.association("sponsors"));
    assert!(sponsors.is_through());
    assert_eq!(sponsors.target, Some(model(&schema, "Sponsor").id));
    assert_eq!(sponsors.foreign_key, "team_id");
    assert_eq!(
        sponsors.through,
        Some(Through {
            through: "memberships".to_string(),
            source: "sponsor".to_string(),
        })
    );

    let awards = assert_some!(team.association("awards"));
    assert_eq!(awards.target, Some(model(&schema, "Award").id));
    assert_eq!(assert_some!(awards.through.as_ref()).source, "awards");
}

#[test]
fn through_requires_direct_association() {
    let mut builder = Schema::builder();
    builder
        .model("Team")
        .association(AssociationDef::has_many("sponsors").through("memberships"));
    builder.model("Sponsor");

    let err = assert_err!(builder.build(&Capability::SQLITE));
    assert!(err.is_invalid_schema());
}

#[test]
fn through_requires_source() {
    let mut builder = Schema::builder();
    builder
        .model("Team")
        .has_many("memberships")
        .association(AssociationDef::has_many("sponsors").through("memberships"));
    builder.model("Membership").belongs_to("team");
    builder.model("Sponsor");

    let err = assert_err!(builder.build(&Capability::SQLITE));
    assert!(err.is_invalid_schema());
}

#[test]
fn unknown_target_model() {
    let mut builder = Schema::builder();
    builder.model("Team").has_many("players");

    let err = assert_err!(builder.build(&Capability::SQLITE));
    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: association `Team.players`: invalid schema: no model named `Player`"
    );
}

#[test]
fn only_belongs_to_is_polymorphic() {
    let mut builder = Schema::builder();
    builder
        .model("Team")
        .association(AssociationDef::has_many("things").polymorphic());

    let err = assert_err!(builder.build(&Capability::SQLITE));
    assert!(err.is_invalid_schema());
}

// ---------------------------------------------------------------------------
// Inheritance
// ---------------------------------------------------------------------------

#[test]
fn subclasses_share_table_and_inherit() {
    let mut builder = Schema::builder();
    // Declared before its parent
    builder
        .model("Veteran")
        .extends("Player")
        .column("seasons", ColumnType::Numeric);
    builder
        .model("Player")
        .column("name", ColumnType::String)
        .display_name("name")
        .lifecycle("state", ["active", "retired"])
        .belongs_to("team");
    builder.model("Team");
    let schema = assert_ok!(builder.build(&Capability::SQLITE));

    let player = model(&schema, "Player");
    let veteran = model(&schema, "Veteran");

    assert_eq!(veteran.parent, Some(player.id));
    assert_eq!(veteran.table_name, "players");
    assert_eq!(veteran.primary_key, "id");
    assert_some!(veteran.column("name"));
    assert_some!(veteran.column("seasons"));
    assert_none!(player.column("seasons"));
    assert_eq!(veteran.display_name.as_deref(), Some("name"));
    assert!(assert_some!(veteran.lifecycle.as_ref()).has_state("retired"));

    // The inherited association keeps the parent's foreign key
    assert_eq!(assert_some!(veteran.association("team")).foreign_key, "team_id");
}

#[test]
fn unknown_parent() {
    let mut builder = Schema::builder();
    builder.model("Veteran").extends("Player");

    let err = assert_err!(builder.build(&Capability::SQLITE));
    assert!(err.is_invalid_schema());
}

#[test]
fn inheritance_cycle() {
    let mut builder = Schema::builder();
    builder.model("A").extends("B");
    builder.model("B").extends("A");

    let err = assert_err!(builder.build(&Capability::SQLITE));
    assert!(err.is_invalid_schema());
}

mod fixtures;

use autoscope::{
    apply,
    stmt::{Query, Value},
    Capability, Registry,
};
use autoscope_sql::Serializer;
use fixtures::*;
use pretty_assertions::assert_eq;

#[test]
fn scoped_query_to_postgresql() {
    let schema = schema_for(Capability::POSTGRESQL);
    let registry = Registry::new();

    let query = apply(
        &registry,
        &schema,
        Query::new(TEAM),
        [
            ("search", Value::from(vec!["rov", "name"])),
            ("with_sponsor", Value::from("acme")),
            ("is_active", Value::from(true)),
            ("order_by", Value::from(vec!["players.count", "desc"])),
            ("limit", Value::from(20)),
        ],
    )
    .unwrap();

    let mut params: Vec<Value> = vec![];
    let sql = Serializer::postgresql(&schema)
        .serialize(&query, &mut params)
        .unwrap();

    assert_eq!(
        sql,
        "SELECT * FROM teams WHERE (((teams.name ILIKE $1))) AND \
         (EXISTS (SELECT * FROM memberships WHERE memberships.team_id = teams.id AND memberships.sponsor_id = $2)) AND \
         (teams.active = $3) \
         ORDER BY teams.players_count DESC LIMIT 20;"
    );
    assert_eq!(
        params,
        [Value::from("%rov%"), Value::I64(10), Value::Bool(true)]
    );
}

#[test]
fn scoped_query_to_sqlite() {
    let schema = schema();
    let registry = Registry::new();

    let query = apply(
        &registry,
        &schema,
        Query::new(PLAYER),
        [
            ("state_is_active", Value::from(true)),
            ("team_is_not", Value::from(3)),
            ("recent", Value::Null),
        ],
    )
    .unwrap();

    let mut params: Vec<Value> = vec![];
    let sql = Serializer::sqlite(&schema)
        .serialize(&query, &mut params)
        .unwrap();

    // `recent` with a blank argument is skipped entirely
    assert_eq!(
        sql,
        "SELECT * FROM players WHERE (players.state = ?1) AND (players.team_id <> ?2);"
    );
    assert_eq!(params, [Value::from("active"), Value::I64(3)]);
}

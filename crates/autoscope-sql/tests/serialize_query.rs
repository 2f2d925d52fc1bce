use autoscope_core::{
    schema::{ColumnType, ModelId},
    stmt::{Fragment, Query, Value},
    Capability, Schema,
};
use autoscope_sql::{Params, Placeholder, Serializer};
use pretty_assertions::assert_eq;

const TEAM: ModelId = ModelId(0);

struct NoParams;

impl Params for NoParams {
    fn push(&mut self, _: &Value) -> Placeholder {
        Placeholder(0)
    }
}

fn schema() -> Schema {
    let mut builder = Schema::builder();
    builder
        .model("Team")
        .column("name", ColumnType::String)
        .column("created_at", ColumnType::DateTime);
    builder.build(&Capability::SQLITE).unwrap()
}

fn scoped_query() -> Query {
    let mut query = Query::new(TEAM);
    query
        .merge(Fragment::condition(
            "teams.name LIKE ? OR teams.name LIKE ?",
            vec!["a%".into(), "b%".into()],
        ))
        .merge(Fragment::condition("teams.active = ?", vec![true.into()]))
        .merge(Fragment::limit(3).with_order("teams.created_at DESC"));
    query
}

fn serialize(flavor: &str, query: &Query) -> (String, Vec<Value>) {
    let schema = schema();
    let serializer = match flavor {
        "sqlite" => Serializer::sqlite(&schema),
        "postgresql" => Serializer::postgresql(&schema),
        "mysql" => Serializer::mysql(&schema),
        _ => panic!("unknown flavor: {flavor}"),
    };

    let mut params: Vec<Value> = vec![];
    let sql = serializer.serialize(query, &mut params).unwrap();
    (sql, params)
}

#[test]
fn unrestricted_query() {
    let (sql, params) = serialize("sqlite", &Query::new(TEAM));
    assert_eq!(sql, "SELECT * FROM teams;");
    assert!(params.is_empty());
}

#[test]
fn single_condition() {
    let mut query = Query::new(TEAM);
    query.add_condition("teams.name = ?", vec!["Rovers".into()]);

    let (sql, params) = serialize("postgresql", &query);
    assert_eq!(sql, "SELECT * FROM teams WHERE teams.name = $1;");
    assert_eq!(params, [Value::from("Rovers")]);
}

#[test]
fn sqlite_placeholders() {
    let (sql, params) = serialize("sqlite", &scoped_query());

    assert_eq!(
        sql,
        "SELECT * FROM teams WHERE (teams.name LIKE ?1 OR teams.name LIKE ?2) AND (teams.active = ?3) \
         ORDER BY teams.created_at DESC LIMIT 3;"
    );
    assert_eq!(
        params,
        [Value::from("a%"), Value::from("b%"), Value::Bool(true)]
    );
}

#[test]
fn postgresql_placeholders() {
    let (sql, _) = serialize("postgresql", &scoped_query());

    assert_eq!(
        sql,
        "SELECT * FROM teams WHERE (teams.name LIKE $1 OR teams.name LIKE $2) AND (teams.active = $3) \
         ORDER BY teams.created_at DESC LIMIT 3;"
    );
}

#[test]
fn mysql_placeholders() {
    let (sql, _) = serialize("mysql", &scoped_query());

    assert_eq!(
        sql,
        "SELECT * FROM teams WHERE (teams.name LIKE ? OR teams.name LIKE ?) AND (teams.active = ?) \
         ORDER BY teams.created_at DESC LIMIT 3;"
    );
}

#[test]
fn question_marks_in_literals_are_not_placeholders() {
    let mut query = Query::new(TEAM);
    query.add_condition("teams.name <> 'who?' AND teams.name = ?", vec!["x".into()]);

    let (sql, params) = serialize("sqlite", &query);
    assert_eq!(
        sql,
        "SELECT * FROM teams WHERE teams.name <> 'who?' AND teams.name = ?1;"
    );
    assert_eq!(params.len(), 1);
}

#[test]
fn custom_params() {
    let schema = schema();
    let sql = Serializer::mysql(&schema)
        .serialize(&scoped_query(), &mut NoParams)
        .unwrap();
    assert!(sql.starts_with("SELECT * FROM teams WHERE (teams.name LIKE ?"));
}

#[test]
fn mismatched_params() {
    let schema = schema();
    let mut query = Query::new(TEAM);
    query.add_condition("teams.name = ? OR teams.name = ?", vec!["x".into()]);

    let err = Serializer::sqlite(&schema)
        .serialize(&query, &mut Vec::<Value>::new())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "query conditions have 2 placeholders but 1 bound values"
    );
}

#[test]
fn unknown_model() {
    let schema = schema();
    let err = Serializer::sqlite(&schema)
        .serialize(&Query::new(ModelId(9)), &mut Vec::<Value>::new())
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

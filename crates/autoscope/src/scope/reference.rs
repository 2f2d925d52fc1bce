use super::{resolve_key, Args};
use autoscope_core::{
    schema::ModelId,
    stmt::{BinaryOp, Fragment, Value},
    Metadata, Result,
};

/// Compares a belongs-to foreign key against a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Qualified foreign key column
    pub foreign_key: String,

    /// Qualified type column of a polymorphic association
    pub discriminator: Option<String>,

    /// `None` for polymorphic associations
    pub target: Option<ModelId>,

    pub op: BinaryOp,
}

impl Reference {
    pub(crate) fn call(&self, metadata: &dyn Metadata, args: Args<'_>) -> Result<Fragment> {
        let [record] = args.exactly()?;
        let foreign_key = &self.foreign_key;
        let op = self.op;

        let Some(discriminator) = &self.discriminator else {
            let key = match self.target {
                Some(target) => resolve_key(metadata, target, record)?,
                None => args.scalar(record)?.into_key(),
            };
            return Ok(Fragment::condition(format!("{foreign_key} {op} ?"), vec![key]));
        };

        let Value::Record(record) = record else {
            return Err(args.invalid(format!(
                "a polymorphic association is matched by record, got {record:?}"
            )));
        };

        let type_name = metadata.model_name(record.model)?.upper_camel_case();
        let joiner = if op.is_ne() { "OR" } else { "AND" };

        Ok(Fragment::condition(
            format!("{foreign_key} {op} ? {joiner} {discriminator} {op} ?"),
            vec![(*record.key).clone(), Value::String(type_name)],
        ))
    }
}

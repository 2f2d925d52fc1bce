//! Values bound into scopes and the fragments scopes produce.

mod direction;
pub use direction::Direction;

mod fragment;
pub use fragment::Fragment;

mod op_binary;
pub use op_binary::BinaryOp;

mod query;
pub use query::Query;

mod record;
pub use record::Record;

mod value;
pub use value::Value;

mod value_chrono;

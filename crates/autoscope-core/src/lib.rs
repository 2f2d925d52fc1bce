pub mod driver;
pub use driver::Capability;

mod error;
pub use error::{Error, IntoError};

mod metadata;
pub use metadata::Metadata;

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses autoscope's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

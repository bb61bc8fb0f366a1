pub mod errors;
pub mod models;
pub mod session;
pub mod tasks;

pub use errors::{
    CompareError,
    FormError,
    SchemaError,
};
pub use models::{
    FieldValue,
    Record,
    SearchCriteria,
    MISSING_VALUE,
};
pub use session::Session;

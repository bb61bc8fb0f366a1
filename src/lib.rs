pub mod category;
pub mod comparison;
pub mod core;
pub mod form;
pub mod gui;
pub mod logging;
pub mod persistence;
pub mod query;
pub mod schema;

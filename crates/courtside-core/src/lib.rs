#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod list;
pub mod result;
pub mod schema;
pub mod spec;
pub mod templates;
pub mod traits;
pub mod types;
pub mod validate;

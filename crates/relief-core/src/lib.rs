pub mod error;
pub mod ids;
pub mod schedule;
pub mod schema;
pub mod timestamp;

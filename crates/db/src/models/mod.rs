//! Row types for the `sessions` and `projects` tables.

pub mod project;
pub mod session;

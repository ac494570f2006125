//! Focus Flow domain core.
//!
//! Data contracts for session and project records, their validation, the
//! shared error taxonomy, and the pure timer state machine. This crate has
//! zero internal deps so both the service and the timer client can use it.

pub mod error;
pub mod project;
pub mod session;
pub mod timer;
pub mod types;
mod validation;

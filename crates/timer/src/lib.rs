//! `focusflow-timer` library crate.
//!
//! [`runner`] drives the timer and hands finished phases to a
//! [`runner::SessionReporter`]; [`client`] is the HTTP implementation of
//! that. The binary entrypoint lives in `main.rs`.

pub mod client;
pub mod command;
pub mod config;
pub mod runner;

pub mod project;
pub mod session;

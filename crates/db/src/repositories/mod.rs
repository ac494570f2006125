//! Query layer, one zero-sized repo per table.

mod project_repo;
mod session_repo;

pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;

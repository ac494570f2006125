//! The record store seam.
//!
//! Handlers hold an `Arc<dyn RecordStore>` so the backend is chosen at
//! startup. Every write is a single independent insert; nothing here reads
//! and then writes the same record, so implementations need no per-record
//! locking.

use async_trait::async_trait;
use focusflow_core::project::{NewProject, Project};
use focusflow_core::session::{NewSession, Session};
use focusflow_core::types::RecordId;

use crate::StoreError;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Create and read access to the session and project collections.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Assign an identity to `input`, persist it, and return the stored record.
    async fn insert_session(&self, input: NewSession) -> Result<Session, StoreError>;

    /// All sessions ordered by `date` descending.
    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError>;

    /// The session with identity `id`, if any.
    async fn find_session(&self, id: RecordId) -> Result<Option<Session>, StoreError>;

    /// Assign an identity to `input`, persist it, and return the stored record.
    async fn insert_project(&self, input: NewProject) -> Result<Project, StoreError>;

    /// All projects ordered by `begin_date` descending.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Whether the backing store is currently reachable.
    async fn health_check(&self) -> bool;
}

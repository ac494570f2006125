use async_trait::async_trait;
use focusflow_core::project::{NewProject, Project};
use focusflow_core::session::{NewSession, Session};
use focusflow_core::types::{new_record_id, RecordId};
use tokio::sync::RwLock;

use crate::StoreError;

/// In-process [`RecordStore`](super::RecordStore).
///
/// Records are kept in insertion order; listing sorts a snapshot so that
/// ties on the ordering field go to the most recent insert, matching the
/// PostgreSQL store.
#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<Vec<Session>>,
    projects: RwLock<Vec<Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl super::RecordStore for MemoryStore {
    async fn insert_session(&self, input: NewSession) -> Result<Session, StoreError> {
        let session = input.into_session(new_record_id());
        self.sessions.write().await.push(session.clone());
        Ok(session)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError> {
        let mut sessions: Vec<Session> = self.sessions.read().await.iter().rev().cloned().collect();
        // Stable sort keeps newest-first among equal dates.
        sessions.sort_by_key(|s| std::cmp::Reverse(s.date.instant()));
        Ok(sessions)
    }

    async fn find_session(&self, id: RecordId) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_project(&self, input: NewProject) -> Result<Project, StoreError> {
        let project = input.into_project(new_record_id());
        self.projects.write().await.push(project.clone());
        Ok(project)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self.projects.read().await.iter().rev().cloned().collect();
        projects.sort_by_key(|p| std::cmp::Reverse(p.begin_date.instant()));
        Ok(projects)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

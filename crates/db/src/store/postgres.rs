use async_trait::async_trait;
use focusflow_core::project::{NewProject, Project};
use focusflow_core::session::{NewSession, Session};
use focusflow_core::types::{new_record_id, RecordId};

use crate::repositories::{ProjectRepo, SessionRepo};
use crate::{DbPool, StoreError};

/// [`RecordStore`](super::RecordStore) backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl super::RecordStore for PgStore {
    async fn insert_session(&self, input: NewSession) -> Result<Session, StoreError> {
        let row = SessionRepo::create(&self.pool, new_record_id(), &input).await?;
        let session = Session::try_from(row)?;
        tracing::debug!(id = %session.id, kind = %session.kind, "Session stored");
        Ok(session)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError> {
        SessionRepo::list(&self.pool)
            .await?
            .into_iter()
            .map(Session::try_from)
            .collect()
    }

    async fn find_session(&self, id: RecordId) -> Result<Option<Session>, StoreError> {
        SessionRepo::find_by_id(&self.pool, id)
            .await?
            .map(Session::try_from)
            .transpose()
    }

    async fn insert_project(&self, input: NewProject) -> Result<Project, StoreError> {
        let row = ProjectRepo::create(&self.pool, new_record_id(), &input).await?;
        let project = Project::try_from(row)?;
        tracing::debug!(id = %project.id, "Project stored");
        Ok(project)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        ProjectRepo::list(&self.pool)
            .await?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }

    async fn health_check(&self) -> bool {
        match crate::health_check(&self.pool).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}

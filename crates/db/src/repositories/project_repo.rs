//! Repository for the `projects` table.

use focusflow_core::project::NewProject;
use focusflow_core::types::RecordId;
use sqlx::PgPool;

use crate::models::project::ProjectRow;

const COLUMNS: &str = "id, name, begin_date, deadline";

/// Insert and list operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project under `id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        id: RecordId,
        input: &NewProject,
    ) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, name, begin_date, begin_date_at, deadline)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.begin_date.as_str())
            .bind(input.begin_date.instant())
            .bind(input.deadline.as_str())
            .fetch_one(pool)
            .await
    }

    /// List every project, latest `begin_date` first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects ORDER BY begin_date_at DESC, id DESC");
        sqlx::query_as::<_, ProjectRow>(&query).fetch_all(pool).await
    }
}

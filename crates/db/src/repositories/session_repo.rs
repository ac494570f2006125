//! Repository for the `sessions` table.

use focusflow_core::session::NewSession;
use focusflow_core::types::RecordId;
use sqlx::PgPool;

use crate::models::session::SessionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, duration, date, notes";

/// Insert and read operations for sessions. There is no update or delete.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session under `id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        id: RecordId,
        input: &NewSession,
    ) -> Result<SessionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (id, kind, duration, date, date_at, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .bind(input.kind.as_str())
            .bind(i64::from(input.duration))
            .bind(input.date.as_str())
            .bind(input.date.instant())
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its identity.
    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every session, most recent `date` first. Ties go to the newer
    /// insert (UUIDv7 ids sort by creation time).
    pub async fn list(pool: &PgPool) -> Result<Vec<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions ORDER BY date_at DESC, id DESC");
        sqlx::query_as::<_, SessionRow>(&query).fetch_all(pool).await
    }
}

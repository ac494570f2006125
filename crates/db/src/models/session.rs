//! Session row model.

use focusflow_core::session::Session;
use focusflow_core::types::{RecordDate, RecordId};
use sqlx::FromRow;

use crate::StoreError;

/// A row from the `sessions` table. `date` is the stored RFC 3339 text.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: RecordId,
    pub kind: String,
    pub duration: i64,
    pub date: String,
    pub notes: Option<String>,
}

impl TryFrom<SessionRow> for Session {
    type Error = StoreError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("session {} has kind '{}'", row.id, row.kind)))?;
        let duration = u32::try_from(row.duration).map_err(|_| {
            StoreError::Corrupt(format!("session {} has duration {}", row.id, row.duration))
        })?;
        let date = RecordDate::parse(row.date.as_str()).map_err(|_| {
            StoreError::Corrupt(format!("session {} has date '{}'", row.id, row.date))
        })?;

        Ok(Session {
            id: row.id,
            kind,
            duration,
            date,
            notes: row.notes,
        })
    }
}

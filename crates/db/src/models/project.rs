//! Project row model.

use focusflow_core::project::Project;
use focusflow_core::types::{RecordDate, RecordId};
use sqlx::FromRow;

use crate::StoreError;

/// A row from the `projects` table. Dates are the stored RFC 3339 text.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: RecordId,
    pub name: String,
    pub begin_date: String,
    pub deadline: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = StoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |field: &str, value: &str| {
            StoreError::Corrupt(format!("project {id} has {field} '{value}'"))
        };
        let begin_date = RecordDate::parse(row.begin_date.as_str())
            .map_err(|_| corrupt("begin_date", &row.begin_date))?;
        let deadline = RecordDate::parse(row.deadline.as_str())
            .map_err(|_| corrupt("deadline", &row.deadline))?;

        Ok(Project {
            id,
            name: row.name,
            begin_date,
            deadline,
        })
    }
}

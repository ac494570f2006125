//! Project records: a user-defined task with a start and a deadline.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{RecordDate, RecordId};
use crate::validation::{check_fields, parse_record_date, required};

/// A stored project, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    pub begin_date: RecordDate,
    /// Expected to fall on or after `begin_date`; never enforced.
    pub deadline: RecordDate,
}

/// A validated project ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub begin_date: RecordDate,
    pub deadline: RecordDate,
}

impl NewProject {
    /// Attach a store-assigned identity.
    pub fn into_project(self, id: RecordId) -> Project {
        Project {
            id,
            name: self.name,
            begin_date: self.begin_date,
            deadline: self.deadline,
        }
    }
}

/// Raw `POST /projects` body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub begin_date: Option<String>,
    #[validate(required, length(min = 1))]
    pub deadline: Option<String>,
}

impl CreateProject {
    /// Check required fields and parse them into a typed [`NewProject`].
    ///
    /// A `beginDate` later than `deadline` is accepted as-is.
    pub fn validate_into(self) -> Result<NewProject, CoreError> {
        check_fields(&self, wire_name)?;

        let name = required(self.name, "name")?;
        if name.trim().is_empty() {
            return Err(CoreError::Validation("name must not be blank".to_string()));
        }
        let begin_date = parse_record_date("beginDate", required(self.begin_date, "beginDate")?)?;
        let deadline = parse_record_date("deadline", required(self.deadline, "deadline")?)?;

        Ok(NewProject {
            name,
            begin_date,
            deadline,
        })
    }
}

fn wire_name(field: &str) -> &str {
    match field {
        "begin_date" => "beginDate",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> CreateProject {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn complete_body_validates() {
        let new = body(serde_json::json!({
            "name": "Thesis",
            "beginDate": "2024-01-01T00:00:00Z",
            "deadline": "2024-06-30T00:00:00Z"
        }))
        .validate_into()
        .unwrap();

        assert_eq!(new.name, "Thesis");
        assert!(new.begin_date.instant() < new.deadline.instant());
    }

    #[test]
    fn begin_after_deadline_is_accepted() {
        let new = body(serde_json::json!({
            "name": "Backwards",
            "beginDate": "2024-06-30T00:00:00Z",
            "deadline": "2024-01-01T00:00:00Z"
        }))
        .validate_into()
        .unwrap();

        assert!(new.begin_date.instant() > new.deadline.instant());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = body(serde_json::json!({
            "name": "   ",
            "beginDate": "2024-01-01T00:00:00Z",
            "deadline": "2024-06-30T00:00:00Z"
        }))
        .validate_into()
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: name must not be blank");
    }

    #[test]
    fn empty_name_is_reported_as_invalid_field() {
        let err = body(serde_json::json!({
            "name": "",
            "beginDate": "2024-01-01T00:00:00Z",
            "deadline": "2024-06-30T00:00:00Z"
        }))
        .validate_into()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: missing or invalid field(s): name"
        );
    }

    #[test]
    fn missing_dates_use_wire_names() {
        let err = body(serde_json::json!({ "name": "No dates" }))
            .validate_into()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: missing or invalid field(s): beginDate, deadline"
        );
    }

    #[test]
    fn project_serializes_camel_case() {
        let project = NewProject {
            name: "Launch".to_string(),
            begin_date: "2024-01-01T00:00:00Z".parse().unwrap(),
            deadline: "2024-02-01T00:00:00Z".parse().unwrap(),
        }
        .into_project(uuid::Uuid::nil());

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["beginDate"], "2024-01-01T00:00:00Z");
        assert_eq!(json["deadline"], "2024-02-01T00:00:00Z");
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
    }
}

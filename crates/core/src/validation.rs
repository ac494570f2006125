//! Helpers shared by the create-body validators.

use validator::Validate;

use crate::error::CoreError;
use crate::types::RecordDate;

/// Run the derived `validator` rules and fold every failing field into a
/// single [`CoreError::Validation`].
///
/// `wire_name` maps Rust field names back to the JSON names callers sent.
pub(crate) fn check_fields<T: Validate>(
    input: &T,
    wire_name: fn(&str) -> &str,
) -> Result<(), CoreError> {
    input.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| wire_name(&field).to_string())
            .collect();
        fields.sort();
        CoreError::Validation(format!(
            "missing or invalid field(s): {}",
            fields.join(", ")
        ))
    })
}

/// Pull a field that `check_fields` already proved present.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("missing or invalid field(s): {field}")))
}

/// Check that `value` is an RFC 3339 timestamp, keeping its text unchanged.
pub(crate) fn parse_record_date(field: &str, value: String) -> Result<RecordDate, CoreError> {
    RecordDate::parse(value.as_str()).map_err(|e| {
        CoreError::Validation(format!(
            "{field} must be an RFC 3339 timestamp, got '{value}': {e}"
        ))
    })
}

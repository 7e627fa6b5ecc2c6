//! Response envelope parsing.
//!
//! Every backend response is `{ "success": bool, "data"?: .., "message"?: .. }`.
//! Bodies are validated into [`ApiEnvelope`] as soon as they arrive so that
//! nothing downstream ever probes optional JSON fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Pagination block returned by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "totalPages")]
    pub total_pages: u32,
}

/// A validated backend response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEnvelope<T> {
    Success {
        data: T,
        pagination: Option<Pagination>,
    },
    Failure {
        code: Option<String>,
        message: String,
    },
}

impl<T> ApiEnvelope<T> {
    /// Collapse into a result, turning `success: false` into [`AppError::Rejected`].
    pub fn into_result(self) -> Result<(T, Option<Pagination>), AppError> {
        match self {
            ApiEnvelope::Success { data, pagination } => Ok((data, pagination)),
            ApiEnvelope::Failure { message, .. } => Err(AppError::Rejected(message)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<RawError>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawError {
    Text(String),
    Details {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

const GENERIC_FAILURE: &str = "The request was not successful";

/// Parse a response body into a strict envelope.
///
/// A body that is not an envelope at all, or a successful envelope whose
/// `data` does not deserialize into `T`, is [`AppError::Malformed`].
pub fn parse_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<ApiEnvelope<T>, AppError> {
    let raw: RawEnvelope = serde_json::from_slice(body)
        .map_err(|e| AppError::Malformed(format!("Response is not an API envelope: {}", e)))?;

    if !raw.success {
        let (code, detail) = match raw.error {
            Some(RawError::Text(text)) => (None, Some(text)),
            Some(RawError::Details { code, message }) => (code, message),
            None => (None, None),
        };
        let message = raw
            .message
            .or(detail)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Ok(ApiEnvelope::Failure { code, message });
    }

    let data = serde_json::from_value(raw.data.unwrap_or(Value::Null))
        .map_err(|e| AppError::Malformed(format!("Unexpected data shape: {}", e)))?;

    Ok(ApiEnvelope::Success {
        data,
        pagination: raw.pagination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, StatusUpdate};

    #[test]
    fn test_success_with_list_and_pagination() {
        let body = br#"{
            "success": true,
            "data": [{"id": 1, "title": "Excavator Basics", "display_order": 1, "is_active": true}],
            "pagination": {"page": 1, "limit": 20, "total": 1, "totalPages": 1}
        }"#;
        let envelope: ApiEnvelope<Vec<Course>> = parse_envelope(body).unwrap();
        let (courses, pagination) = envelope.into_result().unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].title, "Excavator Basics");
        assert_eq!(pagination.unwrap().total_pages, 1);
    }

    #[test]
    fn test_failure_message_surfaces_verbatim() {
        let body = br#"{"success": false, "message": "Course has active enrollments"}"#;
        let envelope: ApiEnvelope<StatusUpdate> = parse_envelope(body).unwrap();
        assert_eq!(
            envelope.into_result().unwrap_err(),
            AppError::Rejected("Course has active enrollments".into())
        );
    }

    #[test]
    fn test_failure_with_error_object() {
        let body = br#"{
            "success": false,
            "error": {"code": "NOT_FOUND", "message": "Partner 9 not found"}
        }"#;
        match parse_envelope::<StatusUpdate>(body).unwrap() {
            ApiEnvelope::Failure { code, message } => {
                assert_eq!(code.as_deref(), Some("NOT_FOUND"));
                assert_eq!(message, "Partner 9 not found");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_without_message_gets_generic_text() {
        let body = br#"{"success": false}"#;
        let err = parse_envelope::<()>(body).unwrap().into_result().unwrap_err();
        assert_eq!(err, AppError::Rejected(GENERIC_FAILURE.into()));
    }

    #[test]
    fn test_unit_data_accepts_missing_field() {
        let body = br#"{"success": true, "message": "Order updated"}"#;
        let envelope: ApiEnvelope<()> = parse_envelope(body).unwrap();
        assert!(envelope.into_result().is_ok());
    }

    #[test]
    fn test_ignored_data_accepts_any_payload() {
        use serde::de::IgnoredAny;

        for body in [
            &br#"{"success": true, "data": {"updated": 3, "items": []}}"#[..],
            &br#"{"success": true, "data": [1, 2]}"#[..],
            &br#"{"success": true}"#[..],
        ] {
            let envelope: ApiEnvelope<IgnoredAny> = parse_envelope(body).unwrap();
            assert!(envelope.into_result().is_ok());
        }
    }

    #[test]
    fn test_missing_success_flag_is_malformed() {
        let err = parse_envelope::<Vec<Course>>(br#"{"data": []}"#).unwrap_err();
        assert_eq!(err.error_code(), crate::errors::codes::MALFORMED_RESPONSE);

        let err = parse_envelope::<Vec<Course>>(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, AppError::Malformed(_)));
    }

    #[test]
    fn test_wrong_data_shape_is_malformed() {
        let body = br#"{"success": true, "data": {"is_active": "yes"}}"#;
        let err = parse_envelope::<StatusUpdate>(body).unwrap_err();
        assert!(matches!(err, AppError::Malformed(_)));
    }
}

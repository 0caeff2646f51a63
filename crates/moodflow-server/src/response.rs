use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success body: `{"success": true, "message"?, "data"?, "count"?, "changes"?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize = ()> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<usize>,
    #[serde(skip)]
    status: StatusCode,
}

impl Envelope<()> {
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }
}

impl<T: Serialize> Envelope<T> {
    fn with_status(status: StatusCode) -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            count: None,
            changes: None,
            status,
        }
    }

    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::with_status(StatusCode::OK)
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::with_status(StatusCode::CREATED)
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn changes(mut self, changes: usize) -> Self {
        self.changes = Some(changes);
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = serde_json::to_value(Envelope::ok().message("done").changes(1)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": true, "message": "done", "changes": 1})
        );
    }

    #[test]
    fn test_data_with_count() {
        let body = serde_json::to_value(Envelope::data(vec![1, 2]).count(2)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": true, "data": [1, 2], "count": 2})
        );
    }

    #[test]
    fn test_created_status() {
        let response = Envelope::created(1).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

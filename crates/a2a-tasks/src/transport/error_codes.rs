//! JSON-RPC error objects and the fixed code ↔ kind table of the task protocol.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol-level error kinds, one per fixed JSON-RPC code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    TaskNotFound,
    TaskNotCancelable,
    PushNotificationUnsupported,
    UnsupportedOperation,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 9] = [
        ErrorKind::ParseError,
        ErrorKind::InvalidRequest,
        ErrorKind::MethodNotFound,
        ErrorKind::InvalidParams,
        ErrorKind::InternalError,
        ErrorKind::TaskNotFound,
        ErrorKind::TaskNotCancelable,
        ErrorKind::PushNotificationUnsupported,
        ErrorKind::UnsupportedOperation,
    ];

    /// Map a numeric code to its kind. Unlisted codes are internal errors.
    pub fn from_code(code: i64) -> Self {
        match code {
            -32700 => ErrorKind::ParseError,
            -32600 => ErrorKind::InvalidRequest,
            -32601 => ErrorKind::MethodNotFound,
            -32602 => ErrorKind::InvalidParams,
            -32603 => ErrorKind::InternalError,
            -32001 => ErrorKind::TaskNotFound,
            -32002 => ErrorKind::TaskNotCancelable,
            -32003 => ErrorKind::PushNotificationUnsupported,
            -32004 => ErrorKind::UnsupportedOperation,
            _ => ErrorKind::InternalError,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            ErrorKind::ParseError => -32700,
            ErrorKind::InvalidRequest => -32600,
            ErrorKind::MethodNotFound => -32601,
            ErrorKind::InvalidParams => -32602,
            ErrorKind::InternalError => -32603,
            ErrorKind::TaskNotFound => -32001,
            ErrorKind::TaskNotCancelable => -32002,
            ErrorKind::PushNotificationUnsupported => -32003,
            ErrorKind::UnsupportedOperation => -32004,
        }
    }

    /// The protocol's canonical message for this kind.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::ParseError => "Invalid JSON payload",
            ErrorKind::InvalidRequest => "Request payload validation error",
            ErrorKind::MethodNotFound => "Method not found",
            ErrorKind::InvalidParams => "Invalid parameters",
            ErrorKind::InternalError => "Internal error",
            ErrorKind::TaskNotFound => "Task not found",
            ErrorKind::TaskNotCancelable => "Task cannot be canceled",
            ErrorKind::PushNotificationUnsupported => "Push Notification is not supported",
            ErrorKind::UnsupportedOperation => "This operation is not supported",
        }
    }

    /// Coarse client-facing category for this kind.
    pub fn status_category(self) -> StatusCategory {
        match self {
            ErrorKind::ParseError | ErrorKind::InvalidRequest | ErrorKind::InvalidParams => {
                StatusCategory::BadRequest
            }
            ErrorKind::MethodNotFound | ErrorKind::TaskNotFound => StatusCategory::NotFound,
            ErrorKind::InternalError
            | ErrorKind::TaskNotCancelable
            | ErrorKind::PushNotificationUnsupported
            | ErrorKind::UnsupportedOperation => StatusCategory::InternalError,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::ParseError => "parse error",
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::MethodNotFound => "method not found",
            ErrorKind::InvalidParams => "invalid params",
            ErrorKind::InternalError => "internal error",
            ErrorKind::TaskNotFound => "task not found",
            ErrorKind::TaskNotCancelable => "task not cancelable",
            ErrorKind::PushNotificationUnsupported => "push notification unsupported",
            ErrorKind::UnsupportedOperation => "unsupported operation",
        };
        f.write_str(name)
    }
}

/// Coarse outcome categories used by convenience layers and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Success,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalError,
}

impl StatusCategory {
    /// Categorise a raw HTTP status for failures that never reached JSON-RPC.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200..=299 => StatusCategory::Success,
            401 => StatusCategory::Unauthorized,
            403 => StatusCategory::Forbidden,
            404 => StatusCategory::NotFound,
            400..=499 => StatusCategory::BadRequest,
            _ => StatusCategory::InternalError,
        }
    }

    /// The HTTP status conventionally paired with this category.
    pub fn http_status(self) -> u16 {
        match self {
            StatusCategory::Success => 200,
            StatusCategory::BadRequest => 400,
            StatusCategory::Unauthorized => 401,
            StatusCategory::Forbidden => 403,
            StatusCategory::NotFound => 404,
            StatusCategory::InternalError => 500,
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatusCategory::Success => "success",
            StatusCategory::BadRequest => "bad request",
            StatusCategory::Unauthorized => "unauthorized",
            StatusCategory::Forbidden => "forbidden",
            StatusCategory::NotFound => "not found",
            StatusCategory::InternalError => "internal error",
        };
        f.write_str(name)
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JsonRpcError {
    pub code: i64,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// An error of the given kind with its canonical message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self {
            code: kind.code(),
            message: kind.default_message().into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The protocol kind for this error's code.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_code(self.code)
    }

    pub fn parse_error() -> Self {
        Self::from_kind(ErrorKind::ParseError)
    }

    pub fn invalid_request() -> Self {
        Self::from_kind(ErrorKind::InvalidRequest)
    }

    pub fn method_not_found() -> Self {
        Self::from_kind(ErrorKind::MethodNotFound)
    }

    pub fn invalid_params() -> Self {
        Self::from_kind(ErrorKind::InvalidParams)
    }

    pub fn internal_error() -> Self {
        Self::from_kind(ErrorKind::InternalError)
    }

    pub fn task_not_found() -> Self {
        Self::from_kind(ErrorKind::TaskNotFound)
    }

    pub fn task_not_cancelable() -> Self {
        Self::from_kind(ErrorKind::TaskNotCancelable)
    }

    pub fn push_notification_unsupported() -> Self {
        Self::from_kind(ErrorKind::PushNotificationUnsupported)
    }

    pub fn unsupported_operation() -> Self {
        Self::from_kind(ErrorKind::UnsupportedOperation)
    }
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON-RPC error {} ({}): {}", self.code, self.kind(), self.message)
    }
}

impl std::error::Error for JsonRpcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table() {
        let table = [
            (-32700, ErrorKind::ParseError),
            (-32600, ErrorKind::InvalidRequest),
            (-32601, ErrorKind::MethodNotFound),
            (-32602, ErrorKind::InvalidParams),
            (-32603, ErrorKind::InternalError),
            (-32001, ErrorKind::TaskNotFound),
            (-32002, ErrorKind::TaskNotCancelable),
            (-32003, ErrorKind::PushNotificationUnsupported),
            (-32004, ErrorKind::UnsupportedOperation),
        ];
        for (code, kind) in table {
            assert_eq!(ErrorKind::from_code(code), kind);
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn test_unlisted_codes_are_internal() {
        assert_eq!(ErrorKind::from_code(-1), ErrorKind::InternalError);
        assert_eq!(ErrorKind::from_code(-32099), ErrorKind::InternalError);
        assert_eq!(ErrorKind::from_code(0), ErrorKind::InternalError);
    }

    #[test]
    fn test_kind_round_trips_through_code() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::from_code(kind.code()), kind);
            assert_eq!(JsonRpcError::from_kind(kind).kind(), kind);
        }
    }

    #[test]
    fn test_status_categories() {
        assert_eq!(
            ErrorKind::InvalidParams.status_category(),
            StatusCategory::BadRequest
        );
        assert_eq!(
            ErrorKind::MethodNotFound.status_category(),
            StatusCategory::NotFound
        );
        assert_eq!(
            ErrorKind::TaskNotFound.status_category(),
            StatusCategory::NotFound
        );
        assert_eq!(
            ErrorKind::UnsupportedOperation.status_category(),
            StatusCategory::InternalError
        );

        assert_eq!(StatusCategory::from_http_status(204), StatusCategory::Success);
        assert_eq!(StatusCategory::from_http_status(401), StatusCategory::Unauthorized);
        assert_eq!(StatusCategory::from_http_status(403), StatusCategory::Forbidden);
        assert_eq!(StatusCategory::from_http_status(404), StatusCategory::NotFound);
        assert_eq!(StatusCategory::from_http_status(422), StatusCategory::BadRequest);
        assert_eq!(StatusCategory::from_http_status(503), StatusCategory::InternalError);
    }

    #[test]
    fn test_error_object_wire_shape() {
        let err: JsonRpcError =
            serde_json::from_str(r#"{"code":-32001,"message":"Task not found","data":{"id":"t9"}}"#)
                .unwrap();
        assert_eq!(err.kind(), ErrorKind::TaskNotFound);
        assert_eq!(err.data, Some(serde_json::json!({"id": "t9"})));

        let json = serde_json::to_value(JsonRpcError::task_not_cancelable()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": -32002, "message": "Task cannot be canceled"})
        );
    }
}

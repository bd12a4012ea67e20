use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind as SqlxErrorKind;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum RoutineError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),

    #[error("Database error: {0}")]
    DatabaseError(SqlxError),

    #[error("Config error: {0}")]
    ConfigError(#[from] figment::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Closed set of failure categories callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    ConstraintViolation,
    Validation,
    Internal,
}

impl RoutineError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        RoutineError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        RoutineError::Validation(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RoutineError::NotFound { .. } => ErrorKind::NotFound,
            RoutineError::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            RoutineError::Validation(_) => ErrorKind::Validation,
            RoutineError::Overflow(_)
            | RoutineError::DatabaseError(_)
            | RoutineError::ConfigError(_)
            | RoutineError::JsonError(_)
            | RoutineError::IoError(_) => ErrorKind::Internal,
        }
    }
}

/// SQLite constraint failures become `ConstraintViolation` so that `?` on any
/// query already yields the right category.
impl From<SqlxError> for RoutineError {
    fn from(e: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &e {
            match db_err.kind() {
                SqlxErrorKind::UniqueViolation
                | SqlxErrorKind::ForeignKeyViolation
                | SqlxErrorKind::NotNullViolation
                | SqlxErrorKind::CheckViolation => {
                    return RoutineError::ConstraintViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        RoutineError::DatabaseError(e)
    }
}

/// Malformed bodies answer with the same error envelope as every other failure.
impl From<JsonRejection> for RoutineError {
    fn from(rejection: JsonRejection) -> Self {
        RoutineError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for RoutineError {
    fn from(rejection: QueryRejection) -> Self {
        RoutineError::Validation(rejection.body_text())
    }
}

impl IntoResponse for RoutineError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self.kind() {
            ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: self.to_string(),
                },
            ),
            ErrorKind::ConstraintViolation => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "CONSTRAINT_VIOLATION".to_string(),
                    message: self.to_string(),
                },
            ),
            ErrorKind::Validation => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "VALIDATION_FAILED".to_string(),
                    message: self.to_string(),
                },
            ),
            ErrorKind::Internal => {
                error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

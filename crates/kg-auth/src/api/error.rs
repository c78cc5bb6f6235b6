//! Error Presentation
//!
//! Maps the core error taxonomy onto HTTP statuses and a stable JSON body.
//! Messages come from the dictionary; the underlying cause is logged with
//! the trace id but never serialized to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::dictionary::{self, Locale};
use crate::error::{AuthError, ErrorKind};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Stable machine-readable code, e.g. `USER_ALREADY_EXISTS`
    pub code: &'static str,
    pub message: &'static str,
    pub detail: &'static str,
    /// Correlates the response with server logs
    pub trace_id: String,
    pub timestamp: DateTime<Utc>,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadModel => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidPermissions => StatusCode::UNAUTHORIZED,
        ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::Unexpected {
            error!(
                code = %self.code,
                trace_id = %self.trace_id,
                source = ?self.source,
                "unexpected failure"
            );
        }

        let entry = dictionary::lookup(self.code, Locale::default());
        let body = ErrorBody {
            code: self.code.as_str(),
            message: entry.message,
            detail: entry.detail,
            trace_id: self.trace_id,
            timestamp: self.timestamp,
        };

        (status_for(self.kind), Json(body)).into_response()
    }
}

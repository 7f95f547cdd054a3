//! Handler error types.
//!
//! JSON endpoints return [`AppError`], rendered as `{"error", "code"}`.
//! Pages return [`PageError`], rendered as an HTML error page.

use crate::render;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::error;
use nba_api::client::ApiError;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    /// Upstream failure. Only `message` reaches the client.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: ApiError,
    },
}

impl AppError {
    pub fn upstream(message: &'static str, source: ApiError) -> Self {
        AppError::Upstream { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Upstream { .. } => "upstream_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Upstream { message, source } = &self {
            error!("{message}: {source}");
        }
        let body = json!({ "error": self.to_string(), "code": self.code() });
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug)]
pub struct PageError {
    pub status: StatusCode,
    pub message: String,
}

impl PageError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(render::error_page(self.status, &self.message))).into_response()
    }
}

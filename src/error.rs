use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};
use thiserror::Error;

use crate::models::ParseError;
use crate::store::StoreError;

/// Request-level failure. Every variant becomes a short plain-text response;
/// a page is either rendered completely or not at all.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Form(#[from] FormRejection),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Form(rejection) => rejection.status(),
            Self::Parse(_) | Self::Store(StoreError::Encoding { .. }) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::DuplicateSerial { .. }) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Rejected request: {self}");
        }

        (status, self.to_string()).into_response()
    }
}

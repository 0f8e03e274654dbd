//! Dashboard Error Types
//!
//! Dashboard-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

use crate::domain::value_object::ticker::TickerError;

/// Dashboard-specific result type alias
pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Ticker symbol failed validation
    #[error("Invalid ticker symbol: {0}")]
    InvalidTicker(#[from] TickerError),

    /// Favourites file could not be written
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::InvalidTicker(_) => StatusCode::BAD_REQUEST,
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::InvalidTicker(_) => ErrorKind::BadRequest,
            DashboardError::Storage(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            DashboardError::InvalidTicker(e) => {
                AppError::new(self.kind(), e.to_string()).with_action("Check the ticker symbol")
            }
            DashboardError::Storage(_) => AppError::new(self.kind(), "Storage failure"),
        }
    }

    fn log(&self) {
        match self {
            DashboardError::Storage(e) => {
                tracing::error!(error = %e, "Dashboard storage error");
            }
            DashboardError::InvalidTicker(_) => {
                tracing::debug!(error = %self, "Dashboard error");
            }
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

//! Mapping of crate errors to HTTP responses.

use crate::errors::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{DOCTYPE, html};
use tracing::error;

impl Error {
    /// HTTP status reported for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::PageNotFound { .. }
            | Self::MachineNotFound { .. }
            | Self::SpareNotFound { .. }
            | Self::PriceNotFound { .. }
            | Self::RubricNotFound { .. }
            | Self::ReservationNotFound { .. }
            | Self::NoteTargetNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. }
            | Self::InvalidPrice { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidReservation { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateKit { .. } | Self::ReservationConflict { .. } => StatusCode::CONFLICT,
            Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::DanglingSpare { .. }
            | Self::UnknownTag { .. }
            | Self::TagArguments { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the log
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (status.as_u16()) }
                }
                body {
                    h1 { (status.as_u16()) }
                    p { (message) }
                }
            }
        };
        (status, body).into_response()
    }
}

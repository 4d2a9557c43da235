use crate::{dto::output, gateway, repository};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Unauthorized request")]
    Unauthorized,

    #[error("No valid FCM tokens found")]
    NoRecipients,

    #[error("{0}")]
    Database(#[from] repository::Error),

    #[error("{0}")]
    Gateway(#[from] gateway::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let status = match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized => StatusCode::FORBIDDEN,
            Error::NoRecipients => StatusCode::BAD_REQUEST,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = output::ErrorBody {
            success: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

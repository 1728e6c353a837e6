use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::core::pages;
use crate::core::store::StoreError;

#[derive(Debug)]
pub enum Error {
    /// Unauthenticated access to a protected route
    AuthRequired,

    /// Store or other infrastructure failure, fatal to the request
    Internal(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::AuthRequired => Redirect::to("/login").into_response(),
            Error::Internal(msg) => {
                error!("request failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(pages::server_error()),
                )
                    .into_response()
            }
        }
    }
}

// Conversions so `?` works on store and infrastructure errors in handlers
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Internal(err.to_string())
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use maud::html;

use crate::views;

/// Screen-boundary error taxonomy. Every error is recovered at the screen
/// boundary; none is fatal to the process.
#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    NotFound,
    Input(&'static str),
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            // Not logged in: back to the login screen rather than a bare 401.
            AppError::Unauthorized => return Redirect::to("/").into_response(),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Input(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let page = views::layout::page(
            "Error",
            html! {
                article {
                    h1 { "Something went wrong" }
                    p { (message) }
                    a href="/" { "Back" }
                }
            },
            None,
        );
        (code, page).into_response()
    }
}

pub trait ResultExt<T> {
    /// Log the underlying error and replace it with an internal screen error.
    fn reject(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }
}

pub trait OptionExt<T> {
    fn or_not_found(self) -> Result<T, AppError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self) -> Result<T, AppError> {
        self.ok_or(AppError::NotFound)
    }
}

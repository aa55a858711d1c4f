use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// The page for unknown routes and for accounts that do not exist.
pub fn get_404_not_found_response() -> Response {
    let page = error_view(
        "Not Found",
        "404",
        "Page not found",
        "Check the account number or log in again",
    );

    (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
}

//! Fast & Reckless Bank is the web front-end for a toy banking demo.
//!
//! Customers log in with their account number, open new accounts, check their
//! balance and recent transactions, and deposit, withdraw or transfer money.
//!
//! This library serves the HTML pages. It keeps no data of its own: every
//! balance and transaction comes from, and every change goes to, the external
//! account service described by [ApiConfig].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod accounts_loader;
mod accounts_page;
mod app_state;
mod bank;
mod create_account;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod log_in;
mod money;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction_form;

#[cfg(test)]
mod test_utils;

pub use accounts_loader::{AccountsLoader, LoadState};
pub use app_state::AppState;
pub use bank::{
    Account, AccountApi, ApiConfig, BankClient, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT,
    Transaction, TransactionRequest, TransactionType, TransferRequest,
};
pub use money::Money;
pub use routing::build_router;
pub use transaction_form::{
    FormPhase, Receipt, TransactionForm, TransactionKind, compute_balance_preview,
};

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// Each variant carries the message to show to the customer.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The account service could not be reached, or it failed in a way that
    /// says nothing about the request itself.
    #[error("{0}")]
    Network(String),

    /// The account number does not belong to any account.
    #[error("{0}")]
    NotFound(String),

    /// The input was rejected, either before it was sent or by the account service.
    #[error("{0}")]
    Validation(String),

    /// The amount is more than the account's balance.
    #[error("{0}")]
    InsufficientFunds(String),

    /// The configured timezone is not a valid, canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl Error {
    /// The human-readable message for this error. May be empty.
    pub fn message(&self) -> &str {
        match self {
            Error::Network(message)
            | Error::NotFound(message)
            | Error::Validation(message)
            | Error::InsufficientFunds(message)
            | Error::InvalidTimezone(message) => message,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound(_) => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::Network(_) => InternalServerError {
                description: "Could not reach the bank",
                fix: "Try again later",
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

//! The client side of the account service: its data model, the operations it
//! offers, and an HTTP implementation of those operations.

mod api;
mod client;
mod models;
pub mod timestamp;

pub use api::AccountApi;
#[cfg(test)]
pub(crate) use api::ACCOUNT_NOT_FOUND;
pub use client::{ApiConfig, BankClient, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT};
pub use models::{Account, Transaction, TransactionRequest, TransactionType, TransferRequest};

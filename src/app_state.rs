//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;

use crate::{
    Error,
    bank::{ApiConfig, BankClient},
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the account service that owns all account data.
    pub bank_client: BankClient,

    /// The local timezone as a canonical timezone name, e.g. "Europe/Berlin".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] that talks to the account service described by `api_config`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Europe/Berlin".
    ///
    /// # Errors
    /// Returns an error if the API client cannot be created.
    pub fn new(api_config: ApiConfig, local_timezone: &str) -> Result<Self, Error> {
        Ok(Self {
            bank_client: BankClient::new(api_config)?,
            local_timezone: local_timezone.to_owned(),
        })
    }
}

// Handlers that only talk to the account service can extract the client directly.
impl FromRef<AppState> for BankClient {
    fn from_ref(state: &AppState) -> Self {
        state.bank_client.clone()
    }
}

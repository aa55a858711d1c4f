//! Loads the collection of accounts and tracks the progress of that load.

use tokio::sync::watch;

use crate::bank::{Account, AccountApi};

/// The message shown when the accounts could not be loaded.
pub const LOAD_ACCOUNTS_ERROR_MESSAGE: &str = "Failed to load accounts";

/// The progress of loading the accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been requested yet.
    Idle,
    /// A request for the accounts is in flight.
    Loading,
    /// The accounts were loaded. May be empty.
    Ready(Vec<Account>),
    /// The last load failed with the given message.
    Failed(String),
}

/// Owns the idle/loading/ready/failed lifecycle for the list of all accounts.
///
/// Every page that needs the accounts gets its own loader, nothing is cached
/// between loaders. A failed load stays failed until [AccountsLoader::refresh]
/// is called, there are no automatic retries.
pub struct AccountsLoader<'a, A> {
    api: &'a A,
    state: watch::Sender<LoadState>,
}

impl<'a, A: AccountApi> AccountsLoader<'a, A> {
    /// Create a loader in the [LoadState::Idle] state.
    pub fn new(api: &'a A) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);

        Self { api, state }
    }

    /// A copy of the current state.
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(*self.state.borrow(), LoadState::Loading)
    }

    /// Get notified of every state change, including the switch to loading.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Fetch the accounts, moving through [LoadState::Loading] to either
    /// [LoadState::Ready] or [LoadState::Failed].
    ///
    /// If the returned future is dropped before it completes, the state stays
    /// [LoadState::Loading] and the response is discarded.
    pub async fn load(&self) -> LoadState {
        self.state.send_replace(LoadState::Loading);

        let next_state = match self.api.list_accounts().await {
            Ok(accounts) => LoadState::Ready(accounts),
            Err(error) => {
                tracing::error!("Could not load accounts: {error}");
                LoadState::Failed(LOAD_ACCOUNTS_ERROR_MESSAGE.to_owned())
            }
        };

        self.state.send_replace(next_state.clone());

        next_state
    }

    /// Load the accounts again, from whatever state the loader is in.
    pub async fn refresh(&self) -> LoadState {
        self.load().await
    }
}

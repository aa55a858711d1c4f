//! The operations the front-end needs from the account service.

use crate::{
    Error,
    bank::{Account, TransactionRequest, TransferRequest},
};

/// Access to the account service.
///
/// [BankClient](crate::bank::BankClient) talks to the real service over HTTP;
/// tests substitute an in-memory implementation.
pub trait AccountApi: Send + Sync {
    /// Get every account known to the service.
    fn list_accounts(&self) -> impl Future<Output = Result<Vec<Account>, Error>> + Send;

    /// Open a new account for `owner_name`. The service assigns the account number.
    fn create_account(
        &self,
        owner_name: &str,
    ) -> impl Future<Output = Result<Account, Error>> + Send;

    /// Add money to an account, returning the updated account.
    fn deposit(
        &self,
        account_number: &str,
        request: &TransactionRequest,
    ) -> impl Future<Output = Result<Account, Error>> + Send;

    /// Take money out of an account, returning the updated account.
    fn withdraw(
        &self,
        account_number: &str,
        request: &TransactionRequest,
    ) -> impl Future<Output = Result<Account, Error>> + Send;

    /// Move money between two accounts. Either both sides happen or neither does.
    fn transfer(&self, request: &TransferRequest) -> impl Future<Output = Result<(), Error>> + Send;

    /// Get a single account by its account number.
    ///
    /// The account service has no endpoint for a single account, so by default
    /// this fetches every account and scans for a match. Implementations with
    /// a direct lookup should override it.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no account has the number `account_number`.
    fn get_account_by_number(
        &self,
        account_number: &str,
    ) -> impl Future<Output = Result<Account, Error>> + Send {
        async move {
            let accounts = self.list_accounts().await?;
            find_account(accounts, account_number)
        }
    }
}

/// Pick the account with the number `account_number` out of `accounts`.
pub fn find_account(accounts: Vec<Account>, account_number: &str) -> Result<Account, Error> {
    accounts
        .into_iter()
        .find(|account| account.account_number == account_number)
        .ok_or_else(|| Error::NotFound(ACCOUNT_NOT_FOUND.to_owned()))
}

/// The message carried by [Error::NotFound] when an account number matches nothing.
pub const ACCOUNT_NOT_FOUND: &str = "Account not found";

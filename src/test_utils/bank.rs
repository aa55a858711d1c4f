use std::sync::{Mutex, MutexGuard};

use time::{OffsetDateTime, macros::datetime};

use crate::{
    Error,
    bank::{
        ACCOUNT_NOT_FOUND, Account, AccountApi, Transaction, TransactionRequest, TransactionType,
        TransferRequest,
    },
    money::Money,
};

/// An account opened on 15 Jan 2024 with no transactions.
pub(crate) fn test_account(account_number: &str, owner_name: &str, balance_cents: i64) -> Account {
    Account {
        account_number: account_number.to_owned(),
        owner_name: owner_name.to_owned(),
        balance: Money::from_cents(balance_cents),
        created_at: datetime!(2024-01-15 10:30 UTC),
        transactions: Vec::new(),
    }
}

/// How many times each operation was called on a [FakeBank].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Calls {
    pub list_accounts: usize,
    pub create_account: usize,
    pub deposit: usize,
    pub withdraw: usize,
    pub transfer: usize,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    calls: Calls,
    list_error: Option<Error>,
    next_error: Option<Error>,
    next_id: u64,
}

impl State {
    fn account_mut(&mut self, account_number: &str) -> Result<&mut Account, Error> {
        self.accounts
            .iter_mut()
            .find(|account| account.account_number == account_number)
            .ok_or_else(|| Error::NotFound(ACCOUNT_NOT_FOUND.to_owned()))
    }

    fn take_next_error(&mut self) -> Result<(), Error> {
        match self.next_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn record(
        &mut self,
        account_number: &str,
        type_: TransactionType,
        amount: Money,
        description: &str,
    ) -> Transaction {
        self.next_id += 1;

        Transaction {
            id: format!("TXN{:06}", self.next_id),
            account_number: account_number.to_owned(),
            type_,
            amount,
            description: description.to_owned(),
            timestamp: OffsetDateTime::now_utc(),
            category: None,
        }
    }
}

/// An in-memory account service that behaves like the real one.
///
/// Every operation yields to the runtime once before answering, so callers can
/// observe their own state while a request is in flight.
#[derive(Debug, Default)]
pub(crate) struct FakeBank {
    state: Mutex<State>,
}

impl FakeBank {
    pub(crate) fn new(accounts: Vec<Account>) -> Self {
        Self {
            state: Mutex::new(State {
                accounts,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub(crate) fn calls(&self) -> Calls {
        self.lock().calls
    }

    /// Make every call to `list_accounts` fail with `error` until [FakeBank::stop_failing].
    pub(crate) fn fail_listing(&self, error: Error) {
        self.lock().list_error = Some(error);
    }

    pub(crate) fn stop_failing(&self) {
        let mut state = self.lock();
        state.list_error = None;
        state.next_error = None;
    }

    /// Make the next create, deposit, withdraw or transfer fail with `error`.
    pub(crate) fn fail_next_operation(&self, error: Error) {
        self.lock().next_error = Some(error);
    }

    pub(crate) fn insert(&self, account: Account) {
        self.lock().accounts.push(account);
    }

    pub(crate) fn account(&self, account_number: &str) -> Option<Account> {
        self.lock()
            .accounts
            .iter()
            .find(|account| account.account_number == account_number)
            .cloned()
    }
}

fn validate_amount(amount: Money) -> Result<(), Error> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(Error::Validation("Amount must be positive".to_owned()))
    }
}

fn insufficient_funds() -> Error {
    Error::InsufficientFunds("Insufficient funds".to_owned())
}

impl AccountApi for FakeBank {
    async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        tokio::task::yield_now().await;

        let mut state = self.lock();
        state.calls.list_accounts += 1;

        match &state.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(state.accounts.clone()),
        }
    }

    async fn create_account(&self, owner_name: &str) -> Result<Account, Error> {
        tokio::task::yield_now().await;

        let mut state = self.lock();
        state.calls.create_account += 1;
        state.take_next_error()?;

        if owner_name.trim().is_empty() {
            return Err(Error::Validation("Owner name is required".to_owned()));
        }

        state.next_id += 1;
        let account = Account {
            account_number: format!("ACC{:010}", 1_000_000_000 + state.next_id),
            owner_name: owner_name.to_owned(),
            balance: Money::ZERO,
            created_at: OffsetDateTime::now_utc(),
            transactions: Vec::new(),
        };
        state.accounts.push(account.clone());

        Ok(account)
    }

    async fn deposit(
        &self,
        account_number: &str,
        request: &TransactionRequest,
    ) -> Result<Account, Error> {
        tokio::task::yield_now().await;

        let mut state = self.lock();
        state.calls.deposit += 1;
        state.take_next_error()?;
        validate_amount(request.amount)?;
        state.account_mut(account_number)?;

        let transaction = state.record(
            account_number,
            TransactionType::Deposit,
            request.amount,
            &request.description,
        );
        let account = state.account_mut(account_number)?;
        account.balance = account.balance + request.amount;
        account.transactions.push(transaction);

        Ok(account.clone())
    }

    async fn withdraw(
        &self,
        account_number: &str,
        request: &TransactionRequest,
    ) -> Result<Account, Error> {
        tokio::task::yield_now().await;

        let mut state = self.lock();
        state.calls.withdraw += 1;
        state.take_next_error()?;
        validate_amount(request.amount)?;

        if state.account_mut(account_number)?.balance < request.amount {
            return Err(insufficient_funds());
        }

        let transaction = state.record(
            account_number,
            TransactionType::Withdraw,
            request.amount,
            &request.description,
        );
        let account = state.account_mut(account_number)?;
        account.balance = account.balance - request.amount;
        account.transactions.push(transaction);

        Ok(account.clone())
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<(), Error> {
        tokio::task::yield_now().await;

        let mut state = self.lock();
        state.calls.transfer += 1;
        state.take_next_error()?;
        validate_amount(request.amount)?;

        let from = request.from_account_number.as_str();
        let to = request.to_account_number.as_str();

        if from == to {
            return Err(Error::Validation(
                "Cannot transfer to the same account".to_owned(),
            ));
        }

        // Check both sides before touching either balance.
        state.account_mut(to)?;
        if state.account_mut(from)?.balance < request.amount {
            return Err(insufficient_funds());
        }

        let outgoing = state.record(
            from,
            TransactionType::Transfer,
            request.amount,
            &request.description,
        );
        let incoming = state.record(
            to,
            TransactionType::Transfer,
            request.amount,
            &request.description,
        );

        let source = state.account_mut(from)?;
        source.balance = source.balance - request.amount;
        source.transactions.push(outgoing);

        let destination = state.account_mut(to)?;
        destination.balance = destination.balance + request.amount;
        destination.transactions.push(incoming);

        Ok(())
    }
}

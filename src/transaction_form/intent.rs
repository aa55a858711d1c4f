//! The rules for turning what the customer typed into exactly one call to the account service.

use std::{fmt, str::FromStr};

use crate::{
    Error,
    bank::{Account, AccountApi, TransactionRequest, TransferRequest},
    money::Money,
};

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount";
pub const INSUFFICIENT_FUNDS_MESSAGE: &str = "Insufficient funds";
pub const UNVERIFIED_DESTINATION_MESSAGE: &str = "Please verify the destination account first";
pub const DESTINATION_NOT_FOUND_MESSAGE: &str = "Destination account not found";
pub const TRANSACTION_FAILED_MESSAGE: &str = "Transaction failed";
pub const ALREADY_SUBMITTED_MESSAGE: &str = "This transaction has already been submitted";

/// What the customer wants to do with their money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Put money into the account.
    Deposit,
    /// Take money out of the account.
    Withdraw,
    /// Move money to another account.
    Transfer,
}

impl TransactionKind {
    /// The name used in URLs, e.g. "deposit".
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
            TransactionKind::Transfer => "transfer",
        }
    }

    /// The description sent to the account service when the customer leaves it empty.
    pub fn default_description(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdrawal",
            TransactionKind::Transfer => "Transfer",
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit Money",
            TransactionKind::Withdraw => "Withdraw Money",
            TransactionKind::Transfer => "Transfer Money",
        }
    }

    pub(crate) fn verb(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
            TransactionKind::Transfer => "Transfer",
        }
    }

    pub(crate) fn description_placeholder(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "e.g., Salary deposit",
            TransactionKind::Withdraw => "e.g., ATM withdrawal",
            TransactionKind::Transfer => "e.g., Dinner payment",
        }
    }

    fn takes_money_out(self) -> bool {
        matches!(self, TransactionKind::Withdraw | TransactionKind::Transfer)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdraw" => Ok(TransactionKind::Withdraw),
            "transfer" => Ok(TransactionKind::Transfer),
            other => Err(Error::NotFound(format!(
                "Unknown transaction type \"{other}\""
            ))),
        }
    }
}

/// Where a [TransactionForm] is in its lifecycle.
///
/// `Succeeded` is terminal. Any edit moves a `Failed` form back to `Editing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    /// Waiting for the customer to fill in or change the form.
    Editing,
    /// Looking up the destination account of a transfer.
    VerifyingDestination,
    /// The transaction has been sent to the account service.
    Submitting,
    /// The account service accepted the transaction.
    Succeeded,
    /// Validation or the account service rejected the transaction. Holds the message to show.
    Failed(String),
}

/// The outcome of a successful [TransactionForm::submit].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The kind of transaction that went through.
    pub kind: TransactionKind,
    /// The amount that was moved.
    pub amount: Money,
    /// The owner of the account the money was sent to, for transfers.
    pub recipient: Option<String>,
    /// The balance reported by the account service, for deposits and withdrawals.
    pub new_balance: Option<Money>,
}

/// The balance the account would have after the transaction.
///
/// Returns `current_balance` unchanged if `amount_text` is not a number.
pub fn compute_balance_preview(
    current_balance: Money,
    amount_text: &str,
    kind: TransactionKind,
) -> Money {
    let Some(amount) = Money::parse(amount_text) else {
        return current_balance;
    };

    if kind.takes_money_out() {
        current_balance - amount
    } else {
        current_balance + amount
    }
}

/// A deposit, withdrawal or transfer being filled in for one account.
///
/// The form validates the input, verifies the destination of transfers and
/// makes at most one successful call to the account service. Methods that talk
/// to the service take `&mut self`, so a form can only have one request in
/// flight at a time.
#[derive(Debug)]
pub struct TransactionForm<'a, A> {
    api: &'a A,
    kind: TransactionKind,
    account: Account,
    amount_text: String,
    description: String,
    destination_text: String,
    verified_destination: Option<Account>,
    phase: FormPhase,
}

impl<'a, A: AccountApi> TransactionForm<'a, A> {
    /// Start an empty form for a transaction on `account`.
    pub fn new(api: &'a A, kind: TransactionKind, account: Account) -> Self {
        Self {
            api,
            kind,
            account,
            amount_text: String::new(),
            description: String::new(),
            destination_text: String::new(),
            verified_destination: None,
            phase: FormPhase::Editing,
        }
    }

    /// Whether this is a deposit, withdrawal or transfer.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The account the transaction is for, as it was when the form was created.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Where the form is in its lifecycle.
    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// The amount exactly as it was typed.
    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    /// The description as it was typed, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The destination account number as it was typed.
    pub fn destination_text(&self) -> &str {
        &self.destination_text
    }

    /// The destination account, if it has been verified since the destination was last changed.
    pub fn verified_destination(&self) -> Option<&Account> {
        self.verified_destination.as_ref()
    }

    /// The message of the last failure, if the form is in the failed phase.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Change the amount. Ignored once the transaction has succeeded.
    pub fn set_amount(&mut self, amount_text: &str) {
        if self.begin_edit() {
            self.amount_text = amount_text.to_owned();
        }
    }

    /// Change the description. Ignored once the transaction has succeeded.
    pub fn set_description(&mut self, description: &str) {
        if self.begin_edit() {
            self.description = description.to_owned();
        }
    }

    /// Change the destination account number, which clears any earlier verification.
    pub fn set_destination(&mut self, destination_text: &str) {
        if self.begin_edit() {
            self.destination_text = destination_text.to_owned();
            self.verified_destination = None;
        }
    }

    /// Whether an edit is allowed, moving a failed form back to editing.
    fn begin_edit(&mut self) -> bool {
        match self.phase {
            FormPhase::Succeeded => false,
            FormPhase::Failed(_) => {
                self.phase = FormPhase::Editing;
                true
            }
            _ => true,
        }
    }

    /// The balance the account would have if the current amount went through.
    pub fn balance_preview(&self) -> Money {
        compute_balance_preview(self.account.balance, &self.amount_text, self.kind)
    }

    /// Look up the destination account of a transfer.
    ///
    /// Does nothing for deposits and withdrawals, or when the destination is
    /// empty. On failure the form fails with "Destination account not found"
    /// and any earlier verification is cleared.
    pub async fn verify_destination(&mut self) -> Option<&Account> {
        let destination = self.destination_text.trim().to_owned();

        if self.kind != TransactionKind::Transfer
            || destination.is_empty()
            || self.phase == FormPhase::Succeeded
        {
            return self.verified_destination.as_ref();
        }

        self.phase = FormPhase::VerifyingDestination;

        match self.api.get_account_by_number(&destination).await {
            Ok(account) => {
                self.phase = FormPhase::Editing;
                self.verified_destination = Some(account);
            }
            Err(error) => {
                tracing::debug!("Could not verify destination account {destination:?}: {error}");
                self.phase = FormPhase::Failed(DESTINATION_NOT_FOUND_MESSAGE.to_owned());
                self.verified_destination = None;
            }
        }

        self.verified_destination.as_ref()
    }

    /// Validate the form and send the transaction to the account service.
    ///
    /// Exactly one call is made to the account service when validation passes
    /// and none otherwise. A form that has succeeded, or that has a submission
    /// in flight, refuses to submit again.
    ///
    /// # Errors
    /// - [Error::Validation] if the amount is not a positive number, or a
    ///   transfer's destination has not been verified.
    /// - [Error::InsufficientFunds] if a withdrawal or transfer is more than the balance.
    /// - Any error from the account service.
    pub async fn submit(&mut self) -> Result<Receipt, Error> {
        if matches!(self.phase, FormPhase::Submitting | FormPhase::Succeeded) {
            return Err(Error::Validation(ALREADY_SUBMITTED_MESSAGE.to_owned()));
        }

        let amount = match self.validate() {
            Ok(amount) => amount,
            Err(error) => {
                self.phase = FormPhase::Failed(error.message().to_owned());
                return Err(error);
            }
        };

        self.phase = FormPhase::Submitting;

        match self.dispatch(amount).await {
            Ok(receipt) => {
                self.phase = FormPhase::Succeeded;
                Ok(receipt)
            }
            Err(error) => {
                let message = match error.message() {
                    "" => TRANSACTION_FAILED_MESSAGE,
                    message => message,
                };
                tracing::debug!(
                    "The {} for {} failed: {error:?}",
                    self.kind,
                    self.account.account_number
                );
                self.phase = FormPhase::Failed(message.to_owned());
                Err(error)
            }
        }
    }

    fn validate(&self) -> Result<Money, Error> {
        let amount = Money::parse(&self.amount_text)
            .filter(|amount| amount.is_positive())
            .ok_or_else(|| Error::Validation(INVALID_AMOUNT_MESSAGE.to_owned()))?;

        if self.kind == TransactionKind::Transfer && self.verified_destination.is_none() {
            return Err(Error::Validation(UNVERIFIED_DESTINATION_MESSAGE.to_owned()));
        }

        if self.kind.takes_money_out() && amount > self.account.balance {
            return Err(Error::InsufficientFunds(
                INSUFFICIENT_FUNDS_MESSAGE.to_owned(),
            ));
        }

        Ok(amount)
    }

    async fn dispatch(&self, amount: Money) -> Result<Receipt, Error> {
        let description = match self.description.trim() {
            "" => self.kind.default_description().to_owned(),
            description => description.to_owned(),
        };
        let account_number = &self.account.account_number;

        match (self.kind, &self.verified_destination) {
            (TransactionKind::Deposit, _) => {
                let request = TransactionRequest {
                    amount,
                    description,
                };
                let account = self.api.deposit(account_number, &request).await?;

                Ok(self.receipt(amount, None, Some(account.balance)))
            }
            (TransactionKind::Withdraw, _) => {
                let request = TransactionRequest {
                    amount,
                    description,
                };
                let account = self.api.withdraw(account_number, &request).await?;

                Ok(self.receipt(amount, None, Some(account.balance)))
            }
            (TransactionKind::Transfer, Some(destination)) => {
                let request = TransferRequest {
                    from_account_number: account_number.clone(),
                    to_account_number: destination.account_number.clone(),
                    amount,
                    description,
                };
                self.api.transfer(&request).await?;

                Ok(self.receipt(amount, Some(destination.owner_name.clone()), None))
            }
            (TransactionKind::Transfer, None) => Err(Error::Validation(
                UNVERIFIED_DESTINATION_MESSAGE.to_owned(),
            )),
        }
    }

    fn receipt(
        &self,
        amount: Money,
        recipient: Option<String>,
        new_balance: Option<Money>,
    ) -> Receipt {
        Receipt {
            kind: self.kind,
            amount,
            recipient,
            new_balance,
        }
    }
}

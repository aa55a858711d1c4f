//! The transaction page and the htmx endpoints behind its form.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    bank::{Account, AccountApi, BankClient},
    endpoints::{self, format_endpoint},
    html::{
        ACCOUNT_LOAD_ERROR_MESSAGE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, account_load_failed, base,
        euro_input_styles, form_error, format_currency, link, loading_spinner,
    },
    money::Money,
    navigation::NavBar,
    transaction_form::intent::{
        DESTINATION_NOT_FOUND_MESSAGE, Receipt, TransactionForm, TransactionKind,
        compute_balance_preview,
    },
};

/// The raw fields of the transaction form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TransactionFormData {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
    /// The destination account number typed in for a transfer.
    #[serde(default)]
    pub destination: String,
    /// The account number confirmed by the last successful verification.
    ///
    /// Only trusted while it still matches `destination`, and even then the
    /// destination is looked up again before the transfer is sent.
    #[serde(default)]
    pub verified_destination: String,
    /// The balance the page was rendered with, used for the preview only.
    #[serde(default)]
    pub current_balance: String,
}

/// Display the form for a deposit, withdrawal or transfer on an account.
pub async fn get_transaction_page(
    State(client): State<BankClient>,
    Path((account_number, kind)): Path<(String, String)>,
) -> Response {
    let kind = match kind.parse::<TransactionKind>() {
        Ok(kind) => kind,
        Err(error) => return error.into_response(),
    };

    let account = match client.get_account_by_number(&account_number).await {
        Ok(account) => account,
        Err(error) => return account_load_failed(&error),
    };

    let form = TransactionForm::new(&client, kind, account);

    transaction_page(&form).into_response()
}

/// Submit the transaction form.
///
/// Responds with the success card, or with the form and an error message.
pub async fn post_transaction(
    State(client): State<BankClient>,
    Path((account_number, kind)): Path<(String, String)>,
    Form(data): Form<TransactionFormData>,
) -> Response {
    let mut form = match load_form(&client, &account_number, &kind).await {
        Ok(form) => form,
        Err(error) => return load_failed_fragment(&error).into_response(),
    };

    form.set_amount(&data.amount);
    form.set_description(&data.description);
    form.set_destination(&data.destination);

    let destination = data.destination.trim();
    if !destination.is_empty() && data.verified_destination == destination {
        form.verify_destination().await;
    }

    match form.submit().await {
        Ok(receipt) => {
            tracing::info!(
                "Completed {} of {} for {}",
                receipt.kind,
                receipt.amount,
                form.account().account_number
            );
            success_card(&form, &receipt).into_response()
        }
        Err(error) => {
            if let Error::Network(_) = error {
                tracing::error!("Could not complete {} for {account_number}: {error}", form.kind());
            }
            transaction_card(&form).into_response()
        }
    }
}

/// Look up the destination account of a transfer.
///
/// Responds with the destination status fragment.
pub async fn post_verify_destination(
    State(client): State<BankClient>,
    Path((account_number, kind)): Path<(String, String)>,
    Form(data): Form<TransactionFormData>,
) -> Response {
    let mut form = match load_form(&client, &account_number, &kind).await {
        Ok(form) => form,
        Err(error) => {
            tracing::debug!("Could not load the form for {account_number}: {error}");
            return destination_status(None, Some(ACCOUNT_LOAD_ERROR_MESSAGE)).into_response();
        }
    };

    form.set_destination(&data.destination);
    form.verify_destination().await;

    destination_status(form.verified_destination(), form.error_message()).into_response()
}

/// Preview the balance after the transaction and update the submit button.
pub async fn post_balance_preview(
    Path((_account_number, kind)): Path<(String, String)>,
    Form(data): Form<TransactionFormData>,
) -> Response {
    let kind = match kind.parse::<TransactionKind>() {
        Ok(kind) => kind,
        Err(error) => return error.into_response(),
    };

    html! {
        (balance_preview(kind, Money::parse(&data.current_balance), &data.amount))
        (submit_label(kind, &data.amount, true))
    }
    .into_response()
}

async fn load_form<'a>(
    client: &'a BankClient,
    account_number: &str,
    kind: &str,
) -> Result<TransactionForm<'a, BankClient>, Error> {
    let kind = kind.parse::<TransactionKind>()?;
    let account = client.get_account_by_number(account_number).await?;

    Ok(TransactionForm::new(client, kind, account))
}

fn load_failed_fragment(error: &Error) -> Markup {
    tracing::debug!("Could not load the transaction form: {error}");

    html! {
        div id="transaction-card" class=(CARD_STYLE)
        {
            (form_error(ACCOUNT_LOAD_ERROR_MESSAGE))

            p class="mt-4" { (link(endpoints::LOG_IN_VIEW, "Back to Login")) }
        }
    }
}

fn transaction_page<A: AccountApi>(form: &TransactionForm<'_, A>) -> Markup {
    let account_number = form.account().account_number.as_str();
    let nav_bar = NavBar::new(endpoints::TRANSACTION_VIEW, Some(account_number)).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md"
            {
                p class="mb-4"
                {
                    (link(&format_endpoint(endpoints::DASHBOARD_VIEW, &[account_number]), "Back to Dashboard"))
                }

                (transaction_card(form))
            }
        }
    };

    base(form.kind().title(), &[euro_input_styles()], &content)
}

fn transaction_card<A: AccountApi>(form: &TransactionForm<'_, A>) -> Markup {
    let kind = form.kind();
    let account = form.account();
    let path = [account.account_number.as_str(), kind.as_str()];
    // The destination's error is shown next to the destination input instead.
    let error_message = form
        .error_message()
        .filter(|message| *message != DESTINATION_NOT_FOUND_MESSAGE);
    let destination_error = form
        .error_message()
        .filter(|message| *message == DESTINATION_NOT_FOUND_MESSAGE);

    html! {
        div id="transaction-card" class=(CARD_STYLE)
        {
            h1 class="mb-6 text-3xl font-bold text-center" { (kind.title()) }

            div class="flex items-center justify-between mb-6 p-4 rounded bg-gray-100 dark:bg-gray-700"
            {
                span class="text-sm" { "Current Balance" }
                span id="current-balance" class="text-lg font-bold" { (format_currency(account.balance)) }
            }

            form
                hx-post=(format_endpoint(endpoints::TRANSACTION_API, &path))
                hx-target="#transaction-card"
                hx-swap="outerHTML"
                hx-indicator="#indicator"
                hx-disabled-elt="#submit-button"
                class="space-y-6"
            {
                input type="hidden" name="current_balance" value=(account.balance.to_string());

                @if kind == TransactionKind::Transfer {
                    div
                    {
                        span class=(FORM_LABEL_STYLE) { "From Account" }
                        p id="from-account" class="p-2.5 rounded text-sm bg-gray-100 dark:bg-gray-700"
                        {
                            (account.account_number) " (" (account.owner_name) ")"
                        }
                    }

                    div
                    {
                        label for="destination" class=(FORM_LABEL_STYLE) { "To Account Number" }

                        div class="flex gap-3"
                        {
                            input
                                id="destination"
                                name="destination"
                                type="text"
                                placeholder="ACC__________"
                                value=(form.destination_text())
                                required
                                class=(format!("{FORM_TEXT_INPUT_STYLE} font-mono tracking-wider"))
                                hx-on-input="document.getElementById('destination-status').replaceChildren()";

                            button
                                type="button"
                                id="verify-button"
                                hx-post=(format_endpoint(endpoints::VERIFY_DESTINATION_API, &path))
                                hx-target="#destination-status"
                                hx-swap="outerHTML"
                                hx-disabled-elt="this"
                                class="px-4 rounded border border-gray-300 dark:border-gray-600 disabled:opacity-50"
                            {
                                "Verify"
                            }
                        }

                        (destination_status(form.verified_destination(), destination_error))
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount (€)" }

                    div class="input-wrapper w-full"
                    {
                        input
                            id="amount"
                            name="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            placeholder="0.00"
                            value=(form.amount_text())
                            required
                            autofocus
                            hx-post=(format_endpoint(endpoints::BALANCE_PREVIEW_API, &path))
                            hx-trigger="input changed delay:300ms"
                            hx-target="#balance-preview"
                            hx-swap="outerHTML"
                            class=(format!("{FORM_TEXT_INPUT_STYLE} text-2xl font-bold"));
                    }
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        id="description"
                        name="description"
                        type="text"
                        placeholder=(kind.description_placeholder())
                        value=(form.description())
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (balance_preview(kind, Some(account.balance), form.amount_text()))

                @if let Some(error_message) = error_message {
                    (form_error(error_message))
                }

                div class="flex flex-col gap-3"
                {
                    button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                        (submit_label(kind, form.amount_text(), false))
                    }

                    a
                        href=(format_endpoint(endpoints::DASHBOARD_VIEW, &[account.account_number.as_str()]))
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Cancel"
                    }
                }
            }

            @if kind == TransactionKind::Transfer {
                p id="transfer-fees" class="mt-6 text-sm text-center"
                {
                    "Transfer fees: " (format_currency(Money::ZERO))
                }
            }
        }
    }
}

/// The verified owner of the destination account, or why it could not be verified.
///
/// The hidden `verified_destination` input lets the submit handler know that
/// the customer saw the verified owner for this destination.
fn destination_status(
    verified_destination: Option<&Account>,
    error_message: Option<&str>,
) -> Markup {
    html! {
        div id="destination-status" class="mt-2"
        {
            @if let Some(destination) = verified_destination {
                p id="verified-owner" class="font-medium text-green-600 dark:text-green-400"
                {
                    "Verified: " (destination.owner_name)
                }
                input type="hidden" name="verified_destination" value=(destination.account_number);
            } @else if let Some(error_message) = error_message {
                (form_error(error_message))
            }
        }
    }
}

/// The balance after the transaction. Empty for transfers and for amounts that are not numbers.
fn balance_preview(kind: TransactionKind, current_balance: Option<Money>, amount_text: &str) -> Markup {
    let preview = current_balance
        .filter(|_| kind != TransactionKind::Transfer)
        .filter(|_| Money::parse(amount_text).is_some())
        .map(|balance| compute_balance_preview(balance, amount_text, kind));

    html! {
        div id="balance-preview"
        {
            @if let Some(preview) = preview {
                div class="p-4 rounded bg-gray-100 dark:bg-gray-700"
                {
                    p class="text-sm mb-1" { "After this transaction:" }
                    p class="text-xl font-bold" { (format_currency(preview)) }
                }
            }
        }
    }
}

fn submit_label(kind: TransactionKind, amount_text: &str, out_of_band: bool) -> Markup {
    let label = match Money::parse(amount_text) {
        Some(amount) => format!("{} {}", kind.verb(), format_currency(amount)),
        None => kind.verb().to_owned(),
    };

    html! {
        span id="submit-label" hx-swap-oob=[out_of_band.then_some("true")] { (label) }
    }
}

fn success_card<A: AccountApi>(form: &TransactionForm<'_, A>, receipt: &Receipt) -> Markup {
    let amount = format_currency(receipt.amount);
    let summary = match receipt.kind {
        TransactionKind::Deposit => format!("Deposited {amount} to your account"),
        TransactionKind::Withdraw => format!("Withdrew {amount} from your account"),
        TransactionKind::Transfer => format!(
            "Transferred {amount} to {}",
            receipt.recipient.as_deref().unwrap_or_default()
        ),
    };
    let dashboard_url =
        format_endpoint(endpoints::DASHBOARD_VIEW, &[form.account().account_number.as_str()]);

    html! {
        div id="transaction-card" class=(format!("{CARD_STYLE} text-center"))
        {
            h1 class="mb-4 text-3xl font-bold" { "Transaction Successful" }

            p id="summary" class="mb-6" { (summary) }

            @if let Some(new_balance) = receipt.new_balance {
                div class="mb-6 p-4 rounded bg-gray-100 dark:bg-gray-700"
                {
                    p class="text-sm mb-1" { "New Balance" }
                    p id="new-balance" class="text-2xl font-bold" { (format_currency(new_balance)) }
                }
            }

            a href=(dashboard_url) class=(BUTTON_SECONDARY_STYLE) { "Back to Dashboard" }
        }
    }
}

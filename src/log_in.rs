//! The log-in page, where customers open their dashboard by entering an account number.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    bank::{AccountApi, BankClient},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        bank_card, base, form_error, loading_spinner,
    },
};

pub const ACCOUNT_NOT_FOUND_ERROR_MSG: &str =
    "Account not found. Please check your account number.";
pub const EMPTY_ACCOUNT_NUMBER_ERROR_MSG: &str = "Please enter your account number.";

/// The accounts the account service creates on start-up, as (account number, owner).
const DEMO_ACCOUNTS: [(&str, &str); 2] = [
    ("ACC1234567890", "John Doe"),
    ("ACC0987654321", "Jane Smith"),
];

fn log_in_form(account_number: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#account_number, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="account_number" class=(FORM_LABEL_STYLE) { "Account Number" }

                input
                    type="text"
                    name="account_number"
                    id="account_number"
                    placeholder="ACC__________"
                    class=(format!("{FORM_TEXT_INPUT_STYLE} text-center font-mono tracking-wider"))
                    required
                    autofocus
                    value=(account_number);

                @if let Some(error_message) = error_message {
                    (form_error(error_message))
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Access Account"
            }

            a href=(endpoints::CREATE_ACCOUNT_VIEW) class=(BUTTON_SECONDARY_STYLE)
            {
                "Create New Account"
            }
        }
    }
}

fn demo_accounts() -> Markup {
    html! {
        div id="demo-accounts" class="p-4 rounded bg-gray-100 dark:bg-gray-700"
        {
            p class="mb-3 text-sm font-medium text-blue-600 dark:text-blue-400"
            {
                "Demo accounts available"
            }

            ul class="space-y-2 text-sm text-gray-900 dark:text-white"
            {
                @for (account_number, owner_name) in DEMO_ACCOUNTS {
                    li class="flex justify-between items-center"
                    {
                        span class="font-mono text-xs" { (account_number) }
                        span { (owner_name) }
                    }
                }
            }
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    let body = html! {
        (log_in_form("", None))
        (demo_accounts())
    };
    let content = bank_card("Enter your account to continue", &body);

    base("Log In", &[], &content).into_response()
}

/// The raw data entered by the customer in the log-in form.
#[derive(Debug, Clone, Deserialize)]
pub struct LogInData {
    pub account_number: String,
}

/// Handler for log-in requests via the POST method.
///
/// If the account exists the client is redirected to its dashboard.
/// Otherwise, the form is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(client): State<BankClient>,
    Form(data): Form<LogInData>,
) -> Response {
    let account_number = data.account_number.trim();

    if account_number.is_empty() {
        return log_in_form("", Some(EMPTY_ACCOUNT_NUMBER_ERROR_MSG)).into_response();
    }

    match client.get_account_by_number(account_number).await {
        Ok(account) => {
            tracing::info!("Logged in to {}", account.account_number);
            let dashboard_url =
                format_endpoint(endpoints::DASHBOARD_VIEW, &[account.account_number.as_str()]);

            (HxRedirect(dashboard_url), StatusCode::SEE_OTHER).into_response()
        }
        Err(Error::NotFound(_)) => {
            log_in_form(account_number, Some(ACCOUNT_NOT_FOUND_ERROR_MSG)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not look up account {account_number}: {error}");
            log_in_form(account_number, Some(error.message())).into_response()
        }
    }
}

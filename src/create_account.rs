//! The page for opening a new account.

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
    bank::{AccountApi, BankClient},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, bank_card, base,
        form_error, format_currency, link, loading_spinner,
    },
    money::Money,
};

pub const CREATE_ACCOUNT_ERROR_MSG: &str = "Failed to create account. Please try again.";
pub const NAME_TOO_SHORT_ERROR_MSG: &str = "Your name must be at least 2 characters long.";

const MIN_NAME_LENGTH: usize = 2;

fn create_account_form(owner_name: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::ACCOUNTS_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#owner_name, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="owner_name" class=(FORM_LABEL_STYLE) { "Full Name" }

                input
                    type="text"
                    name="owner_name"
                    id="owner_name"
                    placeholder="Enter your full name"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    minlength=(MIN_NAME_LENGTH)
                    value=(owner_name);

                @if let Some(error_message) = error_message {
                    (form_error(error_message))
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Create Account"
            }

            p class="text-sm text-center" { (link(endpoints::LOG_IN_VIEW, "Back to Login")) }
        }
    }
}

/// Display the page for opening an account.
pub async fn get_create_account_page() -> Response {
    let body = html! {
        ul class="space-y-2 text-sm text-gray-900 dark:text-white"
        {
            li { "Your account number will be generated automatically" }
            li { "Starting balance: " (format_currency(Money::ZERO)) }
            li { "All transactions tracked in real-time" }
        }

        (create_account_form("", None))
    };
    let content = bank_card("Create Your Account", &body);

    base("Create Account", &[], &content).into_response()
}

/// The raw data entered by the customer in the create account form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountData {
    pub owner_name: String,
}

/// Open an account and redirect the client to its dashboard.
///
/// The name is trimmed and must be at least two characters long.
pub async fn create_account_endpoint(
    State(client): State<BankClient>,
    Form(data): Form<CreateAccountData>,
) -> Response {
    let owner_name = data.owner_name.trim();

    if owner_name.chars().count() < MIN_NAME_LENGTH {
        return create_account_form(owner_name, Some(NAME_TOO_SHORT_ERROR_MSG)).into_response();
    }

    match client.create_account(owner_name).await {
        Ok(account) => {
            tracing::info!("Opened account {}", account.account_number);
            let dashboard_url =
                format_endpoint(endpoints::DASHBOARD_VIEW, &[account.account_number.as_str()]);

            (HxRedirect(dashboard_url), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Could not open an account for {owner_name:?}: {error}");
            create_account_form(owner_name, Some(CREATE_ACCOUNT_ERROR_MSG)).into_response()
        }
    }
}

#[cfg(test)]
mod create_account_tests {
    use axum::{Form, extract::State, http::StatusCode};

    use crate::{
        Error,
        bank::{ApiConfig, BankClient},
        endpoints,
        test_utils::{
            FakeService, assert_form_error_message, assert_form_input, assert_hx_endpoint,
            assert_valid_html, must_get_form, parse_html_document, parse_html_fragment,
            redirected_account_number, spawn_fake_service,
        },
    };

    use super::{
        CREATE_ACCOUNT_ERROR_MSG, CreateAccountData, NAME_TOO_SHORT_ERROR_MSG,
        create_account_endpoint, get_create_account_page,
    };

    async fn service_and_client() -> (FakeService, BankClient) {
        let service = spawn_fake_service(vec![]).await;
        let client = BankClient::new(ApiConfig::new(service.api_url())).unwrap();

        (service, client)
    }

    fn owner(name: &str) -> Form<CreateAccountData> {
        Form(CreateAccountData {
            owner_name: name.to_owned(),
        })
    }

    #[tokio::test]
    async fn page_displays_form() {
        let response = get_create_account_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::ACCOUNTS_API, "hx-post");
        assert_form_input(&form, "owner_name", "text");
    }

    #[tokio::test]
    async fn creates_account_and_redirects_to_dashboard() {
        let (service, client) = service_and_client().await;

        let response = create_account_endpoint(State(client), owner("  Alice Example ")).await;

        let account_number = redirected_account_number(&response);
        let account = service.bank().account(&account_number).unwrap();
        assert_eq!(account.owner_name, "Alice Example");
    }

    #[tokio::test]
    async fn rejects_short_names_without_calling_bank() {
        let (service, client) = service_and_client().await;

        for name in ["", " A ", "é"] {
            let response = create_account_endpoint(State(client.clone()), owner(name)).await;

            let html = parse_html_fragment(response).await;
            assert_form_error_message(&must_get_form(&html), NAME_TOO_SHORT_ERROR_MSG);
        }

        assert_eq!(service.bank().calls().create_account, 0);
    }

    #[tokio::test]
    async fn shows_error_when_bank_fails() {
        let (service, client) = service_and_client().await;
        service
            .bank()
            .fail_next_operation(Error::Validation("Owner name is required".to_owned()));

        let response = create_account_endpoint(State(client), owner("Alice Example")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_form_error_message(&must_get_form(&html), CREATE_ACCOUNT_ERROR_MSG);
    }
}

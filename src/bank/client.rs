//! An HTTP client for the account service.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    Error,
    bank::{
        Account, AccountApi, TransactionRequest, TransferRequest, models::CreateAccountRequest,
    },
};

/// The base URL the account service listens on when run locally.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// How long to wait for the account service before giving up on a request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where to find the account service and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// The URL that the API paths are appended to, e.g. "http://localhost:8080/api".
    pub base_url: String,
    /// The timeout for a whole request, from connecting to reading the body.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a config for the service at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Talks to the account service over HTTP with JSON bodies.
///
/// Cloning is cheap, clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct BankClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BankClient {
    /// Create a client for the account service described by `config`.
    ///
    /// # Errors
    /// Returns [Error::Network] if the base URL is invalid or the HTTP client
    /// could not be set up.
    pub fn new(config: ApiConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url).map_err(|error| {
            Error::Network(format!("invalid API URL \"{}\": {error}", config.base_url))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(Error::Network(format!(
                "invalid API URL \"{}\": cannot be used as a base URL",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| Error::Network(format!("could not create HTTP client: {error}")))?;

        Ok(Self { http, base_url })
    }

    /// Build a URL by appending `segments` to the base URL.
    ///
    /// Each segment is percent-encoded, so account numbers typed in by users
    /// cannot change the path.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request.send().await.map_err(|error| {
            tracing::error!("Could not reach the account service: {error}");
            Error::Network(CONNECTION_ERROR_MESSAGE.to_owned())
        })?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("The account service responded with {status}: {body}");

        Err(error_from_response(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let response = self.send(request).await?;

        response.json::<T>().await.map_err(|error| {
            tracing::error!("Could not read the response from the account service: {error}");
            Error::Network(INVALID_RESPONSE_MESSAGE.to_owned())
        })
    }
}

impl AccountApi for BankClient {
    async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        tracing::debug!("Fetching all accounts");
        self.send_json(self.http.get(self.url(&["accounts"]))).await
    }

    async fn create_account(&self, owner_name: &str) -> Result<Account, Error> {
        tracing::debug!("Creating an account for {owner_name:?}");
        let body = CreateAccountRequest { owner_name };

        self.send_json(self.http.post(self.url(&["accounts"])).json(&body))
            .await
    }

    async fn deposit(
        &self,
        account_number: &str,
        request: &TransactionRequest,
    ) -> Result<Account, Error> {
        tracing::debug!("Depositing {} into {account_number}", request.amount);
        let url = self.url(&["accounts", account_number, "deposit"]);

        self.send_json(self.http.post(url).json(request)).await
    }

    async fn withdraw(
        &self,
        account_number: &str,
        request: &TransactionRequest,
    ) -> Result<Account, Error> {
        tracing::debug!("Withdrawing {} from {account_number}", request.amount);
        let url = self.url(&["accounts", account_number, "withdraw"]);

        self.send_json(self.http.post(url).json(request)).await
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<(), Error> {
        tracing::debug!(
            "Transferring {} from {} to {}",
            request.amount,
            request.from_account_number,
            request.to_account_number
        );
        let url = self.url(&["accounts", "transfer"]);

        self.send(self.http.post(url).json(request)).await?;

        Ok(())
    }
}

const CONNECTION_ERROR_MESSAGE: &str =
    "Could not reach the bank. Check your connection and try again.";
const INVALID_RESPONSE_MESSAGE: &str = "The bank sent a response that could not be understood.";

/// The error body used by the account service, e.g. Spring's default error JSON.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Classify an unsuccessful response from the account service.
///
/// The status code decides the error kind where it is specific enough. Generic
/// failures (e.g. 500) are classified by the message the service sent.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> Error {
    let body: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = body
        .message
        .filter(|message| !message.trim().is_empty())
        .or(body.error)
        .unwrap_or_default();
    let lowercase_message = message.to_lowercase();

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(or(message, "Account not found")),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
            if lowercase_message.contains("insufficient funds") =>
        {
            Error::InsufficientFunds(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::Validation(or(message, "The bank rejected the request"))
        }
        StatusCode::CONFLICT => Error::InsufficientFunds(or(message, "Insufficient funds")),
        _ if lowercase_message.contains("insufficient funds") => Error::InsufficientFunds(message),
        _ if lowercase_message.contains("not found") => Error::NotFound(message),
        status => Error::Network(format!("The bank responded with an error ({status})")),
    }
}

fn or(message: String, default: &str) -> String {
    if message.is_empty() {
        default.to_owned()
    } else {
        message
    }
}


#[cfg(test)]
mod client_tests {
    use std::time::Duration;

    use crate::{
        Error,
        bank::{AccountApi, ApiConfig, BankClient, TransactionRequest, TransferRequest},
        money::Money,
        test_utils::{spawn_fake_service, test_account},
    };

    #[test]
    fn rejects_invalid_base_url() {
        let result = BankClient::new(ApiConfig::new("not a url"));

        assert!(matches!(result, Err(Error::Network(_))), "got {result:?}");
    }

    #[test]
    fn appends_percent_encoded_segments_to_base_url() {
        let client = BankClient::new(ApiConfig::new("http://localhost:8080/api/")).unwrap();

        let url = client.url(&["accounts", "ACC 1/2", "deposit"]);

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/accounts/ACC%201%2F2/deposit"
        );
    }

    #[tokio::test]
    async fn lists_accounts() {
        let service = spawn_fake_service(vec![
            test_account("ACC1234567890", "John Doe", 125050),
            test_account("ACC0987654321", "Jane Smith", 80000),
        ])
        .await;
        let client = BankClient::new(ApiConfig::new(service.api_url())).unwrap();

        let accounts = client.list_accounts().await.unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].account_number, "ACC1234567890");
        assert_eq!(accounts[1].balance, Money::from_cents(80000));
    }

    #[tokio::test]
    async fn creates_account() {
        let service = spawn_fake_service(vec![]).await;
        let client = BankClient::new(ApiConfig::new(service.api_url())).unwrap();

        let account = client.create_account("Alice Example").await.unwrap();

        assert_eq!(account.owner_name, "Alice Example");
        assert!(account.account_number.starts_with("ACC"));
        assert_eq!(account.balance, Money::ZERO);
        assert_eq!(client.list_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deposits_and_withdraws() {
        let service =
            spawn_fake_service(vec![test_account("ACC1234567890", "John Doe", 5000)]).await;
        let client = BankClient::new(ApiConfig::new(service.api_url())).unwrap();

        let account = client
            .deposit(
                "ACC1234567890",
                &TransactionRequest {
                    amount: Money::from_cents(10000),
                    description: "Salary".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(account.balance, Money::from_cents(15000));

        let account = client
            .withdraw(
                "ACC1234567890",
                &TransactionRequest {
                    amount: Money::from_cents(2550),
                    description: "Withdrawal".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(account.balance, Money::from_cents(12450));
        assert_eq!(account.transactions.len(), 2);
    }

    #[tokio::test]
    async fn maps_service_failures_to_errors() {
        let service =
            spawn_fake_service(vec![test_account("ACC1234567890", "John Doe", 5000)]).await;
        let client = BankClient::new(ApiConfig::new(service.api_url())).unwrap();
        let request = TransactionRequest {
            amount: Money::from_cents(20000),
            description: "Withdrawal".to_owned(),
        };

        let result = client.withdraw("ACC1234567890", &request).await;
        assert!(
            matches!(result, Err(Error::InsufficientFunds(_))),
            "got {result:?}"
        );

        let result = client.deposit("ACC5555555555", &request).await;
        assert!(matches!(result, Err(Error::NotFound(_))), "got {result:?}");

        let request = TransactionRequest {
            amount: Money::ZERO,
            description: "Deposit".to_owned(),
        };
        let result = client.deposit("ACC1234567890", &request).await;
        assert!(matches!(result, Err(Error::Validation(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn transfers_between_accounts() {
        let service = spawn_fake_service(vec![
            test_account("ACC1234567890", "John Doe", 10000),
            test_account("ACC0987654321", "Jane Smith", 0),
        ])
        .await;
        let client = BankClient::new(ApiConfig::new(service.api_url())).unwrap();

        client
            .transfer(&TransferRequest {
                from_account_number: "ACC1234567890".to_owned(),
                to_account_number: "ACC0987654321".to_owned(),
                amount: Money::from_cents(2550),
                description: "Dinner".to_owned(),
            })
            .await
            .unwrap();

        let accounts = client.list_accounts().await.unwrap();
        assert_eq!(accounts[0].balance, Money::from_cents(7450));
        assert_eq!(accounts[1].balance, Money::from_cents(2550));
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let service = spawn_fake_service(vec![]).await;
        let api_url = service.api_url();
        drop(service);

        let mut config = ApiConfig::new(api_url);
        config.timeout = Duration::from_secs(2);
        let client = BankClient::new(config).unwrap();

        let result = client.list_accounts().await;

        assert!(matches!(result, Err(Error::Network(_))), "got {result:?}");
    }
}

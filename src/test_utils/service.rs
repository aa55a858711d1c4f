use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tokio::{net::TcpListener, task::JoinHandle};

use crate::{
    Error,
    bank::{Account, AccountApi, TransactionRequest, TransferRequest},
    test_utils::FakeBank,
};

/// A [FakeBank] served over HTTP with the same routes and JSON bodies as the
/// real account service. The server stops when this is dropped.
pub(crate) struct FakeService {
    address: SocketAddr,
    bank: Arc<FakeBank>,
    task: JoinHandle<()>,
}

impl FakeService {
    pub(crate) fn api_url(&self) -> String {
        format!("http://{}/api", self.address)
    }

    pub(crate) fn bank(&self) -> &FakeBank {
        &self.bank
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub(crate) async fn spawn_fake_service(accounts: Vec<Account>) -> FakeService {
    let bank = Arc::new(FakeBank::new(accounts));

    let app = Router::new()
        .route("/api/accounts", get(list_accounts).post(create_account))
        .route("/api/accounts/transfer", post(transfer))
        .route("/api/accounts/{account_number}/deposit", post(deposit))
        .route("/api/accounts/{account_number}/withdraw", post(withdraw))
        .with_state(bank.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind fake account service");
    let address = listener
        .local_addr()
        .expect("could not get fake account service address");

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("fake account service stopped unexpectedly");
    });

    FakeService {
        address,
        bank,
        task,
    }
}

struct ServiceError(Error);

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) | Error::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
            Error::Network(_) | Error::InvalidTimezone(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "message": self.0.message() }))).into_response()
    }
}

async fn list_accounts(
    State(bank): State<Arc<FakeBank>>,
) -> Result<Json<Vec<Account>>, ServiceError> {
    bank.list_accounts().await.map(Json).map_err(ServiceError)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewAccount {
    owner_name: String,
}

async fn create_account(
    State(bank): State<Arc<FakeBank>>,
    Json(body): Json<NewAccount>,
) -> Result<(StatusCode, Json<Account>), ServiceError> {
    let account = bank
        .create_account(&body.owner_name)
        .await
        .map_err(ServiceError)?;

    Ok((StatusCode::CREATED, Json(account)))
}

async fn deposit(
    State(bank): State<Arc<FakeBank>>,
    Path(account_number): Path<String>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Account>, ServiceError> {
    bank.deposit(&account_number, &request)
        .await
        .map(Json)
        .map_err(ServiceError)
}

async fn withdraw(
    State(bank): State<Arc<FakeBank>>,
    Path(account_number): Path<String>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Account>, ServiceError> {
    bank.withdraw(&account_number, &request)
        .await
        .map(Json)
        .map_err(ServiceError)
}

async fn transfer(
    State(bank): State<Arc<FakeBank>>,
    Json(request): Json<TransferRequest>,
) -> Result<StatusCode, ServiceError> {
    bank.transfer(&request).await.map_err(ServiceError)?;

    Ok(StatusCode::OK)
}

//! Account handlers.
//!
//! `GET /api/accounts`, `GET /api/accounts/{id}`, `POST /api/accounts`

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
};
use tabula_persistence::core::RecordStorage;
use tabula_persistence::types::Collection;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{JsonPayload, ListParams, RecordId};
use crate::responses::envelope;
use crate::state::AppState;
use crate::validation::validate_account;

/// Handler for listing accounts.
///
/// # HTTP Request
///
/// `GET [base]/api/accounts?page=&per_page=`
///
/// # Response
///
/// - `200 OK` - One page of accounts with pagination metadata
/// - `500 Internal Server Error` - Storage failure
pub async fn list_accounts_handler<S>(
    State(state): State<AppState<S>>,
    params: ListParams,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    let query = params.query_for(Collection::Accounts);

    debug!(
        page = query.page.page(),
        per_page = query.page.per_page(),
        "Processing account list request"
    );

    let page = state.storage().list_accounts(&query).await?;
    Ok(envelope::page(page))
}

/// Handler for reading one account.
///
/// # Response
///
/// - `200 OK` - The account
/// - `404 Not Found` - No account with this id
pub async fn read_account_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    debug!(id, "Processing account read request");

    match state.storage().read_account(id).await? {
        Some(account) => Ok(envelope::record(StatusCode::OK, &account)),
        None => Err(RestError::NotFound {
            collection: Collection::Accounts.display_name().to_string(),
            id,
        }),
    }
}

/// Handler for creating an account.
///
/// # Request Body
///
/// ```json
/// {"handle": "alice", "contact-address": "alice@example.com"}
/// ```
///
/// # Response
///
/// - `201 Created` - The stored account
/// - `400 Bad Request` - Missing or malformed field
/// - `500 Internal Server Error` - Storage failure, including a duplicate handle
///   or contact address
pub async fn create_account_handler<S>(
    State(state): State<AppState<S>>,
    JsonPayload(payload): JsonPayload,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    let candidate = validate_account(&payload)?;

    debug!(handle = %candidate.handle, "Processing account create request");

    let account = state.storage().create_account(candidate).await?;
    Ok(envelope::record(StatusCode::CREATED, &account))
}

//! Credit balance read handler.

use axum::extract::State;
use axum::Json;

use sceneflow_store::models::CreditBalance;

use crate::error::AppResult;
use crate::middleware::auth::AuthIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/credits
///
/// The caller's balance. Callers without a balance row get a zero
/// balance, not an error; the client uses this as a pre-flight gate
/// before create operations.
pub async fn get_credits(
    auth: AuthIdentity,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CreditBalance>>> {
    let balance = match state.store.credit_balance(&auth.email).await? {
        Some(balance) => balance,
        None => CreditBalance::empty(auth.email),
    };
    Ok(Json(DataResponse { data: balance }))
}

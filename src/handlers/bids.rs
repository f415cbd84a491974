use axum::{
    extract::{Path, State},
    response::Response,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::{first_param, ok_empty, ok_json, ApiError, ApiJson, ApiQuery};

pub async fn create_bid(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateBidRequest>,
) -> Result<Response, ApiError> {
    if !state.store.tender_exists(&req.tender_id).await? {
        return Err(ApiError::bad_request("Invalid tender ID"));
    }

    let creator_id = state
        .store
        .find_employee_id(&req.creator_username)
        .await?
        .ok_or_else(|| ApiError::bad_request("Invalid creator username"))?;

    let bid = state.store.create_bid(&req, &creator_id).await?;
    tracing::info!("Created bid {} for tender {}", bid.id, bid.tender_id);
    ok_json(&state, &bid)
}

pub async fn update_bid_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let status = first_param(&params, "status").unwrap_or_default();
    if !entity_status::is_valid(status) {
        return Err(ApiError::bad_request("Invalid status"));
    }

    state.store.update_bid_status(&id, status).await?;
    tracing::info!("Bid {} status set to {}", id, status);
    Ok(ok_empty(&state))
}

pub async fn publish_bid(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.store.publish_bid(&id).await?;
    tracing::info!("Published bid {}", id);
    Ok(ok_empty(&state))
}

pub async fn cancel_bid(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.store.cancel_bid(&id).await?;
    tracing::info!("Canceled bid {}", id);
    Ok(ok_empty(&state))
}

pub async fn edit_bid(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EditBidRequest>,
) -> Result<Response, ApiError> {
    state.store.edit_bid(&id, &req).await?;
    Ok(ok_empty(&state))
}

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use crate::constants::{MAX_CLASS_ID, MIN_CLASS_ID};
use crate::extractors::JsonBody;
use crate::response::AppError;
use crate::routes::CLASS_ID_RANGE_MSG;
use crate::state::AppState;
use crate::store::operations::progress::ProgressStatus;
use crate::validation;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/progress", get(list_progress))
        .route("/progress/:classId", put(update_progress))
}

/// Returns the raw rows plus a total map for class ids 1..24, with
/// absent entries defaulted to not_started. The default lives here,
/// not in the store: progress is a total function over the catalog.
async fn list_progress(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = state.store().list_progress()?;

    let mut map: BTreeMap<u32, ProgressStatus> = (MIN_CLASS_ID..=MAX_CLASS_ID)
        .map(|id| (id, ProgressStatus::NotStarted))
        .collect();
    for row in &rows {
        map.insert(row.class_id, row.status);
    }

    Ok(Json(serde_json::json!({
        "progress": rows,
        "map": map,
    })))
}

#[derive(Debug, Deserialize)]
struct UpdateProgressRequest {
    status: Option<String>,
}

async fn update_progress(
    Path(class_id): Path<String>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateProgressRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let class_id = validation::parse_class_id(&class_id)
        .ok_or_else(|| AppError::bad_request(CLASS_ID_RANGE_MSG))?;

    let status = req
        .status
        .as_deref()
        .and_then(ProgressStatus::parse)
        .ok_or_else(|| {
            AppError::bad_request("status must be one of not_started|in_progress|completed.")
        })?;

    let entry = state.store().upsert_progress(class_id, status)?;

    Ok(Json(serde_json::json!({
        "classId": entry.class_id,
        "status": entry.status,
        "updatedAt": entry.updated_at,
    })))
}

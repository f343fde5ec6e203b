use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::constants::{MAX_CLASS_ID, MIN_CLASS_ID};
use crate::extractors::JsonBody;
use crate::response::AppError;
use crate::routes::CLASS_ID_RANGE_MSG;
use crate::state::AppState;
use crate::store::StoreError;
use crate::validation;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route("/bookmarks/:bookmarkId", axum::routing::delete(delete_bookmark))
}

async fn list_bookmarks(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let bookmarks = state.store().list_bookmarks()?;
    Ok(Json(serde_json::json!({ "bookmarks": bookmarks })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookmarkRequest {
    class_id: Option<i64>,
    section_key: Option<String>,
    anchor_id: Option<String>,
    label: Option<String>,
}

async fn create_bookmark(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateBookmarkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let class_id = match req.class_id {
        Some(id) if (MIN_CLASS_ID as i64..=MAX_CLASS_ID as i64).contains(&id) => id as u32,
        _ => return Err(AppError::bad_request(CLASS_ID_RANGE_MSG)),
    };

    let section_key = validation::required_trimmed(req.section_key.as_deref().unwrap_or(""));
    let anchor_id = validation::required_trimmed(req.anchor_id.as_deref().unwrap_or(""));
    let label = validation::required_trimmed(req.label.as_deref().unwrap_or(""));
    let (Some(section_key), Some(anchor_id), Some(label)) = (section_key, anchor_id, label) else {
        return Err(AppError::bad_request(
            "sectionKey, anchorId, and label are required.",
        ));
    };

    let bookmark = match state
        .store()
        .insert_bookmark(class_id, &section_key, &anchor_id, &label)
    {
        Ok(record) => record,
        Err(StoreError::Conflict { .. }) => {
            return Err(AppError::conflict(
                "Bookmark already exists for this section.",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "bookmark": bookmark })),
    ))
}

async fn delete_bookmark(
    Path(bookmark_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let bookmark_id = validation::parse_row_id(&bookmark_id)
        .ok_or_else(|| AppError::bad_request("bookmarkId must be a positive integer."))?;

    if !state.store().delete_bookmark(bookmark_id)? {
        return Err(AppError::not_found("Bookmark not found."));
    }

    Ok(StatusCode::NO_CONTENT)
}

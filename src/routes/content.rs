use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::response::AppError;
use crate::routes::CLASS_ID_RANGE_MSG;
use crate::state::AppState;
use crate::validation;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_classes))
        .route("/classes/:id", get(get_class))
}

/// Full class index, ascending by id.
async fn list_classes(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    Json(serde_json::json!({
        "classes": state.content().class_index(),
    }))
}

async fn get_class(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let class_id =
        validation::parse_class_id(&id).ok_or_else(|| AppError::bad_request(CLASS_ID_RANGE_MSG))?;

    // The catalog is dense over 1..24, so a miss here means the seed
    // data is incomplete rather than a bad request
    let topic = state
        .content()
        .class_by_id(class_id)
        .ok_or_else(|| AppError::not_found("Class not found."))?;

    Ok(Json(serde_json::json!({ "class": topic })))
}

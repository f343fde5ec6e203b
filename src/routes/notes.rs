use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::constants::{MAX_CLASS_ID, MIN_CLASS_ID};
use crate::extractors::JsonBody;
use crate::response::AppError;
use crate::routes::CLASS_ID_RANGE_MSG;
use crate::state::AppState;
use crate::store::StoreError;
use crate::validation::{self, NoteTextError};

pub fn router() -> Router<AppState> {
    // GET takes a class id, PUT/DELETE take a note id; axum requires
    // one shared segment name for the same path
    Router::new()
        .route("/notes", post(create_note))
        .route("/notes/:id", get(list_notes).put(update_note).delete(delete_note))
}

async fn list_notes(
    Path(class_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let class_id = validation::parse_class_id(&class_id)
        .ok_or_else(|| AppError::bad_request(CLASS_ID_RANGE_MSG))?;

    let notes = state.store().list_notes_by_class(class_id)?;
    Ok(Json(serde_json::json!({ "notes": notes })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateNoteRequest {
    class_id: Option<i64>,
    section_key: Option<String>,
    note: Option<String>,
}

async fn create_note(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let class_id = match req.class_id {
        Some(id) if (MIN_CLASS_ID as i64..=MAX_CLASS_ID as i64).contains(&id) => id as u32,
        _ => return Err(AppError::bad_request(CLASS_ID_RANGE_MSG)),
    };
    let section_key = validation::required_trimmed(req.section_key.as_deref().unwrap_or(""))
        .ok_or_else(|| AppError::bad_request("sectionKey is required."))?;
    let note = validate_note_field(req.note.as_deref())?;

    let created = state.store().insert_note(class_id, &section_key, &note)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "note": created })),
    ))
}

#[derive(Debug, Deserialize)]
struct UpdateNoteRequest {
    note: Option<String>,
}

async fn update_note(
    Path(note_id): Path<String>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let note_id = validation::parse_row_id(&note_id)
        .ok_or_else(|| AppError::bad_request("noteId must be a positive integer."))?;
    let note = validate_note_field(req.note.as_deref())?;

    let updated = match state.store().update_note(note_id, &note) {
        Ok(record) => record,
        Err(StoreError::NotFound { .. }) => {
            return Err(AppError::not_found("Note not found."));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(serde_json::json!({
        "noteId": updated.id,
        "note": updated.note,
        "updatedAt": updated.updated_at,
    })))
}

async fn delete_note(
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let note_id = validation::parse_row_id(&note_id)
        .ok_or_else(|| AppError::bad_request("noteId must be a positive integer."))?;

    if !state.store().delete_note(note_id)? {
        return Err(AppError::not_found("Note not found."));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn validate_note_field(raw: Option<&str>) -> Result<String, AppError> {
    match validation::validate_note_text(raw.unwrap_or("")) {
        Ok(text) => Ok(text),
        Err(NoteTextError::Empty) => Err(AppError::bad_request("note is required.")),
        Err(NoteTextError::TooLong) => {
            Err(AppError::bad_request("note exceeds 4000 characters."))
        }
    }
}

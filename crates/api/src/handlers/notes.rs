use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use campus_core::{
    errors::CampusError,
    models::{
        note::{CreateNoteRequest, Note, NoteQuery, UpdateNoteRequest},
        user::Role,
        DeleteResponse,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{AuthUser, RequireAdmin, RequireFaculty},
        error_handling::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    ApiState,
};

fn note_not_found(id: Uuid) -> AppError {
    AppError(CampusError::NotFound(format!("Note with ID {} not found", id)))
}

/// Owners and admins may change a note.
fn ensure_can_modify(auth: &AuthUser, note: &Note) -> Result<(), AppError> {
    if auth.role() == Role::Admin || note.faculty_id == auth.id() {
        Ok(())
    } else {
        Err(AppError(CampusError::Authorization(
            "Only the uploading faculty member or an admin may change this note".to_string(),
        )))
    }
}

#[axum::debug_handler]
pub async fn create_note(
    State(state): State<Arc<ApiState>>,
    RequireFaculty(faculty): RequireFaculty,
    AppJson(payload): AppJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    payload.validate()?;

    let note = state.db.notes.write().await.add_note(faculty.id(), payload);
    info!("Note uploaded: id={}, faculty_id={}", note.id, note.faculty_id);

    Ok((StatusCode::CREATED, Json(note)))
}

/// Students only ever see approved notes; staff see the whole catalogue.
#[axum::debug_handler]
pub async fn list_notes(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppQuery(query): AppQuery<NoteQuery>,
) -> Json<Vec<Note>> {
    let notes = state.db.notes.read().await;
    let subject = query.subject.as_deref().filter(|s| !s.trim().is_empty());
    let unit = query.unit.as_deref().filter(|u| !u.trim().is_empty());

    let listed = if auth.role() == Role::Student {
        match (subject, unit) {
            (Some(subject), Some(unit)) => notes.notes_by_subject_and_unit(subject, unit),
            (Some(subject), None) => notes.notes_by_subject(subject),
            (None, unit) => filter_notes(notes.approved_notes(), None, unit),
        }
    } else {
        filter_notes(notes.all_notes(), subject, unit)
    };

    Json(listed)
}

fn filter_notes(notes: Vec<Note>, subject: Option<&str>, unit: Option<&str>) -> Vec<Note> {
    notes
        .into_iter()
        .filter(|note| subject.is_none_or(|s| note.subject.eq_ignore_ascii_case(s)))
        .filter(|note| unit.is_none_or(|u| note.unit.eq_ignore_ascii_case(u)))
        .collect()
}

#[axum::debug_handler]
pub async fn my_notes(
    State(state): State<Arc<ApiState>>,
    RequireFaculty(faculty): RequireFaculty,
) -> Json<Vec<Note>> {
    Json(state.db.notes.read().await.notes_by_faculty(faculty.id()))
}

#[axum::debug_handler]
pub async fn update_note(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateNoteRequest>,
) -> Result<Json<Note>, AppError> {
    payload.validate()?;

    let mut notes = state.db.notes.write().await;
    let note = notes.note_by_id(id).ok_or_else(|| note_not_found(id))?;
    ensure_can_modify(&auth, &note)?;

    let note = notes
        .update_note(id, &payload)
        .ok_or_else(|| note_not_found(id))?;

    Ok(Json(note))
}

#[axum::debug_handler]
pub async fn approve_note(
    State(state): State<Arc<ApiState>>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Note>, AppError> {
    let note = state
        .db
        .notes
        .write()
        .await
        .approve_note(id)
        .ok_or_else(|| note_not_found(id))?;
    info!("Note approved: id={}, by={}", id, admin.id());

    Ok(Json(note))
}

#[axum::debug_handler]
pub async fn delete_note(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let mut notes = state.db.notes.write().await;
    let note = notes.note_by_id(id).ok_or_else(|| note_not_found(id))?;
    ensure_can_modify(&auth, &note)?;

    let deleted = notes.delete_note(id);
    Ok(Json(DeleteResponse { deleted }))
}

use campus_core::models::note::{CreateNoteRequest, Note, UpdateNoteRequest};
use chrono::Utc;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn all_notes(&self) -> Vec<Note> {
        self.notes.clone()
    }

    pub fn note_by_id(&self, id: Uuid) -> Option<Note> {
        self.notes.iter().find(|note| note.id == id).cloned()
    }

    pub fn approved_notes(&self) -> Vec<Note> {
        self.notes.iter().filter(|note| note.approved).cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.notes.iter().filter(|note| !note.approved).count()
    }

    pub fn notes_by_faculty(&self, faculty_id: Uuid) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| note.faculty_id == faculty_id)
            .cloned()
            .collect()
    }

    /// Approved notes for a subject, compared case-insensitively.
    pub fn notes_by_subject(&self, subject: &str) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| note.approved && note.subject.eq_ignore_ascii_case(subject))
            .cloned()
            .collect()
    }

    /// Approved notes for a subject and unit, compared case-insensitively.
    pub fn notes_by_subject_and_unit(&self, subject: &str, unit: &str) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| {
                note.approved
                    && note.subject.eq_ignore_ascii_case(subject)
                    && note.unit.eq_ignore_ascii_case(unit)
            })
            .cloned()
            .collect()
    }

    /// Stores a new note for `faculty_id`. New notes always start unapproved.
    pub fn add_note(&mut self, faculty_id: Uuid, draft: CreateNoteRequest) -> Note {
        let note = Note {
            id: Uuid::new_v4(),
            faculty_id,
            subject: draft.subject,
            unit: draft.unit,
            tags: draft.tags,
            file_url: draft.file_url,
            approved: false,
            upload_date: Utc::now(),
            description: draft.description,
        };
        tracing::debug!("Adding note: id={}, faculty_id={}", note.id, faculty_id);

        self.notes.push(note.clone());
        note
    }

    pub fn update_note(&mut self, id: Uuid, changes: &UpdateNoteRequest) -> Option<Note> {
        let note = self.notes.iter_mut().find(|note| note.id == id)?;
        changes.apply(note);
        Some(note.clone())
    }

    /// Marks a note approved. Approving twice is harmless.
    pub fn approve_note(&mut self, id: Uuid) -> Option<Note> {
        let note = self.notes.iter_mut().find(|note| note.id == id)?;
        note.approved = true;
        Some(note.clone())
    }

    pub fn delete_note(&mut self, id: Uuid) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        self.notes.len() < before
    }
}

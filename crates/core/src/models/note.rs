use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_field, CampusResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub subject: String,
    pub unit: String,
    pub tags: Vec<String>,
    /// Link or data URI of the uploaded material.
    pub file_url: String,
    pub approved: bool,
    pub upload_date: DateTime<Utc>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub subject: String,
    pub unit: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub file_url: String,
    pub description: Option<String>,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> CampusResult<()> {
        require_field(&self.subject, "subject")?;
        require_field(&self.unit, "unit")?;
        require_field(&self.file_url, "file_url")?;
        Ok(())
    }
}

/// Editable note fields. Approval is deliberately absent: it only moves
/// forward through the approve operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub subject: Option<String>,
    pub unit: Option<String>,
    pub tags: Option<Vec<String>>,
    pub file_url: Option<String>,
    pub description: Option<String>,
}

impl UpdateNoteRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if let Some(subject) = &self.subject {
            require_field(subject, "subject")?;
        }
        if let Some(unit) = &self.unit {
            require_field(unit, "unit")?;
        }
        if let Some(file_url) = &self.file_url {
            require_field(file_url, "file_url")?;
        }
        Ok(())
    }

    pub fn apply(&self, note: &mut Note) {
        if let Some(subject) = &self.subject {
            note.subject = subject.clone();
        }
        if let Some(unit) = &self.unit {
            note.unit = unit.clone();
        }
        if let Some(tags) = &self.tags {
            note.tags = tags.clone();
        }
        if let Some(file_url) = &self.file_url {
            note.file_url = file_url.clone();
        }
        if let Some(description) = &self.description {
            note.description = Some(description.clone());
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteQuery {
    pub subject: Option<String>,
    pub unit: Option<String>,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_field, CampusResult};
use crate::models::user::UserResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

/// One attendance entry. At most one record exists per
/// (student_id, subject, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    /// Wall-clock time the record was written, formatted `HH:MM`.
    pub time: String,
    pub status: AttendanceStatus,
    pub subject: String,
    pub creator_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    pub student_id: Uuid,
    pub subject: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl MarkAttendanceRequest {
    pub fn validate(&self) -> CampusResult<()> {
        require_field(&self.subject, "subject")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAttendance {
    pub student_id: Uuid,
    pub status: AttendanceStatus,
}

/// A whole class marked at once. Students without an entry are recorded
/// as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassAttendanceRequest {
    pub subject: String,
    pub date: NaiveDate,
    /// Section whose roster is marked. Every student when absent.
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub statuses: Vec<StudentAttendance>,
}

impl ClassAttendanceRequest {
    pub fn validate(&self) -> CampusResult<()> {
        require_field(&self.subject, "subject")
    }

    /// Status submitted for the student; unlisted students are absent.
    pub fn status_for(&self, student_id: Uuid) -> AttendanceStatus {
        self.statuses
            .iter()
            .find(|entry| entry.student_id == student_id)
            .map(|entry| entry.status)
            .unwrap_or(AttendanceStatus::Absent)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassAttendanceResponse {
    pub subject: String,
    pub date: NaiveDate,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSheetQuery {
    pub subject: String,
    pub date: NaiveDate,
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSheetEntry {
    pub student_id: Uuid,
    pub name: String,
    pub roll_no: Option<String>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacialAttendanceRequest {
    pub subject: String,
    /// Captured frame, usually a data URI.
    pub image_data: String,
}

impl FacialAttendanceRequest {
    pub fn validate(&self) -> CampusResult<()> {
        require_field(&self.subject, "subject")?;
        require_field(&self.image_data, "image_data")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceFilterQuery {
    pub date: Option<NaiveDate>,
    pub subject: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStats {
    pub total_present: usize,
    pub total_absent: usize,
    pub total_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAttendance {
    pub subject: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAttendanceSummary {
    pub student_id: Uuid,
    pub overall_percentage: f64,
    pub subjects: Vec<SubjectAttendance>,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LowAttendanceQuery {
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowAttendanceStudent {
    pub student: UserResponse,
    pub percentage: f64,
}

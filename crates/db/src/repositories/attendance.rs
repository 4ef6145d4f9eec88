use std::collections::HashSet;

use campus_core::models::{
    attendance::{
        AttendanceRecord, AttendanceStats, AttendanceStatus, ClassAttendanceRequest,
        ClassSheetEntry,
    },
    user::User,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

/// Default cut-off below which a student's overall attendance is flagged.
pub const DEFAULT_LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

/// Narrowing applied on top of the records a staff member may see.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordFilter<'a> {
    /// Subjects the caller teaches. `None` means every subject.
    pub subjects: Option<&'a [String]>,
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of the subject.
    pub subject_contains: Option<&'a str>,
    /// Students allowed through, typically everyone in one section.
    pub students: Option<&'a HashSet<Uuid>>,
}

/// Attendance entries keyed by (student, subject, date).
#[derive(Debug, Default)]
pub struct AttendanceStore {
    records: Vec<AttendanceRecord>,
}

impl AttendanceStore {
    /// Records `status` for the student, stamped with the current time.
    pub fn mark_attendance(
        &mut self,
        student_id: Uuid,
        subject: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        creator_id: Uuid,
    ) -> AttendanceRecord {
        let now = Utc::now().time();
        self.mark_attendance_at(student_id, subject, date, now, status, creator_id)
    }

    /// Records `status` for the current UTC date, stamped with the current
    /// UTC time. Date and time come from one clock reading.
    pub fn mark_attendance_now(
        &mut self,
        student_id: Uuid,
        subject: &str,
        status: AttendanceStatus,
        creator_id: Uuid,
    ) -> AttendanceRecord {
        let now = Utc::now();
        self.mark_attendance_at(
            student_id,
            subject,
            now.date_naive(),
            now.time(),
            status,
            creator_id,
        )
    }

    /// Upsert keyed by (student, subject, date). An existing record for the
    /// key is replaced where it stands and keeps its id; otherwise the new
    /// record is appended.
    pub fn mark_attendance_at(
        &mut self,
        student_id: Uuid,
        subject: &str,
        date: NaiveDate,
        time: NaiveTime,
        status: AttendanceStatus,
        creator_id: Uuid,
    ) -> AttendanceRecord {
        let time = time.format("%H:%M").to_string();

        let existing = self.records.iter_mut().find(|record| {
            record.student_id == student_id && record.subject == subject && record.date == date
        });

        match existing {
            Some(record) => {
                tracing::debug!(
                    "Replacing attendance: student_id={}, subject={}, date={}, status={:?}",
                    student_id, subject, date, status
                );
                record.time = time;
                record.status = status;
                record.creator_id = creator_id;
                record.clone()
            }
            None => {
                let record = AttendanceRecord {
                    id: Uuid::new_v4(),
                    student_id,
                    date,
                    time,
                    status,
                    subject: subject.to_string(),
                    creator_id,
                };
                tracing::debug!(
                    "Adding attendance: student_id={}, subject={}, date={}, status={:?}",
                    student_id, subject, date, status
                );
                self.records.push(record.clone());
                record
            }
        }
    }

    pub fn all_records(&self) -> Vec<AttendanceRecord> {
        self.records.clone()
    }

    pub fn records_for_student(&self, student_id: Uuid) -> Vec<AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.student_id == student_id)
            .cloned()
            .collect()
    }

    pub fn records_for_date(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.date == date)
            .cloned()
            .collect()
    }

    /// Records for a subject, compared case-insensitively.
    pub fn records_for_subject(&self, subject: &str) -> Vec<AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.subject.eq_ignore_ascii_case(subject))
            .cloned()
            .collect()
    }

    /// Share of the student's records marked present, as a percentage.
    /// A student without records is at 0.
    pub fn overall_percentage(&self, student_id: Uuid) -> f64 {
        percentage(self.records.iter().filter(|r| r.student_id == student_id))
    }

    pub fn subject_percentage(&self, student_id: Uuid, subject: &str) -> f64 {
        percentage(
            self.records
                .iter()
                .filter(|r| r.student_id == student_id && r.subject == subject),
        )
    }

    /// Subjects the student has records for, in first-seen order.
    pub fn subjects_for_student(&self, student_id: Uuid) -> Vec<String> {
        let mut subjects: Vec<String> = Vec::new();
        for record in self.records.iter().filter(|r| r.student_id == student_id) {
            if !subjects.contains(&record.subject) {
                subjects.push(record.subject.clone());
            }
        }
        subjects
    }

    pub fn stats_for_admin(&self) -> AttendanceStats {
        let count = |status: AttendanceStatus| {
            self.records.iter().filter(|r| r.status == status).count()
        };

        AttendanceStats {
            total_present: count(AttendanceStatus::Present),
            total_absent: count(AttendanceStatus::Absent),
            total_records: self.records.len(),
        }
    }

    /// Students whose overall percentage is strictly below `threshold`,
    /// paired with that percentage.
    pub fn low_attendance(&self, students: &[User], threshold: f64) -> Vec<(User, f64)> {
        students
            .iter()
            .map(|student| (student.clone(), self.overall_percentage(student.id)))
            .filter(|(_, percentage)| *percentage < threshold)
            .collect()
    }

    pub fn filter_records(&self, filter: &RecordFilter<'_>) -> Vec<AttendanceRecord> {
        let needle = filter.subject_contains.map(str::to_lowercase);

        self.records
            .iter()
            .filter(|record| {
                filter
                    .subjects
                    .is_none_or(|subjects| subjects.contains(&record.subject))
            })
            .filter(|record| filter.date.is_none_or(|date| record.date == date))
            .filter(|record| {
                needle
                    .as_deref()
                    .is_none_or(|needle| record.subject.to_lowercase().contains(needle))
            })
            .filter(|record| {
                filter
                    .students
                    .is_none_or(|students| students.contains(&record.student_id))
            })
            .cloned()
            .collect()
    }

    /// Current status of every student for one subject and date. Students
    /// not yet marked default to absent.
    pub fn class_sheet(
        &self,
        students: &[User],
        subject: &str,
        date: NaiveDate,
    ) -> Vec<ClassSheetEntry> {
        students
            .iter()
            .map(|student| {
                let status = self
                    .records
                    .iter()
                    .find(|r| r.student_id == student.id && r.subject == subject && r.date == date)
                    .map(|r| r.status)
                    .unwrap_or(AttendanceStatus::Absent);

                ClassSheetEntry {
                    student_id: student.id,
                    name: student.name.clone(),
                    roll_no: student.profile.roll_no.clone(),
                    status,
                }
            })
            .collect()
    }

    /// Marks every student on the roster for the submitted subject and date.
    /// Students the submission leaves out are recorded absent.
    pub fn submit_class_attendance(
        &mut self,
        roster: &[User],
        submission: &ClassAttendanceRequest,
        creator_id: Uuid,
    ) -> Vec<AttendanceRecord> {
        roster
            .iter()
            .map(|student| {
                self.mark_attendance(
                    student.id,
                    &submission.subject,
                    submission.date,
                    submission.status_for(student.id),
                    creator_id,
                )
            })
            .collect()
    }
}

/// Simulated face match: the capture must equal the stored facial data.
pub fn recognize_face(student: &User, captured: &str) -> bool {
    student
        .facial_data
        .as_deref()
        .is_some_and(|stored| stored == captured)
}

fn percentage<'a>(records: impl Iterator<Item = &'a AttendanceRecord>) -> f64 {
    let (present, total) = records.fold((0usize, 0usize), |(present, total), record| {
        let present = present + usize::from(record.status == AttendanceStatus::Present);
        (present, total + 1)
    });

    if total == 0 {
        return 0.0;
    }
    present as f64 / total as f64 * 100.0
}

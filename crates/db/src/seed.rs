//! # Demo Data
//!
//! A small campus to explore the API with: one admin, one faculty member
//! teaching DBMS and DSA, two students in section A with a few days of
//! attendance, and a handful of reminders. Every demo account uses the
//! password `password`.

use campus_core::models::{
    attendance::AttendanceStatus,
    reminder::{CreateReminderRequest, TargetRole},
    user::{NewUser, Role, User, UserProfile},
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use eyre::{eyre, Result};
use tracing::info;

use crate::{
    password::hash_password,
    repositories::{
        attendance::AttendanceStore, note::NoteStore, reminder::ReminderStore, user::UserStore,
    },
    Database,
};

pub const DEMO_PASSWORD: &str = "password";

/// Builds a [`Database`] pre-filled with the demo campus.
pub fn demo_database() -> Result<Database> {
    let password_hash = hash_password(DEMO_PASSWORD)?;
    let mut users = UserStore::default();

    let admin = users.add_user(NewUser {
        email: "admin@example.com".to_string(),
        password_hash: password_hash.clone(),
        role: Role::Admin,
        name: "Admin User".to_string(),
        approved: true,
        profile: UserProfile::default(),
        facial_data: None,
    });
    let faculty = users.add_user(NewUser {
        email: "faculty@example.com".to_string(),
        password_hash: password_hash.clone(),
        role: Role::Faculty,
        name: "Dr. Alice Smith".to_string(),
        approved: true,
        profile: UserProfile {
            branch: Some("Computer Science".to_string()),
            department: Some("CSE".to_string()),
            subjects: vec!["DBMS".to_string(), "DSA".to_string()],
            ..UserProfile::default()
        },
        facial_data: None,
    });
    let bob = users.add_user(demo_student(
        "student@example.com",
        "Bob Johnson",
        "CS001",
        "base64simulatedstudentface",
        &password_hash,
    ));
    let charlie = users.add_user(demo_student(
        "student2@example.com",
        "Charlie Brown",
        "CS002",
        "base64simulatedstudentface2",
        &password_hash,
    ));

    let mut attendance = AttendanceStore::default();
    seed_attendance(
        &mut attendance,
        &bob,
        &faculty,
        [
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Present,
        ],
    )?;
    seed_attendance(
        &mut attendance,
        &charlie,
        &faculty,
        [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Present,
            AttendanceStatus::Present,
        ],
    )?;

    let mut reminders = ReminderStore::default();
    reminders.insert_reminder(
        admin.id,
        CreateReminderRequest {
            title: "Mid-term Exam Schedule Released".to_string(),
            description: "Check your portal for the updated mid-term exam schedule. Applies to all branches.".to_string(),
            target_role: TargetRole::Student,
            target_users: Vec::new(),
            due_date: utc(2024, 3, 25, 9, 0)?,
        },
        utc(2024, 3, 20, 10, 0)?,
    );
    reminders.insert_reminder(
        faculty.id,
        CreateReminderRequest {
            title: "DSA Assignment 2 Deadline".to_string(),
            description: "The deadline for Data Structures & Algorithms Assignment 2 is approaching.".to_string(),
            target_role: TargetRole::Student,
            target_users: Vec::new(),
            due_date: utc(2024, 3, 30, 23, 59)?,
        },
        utc(2024, 3, 22, 14, 30)?,
    );
    reminders.insert_reminder(
        admin.id,
        CreateReminderRequest {
            title: "Faculty Meeting".to_string(),
            description: "Mandatory faculty meeting in Auditorium A on Friday.".to_string(),
            target_role: TargetRole::Faculty,
            target_users: Vec::new(),
            due_date: utc(2024, 3, 29, 11, 0)?,
        },
        utc(2024, 3, 25, 9, 0)?,
    );

    info!(
        "Seeded demo data: {} users, {} attendance records, {} reminders",
        users.len(),
        attendance.all_records().len(),
        reminders.len()
    );

    Ok(Database::from_stores(
        users,
        NoteStore::default(),
        attendance,
        reminders,
    ))
}

fn demo_student(
    email: &str,
    name: &str,
    roll_no: &str,
    facial_data: &str,
    password_hash: &str,
) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        role: Role::Student,
        name: name.to_string(),
        approved: true,
        profile: UserProfile {
            branch: Some("Computer Science".to_string()),
            year: Some(3),
            semester: Some(6),
            section: Some("A".to_string()),
            roll_no: Some(roll_no.to_string()),
            ..UserProfile::default()
        },
        facial_data: Some(facial_data.to_string()),
    }
}

/// Three DBMS classes on 1-3 March 2024 and one DSA class on 4 March.
fn seed_attendance(
    store: &mut AttendanceStore,
    student: &User,
    faculty: &User,
    statuses: [AttendanceStatus; 4],
) -> Result<()> {
    let classes = [
        ("DBMS", 1, (9, 0)),
        ("DBMS", 2, (9, 5)),
        ("DBMS", 3, (9, 0)),
        ("DSA", 4, (10, 0)),
    ];

    for ((subject, day, (hour, minute)), status) in classes.into_iter().zip(statuses) {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).ok_or_else(|| eyre!("Invalid seed date"))?;
        let time =
            NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| eyre!("Invalid seed time"))?;
        store.mark_attendance_at(student.id, subject, date, time, status, faculty.id);
    }
    Ok(())
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| eyre!("Invalid seed timestamp"))
}

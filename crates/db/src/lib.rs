//! # Campus Stores
//!
//! In-memory stores for users, notes, attendance and reminders, plus the
//! session manager that authenticates against the user store.
//!
//! Every store is an ordered list owned by a single [`Database`] that lives
//! for the whole process. Each store sits behind its own async read/write
//! lock so that a single operation (for example the attendance upsert) runs
//! to completion before any other writer touches the same store.

pub mod password;
pub mod repositories;
pub mod seed;

use std::sync::Arc;

use tokio::sync::RwLock;

use repositories::{
    attendance::AttendanceStore, note::NoteStore, reminder::ReminderStore,
    session::SessionManager, user::UserStore,
};

pub struct Database {
    pub users: Arc<RwLock<UserStore>>,
    pub notes: RwLock<NoteStore>,
    pub attendance: RwLock<AttendanceStore>,
    pub reminders: RwLock<ReminderStore>,
    pub sessions: SessionManager,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::from_stores(
            UserStore::default(),
            NoteStore::default(),
            AttendanceStore::default(),
            ReminderStore::default(),
        )
    }

    pub fn from_stores(
        users: UserStore,
        notes: NoteStore,
        attendance: AttendanceStore,
        reminders: ReminderStore,
    ) -> Self {
        let users = Arc::new(RwLock::new(users));
        Self {
            sessions: SessionManager::new(users.clone()),
            users,
            notes: RwLock::new(notes),
            attendance: RwLock::new(attendance),
            reminders: RwLock::new(reminders),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

use campus_core::models::{
    reminder::{CreateReminderRequest, Reminder},
    user::Role,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ReminderStore {
    reminders: Vec<Reminder>,
}

impl ReminderStore {
    pub fn all_reminders(&self) -> Vec<Reminder> {
        self.reminders.clone()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn reminder_by_id(&self, id: Uuid) -> Option<Reminder> {
        self.reminders.iter().find(|r| r.id == id).cloned()
    }

    pub fn reminders_by_creator(&self, creator_id: Uuid) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|r| r.creator_id == creator_id)
            .cloned()
            .collect()
    }

    /// Upcoming reminders visible to `role`: due at or after `now`, soonest
    /// first.
    pub fn reminders_for_role(&self, role: Role, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut upcoming: Vec<Reminder> = self
            .reminders
            .iter()
            .filter(|r| r.target_role.includes(role) && r.due_date >= now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|r| r.due_date);
        upcoming
    }

    /// Every reminder ever sent to `role`, most recently created first.
    pub fn history_for_role(&self, role: Role) -> Vec<Reminder> {
        let mut history: Vec<Reminder> = self
            .reminders
            .iter()
            .filter(|r| r.target_role.includes(role))
            .cloned()
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        history
    }

    pub fn add_reminder(&mut self, creator_id: Uuid, draft: CreateReminderRequest) -> Reminder {
        self.insert_reminder(creator_id, draft, Utc::now())
    }

    /// Stores a reminder with an explicit creation time.
    pub fn insert_reminder(
        &mut self,
        creator_id: Uuid,
        draft: CreateReminderRequest,
        created_at: DateTime<Utc>,
    ) -> Reminder {
        let reminder = Reminder {
            id: Uuid::new_v4(),
            creator_id,
            title: draft.title,
            description: draft.description,
            target_role: draft.target_role,
            target_users: draft.target_users,
            due_date: draft.due_date,
            created_at,
        };
        tracing::debug!(
            "Adding reminder: id={}, target_role={:?}, due_date={}",
            reminder.id, reminder.target_role, reminder.due_date
        );

        self.reminders.push(reminder.clone());
        reminder
    }

    pub fn delete_reminder(&mut self, id: Uuid) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        self.reminders.len() < before
    }
}

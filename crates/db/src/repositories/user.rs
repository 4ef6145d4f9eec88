use campus_core::models::user::{NewUser, Role, User};
use uuid::Uuid;

/// Ordered list of every account.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn all_users(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn user_by_id(&self, id: Uuid) -> Option<User> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    /// First account registered under `email`. Emails are not unique at the
    /// store level.
    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users.iter().find(|user| user.email == email).cloned()
    }

    pub fn users_by_role(&self, role: Role) -> Vec<User> {
        self.users
            .iter()
            .filter(|user| user.role == role)
            .cloned()
            .collect()
    }

    pub fn students(&self) -> Vec<User> {
        self.users_by_role(Role::Student)
    }

    /// Students whose section matches `section`, ignoring ASCII case and
    /// surrounding whitespace.
    pub fn students_by_section(&self, section: &str) -> Vec<User> {
        let section = section.trim();
        self.users
            .iter()
            .filter(|user| {
                user.role == Role::Student
                    && user
                        .profile
                        .section
                        .as_deref()
                        .is_some_and(|s| s.trim().eq_ignore_ascii_case(section))
            })
            .cloned()
            .collect()
    }

    pub fn add_user(&mut self, new_user: NewUser) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            name: new_user.name,
            approved: new_user.approved,
            profile: new_user.profile,
            facial_data: new_user.facial_data,
        };
        tracing::debug!("Adding user: id={}, role={}", user.id, user.role);

        self.users.push(user.clone());
        user
    }

    /// Applies `change` to the user in place. The id survives whatever the
    /// closure does to it. Returns `None` when no user has `id`.
    pub fn update_user<F>(&mut self, id: Uuid, change: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let user = self.users.iter_mut().find(|user| user.id == id)?;
        change(user);
        user.id = id;

        tracing::debug!("Updated user: id={}", id);
        Some(user.clone())
    }

    pub fn set_facial_data(&mut self, id: Uuid, facial_data: String) -> Option<User> {
        self.update_user(id, |user| user.facial_data = Some(facial_data))
    }

    pub fn delete_user(&mut self, id: Uuid) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        self.users.len() < before
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{require_field, CampusError, CampusResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }

    /// Faculty and admin accounts manage attendance, reminders and notes.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Faculty | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role-specific optional details.
///
/// Students carry branch/year/semester/section/roll number, faculty carry
/// department and the subjects they teach. None of them are enforced per role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub branch: Option<String>,
    pub year: Option<u8>,
    pub semester: Option<u8>,
    pub section: Option<String>,
    pub roll_no: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub approved: bool,
    #[serde(flatten)]
    pub profile: UserProfile,
    pub facial_data: Option<String>,
}

/// A user record before the store has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub approved: bool,
    pub profile: UserProfile,
    pub facial_data: Option<String>,
}

/// Public view of a [`User`]. Never carries the password hash or the raw
/// facial data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub approved: bool,
    #[serde(flatten)]
    pub profile: UserProfile,
    pub has_facial_data: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            name: user.name,
            approved: user.approved,
            profile: user.profile,
            has_facial_data: user.facial_data.is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl RegisterRequest {
    /// Self-registration is open to students and faculty only; admin
    /// accounts are created by another admin.
    pub fn validate(&self) -> CampusResult<()> {
        require_field(&self.email, "email")?;
        require_field(&self.password, "password")?;
        require_field(&self.name, "name")?;
        if self.role == Role::Admin {
            return Err(CampusError::Validation(
                "Admin accounts cannot be self-registered".to_string(),
            ));
        }
        Ok(())
    }
}

/// Admin-side account creation. Unlike self-registration the admin decides
/// whether the account starts approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub approved: Option<bool>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl CreateUserRequest {
    pub fn validate(&self) -> CampusResult<()> {
        require_field(&self.email, "email")?;
        require_field(&self.password, "password")?;
        require_field(&self.name, "name")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub approved: Option<bool>,
    pub branch: Option<String>,
    pub year: Option<u8>,
    pub semester: Option<u8>,
    pub section: Option<String>,
    pub roll_no: Option<String>,
    pub department: Option<String>,
    pub subjects: Option<Vec<String>>,
}

impl UpdateUserRequest {
    /// Whether the request touches fields only an admin may change.
    pub fn changes_privileges(&self) -> bool {
        self.role.is_some() || self.approved.is_some() || self.subjects.is_some()
    }

    pub fn validate(&self) -> CampusResult<()> {
        if let Some(email) = &self.email {
            require_field(email, "email")?;
        }
        if let Some(name) = &self.name {
            require_field(name, "name")?;
        }
        if let Some(password) = &self.password {
            require_field(password, "password")?;
        }
        Ok(())
    }

    /// Copies every provided field except the password onto `user`.
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(approved) = self.approved {
            user.approved = approved;
        }

        let profile = &mut user.profile;
        if let Some(branch) = &self.branch {
            profile.branch = Some(branch.clone());
        }
        if let Some(year) = self.year {
            profile.year = Some(year);
        }
        if let Some(semester) = self.semester {
            profile.semester = Some(semester);
        }
        if let Some(section) = &self.section {
            profile.section = Some(section.clone());
        }
        if let Some(roll_no) = &self.roll_no {
            profile.roll_no = Some(roll_no.clone());
        }
        if let Some(department) = &self.department {
            profile.department = Some(department.clone());
        }
        if let Some(subjects) = &self.subjects {
            profile.subjects = subjects.clone();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacialDataRequest {
    pub image_data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentQuery {
    pub section: Option<String>,
}

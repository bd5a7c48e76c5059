//! Staff accounts managed from the admin panel.

use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, NamePart, PhoneNumber};
use crate::domain::user::Role;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    /// Lenient parse; anything but `inactive` counts as active.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("inactive") {
            Self::Inactive
        } else {
            Self::Active
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct Employee {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub department: String,
    pub phone: String,
    pub status: EmployeeStatus,
    pub created_at: String,
}

impl Employee {
    /// Case-insensitive match over display name, email and department.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.email, &self.department]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Counters shown on the employees page.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct EmployeeStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub admins: usize,
}

impl EmployeeStats {
    pub fn from_employees(employees: &[Employee]) -> Self {
        let active = employees.iter().filter(|e| e.is_active()).count();
        Self {
            total: employees.len(),
            active,
            inactive: employees.len() - active,
            admins: employees.iter().filter(|e| e.role == Role::Admin).count(),
        }
    }
}

/// Validated data for registering a staff account.
#[derive(Clone, Debug, PartialEq)]
pub struct NewEmployee {
    pub first_name: NamePart,
    pub second_name: Option<NamePart>,
    pub first_last_name: NamePart,
    pub second_last_name: Option<NamePart>,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password: String,
    pub role: Role,
    pub department: Option<String>,
}

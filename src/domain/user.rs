//! Signed-in user mirrored from the backend login response.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, NamePart, PhoneNumber};

/// Roles issued by the backend.
///
/// The backend speaks Spanish (`gerente`, `mensajero`, `user`) while older
/// clients used English names (`employee`, `customer`); both spellings parse
/// into the same variant.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(alias = "gerente")]
    Manager,
    #[serde(alias = "mensajero", alias = "employee")]
    Courier,
    #[default]
    #[serde(alias = "user")]
    Customer,
}

impl Role {
    /// Every role an administrator may assign to a staff account.
    pub const ASSIGNABLE: [Role; 3] = [Role::Admin, Role::Manager, Role::Courier];

    /// Parses any backend or legacy spelling, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "manager" | "gerente" => Some(Self::Manager),
            "courier" | "mensajero" | "employee" => Some(Self::Courier),
            "customer" | "user" => Some(Self::Customer),
            _ => None,
        }
    }

    /// Value sent to the backend when registering an account with this role.
    pub fn backend_name(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "gerente",
            Self::Courier => "mensajero",
            Self::Customer => "user",
        }
    }

    /// Label shown in the interface.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Manager => "Gerente",
            Self::Courier => "Mensajero",
            Self::Customer => "Cliente",
        }
    }

    /// Admins, managers and couriers.
    pub fn is_staff(self) -> bool {
        !matches!(self, Self::Customer)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Four-part Latin American personal name.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameParts {
    pub first_name: String,
    pub second_name: Option<String>,
    pub first_last_name: String,
    pub second_last_name: Option<String>,
}

impl NameParts {
    /// Joins the non-empty parts with single spaces.
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.second_name.as_deref(),
            Some(self.first_last_name.as_str()),
            self.second_last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Identity kept in the signed session cookie between requests.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(flatten)]
    pub name_parts: NameParts,
    pub role: Role,
    /// Bearer token issued by the backend, if any.
    pub token: Option<String>,
}

impl SessionUser {
    /// Token attached to privileged backend calls. Empty when the backend
    /// did not issue one; the backend then answers 401 on its own.
    pub fn bearer(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Validated customer sign-up data.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub first_name: NamePart,
    pub second_name: Option<NamePart>,
    pub first_last_name: NamePart,
    pub second_last_name: Option<NamePart>,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password: String,
}

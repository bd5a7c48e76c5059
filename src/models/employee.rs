//! Staff accounts, which the backend calls "managers".

use serde::{Deserialize, Serialize};

use crate::domain::employee::{
    Employee as DomainEmployee, EmployeeStatus, NewEmployee as DomainNewEmployee,
};
use crate::domain::user::{NameParts, Role};
use crate::models::{lenient_optional_string, lenient_string};

/// Entry of `GET /admin/manager/roles`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Manager {
    #[serde(deserialize_with = "lenient_string", alias = "ID", alias = "_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string", alias = "Email")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string", alias = "Pnom", alias = "firstName")]
    pub first_name: String,
    #[serde(
        deserialize_with = "lenient_optional_string",
        alias = "Snom",
        alias = "secondName"
    )]
    pub second_name: Option<String>,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "Papellido",
        alias = "firstLastName"
    )]
    pub first_last_name: String,
    #[serde(
        deserialize_with = "lenient_optional_string",
        alias = "Sapellido",
        alias = "secondLastName"
    )]
    pub second_last_name: Option<String>,
    #[serde(deserialize_with = "lenient_string", alias = "Rol", alias = "rol")]
    pub role: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "departamento",
        alias = "Departamento"
    )]
    pub department: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "Telefono",
        alias = "telefono"
    )]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string", alias = "estado")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string", alias = "createdAt")]
    pub created_at: String,
}

impl From<Manager> for DomainEmployee {
    fn from(manager: Manager) -> Self {
        let name = if manager.name.trim().is_empty() {
            NameParts {
                first_name: manager.first_name,
                second_name: manager.second_name,
                first_last_name: manager.first_last_name,
                second_last_name: manager.second_last_name,
            }
            .full_name()
        } else {
            manager.name.trim().to_string()
        };
        Self {
            id: manager.id,
            email: manager.email.trim().to_lowercase(),
            name,
            role: Role::parse(&manager.role).unwrap_or_default(),
            department: manager.department,
            phone: manager.phone,
            status: EmployeeStatus::parse(&manager.status),
            created_at: manager.created_at,
        }
    }
}

/// Body of `POST /admin/manager/register`.
#[derive(Debug, Serialize)]
pub struct NewManager<'a> {
    #[serde(rename = "Pnom")]
    pub first_name: &'a str,
    #[serde(rename = "Snom")]
    pub second_name: &'a str,
    #[serde(rename = "Papellido")]
    pub first_last_name: &'a str,
    #[serde(rename = "Sapellido")]
    pub second_last_name: &'a str,
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "Password")]
    pub password: &'a str,
    #[serde(rename = "Telefono")]
    pub phone: &'a str,
    #[serde(rename = "Rol")]
    pub role: &'static str,
    #[serde(rename = "Departamento", skip_serializing_if = "Option::is_none")]
    pub department: Option<&'a str>,
}

impl<'a> From<&'a DomainNewEmployee> for NewManager<'a> {
    fn from(employee: &'a DomainNewEmployee) -> Self {
        Self {
            first_name: employee.first_name.as_str(),
            second_name: employee.second_name.as_deref().unwrap_or_default(),
            first_last_name: employee.first_last_name.as_str(),
            second_last_name: employee.second_last_name.as_deref().unwrap_or_default(),
            email: employee.email.as_str(),
            password: &employee.password,
            phone: employee.phone.as_str(),
            role: employee.role.backend_name(),
            department: employee.department.as_deref(),
        }
    }
}

/// Body of `PUT /admin/manager/update/{email}` when only the status changes.
#[derive(Debug, Serialize)]
pub struct UpdateManagerStatus {
    pub status: &'static str,
}

impl From<EmployeeStatus> for UpdateManagerStatus {
    fn from(status: EmployeeStatus) -> Self {
        Self {
            status: status.as_str(),
        }
    }
}

//! Forms for the employee administration page.

use serde::Deserialize;
use validator::Validate;

use crate::domain::employee::{EmployeeStatus, NewEmployee};
use crate::domain::types::{EmailAddress, PhoneNumber};
use crate::domain::user::Role;
use crate::forms::{FormError, optional_name, required_name};

#[derive(Debug, Deserialize, Validate)]
pub struct AddEmployeeForm {
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    pub first_last_name: String,
    #[serde(default)]
    pub second_last_name: String,
    pub email: String,
    pub phone: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    pub role: String,
    #[serde(default)]
    #[validate(length(max = 60, message = "El departamento admite hasta 60 caracteres"))]
    pub department: String,
}

impl TryFrom<AddEmployeeForm> for NewEmployee {
    type Error = FormError;

    fn try_from(form: AddEmployeeForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let role = Role::parse(&form.role)
            .filter(|role| role.is_staff())
            .ok_or(FormError::InvalidRole)?;
        let department = form.department.trim().to_string();

        Ok(Self {
            first_name: required_name(&form.first_name, 1)?,
            second_name: optional_name(&form.second_name)?,
            first_last_name: required_name(&form.first_last_name, 1)?,
            second_last_name: optional_name(&form.second_last_name)?,
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            password: form.password,
            role,
            department: (!department.is_empty()).then_some(department),
        })
    }
}

/// Activates or deactivates an account; `status` is the current one.
#[derive(Debug, Deserialize)]
pub struct ToggleEmployeeForm {
    pub email: String,
    #[serde(default)]
    pub status: String,
}

pub struct ToggleEmployeePayload {
    pub email: EmailAddress,
    pub new_status: EmployeeStatus,
}

impl TryFrom<ToggleEmployeeForm> for ToggleEmployeePayload {
    type Error = FormError;

    fn try_from(form: ToggleEmployeeForm) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            new_status: EmployeeStatus::parse(&form.status).toggled(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteEmployeeForm {
    pub email: String,
}

impl TryFrom<DeleteEmployeeForm> for EmailAddress {
    type Error = FormError;

    fn try_from(form: DeleteEmployeeForm) -> Result<Self, Self::Error> {
        EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)
    }
}

/// Query string of the employees page.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeListQuery {
    pub search: Option<String>,
}

//! Login and customer sign-up payloads.

use serde::{Deserialize, Serialize};

use crate::domain::user::{NameParts, NewCustomer, Role, SessionUser};
use crate::models::{lenient_optional_string, lenient_string};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "Password")]
    pub password: &'a str,
}

/// Customer registration body for `POST /user/register`.
#[derive(Debug, Serialize)]
pub struct RegisterUserRequest<'a> {
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
}

impl<'a> From<&'a NewCustomer> for RegisterUserRequest<'a> {
    fn from(customer: &'a NewCustomer) -> Self {
        Self {
            first_name: customer.first_name.as_str(),
            second_name: customer.second_name.as_deref().unwrap_or_default(),
            first_last_name: customer.first_last_name.as_str(),
            second_last_name: customer.second_last_name.as_deref().unwrap_or_default(),
            email: customer.email.as_str(),
            password: &customer.password,
            phone: customer.phone.as_str(),
        }
    }
}

/// Identity returned by the login and register endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserResponse {
    #[serde(deserialize_with = "lenient_string", alias = "ID", alias = "_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string", alias = "Email")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "Pnom",
        alias = "firstName"
    )]
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
        deserialize_with = "lenient_optional_string",
        alias = "accessToken",
        alias = "access_token"
    )]
    pub token: Option<String>,
}

impl From<UserResponse> for SessionUser {
    fn from(response: UserResponse) -> Self {
        let name_parts = NameParts {
            first_name: response.first_name,
            second_name: response.second_name,
            first_last_name: response.first_last_name,
            second_last_name: response.second_last_name,
        };
        let name = if response.name.trim().is_empty() {
            name_parts.full_name()
        } else {
            response.name.trim().to_string()
        };
        Self {
            id: response.id,
            email: response.email.trim().to_lowercase(),
            name,
            name_parts,
            // Unknown roles get the least privileged one.
            role: Role::parse(&response.role).unwrap_or_default(),
            token: response.token,
        }
    }
}

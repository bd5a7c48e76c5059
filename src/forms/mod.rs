//! Form definitions backing the routes.
//!
//! Every form is deserialized with all fields as strings and converted into a
//! typed payload with `TryFrom`, so a malformed number turns into an inline
//! message instead of a bare 400 from the extractor.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::{NamePart, optional_name_part};

pub mod addresses;
pub mod auth;
pub mod contact;
pub mod employees;
pub mod packages;
pub mod reports;

/// Shortest first name or first last name accepted on customer sign-up.
pub const SIGN_UP_NAME_MIN_LEN: usize = 2;

#[derive(Debug, Error, PartialEq)]
/// Errors that can occur when processing form data. The messages are shown
/// to the user as they are.
pub enum FormError {
    #[error("{}", first_validation_message(.0))]
    Validation(#[from] ValidationErrors),

    #[error("Ingresa un correo electrónico válido de hasta 60 caracteres")]
    InvalidEmail,

    #[error("Cada nombre y apellido debe tener como máximo 30 caracteres")]
    InvalidName,

    #[error("El primer nombre y el primer apellido deben tener al menos 2 caracteres")]
    NameTooShort,

    #[error("El teléfono debe tener exactamente 8 dígitos")]
    InvalidPhoneNumber,

    #[error("Las contraseñas no coinciden")]
    PasswordMismatch,

    #[error("Rol no válido")]
    InvalidRole,

    #[error("El peso debe ser un número mayor o igual a 0.1")]
    InvalidWeight,

    #[error("Las dimensiones deben ser números mayores que 0")]
    InvalidDimension,

    #[error("Selecciona direcciones de origen y destino válidas")]
    InvalidAddressId,

    #[error("El campo {0} es obligatorio y admite hasta {1} caracteres")]
    InvalidAddressField(&'static str, usize),

    #[error("Estado no válido")]
    InvalidStatus,

    #[error("El campo {0} es obligatorio")]
    MissingField(&'static str),
}

/// Picks the message of the first failing field, ordered by field name so
/// the result does not depend on hash order.
fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .find_map(|error| error.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Revisa los datos del formulario".to_string())
}

/// Trims `value` and rejects it when blank.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Mandatory name part with a minimum length.
pub(crate) fn required_name(value: &str, min_len: usize) -> Result<NamePart, FormError> {
    let part = NamePart::new(value).map_err(|_| FormError::InvalidName)?;
    if part.chars().count() < min_len {
        return Err(FormError::NameTooShort);
    }
    Ok(part)
}

pub(crate) fn optional_name(value: &str) -> Result<Option<NamePart>, FormError> {
    optional_name_part(value).map_err(|_| FormError::InvalidName)
}

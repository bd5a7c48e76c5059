use serde::Deserialize;
use validator::Validate;

use crate::domain::types::EmailAddress;
use crate::forms::{FormError, required};

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100, message = "Ingresa tu nombre"))]
    pub name: String,
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "El teléfono es demasiado largo"))]
    pub phone: String,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "El mensaje debe tener entre 1 y 2000 caracteres"
    ))]
    pub message: String,
}

/// Sanitized contact request.
#[derive(Debug, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub message: String,
}

impl TryFrom<ContactForm> for ContactMessage {
    type Error = FormError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let phone = ammonia::clean(form.phone.trim());
        Ok(Self {
            name: ammonia::clean(&required(&form.name, "nombre")?),
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: (!phone.is_empty()).then_some(phone),
            message: ammonia::clean(&required(&form.message, "mensaje")?),
        })
    }
}

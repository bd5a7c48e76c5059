//! Sign-in and customer sign-up forms.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{EmailAddress, PhoneNumber};
use crate::domain::user::NewCustomer;
use crate::forms::{FormError, SIGN_UP_NAME_MIN_LEN, optional_name, required_name};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    pub email: String,
    #[validate(length(min = 1, message = "Ingresa tu contraseña"))]
    pub password: String,
}

pub struct LoginPayload {
    pub email: EmailAddress,
    pub password: String,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let email = EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        Ok(Self {
            email,
            password: form.password,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Customer sign-up form.
pub struct RegisterForm {
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
    pub password_confirmation: String,
}

impl TryFrom<RegisterForm> for NewCustomer {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        // Nothing is sent to the backend unless both passwords match.
        if form.password != form.password_confirmation {
            return Err(FormError::PasswordMismatch);
        }
        form.validate()?;

        Ok(Self {
            first_name: required_name(&form.first_name, SIGN_UP_NAME_MIN_LEN)?,
            second_name: optional_name(&form.second_name)?,
            first_last_name: required_name(&form.first_last_name, SIGN_UP_NAME_MIN_LEN)?,
            second_last_name: optional_name(&form.second_last_name)?,
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            password: form.password,
        })
    }
}

//! Business workflows sitting between the routes and the backend client.

use thiserror::Error;

use crate::domain::access::{Access, Area, check_access};
use crate::domain::types::TypeConstraintError;
use crate::domain::user::SessionUser;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod contact;
pub mod courier;
pub mod customer;
pub mod employees;
pub mod packages;
pub mod reports;
pub mod tracking;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No session, or the backend no longer accepts its token.
    #[error("unauthorized")]
    Unauthorized,

    /// Signed in with a role that may not perform the action.
    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    /// Input the user can fix; the message is shown inline.
    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl ServiceError {
    /// Message suitable for a flash alert.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Inicia sesión para continuar".to_string(),
            Self::Forbidden => "No tienes permiso para realizar esta acción".to_string(),
            Self::NotFound => "No se encontró el recurso solicitado".to_string(),
            Self::Form(message) => message.clone(),
            Self::Repository(err) => err.user_message(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        if err.is_unauthorized() {
            Self::Unauthorized
        } else if err.is_forbidden() {
            Self::Forbidden
        } else {
            Self::Repository(err)
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        Self::Form(err.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        Self::Form(err.to_string())
    }
}

/// Applies the role gate for `area` to a signed-in user.
pub fn ensure_access(user: &SessionUser, area: Area) -> ServiceResult<()> {
    match check_access(Some(user.role), area) {
        Access::Granted => Ok(()),
        Access::Login => Err(ServiceError::Unauthorized),
        Access::Home => Err(ServiceError::Forbidden),
    }
}

/// Backend failures that are the user's to fix become inline form errors;
/// session problems keep their meaning.
pub(crate) fn repository_to_form(err: RepositoryError) -> ServiceError {
    match ServiceError::from(err) {
        ServiceError::Repository(err) => ServiceError::Form(err.user_message()),
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::user::{NameParts, Role, SessionUser};

    pub fn user(role: Role) -> SessionUser {
        SessionUser {
            id: "1".to_string(),
            email: format!("{}@nicaflex.com", role.backend_name()),
            name: role.label().to_string(),
            name_parts: NameParts::default(),
            role,
            token: Some("token".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;

    #[test]
    fn backend_session_errors_keep_their_meaning() {
        let err = ServiceError::from(RepositoryError::Status {
            status: 401,
            message: "Token inválido".to_string(),
        });
        assert!(matches!(err, ServiceError::Unauthorized));

        let err = repository_to_form(RepositoryError::Status {
            status: 409,
            message: "El email ya existe".to_string(),
        });
        assert!(matches!(err, ServiceError::Form(ref m) if m == "El email ya existe"));
    }

    #[test]
    fn ensure_access_maps_gate_outcomes() {
        let courier = test_support::user(Role::Courier);
        assert!(ensure_access(&courier, Area::Courier).is_ok());
        assert!(matches!(
            ensure_access(&courier, Area::AdminOnly),
            Err(ServiceError::Forbidden)
        ));
    }
}

use thiserror::Error;

/// Message shown when the backend cannot be reached at all.
pub const CONNECTION_ERROR_MESSAGE: &str = "Error de conexión con el servidor";

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Transport failure: DNS, TLS, refused connection or timeout.
    #[error("{CONNECTION_ERROR_MESSAGE}: {0}")]
    Connection(String),

    /// Non-success answer; `message` is the backend's own message when it
    /// sent one, otherwise `Error: <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Entity not found")]
    NotFound,

    #[error("Unexpected response from the backend: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RepositoryError {
    /// Text safe to show to the user inside a flash message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Connection(_) => CONNECTION_ERROR_MESSAGE.to_string(),
            Self::Status { message, .. } => message.clone(),
            Self::NotFound => "No se encontró el recurso solicitado".to_string(),
            Self::Decode(_) | Self::InvalidRequest(_) => {
                "Respuesta inesperada del servidor".to_string()
            }
        }
    }

    /// The backend rejected the bearer token or the request lacked one.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Status { status: 403, .. })
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_hides_transport_details() {
        let err = RepositoryError::Connection("dns error: no such host".to_string());
        assert_eq!(err.user_message(), CONNECTION_ERROR_MESSAGE);

        let err = RepositoryError::Status {
            status: 409,
            message: "El email ya está registrado".to_string(),
        };
        assert_eq!(err.user_message(), "El email ya está registrado");
        assert!(!err.is_unauthorized());
    }
}

//! Sign-in and customer sign-up.

use crate::domain::access::landing_path;
use crate::domain::user::{NewCustomer, Role, SessionUser};
use crate::forms::auth::{LoginForm, LoginPayload, RegisterForm};
use crate::repository::AccountGateway;
use crate::repository::errors::RepositoryError;
use crate::services::{ServiceError, ServiceResult};

const INVALID_CREDENTIALS: &str = "Credenciales incorrectas. Verifica tu email y contraseña.";

/// Any backend rejection of a login is a wrong email or password from the
/// user's point of view.
fn login_error(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Status { status, message } if (400..500).contains(&status) => {
            log::info!("Login rejected by backend ({status}): {message}");
            ServiceError::Form(INVALID_CREDENTIALS.to_string())
        }
        RepositoryError::NotFound => ServiceError::Form(INVALID_CREDENTIALS.to_string()),
        other => ServiceError::Form(other.user_message()),
    }
}

/// Authenticates against the backend and returns the identity to keep in the
/// session.
pub async fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<SessionUser>
where
    R: AccountGateway + ?Sized,
{
    let payload = LoginPayload::try_from(form)?;
    let user = repo
        .login(&payload.email, &payload.password)
        .await
        .map_err(login_error)?;
    log::info!("User {} signed in as {:?}", user.email, user.role);
    Ok(user)
}

/// Registers a customer and signs them in. When the sign-up response carries
/// no token a regular login follows.
pub async fn register_customer<R>(repo: &R, form: RegisterForm) -> ServiceResult<SessionUser>
where
    R: AccountGateway + ?Sized,
{
    let customer = NewCustomer::try_from(form)?;
    let mut user = repo
        .register_customer(&customer)
        .await
        .map_err(|err| ServiceError::Form(err.user_message()))?;

    if user.token.is_none() {
        user = repo
            .login(&customer.email, &customer.password)
            .await
            .map_err(login_error)?;
    }

    if user.email.is_empty() {
        user.email = customer.email.as_str().to_string();
    }
    if user.name.is_empty() {
        user.name_parts.first_name = customer.first_name.as_str().to_string();
        user.name_parts.second_name = customer.second_name.as_deref().map(str::to_string);
        user.name_parts.first_last_name = customer.first_last_name.as_str().to_string();
        user.name_parts.second_last_name =
            customer.second_last_name.as_deref().map(str::to_string);
        user.name = user.name_parts.full_name();
    }
    log::info!("Customer {} registered", user.email);
    Ok(user)
}

/// Page a user lands on after signing in.
pub fn landing_for(role: Role) -> &'static str {
    landing_path(role)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::user::NameParts;
    use crate::repository::mock::MockRepository;

    fn backend_user(token: Option<&str>) -> SessionUser {
        SessionUser {
            id: "5".to_string(),
            email: "juan@correo.com".to_string(),
            name: String::new(),
            name_parts: NameParts::default(),
            role: Role::Customer,
            token: token.map(str::to_string),
        }
    }

    fn register_form(confirmation: &str) -> RegisterForm {
        RegisterForm {
            first_name: "Juan".to_string(),
            second_name: String::new(),
            first_last_name: "Pérez".to_string(),
            second_last_name: String::new(),
            email: "juan@correo.com".to_string(),
            phone: "88889999".to_string(),
            password: "secreto".to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[actix_web::test]
    async fn login_normalizes_email_before_calling_backend() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .withf(|email, password| email.as_str() == "admin@nicaflex.com" && password == "admin1")
            .times(1)
            .returning(|_, _| {
                Ok(SessionUser {
                    role: Role::Admin,
                    ..backend_user(Some("t"))
                })
            });

        let user = login(
            &repo,
            LoginForm {
                email: " Admin@NicaFlex.com ".to_string(),
                password: "admin1".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(landing_for(user.role), "/admin");
    }

    #[actix_web::test]
    async fn rejected_login_becomes_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_login().times(1).returning(|_, _| {
            Err(RepositoryError::Status {
                status: 401,
                message: "Unauthorized".to_string(),
            })
        });

        let result = login(
            &repo,
            LoginForm {
                email: "juan@correo.com".to_string(),
                password: "equivocada".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Form(ref m)) if m == INVALID_CREDENTIALS));
    }

    #[actix_web::test]
    async fn mismatched_passwords_never_reach_backend() {
        let mut repo = MockRepository::new();
        repo.expect_register_customer().times(0);

        let result = register_customer(&repo, register_form("distinta")).await;
        assert!(matches!(result, Err(ServiceError::Form(ref m)) if m == "Las contraseñas no coinciden"));
    }

    #[actix_web::test]
    async fn registration_without_token_logs_in() {
        let mut repo = MockRepository::new();
        repo.expect_register_customer()
            .times(1)
            .returning(|_| Ok(backend_user(None)));
        repo.expect_login()
            .times(1)
            .returning(|_, _| Ok(backend_user(Some("fresh"))));

        let user = register_customer(&repo, register_form("secreto"))
            .await
            .unwrap();
        assert_eq!(user.token.as_deref(), Some("fresh"));
        assert_eq!(user.name, "Juan Pérez");
    }
}

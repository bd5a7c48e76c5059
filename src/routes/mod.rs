//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::user::SessionUser;
use crate::services::ServiceError;

pub mod admin;
pub mod auth;
pub mod courier;
pub mod customer;
pub mod main;

/// Where a user whose backend session ended is sent; the login page signs
/// them out before showing the form.
pub const SESSION_EXPIRED_PATH: &str = "/login?expired=1";

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context every page template expects: alerts, the signed-in user and the
/// active navigation entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&SessionUser>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("current_page", current_page);
    context.insert("is_staff", &user.is_some_and(|u| u.role.is_staff()));
    context.insert("is_admin", &user.is_some_and(SessionUser::is_admin));
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Response for a failed form submission: session and permission problems
/// leave the page, everything else is flashed back on `back`.
pub fn action_error(err: ServiceError, back: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => redirect(SESSION_EXPIRED_PATH),
        ServiceError::Forbidden => {
            FlashMessage::error(err.user_message()).send();
            redirect("/")
        }
        ServiceError::Repository(ref inner) => {
            log::error!("Backend request failed: {inner}");
            FlashMessage::error(err.user_message()).send();
            redirect(back)
        }
        ServiceError::Form(_) | ServiceError::NotFound => {
            FlashMessage::error(err.user_message()).send();
            redirect(back)
        }
    }
}

/// Response for a page that could not load its data. Backend failures render
/// an error page instead of redirecting to the page that just failed.
pub fn page_error(err: ServiceError, tera: &Tera, mut context: Context) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => redirect(SESSION_EXPIRED_PATH),
        ServiceError::Forbidden => {
            FlashMessage::error(err.user_message()).send();
            redirect("/")
        }
        err => {
            log::error!("Failed to load page: {err}");
            context.insert("error_message", &err.user_message());
            render_template(tera, "error.html", &context)
        }
    }
}

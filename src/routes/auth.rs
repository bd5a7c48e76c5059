//! Sign-in, customer sign-up and sign-out.

use actix_identity::Identity;
use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::user::SessionUser;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::auth::sign_in;
use crate::repository::HttpRepository;
use crate::routes::{action_error, base_context, redirect, render_template};
use crate::services::auth as auth_service;

#[derive(Deserialize)]
pub struct LoginQuery {
    expired: Option<String>,
}

#[get("/login")]
pub async fn login_page(
    params: web::Query<LoginQuery>,
    identity: Option<Identity>,
    user: Option<SessionUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if params.expired.is_some() {
        if let Some(identity) = identity {
            identity.logout();
            FlashMessage::warning("Tu sesión expiró. Inicia sesión de nuevo.").send();
            return redirect("/login");
        }
    } else if let Some(user) = user {
        return redirect(auth_service::landing_for(user.role));
    }

    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match auth_service::login(repo.get_ref(), form).await {
        Ok(user) => {
            if let Err(err) = sign_in(&req, &user) {
                log::error!("Failed to store session for {}: {err}", user.email);
                FlashMessage::error("No se pudo iniciar la sesión").send();
                return redirect("/login");
            }
            FlashMessage::success(format!("Bienvenido, {}", user.name)).send();
            redirect(auth_service::landing_for(user.role))
        }
        Err(err) => action_error(err, "/login"),
    }
}

#[get("/register")]
pub async fn register_page(
    user: Option<SessionUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Some(user) = user {
        return redirect(auth_service::landing_for(user.role));
    }
    let context = base_context(&flash_messages, None, "register");
    render_template(&tera, "auth/register.html", &context)
}

#[post("/register")]
pub async fn register(
    req: HttpRequest,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    match auth_service::register_customer(repo.get_ref(), form).await {
        Ok(user) => {
            if let Err(err) = sign_in(&req, &user) {
                log::error!("Failed to store session for {}: {err}", user.email);
                FlashMessage::success("Cuenta creada. Inicia sesión para continuar.").send();
                return redirect("/login");
            }
            FlashMessage::success(format!("Cuenta creada. Bienvenido, {}", user.name)).send();
            redirect(auth_service::landing_for(user.role))
        }
        Err(err) => action_error(err, "/register"),
    }
}

#[post("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/")
}

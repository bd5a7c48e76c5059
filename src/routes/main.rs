//! Public pages: landing, about, contact and tracking.

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::user::SessionUser;
use crate::forms::contact::ContactForm;
use crate::forms::packages::TrackingQuery;
use crate::repository::HttpRepository;
use crate::routes::{action_error, base_context, page_error, redirect, render_template};
use crate::services::contact as contact_service;
use crate::services::tracking as tracking_service;

#[get("/")]
pub async fn index(
    user: Option<SessionUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "index");
    render_template(&tera, "main/index.html", &context)
}

#[get("/about")]
pub async fn about(
    user: Option<SessionUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "about");
    render_template(&tera, "main/about.html", &context)
}

#[get("/contact")]
pub async fn contact(
    user: Option<SessionUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "contact");
    render_template(&tera, "main/contact.html", &context)
}

#[post("/contact")]
pub async fn send_contact(web::Form(form): web::Form<ContactForm>) -> impl Responder {
    match contact_service::submit_contact(form) {
        Ok(message) => {
            FlashMessage::success(format!(
                "Gracias, {}. Te responderemos a {} lo antes posible.",
                message.name, message.email
            ))
            .send();
            redirect("/contact")
        }
        Err(err) => action_error(err, "/contact"),
    }
}

#[get("/tracking")]
pub async fn tracking(
    params: web::Query<TrackingQuery>,
    user: Option<SessionUser>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, user.as_ref(), "tracking");
    match tracking_service::track_package(repo.get_ref(), params.id.as_deref()).await {
        Ok(data) => {
            context.insert("query", &data.query);
            context.insert("package", &data.package);
            context.insert("not_found", &data.not_found);
            render_template(&tera, "main/tracking.html", &context)
        }
        Err(err) => page_error(err, &tera, context),
    }
}

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::package::PackageStatus;
use crate::domain::user::SessionUser;
use crate::forms::packages::{PackageListQuery, UpdateStatusForm};
use crate::repository::HttpRepository;
use crate::routes::{action_error, base_context, page_error, redirect, render_template};
use crate::services::courier as courier_service;

#[get("/courier")]
pub async fn courier_dashboard(
    params: web::Query<PackageListQuery>,
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "courier");
    match courier_service::load_courier_page(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            context.insert("packages", &data.packages);
            context.insert("stats", &data.stats);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            context.insert("statuses", &PackageStatus::SELECTABLE);
            render_template(&tera, "courier/index.html", &context)
        }
        Err(err) => page_error(err, &tera, context),
    }
}

#[post("/courier/status")]
pub async fn update_status(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<UpdateStatusForm>,
) -> impl Responder {
    match courier_service::update_status(repo.get_ref(), &user, form).await {
        Ok(package) => {
            FlashMessage::success(format!(
                "Paquete {} actualizado a \"{}\".",
                package.tracking_id,
                package.current_status.label()
            ))
            .send();
            redirect("/courier")
        }
        Err(err) => action_error(err, "/courier"),
    }
}

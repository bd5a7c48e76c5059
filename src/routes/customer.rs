use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::package::PackageStatus;
use crate::domain::user::SessionUser;
use crate::forms::addresses::AddAddressForm;
use crate::forms::packages::PackageListQuery;
use crate::repository::HttpRepository;
use crate::routes::{action_error, base_context, page_error, redirect, render_template};
use crate::services::customer as customer_service;

#[get("/my-packages")]
pub async fn my_packages(
    params: web::Query<PackageListQuery>,
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "my-packages");
    match customer_service::load_my_packages(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            context.insert("packages", &data.packages);
            context.insert("stats", &data.stats);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            context.insert("statuses", &PackageStatus::SELECTABLE);
            render_template(&tera, "customer/packages.html", &context)
        }
        Err(err) => page_error(err, &tera, context),
    }
}

#[get("/my-addresses")]
pub async fn my_addresses(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "my-addresses");
    match customer_service::load_addresses(repo.get_ref(), &user).await {
        Ok(addresses) => {
            context.insert("addresses", &addresses);
            render_template(&tera, "customer/addresses.html", &context)
        }
        Err(err) => page_error(err, &tera, context),
    }
}

#[post("/my-addresses")]
pub async fn add_address(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<AddAddressForm>,
) -> impl Responder {
    match customer_service::add_address(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Dirección agregada.").send();
            redirect("/my-addresses")
        }
        Err(err) => action_error(err, "/my-addresses"),
    }
}

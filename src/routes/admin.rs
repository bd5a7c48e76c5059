//! Staff panel: dashboard, employees, packages and reports.

use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::domain::report::Report;
use crate::domain::user::{Role, SessionUser};
use crate::forms::employees::{
    AddEmployeeForm, DeleteEmployeeForm, EmployeeListQuery, ToggleEmployeeForm,
};
use crate::forms::packages::{AssignPackageForm, CreatePackageForm, PackageListQuery};
use crate::forms::reports::{ReportFormat, ReportQuery};
use crate::repository::HttpRepository;
use crate::routes::{action_error, base_context, page_error, redirect, render_template};
use crate::services::employees as employees_service;
use crate::services::packages as packages_service;
use crate::services::reports as reports_service;

#[get("/admin")]
pub async fn dashboard(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "admin");
    match reports_service::load_dashboard(repo.get_ref(), &user).await {
        Ok(data) => {
            context.insert("dashboard", &data);
            render_template(&tera, "admin/index.html", &context)
        }
        Err(err) => page_error(err, &tera, context),
    }
}

#[get("/admin/employees")]
pub async fn employees(
    params: web::Query<EmployeeListQuery>,
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "employees");
    match employees_service::load_employees_page(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            context.insert("employees", &data.employees);
            context.insert("stats", &data.stats);
            context.insert("search", &data.search);
            context.insert("can_manage", &data.can_manage);
            let roles = Role::ASSIGNABLE
                .iter()
                .map(|role| (role.backend_name(), role.label()))
                .collect::<Vec<_>>();
            context.insert("roles", &roles);
            render_template(&tera, "admin/employees.html", &context)
        }
        Err(err) => page_error(err, &tera, context),
    }
}

#[post("/admin/employees/add")]
pub async fn add_employee(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<AddEmployeeForm>,
) -> impl Responder {
    match employees_service::add_employee(repo.get_ref(), &user, form).await {
        Ok(name) => {
            FlashMessage::success(format!("Empleado \"{name}\" creado exitosamente.")).send();
            redirect("/admin/employees")
        }
        Err(err) => action_error(err, "/admin/employees"),
    }
}

#[post("/admin/employees/toggle")]
pub async fn toggle_employee(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ToggleEmployeeForm>,
) -> impl Responder {
    match employees_service::toggle_employee(repo.get_ref(), &user, form).await {
        Ok(status) => {
            let message = if status.as_str() == "active" {
                "Empleado activado."
            } else {
                "Empleado desactivado."
            };
            FlashMessage::success(message).send();
            redirect("/admin/employees")
        }
        Err(err) => action_error(err, "/admin/employees"),
    }
}

#[post("/admin/employees/delete")]
pub async fn delete_employee(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<DeleteEmployeeForm>,
) -> impl Responder {
    match employees_service::delete_employee(repo.get_ref(), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Empleado eliminado.").send();
            redirect("/admin/employees")
        }
        Err(err) => action_error(err, "/admin/employees"),
    }
}

#[get("/admin/packages")]
pub async fn packages(
    params: web::Query<PackageListQuery>,
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "packages");
    match packages_service::load_packages_page(repo.get_ref(), &user, &params).await {
        Ok(data) => {
            context.insert("packages", &data.packages);
            context.insert("stats", &data.stats);
            context.insert("couriers", &data.couriers);
            context.insert("statuses", &data.statuses);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            context.insert("can_manage", &data.can_manage);
            render_template(&tera, "admin/packages.html", &context)
        }
        Err(err) => page_error(err, &tera, context),
    }
}

#[post("/admin/packages/add")]
pub async fn add_package(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<CreatePackageForm>,
) -> impl Responder {
    match packages_service::create_package(repo.get_ref(), &user, form).await {
        Ok(package) => {
            let message = if package.tracking_id.is_empty() {
                "Paquete creado exitosamente.".to_string()
            } else {
                format!(
                    "Paquete creado exitosamente. Código de seguimiento: {}",
                    package.tracking_id
                )
            };
            FlashMessage::success(message).send();
            redirect("/admin/packages")
        }
        Err(err) => action_error(err, "/admin/packages"),
    }
}

#[post("/admin/packages/assign")]
pub async fn assign_package(
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<AssignPackageForm>,
) -> impl Responder {
    match packages_service::assign_package(repo.get_ref(), &user, form).await {
        Ok(courier) => {
            FlashMessage::success(format!("Paquete asignado a {courier}.")).send();
            redirect("/admin/packages")
        }
        Err(err) => action_error(err, "/admin/packages"),
    }
}

#[get("/admin/reports")]
pub async fn reports(
    params: web::Query<ReportQuery>,
    user: SessionUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = Local::now().date_naive();
    let request = params.to_request();

    let download_request = request
        .as_ref()
        .and_then(|request| request.format.map(|format| (request, format)));
    if let Some((request, format)) = download_request {
        return match reports_service::build_report(repo.get_ref(), &user, request, today).await {
            Ok(report) => download(&report, format),
            Err(err) => action_error(err, "/admin/reports"),
        };
    }

    let mut context = base_context(&flash_messages, Some(&user), "reports");
    match reports_service::load_reports_page(repo.get_ref(), &user, request.as_ref(), today).await
    {
        Ok(data) => {
            context.insert("kinds", &data.kinds);
            context.insert("ranges", &data.ranges);
            context.insert("kind", &data.kind);
            context.insert("range", &data.range);
            context.insert("report", &data.report);
            render_template(&tera, "admin/reports.html", &context)
        }
        Err(err) => page_error(err, &tera, context),
    }
}

fn download(report: &Report, format: ReportFormat) -> HttpResponse {
    let body = match format {
        ReportFormat::Text => reports_service::render_text(report).into_bytes(),
        ReportFormat::Csv => match reports_service::render_csv(report) {
            Ok(body) => body,
            Err(err) => return action_error(err, "/admin/reports"),
        },
    };
    HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(ContentDisposition::attachment(
            report.file_name(format.extension()),
        ))
        .body(body)
}

use std::time::Duration;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, test as actix_test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use tera::Tera;

use nicaflex_web::domain::user::{NameParts, Role, SessionUser};
use nicaflex_web::middleware::RedirectUnauthorized;
use nicaflex_web::models::auth::sign_in;
use nicaflex_web::repository::HttpRepository;
use nicaflex_web::routes::alert_level_to_str;

fn session_user(role: Role) -> SessionUser {
    SessionUser {
        id: "9".to_string(),
        email: format!("{}@nicaflex.com", role.backend_name()),
        name: "Usuario de prueba".to_string(),
        name_parts: NameParts::default(),
        role,
        token: Some("token".to_string()),
    }
}

/// Test-only sign-in so requests can carry a session cookie.
async fn sign_in_as(req: HttpRequest, role: web::Path<String>) -> actix_web::Result<HttpResponse> {
    let role = Role::parse(&role).unwrap_or_default();
    sign_in(&req, &session_user(role))?;
    Ok(HttpResponse::Ok().finish())
}

macro_rules! app {
    () => {{
        let key = Key::generate();
        let tera = Tera::new("templates/**/*").unwrap();
        // Nothing listens there; these tests never reach the backend.
        let repo =
            HttpRepository::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let flash =
            FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
                .build();

        actix_test::init_service(
            App::new()
                .wrap(flash)
                .wrap(IdentityMiddleware::default())
                .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
                .route("/test/sign-in/{role}", web::post().to(sign_in_as))
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .configure(nicaflex_web::configure),
                )
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(repo)),
        )
        .await
    }};
}

fn location<B>(resp: &ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Cookies to replay on the next request. Empty values are removal cookies
/// (the consumed flash cookie) and must not be sent back.
fn session_cookies<B>(resp: &ServiceResponse<B>) -> Vec<Cookie<'static>> {
    resp.response()
        .cookies()
        .filter(|cookie| !cookie.value().is_empty())
        .map(|cookie| cookie.into_owned())
        .collect()
}

fn with_cookies(mut req: actix_test::TestRequest, cookies: &[Cookie<'static>]) -> actix_test::TestRequest {
    for cookie in cookies {
        req = req.cookie(cookie.clone());
    }
    req
}

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn public_pages_render() {
    let app = app!();
    for uri in ["/", "/about", "/contact", "/tracking", "/login", "/register"] {
        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
}

#[actix_web::test]
async fn protected_pages_redirect_anonymous_visitors_to_login() {
    let app = app!();
    for uri in [
        "/my-packages",
        "/my-addresses",
        "/courier",
        "/admin",
        "/admin/employees",
        "/admin/packages",
        "/admin/reports",
    ] {
        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/login", "{uri}");
    }
}

#[actix_web::test]
async fn customers_are_sent_home_from_staff_pages() {
    let app = app!();
    let signed_in = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/test/sign-in/customer")
            .to_request(),
    )
    .await;
    assert_eq!(signed_in.status(), StatusCode::OK);
    let cookies = session_cookies(&signed_in);

    for uri in ["/admin", "/admin/employees", "/courier"] {
        let req = with_cookies(actix_test::TestRequest::get().uri(uri), &cookies).to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/", "{uri}");
    }
}

#[actix_web::test]
async fn signed_in_users_skip_the_login_form() {
    let app = app!();
    let signed_in = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/test/sign-in/mensajero")
            .to_request(),
    )
    .await;
    let cookies = session_cookies(&signed_in);

    let req = with_cookies(actix_test::TestRequest::get().uri("/login"), &cookies).to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/courier");
}

#[actix_web::test]
async fn expired_session_is_signed_out() {
    let app = app!();
    let signed_in = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/test/sign-in/admin").to_request(),
    )
    .await;
    let cookies = session_cookies(&signed_in);

    let req = with_cookies(actix_test::TestRequest::get().uri("/login?expired=1"), &cookies)
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn mismatched_registration_returns_to_form() {
    let app = app!();
    let req = actix_test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("first_name", "Juan"),
            ("first_last_name", "Pérez"),
            ("email", "juan@correo.com"),
            ("phone", "8888-9999"),
            ("password", "secreto"),
            ("password_confirmation", "otra-cosa"),
        ])
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/register");
}

#[actix_web::test]
async fn contact_form_is_accepted_without_backend() {
    let app = app!();
    let req = actix_test::TestRequest::post()
        .uri("/contact")
        .set_form([
            ("name", "Ana"),
            ("email", "ana@correo.com"),
            ("phone", ""),
            ("message", "¿Hacen envíos a Bluefields?"),
        ])
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/contact");
}

#[actix_web::test]
async fn logout_redirects_home() {
    let app = app!();
    let resp =
        actix_test::call_service(&app, actix_test::TestRequest::post().uri("/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}

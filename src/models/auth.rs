//! Session-bound identity: the signed-in [`SessionUser`] lives as JSON in the
//! `actix-identity` cookie.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::domain::user::SessionUser;

fn session_user(req: &HttpRequest) -> Option<SessionUser> {
    let identity = req.get_identity().ok()?;
    let id = identity.id().ok()?;
    match serde_json::from_str(&id) {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("Discarding unreadable session identity: {err}");
            None
        }
    }
}

/// Extracts the signed-in user; anonymous requests fail with 401, which
/// `RedirectUnauthorized` turns into a login redirect. Use
/// `Option<SessionUser>` on public pages.
impl FromRequest for SessionUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(session_user(req).ok_or_else(|| ErrorUnauthorized("Unauthorized")))
    }
}

/// Stores `user` in the session identity.
pub fn sign_in(req: &HttpRequest, user: &SessionUser) -> actix_web::Result<Identity> {
    let id = serde_json::to_string(user).map_err(ErrorInternalServerError)?;
    Identity::login(&req.extensions(), id).map_err(ErrorInternalServerError)
}

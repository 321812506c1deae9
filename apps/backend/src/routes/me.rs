use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::auth::roles::Role;
use crate::auth::session::Identity;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Identity,
    /// Roles this user may assign or manage, for UI gating
    pub manageable_roles: Vec<Role>,
}

/// Protected endpoint returning the caller's resolved identity.
/// The guard has already authenticated the request; the extractor just
/// hands the identity over.
async fn me(identity: Identity) -> Result<HttpResponse, AppError> {
    let manageable_roles = identity.role.manageable_roles();

    Ok(HttpResponse::Ok().json(MeResponse {
        user: identity,
        manageable_roles,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me").route(web::get().to(me)));
}

//! `Identity` as an actix extractor.
//!
//! Handlers behind the auth guard take `Identity` as a parameter; the
//! guard has already resolved it and stored it in request extensions, so
//! extraction is synchronous and never touches the store. Requesting an
//! `Identity` on a route that is not behind the guard yields the same
//! uniform 401 as the guard itself.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::session::Identity;
use crate::error::AppError;

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or_else(AppError::unauthorized),
        )
    }
}

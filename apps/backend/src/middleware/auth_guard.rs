//! Authentication route guard.
//!
//! The only component route handlers interact with for authentication.
//! Wrapped around a scope, it extracts the candidate token, resolves it
//! against the store, and either attaches the resulting `Identity` to the
//! request or responds before the inner service runs.
//!
//! Every unauthenticated sub-case (no token, bad token, missing account)
//! produces the same 401 body; store failures surface as opaque 500s.
//! One resolution attempt per request, no retries.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::session::{resolve_session, Session};
use crate::error::AppError;
use crate::extractors::auth_token::extract_token;
use crate::state::app_state::AppState;

pub struct AuthGuard;

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGuardMiddleware<S> {
    // Rc because resolution awaits the store before dispatching to the
    // inner service, so the call future must own a handle to it.
    service: Rc<S>,
}

/// Respond without invoking the inner service.
fn reject<B>(req: ServiceRequest, error: AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _payload) = req.into_parts();
    let response = error.error_response().map_into_right_body();
    ServiceResponse::new(req, response)
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                return Ok(reject(
                    req,
                    AppError::internal("AppState not available".to_string()),
                ));
            };

            let token = extract_token(req.request(), state.env);

            match resolve_session(&state, token.as_deref()).await {
                Ok(Session::Authenticated(identity)) => {
                    req.extensions_mut().insert(identity);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                // Sub-cases were already logged by the resolver; the
                // response is deliberately identical for all of them.
                Ok(Session::Unauthenticated(_)) => Ok(reject(req, AppError::unauthorized())),
                Err(e) => Ok(reject(req, e)),
            }
        })
    }
}

use actix_web::web;

pub mod auth;
pub mod health;
pub mod me;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production `main.rs` wires the protected scope with the AuthGuard
/// middleware; tests that exercise the guard wrap it themselves so the
/// unguarded paths can also be driven directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.configure(health::configure_routes);

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
}

use actix_web::{web, App, HttpServer};
use backend::config::db::DbProfile;
use backend::config::env::RuntimeEnv;
use backend::infra::state::build_state;
use backend::middleware::auth_guard::AuthGuard;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (container env file, or sourced manually for local dev).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };
    let security_config = SecurityConfig::new(jwt.as_bytes());

    let runtime_env = RuntimeEnv::from_env();
    let db_profile = match runtime_env {
        RuntimeEnv::Test => DbProfile::Test,
        _ => DbProfile::Prod,
    };

    println!("Starting Sala backend on http://{host}:{port} ({runtime_env:?})");

    // Create application state using the unified builder; the store
    // client lives in AppState for the life of the process.
    let app_state = match build_state()
        .with_env(runtime_env)
        .with_db(db_profile)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("Database connected");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .route("/", web::get().to(routes::health::root))
            // Public routes first: the guarded /api scope would otherwise
            // swallow /api/auth/* by prefix.
            .configure(routes::configure)
            .service(
                web::scope("/api")
                    .wrap(AuthGuard)
                    .configure(routes::me::configure_routes),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the process-wide JSON tracing subscriber.
///
/// Filter comes from `RUST_LOG` when set; the default keeps the backend
/// chatty and the SQL layers quiet.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("backend=info,actix_web=info,sqlx=warn,sea_orm=warn"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use sea_orm::Database;

#[derive(Clone, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Sala database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database profile to target
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,
}

/// Builds the owner-level connection URL from the same environment
/// variables the backend uses. Migrations always run as the owner role.
fn database_url(env: &Env) -> Result<String, String> {
    let must = |name: &str| {
        std::env::var(name).map_err(|_| format!("required environment variable '{name}' is not set"))
    };

    let host = std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = match env {
        Env::Prod => must("PROD_DB")?,
        Env::Test => {
            let name = must("TEST_DB")?;
            if !name.ends_with("_test") {
                return Err(format!(
                    "test profile requires database name to end with '_test', got '{name}'"
                ));
            }
            name
        }
    };
    let user = must("SALA_OWNER_USER")?;
    let password = must("SALA_OWNER_PASSWORD")?;

    Ok(format!("postgresql://{user}:{password}@{host}:{port}/{db_name}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command {
        Command::Up => MigrationCommand::Up,
        Command::Down => MigrationCommand::Down,
        Command::Fresh => MigrationCommand::Fresh,
        Command::Status => MigrationCommand::Status,
    };

    let url = match database_url(&args.env) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}

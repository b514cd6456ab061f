use ho_server::{AppState, build_router, logger};

use ho_core::{Role, User};
use ho_db::UserRepository;

use std::error::Error;

use log::{error, info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = ho_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = ho_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ho-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/ho-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    ensure_bootstrap_admin(&pool, &config).await;

    // Build router with shared state
    let app = build_router(AppState { pool });

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Serve with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// Seed a bootstrap admin when the users table is empty, so a fresh
/// deployment has a way in. Skipped (with a warning) when no bootstrap
/// password is configured.
async fn ensure_bootstrap_admin(pool: &sqlx::SqlitePool, config: &ho_config::Config) {
    let repo = UserRepository::new(pool.clone());

    match repo.count(None).await {
        Ok(0) => {}
        Ok(_) => return,
        Err(e) => {
            warn!("Failed to check for existing users: {}", e);
            return;
        }
    }

    let Some(ref password) = config.bootstrap.admin_password else {
        warn!(
            "Users table is empty and no bootstrap admin password is configured; \
             set HO_BOOTSTRAP_ADMIN_PASSWORD to seed an admin account"
        );
        return;
    };

    let password_hash = match bcrypt::hash(password, bcrypt::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash bootstrap admin password: {}", e);
            return;
        }
    };

    let admin = User::new(
        config.bootstrap.admin_email.clone(),
        password_hash,
        Some("Administrator".to_string()),
        Role::Admin,
    );

    match repo.create(&admin).await {
        Ok(()) => info!("Bootstrap admin created: {} ({})", admin.email, admin.id),
        Err(e) => warn!("Failed to create bootstrap admin: {}", e),
    }
}

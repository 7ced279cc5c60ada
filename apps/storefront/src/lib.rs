//! # Pedal Storefront
//!
//! The storefront application: session state, the commands the UI calls,
//! and an interactive shell that drives them.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Catalog, cart, signed-in user
//! │   └── config.rs   ◄─── PEDAL_* configuration
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Listing and search
//! │   ├── cart.rs     ◄─── Cart manipulation + mirroring
//! │   ├── checkout.rs ◄─── Order summary
//! │   ├── admin.rs    ◄─── Product management
//! │   └── session.rs  ◄─── Sign-in / sign-out
//! ├── notify.rs       ◄─── Notification sinks
//! ├── shell.rs        ◄─── Line-oriented UI
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod notify;
pub mod shell;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::catalog::refresh_catalog;
use notify::ConsoleSink;
use pedal_core::NotificationSink;
use shell::Shell;
use state::{ConfigState, SessionState};
use pedal_db::{Database, DbConfig};

/// Runs the storefront.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter (RUST_LOG overrides)           │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • PEDAL_STORE_NAME, PEDAL_DB_PATH, PEDAL_USER_EMAIL,                │
/// │       PEDAL_SHIPPING_FEE                                                │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  4. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • A failure is reported; the shell starts with an empty catalog     │
/// │                                                                         │
/// │  5. Optional Sign-in ─────────────────────────────────────────────────► │
/// │     • PEDAL_USER_EMAIL hydrates the cart from the database              │
/// │                                                                         │
/// │  6. Run Shell ────────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Pedal Storefront");

    let config = ConfigState::from_env()?;
    let db_path = get_database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    let sink = ConsoleSink;
    let mut session = SessionState::new();

    if let Err(err) = refresh_catalog(&db, &mut session).await {
        warn!(error = %err, "Catalog unavailable at startup");
        sink.notify(err.to_notification());
    }

    if let Some(email) = config.user_email.as_deref() {
        // Failure is already reported; continue as a guest
        let _ = commands::session::sign_in(&db, &mut session, &sink, email).await;
    }

    let mut shell = Shell::new(&db, &config, &sink, session);
    shell.run().await?;

    db.close().await;
    info!("Storefront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pedal=trace` - Show trace for pedal crates only
/// - Default: `info,pedal=debug,sqlx=warn`
///
/// Logs go to stderr so they never interleave with shell output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pedal=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.pedal.storefront/pedal.db`
/// - **Windows**: `%APPDATA%\pedal\storefront\data\pedal.db`
/// - **Linux**: `~/.local/share/storefront/pedal.db`
///
/// `PEDAL_DB_PATH` overrides the default.
fn get_database_path(config: &ConfigState) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "pedal", "storefront")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("pedal.db"))
}

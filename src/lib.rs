pub mod accounts;
pub mod db;
pub mod ledger;
pub mod models;
pub mod portal;
pub mod queries;
pub mod settings;
pub mod storage;
mod utils;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

pub use accounts::{Accounts, AuthError};
pub use db::Database;
pub use ledger::LedgerStore;
pub use portal::{AdminPortal, BookingRequest, ClientPortal, PortalError};
pub use settings::{AppSettings, SettingsStore, StorageBackendKind};
pub use storage::{JsonFileBackend, MemoryBackend, Storage, StorageBackend};

const DB_FILE: &str = "fittrack.sqlite3";
const JSON_FILE: &str = "fittrack.json";
const SETTINGS_FILE: &str = "settings.json";

/// Opens the configured backend inside `data_dir`.
pub fn open_storage(kind: StorageBackendKind, data_dir: &Path) -> Result<Storage> {
    let storage = match kind {
        StorageBackendKind::Sqlite => Storage::new(Database::new(data_dir.join(DB_FILE))?),
        StorageBackendKind::JsonFile => {
            Storage::new(JsonFileBackend::new(data_dir.join(JSON_FILE))?)
        }
        StorageBackendKind::Memory => Storage::in_memory(),
    };
    Ok(storage)
}

pub fn run() -> Result<()> {
    // Reads RUST_LOG; info otherwise.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    log::info!("FitTrack starting up...");

    let data_dir = settings::data_dir_from_env();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let settings_store = SettingsStore::new(data_dir.join(SETTINGS_FILE))?;
    let settings = settings_store.current();
    log::info!(
        "Using {:?} storage in {}",
        settings.storage_backend,
        data_dir.display()
    );

    let storage = open_storage(settings.storage_backend, &data_dir)?;
    let today = Utc::now().date_naive();

    let mut ledger = LedgerStore::load(storage.clone());
    if settings.seed_sample_data && ledger.seed_if_empty(today) {
        log::info!("Seeded sample clients and sessions");
    }

    let accounts = Accounts::load(storage);
    match accounts.current_user() {
        Some(user) => log::info!("Signed in as {} ({})", user.email, user.role.as_str()),
        None => log::info!("No user signed in"),
    }

    let stats = ledger.dashboard_stats(today, settings.payment_reminder_amount);
    log::info!(
        "{} clients, {} sessions today, ${} pending payments",
        stats.total_clients,
        stats.sessions_today,
        stats.pending_payments
    );
    for session in ledger.dashboard_upcoming(today, settings.upcoming_limit) {
        log::info!(
            "Upcoming: {} {} {} with {}",
            session.date,
            session.time,
            session.workout_type,
            session.client_name
        );
    }

    Ok(())
}

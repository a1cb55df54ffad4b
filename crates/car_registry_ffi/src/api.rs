//! FFI use-case API for the desktop registry form.
//!
//! # Responsibility
//! - Expose the form's "Save Record" and "View Registry" actions to Dart via FRB.
//! - Return dialog-ready envelopes so the UI only renders, never decides.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Validation failures and storage failures both come back as `ok=false`
//!   with title `Error`.
//! - One registry connection is opened on first use and held until process
//!   exit; calls take turns on it through a mutex.

use car_registry_core::db::{db_path_from_env, open_db};
use car_registry_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, CarForm, CarRecord,
    CarService, SaveError, SqliteCarRepository, SAVE_SUCCESS_MESSAGE,
};
use log::{info, warn};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

const SUCCESS_TITLE: &str = "Success";
const ERROR_TITLE: &str = "Error";
static REGISTRY_DB_PATH: OnceCell<PathBuf> = OnceCell::new();
static REGISTRY_CONN: OnceCell<Mutex<Connection>> = OnceCell::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Outcome of the "Save Record" button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryActionResponse {
    /// Whether the record was stored.
    pub ok: bool,
    /// Database id of the stored row.
    pub car_id: Option<i64>,
    /// Dialog title: `Success` or `Error`.
    pub title: String,
    /// Dialog body text.
    pub message: String,
    /// Whether the UI should empty its input boxes.
    pub clear_form: bool,
}

impl RegistryActionResponse {
    fn saved(car_id: i64) -> Self {
        Self {
            ok: true,
            car_id: Some(car_id),
            title: SUCCESS_TITLE.to_string(),
            message: SAVE_SUCCESS_MESSAGE.to_string(),
            clear_form: true,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            car_id: None,
            title: ERROR_TITLE.to_string(),
            message: message.into(),
            clear_form: false,
        }
    }
}

/// One line of the registry list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRow {
    pub id: i64,
    pub owner_name: String,
    pub make: String,
    pub model: String,
    pub year: i64,
}

impl From<CarRecord> for RegistryRow {
    fn from(record: CarRecord) -> Self {
        Self {
            id: record.id,
            owner_name: record.owner_name,
            make: record.make,
            model: record.model,
            year: record.year,
        }
    }
}

/// Contents of the "View Registry" window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryListResponse {
    /// Rows in insertion order.
    pub rows: Vec<RegistryRow>,
    /// Human-readable status for diagnostics; empty on success.
    pub message: String,
}

/// Saves one record from the four form inputs.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns success dialog text and created id, or error dialog text.
#[flutter_rust_bridge::frb(sync)]
pub fn registry_save_record(
    owner_name: String,
    make: String,
    model: String,
    year: String,
) -> RegistryActionResponse {
    let mut form = CarForm::new(owner_name, make, model, year);
    match with_car_service(|service| service.save_record(&mut form)) {
        Ok(record) => RegistryActionResponse::saved(record.id),
        Err(message) => RegistryActionResponse::failure(message),
    }
}

/// Loads every stored record for the list window.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns an empty row list plus a message when loading fails.
#[flutter_rust_bridge::frb(sync)]
pub fn registry_list() -> RegistryListResponse {
    match with_car_service(|service| service.view_registry().map_err(SaveError::from)) {
        Ok(snapshot) => RegistryListResponse {
            rows: snapshot.cars.into_iter().map(RegistryRow::from).collect(),
            message: String::new(),
        },
        Err(message) => RegistryListResponse {
            rows: Vec::new(),
            message: format!("registry_list failed: {message}"),
        },
    }
}

fn resolve_registry_db_path() -> PathBuf {
    REGISTRY_DB_PATH.get_or_init(db_path_from_env).clone()
}

fn registry_connection() -> Result<&'static Mutex<Connection>, String> {
    REGISTRY_CONN.get_or_try_init(|| {
        let db_path = resolve_registry_db_path();
        let conn = open_db(&db_path).map_err(|err| format!("registry DB open failed: {err}"))?;
        info!(
            "event=ffi_connection module=ffi status=open path={}",
            db_path.display()
        );
        Ok(Mutex::new(conn))
    })
}

fn lock_registry() -> Result<MutexGuard<'static, Connection>, String> {
    registry_connection()?
        .lock()
        .map_err(|_| "registry connection lock poisoned".to_string())
}

fn with_car_service<T>(
    f: impl FnOnce(&CarService<SqliteCarRepository<'_>>) -> Result<T, SaveError>,
) -> Result<T, String> {
    let conn = lock_registry()?;
    let repo = SqliteCarRepository::try_new(&conn)
        .map_err(|err| format!("registry repo init failed: {err}"))?;
    let service = CarService::new(repo);
    f(&service).map_err(|err| {
        if !err.is_validation() {
            warn!("event=ffi_call module=ffi status=error error={err}");
        }
        err.to_string()
    })
}

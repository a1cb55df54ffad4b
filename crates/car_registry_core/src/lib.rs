//! Core domain logic for the car ownership registry.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DB_PATH_ENV, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::car::{
    is_valid_model_year, CarField, CarId, CarRecord, CarValidationError, NewCar, MAX_MODEL_YEAR,
    MIN_MODEL_YEAR,
};
pub use model::form::CarForm;
pub use repo::car_repo::{CarRepository, RepoError, RepoResult, SqliteCarRepository};
pub use service::car_service::{CarService, RegistrySnapshot, SaveError, SAVE_SUCCESS_MESSAGE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

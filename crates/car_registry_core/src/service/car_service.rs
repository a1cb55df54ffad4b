//! Registry use-case service.
//!
//! # Responsibility
//! - Back the two form actions: "Save Record" and "View Registry".
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - A failed save writes nothing and leaves the form untouched. Insert and
//!   read-back share one transaction, so a failed read-back rolls back the row.
//! - A successful save clears the form.
//! - Service logs carry ids, counts and statuses only, never field values.

use crate::model::car::{CarId, CarRecord, CarValidationError, NewCar};
use crate::model::form::CarForm;
use crate::repo::car_repo::{CarRepository, RepoError, RepoResult};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message shown in the success dialog after a save.
pub const SAVE_SUCCESS_MESSAGE: &str = "Car ownership record saved successfully!";

/// Service error for the "Save Record" use-case.
#[derive(Debug)]
pub enum SaveError {
    /// Form input was rejected before reaching storage.
    Validation(CarValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl SaveError {
    /// Whether the failure came from user input rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent registry state: {details}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<CarValidationError> for SaveError {
    fn from(value: CarValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for SaveError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Read model for the registry list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    /// Every stored row in insertion order.
    pub cars: Vec<CarRecord>,
}

impl RegistrySnapshot {
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}

/// Use-case service over a car repository.
pub struct CarService<R: CarRepository> {
    repo: R,
}

impl<R: CarRepository> CarService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the form, stores one row, and clears the form.
    ///
    /// Returns the stored row as read back from the database.
    pub fn save_record(&self, form: &mut CarForm) -> Result<CarRecord, SaveError> {
        let car = match form.parse() {
            Ok(car) => car,
            Err(err) => {
                warn!(
                    "event=car_save module=service status=rejected field={}",
                    err.field().column()
                );
                return Err(err.into());
            }
        };

        let record = self.store(&car)?;
        form.clear();
        Ok(record)
    }

    /// Stores an already-built payload, bypassing the form.
    pub fn register(&self, car: &NewCar) -> Result<CarRecord, SaveError> {
        self.store(car)
    }

    /// Returns one stored row by id.
    pub fn get_car(&self, id: CarId) -> RepoResult<Option<CarRecord>> {
        self.repo.get_car(id)
    }

    /// Loads the full registry for the list view.
    pub fn view_registry(&self) -> RepoResult<RegistrySnapshot> {
        match self.repo.list_cars() {
            Ok(cars) => {
                info!(
                    "event=registry_view module=service status=ok rows={}",
                    cars.len()
                );
                Ok(RegistrySnapshot { cars })
            }
            Err(err) => {
                error!("event=registry_view module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Number of stored rows.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count_cars()
    }

    fn store(&self, car: &NewCar) -> Result<CarRecord, SaveError> {
        let outcome = self.repo.atomically(|repo| -> Result<CarRecord, SaveError> {
            let id = repo.insert_car(car)?;
            repo.get_car(id)?
                .ok_or(SaveError::InconsistentState("saved car not found in read-back"))
        });

        match outcome {
            Ok(record) => {
                info!("event=car_save module=service status=ok car_id={}", record.id);
                Ok(record)
            }
            Err(SaveError::Validation(err)) => {
                warn!(
                    "event=car_save module=service status=rejected field={}",
                    err.field().column()
                );
                Err(SaveError::Validation(err))
            }
            Err(err) => {
                error!("event=car_save module=service status=error error={err}");
                Err(err)
            }
        }
    }
}

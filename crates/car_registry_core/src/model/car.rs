//! Car ownership record.
//!
//! # Responsibility
//! - Define the stored record shape and the insert payload.
//! - Own the validation rules shared by the form and repository layers.
//!
//! # Invariants
//! - `owner_name`, `make` and `model` are non-blank.
//! - `year` is within `MIN_MODEL_YEAR..=MAX_MODEL_YEAR`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Database-assigned row identifier (`cars.id`).
pub type CarId = i64;

/// Earliest accepted model year (first production automobile).
pub const MIN_MODEL_YEAR: i64 = 1886;
/// Latest accepted model year.
pub const MAX_MODEL_YEAR: i64 = 2025;

/// One input field of the registry form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarField {
    OwnerName,
    Make,
    Model,
    Year,
}

impl CarField {
    /// All fields in the order the form presents them.
    pub const ALL: [CarField; 4] = [
        CarField::OwnerName,
        CarField::Make,
        CarField::Model,
        CarField::Year,
    ];

    /// Label shown next to the input box.
    pub fn label(self) -> &'static str {
        match self {
            Self::OwnerName => "Owner Name",
            Self::Make => "Car Make",
            Self::Model => "Car Model",
            Self::Year => "Year",
        }
    }

    /// Backing column in the `cars` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::OwnerName => "owner_name",
            Self::Make => "make",
            Self::Model => "model",
            Self::Year => "year",
        }
    }
}

/// Validation failures for registry input.
///
/// `Display` yields the exact text the error dialog shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarValidationError {
    /// A field was empty (after trimming).
    MissingField(CarField),
    /// Year text did not parse as an integer.
    InvalidYear(String),
    /// Year parsed but fell outside the accepted range.
    YearOutOfRange(i64),
}

impl CarValidationError {
    /// Field the error points at, for focusing the offending input.
    pub fn field(&self) -> CarField {
        match self {
            Self::MissingField(field) => *field,
            Self::InvalidYear(_) | Self::YearOutOfRange(_) => CarField::Year,
        }
    }
}

impl Display for CarValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(_) => write!(f, "All fields are required!"),
            Self::InvalidYear(_) | Self::YearOutOfRange(_) => write!(
                f,
                "Year must be a valid number between {MIN_MODEL_YEAR} and {MAX_MODEL_YEAR}!"
            ),
        }
    }
}

impl Error for CarValidationError {}

/// Insert payload for a new registry row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCar {
    pub owner_name: String,
    pub make: String,
    pub model: String,
    pub year: i64,
}

impl NewCar {
    /// Builds a payload, trimming the text fields.
    pub fn new(owner_name: &str, make: &str, model: &str, year: i64) -> Self {
        Self {
            owner_name: owner_name.trim().to_string(),
            make: make.trim().to_string(),
            model: model.trim().to_string(),
            year,
        }
    }

    /// Checks record invariants without touching storage.
    pub fn validate(&self) -> Result<(), CarValidationError> {
        validate_fields(&self.owner_name, &self.make, &self.model, self.year)
    }
}

/// A persisted registry row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: CarId,
    pub owner_name: String,
    pub make: String,
    pub model: String,
    pub year: i64,
}

impl CarRecord {
    /// Re-checks invariants on a row loaded from storage.
    pub fn validate(&self) -> Result<(), CarValidationError> {
        validate_fields(&self.owner_name, &self.make, &self.model, self.year)
    }
}

/// Returns whether `year` is an accepted model year.
pub fn is_valid_model_year(year: i64) -> bool {
    (MIN_MODEL_YEAR..=MAX_MODEL_YEAR).contains(&year)
}

fn validate_fields(
    owner_name: &str,
    make: &str,
    model: &str,
    year: i64,
) -> Result<(), CarValidationError> {
    for (field, value) in [
        (CarField::OwnerName, owner_name),
        (CarField::Make, make),
        (CarField::Model, model),
    ] {
        if value.trim().is_empty() {
            return Err(CarValidationError::MissingField(field));
        }
    }
    if !is_valid_model_year(year) {
        return Err(CarValidationError::YearOutOfRange(year));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CarField, CarValidationError, NewCar, MAX_MODEL_YEAR, MIN_MODEL_YEAR};

    #[test]
    fn boundary_years_are_valid() {
        NewCar::new("Ada", "Benz", "Patent-Motorwagen", MIN_MODEL_YEAR)
            .validate()
            .unwrap();
        NewCar::new("Ada", "Tesla", "Model Y", MAX_MODEL_YEAR)
            .validate()
            .unwrap();
    }

    #[test]
    fn years_outside_range_are_rejected() {
        let err = NewCar::new("Ada", "Ford", "T", 1885).validate().unwrap_err();
        assert_eq!(err, CarValidationError::YearOutOfRange(1885));
        let err = NewCar::new("Ada", "Ford", "T", 2026).validate().unwrap_err();
        assert_eq!(err.field(), CarField::Year);
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = NewCar::new("", "Ford", "T", 1920).validate().unwrap_err();
        assert_eq!(err, CarValidationError::MissingField(CarField::OwnerName));
        let err = NewCar::new("Ada", "Ford", "   ", 1920).validate().unwrap_err();
        assert_eq!(err, CarValidationError::MissingField(CarField::Model));
    }

    #[test]
    fn constructor_trims_text_fields() {
        let car = NewCar::new("  Ada ", "Ford\t", " T", 1920);
        assert_eq!(car.owner_name, "Ada");
        assert_eq!(car.make, "Ford");
        assert_eq!(car.model, "T");
    }

    #[test]
    fn messages_match_dialog_text() {
        assert_eq!(
            CarValidationError::MissingField(CarField::Make).to_string(),
            "All fields are required!"
        );
        assert_eq!(
            CarValidationError::InvalidYear("abc".to_string()).to_string(),
            "Year must be a valid number between 1886 and 2025!"
        );
    }

    #[test]
    fn field_labels_follow_form_order() {
        let labels = CarField::ALL.map(CarField::label);
        assert_eq!(labels, ["Owner Name", "Car Make", "Car Model", "Year"]);
    }
}

//! Registry domain model.
//!
//! # Responsibility
//! - Define the car-ownership record and its validation rules.
//! - Model the raw four-field entry form before it becomes a record.
//!
//! # Invariants
//! - A record is insert-only; once stored its `id` never changes.
//! - Every text field is non-empty and the year lies in
//!   `MIN_MODEL_YEAR..=MAX_MODEL_YEAR`.

pub mod car;
pub mod form;

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the registry.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `NewCar::validate()` before persistence.
//! - Repository construction fails on connections that skipped migrations.

pub mod car_repo;

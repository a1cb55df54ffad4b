//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the registry's form actions.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod car_service;

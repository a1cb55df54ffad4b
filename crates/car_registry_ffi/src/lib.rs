//! Desktop UI bridge for the car ownership registry.

pub mod api;

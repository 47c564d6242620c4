//! Shared types and models for the Mang Iyan system
//!
//! This crate contains the domain models and pure validation rules shared
//! across the backend components.

pub mod models;
pub mod timeseries;
pub mod types;
pub mod validation;

pub use models::*;
pub use timeseries::*;
pub use types::*;
pub use validation::*;

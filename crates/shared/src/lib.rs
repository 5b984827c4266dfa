//! Shared errors, result types, and configuration for Tallybook.
//!
//! This crate provides common types used across all other crates:
//! - The `Outcome` result type used at every manager/gateway boundary
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod outcome;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use outcome::Outcome;

//! # API Shared
//!
//! Shared wire definitions for the ICU intake APIs.
//!
//! Contains:
//! - Raw form and view types for the wizard sections (`wire` module)
//! - Shared services like `HealthService`
//!
//! The core crate consumes these types directly (validators take raw forms,
//! prefill produces them), and `api-rest` serves them as JSON, so the two
//! sides can never disagree about field names or shapes.

pub mod health;
pub mod wire;

pub use health::HealthService;

//! Application Layer - Use cases and port definitions.
//!
//! This layer contains the normalization service and the port interfaces
//! it publishes canonical records through.

/// Port interfaces for downstream consumers.
pub mod ports;

/// Application services driving translation.
pub mod services;

//! Application Services
//!
//! Services that drive translation and coordinate with ports.
//!
//! - `NormalizationService`: Decodes raw messages and publishes records

mod normalization;

pub use normalization::{NormalizationError, NormalizationService, NormalizationStats, Outcome};

//! Core library for the `city-compare` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Provider abstractions for weather, country and currency-rate lookups
//! - Shared domain models and typed lookup errors
//! - The aggregator that chains the lookups into one comparison
//!
//! It is used by `city-compare-cli`, but can also be reused by other binaries or services.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use aggregator::Aggregator;
pub use config::{Config, ProviderConfig};
pub use error::{ErrorKind, LookupError};
pub use model::{
    ComparisonRequest, ComparisonResult, ConversionRate, CountryRecord, WeatherRecord,
};
pub use provider::{CountryProvider, ProviderId, RateProvider, WeatherProvider};

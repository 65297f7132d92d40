//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Building and executing forecast requests
//! - Decoding provider payloads into daily forecast entries
//! - The fetch service that runs requests off the interaction thread
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod model;
pub mod service;
pub mod source;

pub use config::Config;
pub use error::{DecodeError, FetchError, ForecastFailure, InvalidInput};
pub use fetch::ForecastFetcher;
pub use model::{FORECAST_DAYS, ForecastEntry, ForecastQuery, Units};
pub use service::{ForecastService, Notice, Update};
pub use source::{ForecastSource, source_from_config};

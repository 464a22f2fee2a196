//! KitchenSense Core — shared error type and service configuration.

pub mod config;
pub mod error;

pub use config::{ProviderConfig, ServiceConfig};
pub use error::{Error, Result};

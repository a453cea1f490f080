//! mds-client: typed client for the managed data service management API.
pub mod auth;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use auth::{AuthMode, Credential};
pub use client::MdsClient;
pub use config::ClientConfig;
pub use error::{ApiError, ClientError, HttpError, Result, TransportError};

pub use http;
pub use secrecy;

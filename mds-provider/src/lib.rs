//! mds-provider: declarative lifecycle management of managed data service resources.
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod observability;
pub mod provider;
pub mod reconcile;
pub mod resources;

pub use config::{PollSettings, ProviderOverrides, ProviderSettings};
pub use diagnostics::{Category, Diagnostic, Severity};
pub use error::{ProviderError, Result};
pub use provider::Provider;
pub use resources::{ManagedResource, Timeouts};

pub use mds_client;

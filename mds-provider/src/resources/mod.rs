pub mod certificate;
pub mod cloud_account;
pub mod cluster;
pub mod cluster_network_policies;
pub mod data_plane;
pub mod object_storage;
pub mod policy;
pub mod service_account;
pub mod user;

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

use crate::diagnostics::Diagnostic;
use crate::error::ProviderError;
use crate::reconcile::{PollPolicy, ReconciliationTarget};

pub use certificate::CertificateResource;
pub use cloud_account::CloudAccountResource;
pub use cluster::{ClusterResource, ClusterSpec};
pub use cluster_network_policies::{ClusterNetworkPolicies, ClusterNetworkPoliciesResource};
pub use data_plane::{DataPlaneResource, DataPlaneSpec};
pub use object_storage::ObjectStorageResource;
pub use policy::PolicyResource;
pub use service_account::{ServiceAccountResource, ServiceAccountSpec};
pub use user::{UserResource, UserSpec};

/// The lifecycle a host drives for one kind of remote entity.
///
/// `create` and `delete` return only once the remote side has settled.
#[async_trait]
pub trait ManagedResource: Send + Sync {
    type Desired: Send + Sync;
    type State: Send;

    const KIND: &'static str;

    async fn create(&self, desired: &Self::Desired) -> Result<Self::State, Diagnostic>;

    async fn read(&self, id: &str) -> Result<Self::State, Diagnostic>;

    async fn update(&self, id: &str, desired: &Self::Desired) -> Result<Self::State, Diagnostic>;

    async fn delete(&self, id: &str) -> Result<(), Diagnostic>;
}

/// Limits the host places on reconciling calls, on top of [`PollSettings`].
///
/// A deadline that passes mid-call surfaces as
/// [`ProviderError::ReconciliationTimeout`], like the configured timeouts.
///
/// [`PollSettings`]: crate::config::PollSettings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Option<Duration>,
    pub delete: Option<Duration>,
    /// Only tightens the timeouts above.
    pub deadline: Option<Instant>,
}

impl Timeouts {
    pub fn until(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::default()
        }
    }

    pub(crate) fn create_target(
        &self,
        kind: &'static str,
        key: &str,
        policy: PollPolicy,
    ) -> ReconciliationTarget {
        self.target(kind, key, policy, self.create)
    }

    pub(crate) fn delete_target(
        &self,
        kind: &'static str,
        id: &str,
        policy: PollPolicy,
    ) -> ReconciliationTarget {
        self.target(kind, id, policy, self.delete)
    }

    fn target(
        &self,
        kind: &'static str,
        key: &str,
        policy: PollPolicy,
        timeout: Option<Duration>,
    ) -> ReconciliationTarget {
        let policy = match timeout {
            Some(timeout) => policy.with_timeout(timeout),
            None => policy,
        };
        let target = ReconciliationTarget::new(kind, key, policy);
        match self.deadline {
            Some(deadline) => target.with_deadline(deadline),
            None => target,
        }
    }
}

/// Maps a failed step to the diagnostic the host sees, logging it on the way.
pub(crate) fn diagnose<E>(summary: &'static str) -> impl FnOnce(E) -> Diagnostic
where
    E: Into<ProviderError>,
{
    move |err| {
        let err = err.into();
        tracing::error!(error = %err, category = ?err.category(), "{}", summary);
        Diagnostic::error(summary, &err)
    }
}

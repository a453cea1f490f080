use mds_client::ClientError;
use mds_client::models::Entity;
use std::future::Future;
use tokio::time::{Instant, sleep_until, timeout_at};

use super::policy::PollPolicy;
use crate::error::{ProviderError, Result};

/// Statuses after which a create will never become ready.
pub const FAILURE_STATUSES: &[&str] = &["FAILED", "ERROR"];

/// What is being waited on and for how long.
#[derive(Debug, Clone)]
pub struct ReconciliationTarget {
    pub kind: &'static str,
    /// Uniqueness key used to locate a created entity, or the id of a deleted one.
    pub key: String,
    /// Status the entity must report. Only used by [`await_created`].
    pub ready_status: String,
    pub policy: PollPolicy,
    started: Instant,
    deadline: Instant,
}

impl ReconciliationTarget {
    /// Starts the clock now; the deadline is `policy.timeout` away.
    pub fn new(kind: &'static str, key: impl Into<String>, policy: PollPolicy) -> Self {
        let started = Instant::now();
        Self {
            kind,
            key: key.into(),
            ready_status: "READY".to_string(),
            deadline: started + policy.timeout,
            started,
            policy,
        }
    }

    pub fn ready_when(self, ready_status: impl Into<String>) -> Self {
        Self {
            ready_status: ready_status.into(),
            ..self
        }
    }

    /// Tightens the deadline to one imposed by the caller.
    pub fn with_deadline(self, deadline: Instant) -> Self {
        Self {
            deadline: deadline.min(self.deadline),
            ..self
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    fn timed_out(
        &self,
        goal: &str,
        id: &str,
        attempts: u32,
        last_status: &str,
    ) -> ProviderError {
        let elapsed = self.started.elapsed();
        tracing::warn!(
            resource = self.kind,
            id = %id,
            attempt = attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            last_status = %last_status,
            "reconciliation timed out"
        );
        ProviderError::ReconciliationTimeout {
            kind: self.kind,
            id: id.to_string(),
            target: goal.to_string(),
            elapsed,
            attempts,
            last_status: last_status.to_string(),
        }
    }

    /// Sleeps until the next poll is due. Returns false if the deadline or
    /// the attempt cap comes first.
    async fn wait_for_poll(&self, attempts: u32) -> bool {
        if self.policy.attempts_exhausted(attempts) {
            return false;
        }
        let due = Instant::now() + self.policy.interval(attempts);
        if due >= self.deadline {
            sleep_until(self.deadline).await;
            return false;
        }
        sleep_until(due).await;
        true
    }
}

/// Outcome of a confirmed delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gone {
    pub polls: u32,
}

/// Finds an entity whose create was accepted but returned no identity.
/// Zero matches is an error. The lookup is bounded by the target deadline.
pub async fn await_located<T, L, LFut>(target: &ReconciliationTarget, locate: L) -> Result<T>
where
    T: Entity,
    L: FnOnce() -> LFut,
    LFut: Future<Output = Result<Vec<T>>>,
{
    let found = match timeout_at(target.deadline, locate()).await {
        Ok(found) => found?,
        Err(_) => return Err(target.timed_out("located", &target.key, 0, "unknown")),
    };

    let entity = found
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::CreatedEntityNotFound {
            kind: target.kind,
            key: target.key.clone(),
        })?;

    tracing::info!(resource = target.kind, id = %entity.id(), "located created entity");
    Ok(entity)
}

/// Waits for an accepted create to become ready.
///
/// `locate` finds the new entity by the target key; the first match wins and
/// zero matches fail at once. The entity is then re-fetched by id with `fetch`
/// until its status equals the target's ready status, a failure status is
/// reported, or the deadline passes.
pub async fn await_created<T, L, LFut, F, FFut>(
    target: &ReconciliationTarget,
    locate: L,
    mut fetch: F,
) -> Result<T>
where
    T: Entity,
    L: FnOnce() -> LFut,
    LFut: Future<Output = Result<Vec<T>>>,
    F: FnMut(String) -> FFut,
    FFut: Future<Output = std::result::Result<T, ClientError>>,
{
    let mut entity = await_located(target, locate).await?;
    let id = entity.id().to_string();

    let mut attempts = 0u32;
    loop {
        let status = entity.status().unwrap_or_default().to_string();
        if status == target.ready_status {
            tracing::info!(
                resource = target.kind,
                id = %id,
                attempt = attempts,
                elapsed_ms = target.started.elapsed().as_millis() as u64,
                "reconciled"
            );
            return Ok(entity);
        }
        if FAILURE_STATUSES.contains(&status.as_str()) {
            return Err(ProviderError::ReconciliationFailed {
                kind: target.kind,
                id,
                status,
            });
        }

        if !target.wait_for_poll(attempts).await {
            return Err(target.timed_out(&target.ready_status, &id, attempts, &status));
        }
        attempts += 1;

        entity = match timeout_at(target.deadline, fetch(id.clone())).await {
            Ok(fetched) => fetched?,
            Err(_) => return Err(target.timed_out(&target.ready_status, &id, attempts, &status)),
        };
        tracing::debug!(
            resource = target.kind,
            id = %id,
            attempt = attempts,
            status = entity.status().unwrap_or_default(),
            "polled"
        );
    }
}

/// Waits for an accepted delete to take effect.
///
/// Re-fetches the entity after each interval. A successful fetch means it
/// still exists; a not-found API error means it is gone. Any other error
/// aborts, since the delete may or may not have happened.
pub async fn await_deleted<T, F, FFut>(target: &ReconciliationTarget, mut fetch: F) -> Result<Gone>
where
    F: FnMut(String) -> FFut,
    FFut: Future<Output = std::result::Result<T, ClientError>>,
{
    let id = target.key.as_str();
    let mut attempts = 0u32;

    loop {
        if !target.wait_for_poll(attempts).await {
            return Err(target.timed_out("deleted", id, attempts, "present"));
        }
        attempts += 1;

        match timeout_at(target.deadline, fetch(id.to_string())).await {
            Err(_) => return Err(target.timed_out("deleted", id, attempts, "present")),
            Ok(Ok(_)) => {
                tracing::debug!(resource = target.kind, id = %id, attempt = attempts, "still present");
            }
            Ok(Err(err)) if err.is_not_found() => {
                tracing::info!(
                    resource = target.kind,
                    id = %id,
                    attempt = attempts,
                    elapsed_ms = target.started.elapsed().as_millis() as u64,
                    "deleted"
                );
                return Ok(Gone { polls: attempts });
            }
            Ok(Err(err)) => return Err(err.into()),
        }
    }
}

pub mod engine;
pub mod policy;

pub use engine::{
    FAILURE_STATUSES, Gone, ReconciliationTarget, await_created, await_deleted, await_located,
};
pub use policy::PollPolicy;

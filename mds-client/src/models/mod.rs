pub mod cluster;
pub mod customer;
pub mod infra;
pub mod page;
pub mod service;

use serde::{Deserialize, Serialize};

pub use cluster::*;
pub use customer::*;
pub use infra::*;
pub use page::{DEFAULT_PAGE_SIZE, Page, PageInfo, PageQuery, Paged};
pub use service::*;

/// A remote entity addressable by id.
pub trait Entity {
    fn id(&self) -> &str;

    /// Lifecycle status, for entities that report one.
    fn status(&self) -> Option<&str> {
        None
    }
}

/// Acknowledgement of an asynchronous operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskResponse {
    pub task_id: String,
    pub id: String,
    pub status: String,
}

//! Export pipeline seam.
//!
//! The catalog hands a flattened row sequence to an asynchronous pipeline
//! exactly once and gets back an opaque task id; callers poll for status.
//! The pipeline provides at-least-once execution; the core never polls or
//! retries on its behalf.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::report::ReportRow;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export task not found")]
    NotFound,
    #[error("export queue error: {0}")]
    Queue(String),
}

/// Lifecycle of one export task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportState {
    Pending,
    Succeeded { location: String },
    Failed { message: String },
}

#[async_trait]
pub trait ExportQueue: Send + Sync {
    /// Hand off the row sequence; returns the opaque task id.
    async fn submit(&self, rows: Vec<ReportRow>) -> Result<Uuid, ExportError>;

    /// Poll a previously submitted task.
    async fn status(&self, task_id: Uuid) -> Result<ExportState, ExportError>;
}

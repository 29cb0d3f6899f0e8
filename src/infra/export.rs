//! In-process export pipeline.
//!
//! Writes submitted report snapshots to CSV files under the configured
//! export directory. Each submission runs on its own tokio task; the shared
//! registry moves from pending to a terminal state exactly once.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::export::{ExportError, ExportQueue, ExportState};
use crate::application::report::ReportRow;
use crate::cache::lock::{rw_read, rw_write};

const SOURCE: &str = "infra::export";

#[derive(Debug, Error)]
enum WriteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub struct FileExportQueue {
    dir: PathBuf,
    tasks: Arc<RwLock<HashMap<Uuid, ExportState>>>,
}

impl FileExportQueue {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

async fn write_report(dir: &PathBuf, task_id: Uuid, rows: &[ReportRow]) -> Result<String, WriteError> {
    tokio::fs::create_dir_all(dir).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.write_record(row.iter())?;
    }
    let data = writer.into_inner().map_err(|err| err.into_error())?;

    let path = dir.join(format!("{task_id}.csv"));
    tokio::fs::write(&path, data).await?;
    Ok(path.display().to_string())
}

#[async_trait]
impl ExportQueue for FileExportQueue {
    async fn submit(&self, rows: Vec<ReportRow>) -> Result<Uuid, ExportError> {
        let task_id = Uuid::new_v4();
        rw_write(&self.tasks, SOURCE, "submit").insert(task_id, ExportState::Pending);

        let dir = self.dir.clone();
        let tasks = self.tasks.clone();
        tokio::spawn(async move {
            let state = match write_report(&dir, task_id, &rows).await {
                Ok(location) => {
                    info!(%task_id, rows = rows.len(), %location, "report export written");
                    ExportState::Succeeded { location }
                }
                Err(err) => {
                    warn!(%task_id, error = %err, "report export failed");
                    ExportState::Failed {
                        message: err.to_string(),
                    }
                }
            };
            rw_write(&tasks, SOURCE, "submit.finish").insert(task_id, state);
        });

        Ok(task_id)
    }

    async fn status(&self, task_id: Uuid) -> Result<ExportState, ExportError> {
        rw_read(&self.tasks, SOURCE, "status")
            .get(&task_id)
            .cloned()
            .ok_or(ExportError::NotFound)
    }
}

use std::{
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;

use super::{task::Task, Tracker};

/// Interface for abstracting where a [Tracker] is kept between runs.
pub trait TrackerStorage {
    fn load(&self) -> impl Future<Output = Result<Tracker>>;

    fn save(&self, tracker: &Tracker) -> impl Future<Output = Result<()>>;
}

/// Keeps all tasks in a single pretty printed JSON array.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackerStorage for JsonFileStorage {
    async fn load(&self) -> Result<Tracker> {
        debug!("Loading tracker from {:?}", self.path);
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Tracker::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {:?}", self.path));
            }
        };

        // A freshly created save file is empty.
        if content.trim().is_empty() {
            return Ok(Tracker::new());
        }

        let tasks = serde_json::from_str::<Vec<Task>>(&content)
            .with_context(|| format!("Save file {:?} is not a valid task list", self.path))?;
        Ok(Tracker::from_tasks(tasks))
    }

    async fn save(&self, tracker: &Tracker) -> Result<()> {
        debug!("Saving {} tasks into {:?}", tracker.tasks().len(), self.path);
        let buffer = serde_json::to_vec_pretty(tracker.tasks())?;
        tokio::fs::write(&self.path, buffer)
            .await
            .with_context(|| format!("Failed to write {:?}", self.path))?;
        Ok(())
    }
}

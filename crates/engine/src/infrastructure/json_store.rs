//! JSON-file warband repository.
//!
//! The whole collection lives in memory behind a `tokio::sync::RwLock` and is
//! written back as one JSON array (oldest first) on every mutation. Writes
//! go to a sibling temp file which is then renamed over the original, all
//! while the write lock is held. A failed write restores the in-memory state.

use async_trait::async_trait;
use serde_json::error::Category;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use warband_domain::{Warband, WarbandId};

use crate::infrastructure::ports::{RepoError, WarbandRepo};

pub struct JsonFileWarbandRepo {
    path: PathBuf,
    warbands: RwLock<HashMap<WarbandId, Warband>>,
}

impl JsonFileWarbandRepo {
    /// Load the file at `path`. A missing or empty file starts an empty
    /// collection; anything unreadable fails the load.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let path = path.into();
        let warbands = load(&path).await?;
        tracing::info!(
            path = %path.display(),
            count = warbands.len(),
            "Loaded warbands"
        );
        Ok(Self {
            path,
            warbands: RwLock::new(warbands),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, warbands: &HashMap<WarbandId, Warband>) -> Result<(), RepoError> {
        let mut records: Vec<&Warband> = warbands.values().collect();
        records.sort_by_key(|w| (w.created_at(), w.id()));
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| RepoError::io("serialize", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepoError::io("create_dir", e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepoError::io("write", e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RepoError::io("rename", e))?;
        Ok(())
    }
}

async fn load(path: &Path) -> Result<HashMap<WarbandId, Warband>, RepoError> {
    let file = path.display().to_string();
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(RepoError::io("load", e)),
    };
    if contents.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let records: Vec<Warband> = serde_json::from_str(&contents).map_err(|e| match e.classify() {
        Category::Syntax | Category::Eof => RepoError::parse(&file, e),
        Category::Data => RepoError::invalid_record(&file, e),
        Category::Io => RepoError::io("load", e),
    })?;

    let mut warbands = HashMap::with_capacity(records.len());
    for warband in records {
        if warband.leader_count() > 1 {
            return Err(RepoError::invalid_record(
                &file,
                format!("warband {} has {} leaders", warband.id(), warband.leader_count()),
            ));
        }
        let id = warband.id();
        if warbands.insert(id, warband).is_some() {
            return Err(RepoError::invalid_record(
                &file,
                format!("duplicate warband id {id}"),
            ));
        }
    }
    Ok(warbands)
}

#[async_trait]
impl WarbandRepo for JsonFileWarbandRepo {
    async fn list(&self) -> Result<Vec<Warband>, RepoError> {
        let warbands = self.warbands.read().await;
        let mut list: Vec<Warband> = warbands.values().cloned().collect();
        list.sort_by_key(|w| (w.created_at(), w.id()));
        Ok(list)
    }

    async fn get(&self, id: WarbandId) -> Result<Option<Warband>, RepoError> {
        Ok(self.warbands.read().await.get(&id).cloned())
    }

    async fn save(&self, warband: &Warband) -> Result<(), RepoError> {
        let mut warbands = self.warbands.write().await;
        let previous = warbands.insert(warband.id(), warband.clone());
        if let Err(e) = self.persist(&warbands).await {
            match previous {
                Some(previous) => warbands.insert(warband.id(), previous),
                None => warbands.remove(&warband.id()),
            };
            tracing::error!(error = %e, warband_id = %warband.id(), "Failed to persist warband");
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, id: WarbandId) -> Result<bool, RepoError> {
        let mut warbands = self.warbands.write().await;
        let Some(removed) = warbands.remove(&id) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(&warbands).await {
            warbands.insert(id, removed);
            tracing::error!(error = %e, warband_id = %id, "Failed to persist warband deletion");
            return Err(e);
        }
        Ok(true)
    }
}

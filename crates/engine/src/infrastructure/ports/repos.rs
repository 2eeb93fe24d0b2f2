//! Repository port traits for roster storage.

use async_trait::async_trait;
use warband_domain::{Warband, WarbandId};

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarbandRepo: Send + Sync {
    /// All warbands, oldest first.
    async fn list(&self) -> Result<Vec<Warband>, RepoError>;
    async fn get(&self, id: WarbandId) -> Result<Option<Warband>, RepoError>;
    /// Insert or replace by id, then persist.
    async fn save(&self, warband: &Warband) -> Result<(), RepoError>;
    /// Returns false when no warband had the id.
    async fn delete(&self, id: WarbandId) -> Result<bool, RepoError>;
}

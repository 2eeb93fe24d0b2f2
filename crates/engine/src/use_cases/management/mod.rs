//! Warband management use cases: CRUD over warbands and their weirdos.
//!
//! Every mutation except deletion reprices the warband and runs the full
//! warband validation before anything is persisted. An invalid result is
//! refused with its error list and the stored warband is left untouched.

use std::sync::Arc;

use warband_domain::{ValidationEngine, Warband, WarbandId, Weirdo, WeirdoId};
use warband_shared::{CreateWarbandRequest, UpdateWarbandRequest};

use crate::infrastructure::ports::{ClockPort, WarbandRepo};
use crate::use_cases::WarbandError;

pub struct WarbandManagement {
    repo: Arc<dyn WarbandRepo>,
    validation: ValidationEngine,
    clock: Arc<dyn ClockPort>,
}

impl WarbandManagement {
    pub fn new(
        repo: Arc<dyn WarbandRepo>,
        validation: ValidationEngine,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            repo,
            validation,
            clock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Warband>, WarbandError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: WarbandId) -> Result<Warband, WarbandError> {
        self.repo.get(id).await?.ok_or(WarbandError::NotFound(id))
    }

    pub async fn create(&self, request: CreateWarbandRequest) -> Result<Warband, WarbandError> {
        let now = self.clock.now();
        let mut warband = Warband::new(request.name, request.point_limit, request.ability, now);
        warband.replace_weirdos(request.weirdos, now)?;

        let warband = commit(self.repo.as_ref(), &self.validation, warband).await?;
        tracing::info!(
            warband_id = %warband.id(),
            name = %warband.name(),
            total_cost = warband.total_cost(),
            "Created warband"
        );
        Ok(warband)
    }

    /// Apply the fields present in `request`.
    pub async fn update(
        &self,
        id: WarbandId,
        request: UpdateWarbandRequest,
    ) -> Result<Warband, WarbandError> {
        let mut warband = self.get(id).await?;
        let now = self.clock.now();

        if let Some(name) = request.name {
            warband.rename(name, now);
        }
        if let Some(point_limit) = request.point_limit {
            warband.set_point_limit(point_limit, now);
        }
        if let Some(ability) = request.ability {
            warband.set_ability(ability, now);
        }
        if let Some(weirdos) = request.weirdos {
            warband.replace_weirdos(weirdos, now)?;
        }

        let warband = commit(self.repo.as_ref(), &self.validation, warband).await?;
        tracing::info!(warband_id = %id, total_cost = warband.total_cost(), "Updated warband");
        Ok(warband)
    }

    pub async fn delete(&self, id: WarbandId) -> Result<(), WarbandError> {
        if !self.repo.delete(id).await? {
            return Err(WarbandError::NotFound(id));
        }
        tracing::info!(warband_id = %id, "Deleted warband");
        Ok(())
    }

    pub async fn add_weirdo(&self, id: WarbandId, weirdo: Weirdo) -> Result<Warband, WarbandError> {
        let mut warband = self.get(id).await?;
        let weirdo_id = weirdo.id;
        warband.add_weirdo(weirdo, self.clock.now())?;

        let warband = commit(self.repo.as_ref(), &self.validation, warband).await?;
        tracing::info!(
            warband_id = %id,
            weirdo_id = %weirdo_id,
            total_cost = warband.total_cost(),
            "Added weirdo"
        );
        Ok(warband)
    }

    /// Replace a member in place. The path id wins over any id in the body.
    pub async fn update_weirdo(
        &self,
        id: WarbandId,
        weirdo_id: WeirdoId,
        weirdo: Weirdo,
    ) -> Result<Warband, WarbandError> {
        let mut warband = self.get(id).await?;
        warband.replace_weirdo(weirdo.with_id(weirdo_id), self.clock.now())?;

        let warband = commit(self.repo.as_ref(), &self.validation, warband).await?;
        tracing::info!(
            warband_id = %id,
            weirdo_id = %weirdo_id,
            total_cost = warband.total_cost(),
            "Updated weirdo"
        );
        Ok(warband)
    }

    /// Remove a member. Removal is always allowed, so only costs are refreshed.
    pub async fn remove_weirdo(
        &self,
        id: WarbandId,
        weirdo_id: WeirdoId,
    ) -> Result<Warband, WarbandError> {
        let mut warband = self.get(id).await?;
        let removed = warband.remove_weirdo(weirdo_id, self.clock.now())?;
        self.validation.cost_engine().apply_costs(&mut warband)?;
        self.repo.save(&warband).await?;

        tracing::info!(
            warband_id = %id,
            weirdo_id = %weirdo_id,
            name = %removed.name,
            total_cost = warband.total_cost(),
            "Removed weirdo"
        );
        Ok(warband)
    }
}

/// Reprice, validate and persist. Nothing is saved when validation fails.
pub(crate) async fn commit(
    repo: &dyn WarbandRepo,
    validation: &ValidationEngine,
    mut warband: Warband,
) -> Result<Warband, WarbandError> {
    validation.cost_engine().apply_costs(&mut warband)?;

    let result = validation.validate_warband(&warband)?;
    if !result.valid {
        tracing::debug!(
            warband_id = %warband.id(),
            errors = result.errors.len(),
            "Refusing invalid warband"
        );
        return Err(WarbandError::Invalid(result.errors));
    }

    repo.save(&warband).await?;
    Ok(warband)
}

//! Export and import of single warbands.
//!
//! An import always produces a new warband: fresh id and timestamps, costs
//! recomputed from the catalog, and the same validation gate as creation.

use std::sync::Arc;

use warband_domain::{ValidationEngine, ValidationResult, Warband, WarbandId};
use warband_shared::{ImportPayload, WarbandExport};

use crate::infrastructure::ports::{ClockPort, WarbandRepo};
use crate::use_cases::management::commit;
use crate::use_cases::WarbandError;

pub struct WarbandTransfer {
    repo: Arc<dyn WarbandRepo>,
    validation: ValidationEngine,
    clock: Arc<dyn ClockPort>,
}

impl WarbandTransfer {
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

    pub async fn export(&self, id: WarbandId) -> Result<WarbandExport, WarbandError> {
        let warband = self.repo.get(id).await?.ok_or(WarbandError::NotFound(id))?;
        Ok(WarbandExport::new(warband, self.clock.now()))
    }

    pub async fn import(&self, payload: ImportPayload) -> Result<Warband, WarbandError> {
        let warband = self.prepare(payload)?;
        let source_name = warband.name().to_string();

        let warband = commit(self.repo.as_ref(), &self.validation, warband).await?;
        tracing::info!(
            warband_id = %warband.id(),
            name = %source_name,
            weirdos = warband.weirdos().len(),
            "Imported warband"
        );
        Ok(warband)
    }

    /// Run the import checks without saving anything.
    pub fn validate_import(
        &self,
        payload: ImportPayload,
    ) -> Result<ValidationResult, WarbandError> {
        let mut warband = self.prepare(payload)?;
        self.validation.cost_engine().apply_costs(&mut warband)?;
        Ok(self.validation.validate_warband(&warband)?)
    }

    fn prepare(&self, payload: ImportPayload) -> Result<Warband, WarbandError> {
        if !payload.is_supported_version() {
            return Err(WarbandError::UnsupportedVersion(
                payload.export_version.unwrap_or_default(),
            ));
        }
        let now = self.clock.now();
        Ok(payload
            .warband
            .with_id(WarbandId::new())
            .with_timestamps(now, now))
    }
}

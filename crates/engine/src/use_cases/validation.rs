//! Validation use cases: rule checks without persistence.

use warband_domain::{ValidationEngine, ValidationResult, Warband};
use warband_shared::ValidateWeirdoRequest;

use crate::use_cases::WarbandError;

pub struct RosterValidation {
    engine: ValidationEngine,
}

impl RosterValidation {
    pub fn new(engine: ValidationEngine) -> Self {
        Self { engine }
    }

    pub fn warband(&self, warband: &Warband) -> Result<ValidationResult, WarbandError> {
        let result = self.engine.validate_warband(warband)?;
        tracing::debug!(
            warband_id = %warband.id(),
            valid = result.valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Validated warband"
        );
        Ok(result)
    }

    pub fn weirdo(
        &self,
        request: &ValidateWeirdoRequest,
    ) -> Result<ValidationResult, WarbandError> {
        Ok(self
            .engine
            .validate_weirdo(&request.weirdo, request.warband.as_ref())?)
    }
}

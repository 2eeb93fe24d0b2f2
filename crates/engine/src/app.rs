//! Application state and composition.

use std::sync::Arc;

use warband_domain::{CostEngine, GameData, ValidationEngine};

use crate::infrastructure::ports::{ClockPort, WarbandRepo};
use crate::use_cases;

/// Main application state.
///
/// Holds the catalog and all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub game_data: Arc<GameData>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub management: use_cases::WarbandManagement,
    pub cost: use_cases::CostCalculation,
    pub validation: use_cases::RosterValidation,
    pub transfer: use_cases::WarbandTransfer,
}

impl App {
    /// Create a new App with all dependencies wired.
    pub fn new(
        game_data: Arc<GameData>,
        repo: Arc<dyn WarbandRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let cost_engine = CostEngine::new(game_data.clone());
        let validation = ValidationEngine::new(cost_engine.clone());

        let use_cases = UseCases {
            management: use_cases::WarbandManagement::new(
                repo.clone(),
                validation.clone(),
                clock.clone(),
            ),
            cost: use_cases::CostCalculation::new(cost_engine),
            validation: use_cases::RosterValidation::new(validation.clone()),
            transfer: use_cases::WarbandTransfer::new(repo, validation, clock),
        };

        Self {
            game_data,
            use_cases,
        }
    }
}

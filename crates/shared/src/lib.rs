//! Warband Shared - wire contract between the engine and its clients
//!
//! This crate contains the REST request bodies, the `{success, data}`
//! envelope, the error body and the export format.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, serde_json, chrono and the domain crate
//! 2. **No business logic** - pure data types and serialization
//! 3. **camelCase on the wire** - every struct renames its fields

pub mod export;
pub mod requests;
pub mod responses;

pub use export::{ImportPayload, WarbandExport, EXPORT_VERSION};
pub use requests::{
    BatchCostItem, BatchCostRequest, BatchItemType, CostCalculateRequest, CreateWarbandRequest,
    UpdateWarbandRequest, ValidateWeirdoRequest, WeaponSelection,
};
pub use responses::{
    ApiResponse, BatchCostData, CostBreakdownData, CostCalculationData, ErrorResponse,
    HealthResponse, WarbandAbilityInfo,
};

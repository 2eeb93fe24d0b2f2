//! HTTP routes.
//!
//! CRUD endpoints return the resource itself; computation endpoints wrap
//! their payload in `{success, data}`. Every failure is an `ErrorResponse`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use warband_domain::{
    AttributeKind, DomainError, Equipment, LeaderTraitInfo, PsychicPower, TierCost,
    ValidationCode, ValidationError, ValidationResult, Warband, WarbandId, Weapon, Weirdo,
    WeirdoId,
};
use warband_shared::{
    ApiResponse, BatchCostData, BatchCostRequest, CostCalculateRequest, CostCalculationData,
    CreateWarbandRequest, ErrorResponse, HealthResponse, ImportPayload, UpdateWarbandRequest,
    ValidateWeirdoRequest, WarbandAbilityInfo, WarbandExport,
};

use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::WarbandError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/warbands", get(list_warbands).post(create_warband))
        .route("/api/warbands/import", post(import_warband))
        .route("/api/warbands/validate-import", post(validate_import))
        .route(
            "/api/warbands/{id}",
            get(get_warband).put(update_warband).delete(delete_warband),
        )
        .route("/api/warbands/{id}/export", post(export_warband))
        .route("/api/warbands/{id}/weirdos", post(add_weirdo))
        .route(
            "/api/warbands/{id}/weirdos/{weirdo_id}",
            put(update_weirdo).delete(remove_weirdo),
        )
        .route("/api/cost/calculate", post(calculate_cost))
        .route("/api/cost/batch", post(batch_cost))
        .route("/api/validation/warband", post(validate_warband))
        .route("/api/validation/weirdo", post(validate_weirdo))
        .route("/api/game-data/attributes", get(list_attributes))
        .route("/api/game-data/close-weapons", get(list_close_weapons))
        .route("/api/game-data/ranged-weapons", get(list_ranged_weapons))
        .route("/api/game-data/equipment", get(list_equipment))
        .route("/api/game-data/psychic-powers", get(list_psychic_powers))
        .route("/api/game-data/leader-traits", get(list_leader_traits))
        .route("/api/game-data/warband-abilities", get(list_warband_abilities))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Warbands
// =============================================================================

async fn list_warbands(State(app): State<Arc<App>>) -> Result<Json<Vec<Warband>>, ApiError> {
    Ok(Json(app.use_cases.management.list().await?))
}

async fn create_warband(
    State(app): State<Arc<App>>,
    body: Result<Json<CreateWarbandRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Warband>), ApiError> {
    let Json(request) = body?;
    let warband = app.use_cases.management.create(request).await?;
    Ok((StatusCode::CREATED, Json(warband)))
}

async fn get_warband(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Warband>, ApiError> {
    let Path(id) = path?;
    let warband = app
        .use_cases
        .management
        .get(WarbandId::from_uuid(id))
        .await?;
    Ok(Json(warband))
}

async fn update_warband(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateWarbandRequest>, JsonRejection>,
) -> Result<Json<Warband>, ApiError> {
    let Path(id) = path?;
    let Json(request) = body?;
    let warband = app
        .use_cases
        .management
        .update(WarbandId::from_uuid(id), request)
        .await?;
    Ok(Json(warband))
}

async fn delete_warband(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    app.use_cases
        .management
        .delete(WarbandId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_weirdo(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<Weirdo>, JsonRejection>,
) -> Result<(StatusCode, Json<Warband>), ApiError> {
    let Path(id) = path?;
    let Json(weirdo) = body?;
    let warband = app
        .use_cases
        .management
        .add_weirdo(WarbandId::from_uuid(id), weirdo)
        .await?;
    Ok((StatusCode::CREATED, Json(warband)))
}

async fn update_weirdo(
    State(app): State<Arc<App>>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    body: Result<Json<Weirdo>, JsonRejection>,
) -> Result<Json<Warband>, ApiError> {
    let Path((id, weirdo_id)) = path?;
    let Json(weirdo) = body?;
    let warband = app
        .use_cases
        .management
        .update_weirdo(
            WarbandId::from_uuid(id),
            WeirdoId::from_uuid(weirdo_id),
            weirdo,
        )
        .await?;
    Ok(Json(warband))
}

async fn remove_weirdo(
    State(app): State<Arc<App>>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<Json<Warband>, ApiError> {
    let Path((id, weirdo_id)) = path?;
    let warband = app
        .use_cases
        .management
        .remove_weirdo(WarbandId::from_uuid(id), WeirdoId::from_uuid(weirdo_id))
        .await?;
    Ok(Json(warband))
}

// =============================================================================
// Import / export
// =============================================================================

async fn export_warband(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<WarbandExport>, ApiError> {
    let Path(id) = path?;
    let export = app
        .use_cases
        .transfer
        .export(WarbandId::from_uuid(id))
        .await?;
    Ok(Json(export))
}

async fn import_warband(
    State(app): State<Arc<App>>,
    body: Result<Json<ImportPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Warband>), ApiError> {
    let Json(payload) = body?;
    let warband = app.use_cases.transfer.import(payload).await?;
    Ok((StatusCode::CREATED, Json(warband)))
}

async fn validate_import(
    State(app): State<Arc<App>>,
    body: Result<Json<ImportPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<ValidationResult>>, ApiError> {
    let Json(payload) = body?;
    let result = app.use_cases.transfer.validate_import(payload)?;
    Ok(Json(ApiResponse::ok(result)))
}

// =============================================================================
// Cost and validation
// =============================================================================

async fn calculate_cost(
    State(app): State<Arc<App>>,
    body: Result<Json<CostCalculateRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CostCalculationData>>, ApiError> {
    let Json(request) = body?;
    let data = app.use_cases.cost.calculate(request)?;
    Ok(Json(ApiResponse::ok(data)))
}

async fn batch_cost(
    State(app): State<Arc<App>>,
    body: Result<Json<BatchCostRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchCostData>>, ApiError> {
    let Json(request) = body?;
    let data = app.use_cases.cost.batch(request)?;
    Ok(Json(ApiResponse::ok(data)))
}

async fn validate_warband(
    State(app): State<Arc<App>>,
    body: Result<Json<Warband>, JsonRejection>,
) -> Result<Json<ApiResponse<ValidationResult>>, ApiError> {
    let Json(warband) = body?;
    let result = app.use_cases.validation.warband(&warband)?;
    Ok(Json(ApiResponse::ok(result)))
}

async fn validate_weirdo(
    State(app): State<Arc<App>>,
    body: Result<Json<ValidateWeirdoRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ValidationResult>>, ApiError> {
    let Json(request) = body?;
    let result = app.use_cases.validation.weirdo(&request)?;
    Ok(Json(ApiResponse::ok(result)))
}

// =============================================================================
// Game data
// =============================================================================

async fn list_attributes(
    State(app): State<Arc<App>>,
) -> Json<BTreeMap<&'static str, Vec<TierCost>>> {
    let tables = AttributeKind::ALL
        .into_iter()
        .map(|kind| (kind.as_str(), app.game_data.attribute_tiers(kind).to_vec()))
        .collect();
    Json(tables)
}

async fn list_close_weapons(State(app): State<Arc<App>>) -> Json<Vec<Weapon>> {
    Json(app.game_data.close_weapons().to_vec())
}

async fn list_ranged_weapons(State(app): State<Arc<App>>) -> Json<Vec<Weapon>> {
    Json(app.game_data.ranged_weapons().to_vec())
}

async fn list_equipment(State(app): State<Arc<App>>) -> Json<Vec<Equipment>> {
    Json(app.game_data.equipment().to_vec())
}

async fn list_psychic_powers(State(app): State<Arc<App>>) -> Json<Vec<PsychicPower>> {
    Json(app.game_data.psychic_powers().to_vec())
}

async fn list_leader_traits(State(app): State<Arc<App>>) -> Json<Vec<LeaderTraitInfo>> {
    Json(app.game_data.leader_traits().to_vec())
}

async fn list_warband_abilities(State(app): State<Arc<App>>) -> Json<Vec<WarbandAbilityInfo>> {
    Json(
        app.game_data
            .abilities()
            .iter()
            .map(WarbandAbilityInfo::from)
            .collect(),
    )
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Invalid(Vec<ValidationError>),
    Internal { code: &'static str, message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(details) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Not found").with_details(details)),
            )
                .into_response(),
            ApiError::BadRequest(details) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Bad request").with_details(details)),
            )
                .into_response(),
            ApiError::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Validation failed").with_errors(errors)),
            )
                .into_response(),
            ApiError::Internal { code, message } => {
                tracing::error!(code, error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal error").with_details(code)),
                )
                    .into_response()
            }
        }
    }
}

impl From<WarbandError> for ApiError {
    fn from(e: WarbandError) -> Self {
        match e {
            WarbandError::NotFound(id) => ApiError::NotFound(format!("Warband {id}")),
            WarbandError::Invalid(errors) => ApiError::Invalid(errors),
            WarbandError::InvalidInput(_) | WarbandError::UnsupportedVersion(_) => {
                ApiError::BadRequest(e.to_string())
            }
            WarbandError::Domain(e) => ApiError::from(e),
            WarbandError::Catalog(e) if e.is_lookup() => {
                tracing::error!(error = %e, "Catalog lookup failed");
                ApiError::BadRequest(e.to_string())
            }
            WarbandError::Catalog(e) => ApiError::Internal {
                code: "CATALOG_ERROR",
                message: e.to_string(),
            },
            WarbandError::Repo(e) => ApiError::from(e),
        }
    }
}

/// Roster refusals carry the same field and code a validation pass would.
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let message = e.to_string();
        match e {
            DomainError::WeirdoNotFound(_) => ApiError::NotFound(message),
            DomainError::LeaderAlreadyExists { .. } => ApiError::Invalid(vec![ValidationError::new(
                "type",
                ValidationCode::LeaderAlreadyExists,
                message,
            )]),
            DomainError::WarbandFull { .. } => ApiError::Invalid(vec![ValidationError::new(
                "weirdos",
                ValidationCode::WarbandSizeExceeded,
                message,
            )]),
            DomainError::Validation(_) => ApiError::BadRequest(message),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        if e.is_not_found() {
            return ApiError::NotFound(e.to_string());
        }
        ApiError::Internal {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

//! Typed client for the engine's REST API.
//!
//! Reads and computations are retried under the configured policy.
//! Requests that create something (warbands, weirdos, imports) are sent
//! once, so a lost response never produces a duplicate.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use warband_domain::{ValidationResult, Warband, WarbandId, Weirdo, WeirdoId};
use warband_shared::{
    ApiResponse, BatchCostData, BatchCostRequest, CostCalculateRequest, CostCalculationData,
    CreateWarbandRequest, ErrorResponse, HealthResponse, ImportPayload, UpdateWarbandRequest,
    ValidateWeirdoRequest, WarbandAbilityInfo, WarbandExport,
};

use crate::cache::LruTtlCache;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::retry::{with_retry, RetryConfig};

/// Live pricing seam, so debounce and caching can wrap any source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CostApi: Send + Sync {
    async fn calculate_cost(
        &self,
        request: CostCalculateRequest,
    ) -> Result<CostCalculationData, ClientError>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    retry: RetryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replay {
    Retry,
    Once,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.json(Method::GET, "/api/health", None::<&()>, Replay::Retry).await
    }

    // =========================================================================
    // Warbands
    // =========================================================================

    pub async fn list_warbands(&self) -> Result<Vec<Warband>, ClientError> {
        self.json(Method::GET, "/api/warbands", None::<&()>, Replay::Retry).await
    }

    pub async fn get_warband(&self, id: WarbandId) -> Result<Warband, ClientError> {
        self.json(Method::GET, &format!("/api/warbands/{id}"), None::<&()>, Replay::Retry)
            .await
    }

    pub async fn create_warband(
        &self,
        request: &CreateWarbandRequest,
    ) -> Result<Warband, ClientError> {
        self.json(Method::POST, "/api/warbands", Some(request), Replay::Once).await
    }

    pub async fn update_warband(
        &self,
        id: WarbandId,
        request: &UpdateWarbandRequest,
    ) -> Result<Warband, ClientError> {
        self.json(Method::PUT, &format!("/api/warbands/{id}"), Some(request), Replay::Retry)
            .await
    }

    pub async fn delete_warband(&self, id: WarbandId) -> Result<(), ClientError> {
        let path = format!("/api/warbands/{id}");
        let path = path.as_str();
        with_retry(&self.retry, path, || async move {
            self.send(Method::DELETE, path, None::<&()>).await.map(drop)
        })
        .await
    }

    pub async fn add_weirdo(&self, id: WarbandId, weirdo: &Weirdo) -> Result<Warband, ClientError> {
        self.json(
            Method::POST,
            &format!("/api/warbands/{id}/weirdos"),
            Some(weirdo),
            Replay::Once,
        )
        .await
    }

    pub async fn update_weirdo(
        &self,
        id: WarbandId,
        weirdo_id: WeirdoId,
        weirdo: &Weirdo,
    ) -> Result<Warband, ClientError> {
        self.json(
            Method::PUT,
            &format!("/api/warbands/{id}/weirdos/{weirdo_id}"),
            Some(weirdo),
            Replay::Retry,
        )
        .await
    }

    pub async fn remove_weirdo(
        &self,
        id: WarbandId,
        weirdo_id: WeirdoId,
    ) -> Result<Warband, ClientError> {
        self.json(
            Method::DELETE,
            &format!("/api/warbands/{id}/weirdos/{weirdo_id}"),
            None::<&()>,
            Replay::Retry,
        )
        .await
    }

    // =========================================================================
    // Import / export
    // =========================================================================

    pub async fn export_warband(&self, id: WarbandId) -> Result<WarbandExport, ClientError> {
        self.json(
            Method::POST,
            &format!("/api/warbands/{id}/export"),
            None::<&()>,
            Replay::Retry,
        )
        .await
    }

    pub async fn import_warband(&self, payload: &ImportPayload) -> Result<Warband, ClientError> {
        self.json(Method::POST, "/api/warbands/import", Some(payload), Replay::Once)
            .await
    }

    pub async fn validate_import(
        &self,
        payload: &ImportPayload,
    ) -> Result<ValidationResult, ClientError> {
        self.envelope(Method::POST, "/api/warbands/validate-import", Some(payload))
            .await
    }

    // =========================================================================
    // Cost and validation
    // =========================================================================

    pub async fn batch_costs(
        &self,
        request: &BatchCostRequest,
    ) -> Result<BatchCostData, ClientError> {
        self.envelope(Method::POST, "/api/cost/batch", Some(request)).await
    }

    pub async fn validate_warband(
        &self,
        warband: &Warband,
    ) -> Result<ValidationResult, ClientError> {
        self.envelope(Method::POST, "/api/validation/warband", Some(warband))
            .await
    }

    pub async fn validate_weirdo(
        &self,
        request: &ValidateWeirdoRequest,
    ) -> Result<ValidationResult, ClientError> {
        self.envelope(Method::POST, "/api/validation/weirdo", Some(request))
            .await
    }

    pub async fn warband_abilities(&self) -> Result<Vec<WarbandAbilityInfo>, ClientError> {
        self.json(
            Method::GET,
            "/api/game-data/warband-abilities",
            None::<&()>,
            Replay::Retry,
        )
        .await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    async fn envelope<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let response: ApiResponse<T> = self.json(method, path, body, Replay::Retry).await?;
        Ok(response.data)
    }

    async fn json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        replay: Replay,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let retry = match replay {
            Replay::Retry => self.retry.clone(),
            Replay::Once => RetryConfig::none(),
        };
        with_retry(&retry, path, || {
            let method = method.clone();
            async move {
                let response = self.send(method, path, body).await?;
                response
                    .json::<T>()
                    .await
                    .map_err(|e| ClientError::Decode(e.to_string()))
            }
        })
        .await
    }

    /// One attempt. Non-success statuses become `ClientError::Status`.
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ErrorResponse>(&text)
            .unwrap_or_else(|_| ErrorResponse::new(text));
        tracing::debug!(
            status = status.as_u16(),
            url = %url,
            error = %body.error,
            "Request rejected"
        );
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CostApi for ApiClient {
    async fn calculate_cost(
        &self,
        request: CostCalculateRequest,
    ) -> Result<CostCalculationData, ClientError> {
        self.envelope(Method::POST, "/api/cost/calculate", Some(&request))
            .await
    }
}

/// Serves repeated identical requests from an LRU/TTL cache.
pub struct CachedCostApi {
    inner: Arc<dyn CostApi>,
    cache: LruTtlCache<String, CostCalculationData>,
}

impl CachedCostApi {
    pub fn new(inner: Arc<dyn CostApi>, cache: LruTtlCache<String, CostCalculationData>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl CostApi for CachedCostApi {
    async fn calculate_cost(
        &self,
        request: CostCalculateRequest,
    ) -> Result<CostCalculationData, ClientError> {
        let key = serde_json::to_string(&request).ok();
        if let Some(key) = &key {
            if let Some(hit) = self.cache.get(key).await {
                tracing::trace!("Cost cache hit");
                return Ok(hit);
            }
        }

        let data = self.inner.calculate_cost(request).await?;
        if let Some(key) = key {
            self.cache.insert(key, data.clone()).await;
        }
        Ok(data)
    }
}

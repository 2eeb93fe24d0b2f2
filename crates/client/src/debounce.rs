//! Debounced live pricing.
//!
//! Each `submit` bumps a generation counter and schedules a request after
//! the debounce window. Only a task whose generation is still current when
//! the window closes sends its request, and only a result whose generation
//! is still current when it resolves is published. The published state
//! keeps the last good result until a newer one arrives; a failure records
//! the error but leaves that result in place.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use warband_shared::{CostCalculateRequest, CostCalculationData};

use crate::api::{CachedCostApi, CostApi};
use crate::cache::LruTtlCache;
use crate::config::ClientConfig;

/// What a subscriber sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostState {
    /// Last successful result
    pub latest: Option<CostCalculationData>,
    /// A request is scheduled or in flight
    pub pending: bool,
    /// Error from the most recent completed request, if it failed
    pub last_error: Option<String>,
}

pub struct DebouncedCost {
    api: Arc<dyn CostApi>,
    window: Duration,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<CostState>>,
}

impl DebouncedCost {
    pub fn new(api: Arc<dyn CostApi>, window: Duration) -> Self {
        let (state, _) = watch::channel(CostState::default());
        Self {
            api,
            window,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Debounced pricing over a cache sized from `config`.
    pub fn with_cache(api: Arc<dyn CostApi>, config: &ClientConfig) -> Self {
        let cache = LruTtlCache::new(config.cache_capacity, config.cache_ttl);
        Self::new(Arc::new(CachedCostApi::new(api, cache)), config.debounce)
    }

    pub fn subscribe(&self) -> watch::Receiver<CostState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> CostState {
        self.state.borrow().clone()
    }

    /// Schedule a recompute; supersedes anything submitted earlier.
    pub fn submit(&self, request: CostCalculateRequest) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| state.pending = true);

        let api = Arc::clone(&self.api);
        let current = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);
        let window = self.window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            let result = api.calculate_cost(request).await;
            if current.load(Ordering::SeqCst) != generation {
                tracing::trace!(generation, "Dropping superseded cost result");
                return;
            }

            match result {
                Ok(data) => state.send_modify(|s| {
                    s.latest = Some(data);
                    s.pending = false;
                    s.last_error = None;
                }),
                Err(e) => {
                    tracing::warn!(error = %e, generation, "Cost recompute failed");
                    state.send_modify(|s| {
                        s.pending = false;
                        s.last_error = Some(e.to_string());
                    });
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockCostApi;
    use crate::error::ClientError;
    use async_trait::async_trait;
    use warband_domain::{Attributes, WeirdoType};
    use warband_shared::WeaponSelection;

    const WINDOW: Duration = Duration::from_millis(100);

    fn draft(speed: u8) -> CostCalculateRequest {
        CostCalculateRequest {
            weirdo_type: WeirdoType::Trooper,
            attributes: Attributes {
                speed,
                ..Attributes::default()
            },
            weapons: WeaponSelection::default(),
            equipment: Vec::new(),
            psychic_powers: Vec::new(),
            leader_trait: None,
            warband_ability: None,
        }
    }

    fn priced(request: &CostCalculateRequest) -> CostCalculationData {
        CostCalculationData {
            total_cost: u32::from(request.attributes.speed),
            breakdown: Default::default(),
            item_costs: Vec::new(),
            warnings: Vec::new(),
            is_approaching_limit: false,
            is_over_limit: false,
            calculation_time: 0.1,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_sends_only_the_last_request() {
        let mut api = MockCostApi::new();
        api.expect_calculate_cost()
            .times(1)
            .withf(|request| request.attributes.speed == 3)
            .returning(|request| Ok(priced(&request)));
        let debounced = DebouncedCost::new(Arc::new(api), WINDOW);
        let mut rx = debounced.subscribe();

        debounced.submit(draft(1));
        tokio::time::sleep(Duration::from_millis(30)).await;
        debounced.submit(draft(2));
        tokio::time::sleep(Duration::from_millis(30)).await;
        debounced.submit(draft(3));
        assert!(debounced.current().pending);

        let state = rx
            .wait_for(|s| s.latest.is_some())
            .await
            .expect("state published")
            .clone();
        assert_eq!(state.latest.map(|d| d.total_cost), Some(3));
        assert!(!state.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_submits_each_resolve() {
        let mut api = MockCostApi::new();
        api.expect_calculate_cost()
            .times(2)
            .returning(|request| Ok(priced(&request)));
        let debounced = DebouncedCost::new(Arc::new(api), WINDOW);
        let mut rx = debounced.subscribe();

        debounced.submit(draft(1));
        rx.wait_for(|s| !s.pending).await.expect("first");
        debounced.submit(draft(2));
        rx.wait_for(|s| !s.pending).await.expect("second");

        assert_eq!(debounced.current().latest.map(|d| d.total_cost), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_keeps_last_good_result() {
        let mut api = MockCostApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_calculate_cost()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|request| Ok(priced(&request)));
        api.expect_calculate_cost()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ClientError::Network("connection reset".into())));
        let debounced = DebouncedCost::new(Arc::new(api), WINDOW);
        let mut rx = debounced.subscribe();

        debounced.submit(draft(2));
        rx.wait_for(|s| !s.pending).await.expect("first");
        debounced.submit(draft(3));
        rx.wait_for(|s| !s.pending).await.expect("second");

        let state = debounced.current();
        assert_eq!(state.latest.map(|d| d.total_cost), Some(2));
        assert!(state.last_error.is_some_and(|e| e.contains("connection reset")));
    }

    /// Takes longer to answer the first request than the second.
    struct SlowFirst;

    #[async_trait]
    impl CostApi for SlowFirst {
        async fn calculate_cost(
            &self,
            request: CostCalculateRequest,
        ) -> Result<CostCalculationData, ClientError> {
            if request.attributes.speed == 1 {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Ok(priced(&request))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stale_in_flight_result_is_dropped() {
        let debounced = DebouncedCost::new(Arc::new(SlowFirst), WINDOW);
        let mut rx = debounced.subscribe();

        debounced.submit(draft(1));
        // Past the window, so the slow request is in flight.
        tokio::time::sleep(WINDOW * 2).await;
        debounced.submit(draft(2));

        rx.wait_for(|s| s.latest.is_some()).await.expect("published");
        assert_eq!(debounced.current().latest.map(|d| d.total_cost), Some(2));

        // Let the slow request finish; it must not overwrite the newer result.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(debounced.current().latest.map(|d| d.total_cost), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cached_pipeline_reuses_results() {
        let mut api = MockCostApi::new();
        api.expect_calculate_cost()
            .times(1)
            .returning(|request| Ok(priced(&request)));
        let config = ClientConfig::default();
        let debounced = DebouncedCost::with_cache(Arc::new(api), &config);
        let mut rx = debounced.subscribe();

        debounced.submit(draft(2));
        rx.wait_for(|s| !s.pending).await.expect("first");
        debounced.submit(draft(2));
        rx.wait_for(|s| !s.pending).await.expect("second");

        assert_eq!(debounced.current().latest.map(|d| d.total_cost), Some(2));
    }
}

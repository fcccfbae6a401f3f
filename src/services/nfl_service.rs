use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::NflUpstream;
use crate::config::CacheTtls;
use crate::error::Result;
use crate::models::{CacheStats, CacheStore, Resource};

/// Cache-or-fetch access to the NFL resources.
///
/// Every lookup checks the cache first; on a miss the upstream is called and
/// a successful payload is stored under the resource's TTL. Failures are
/// returned as-is and never cached.
pub struct NflService {
    api: Arc<dyn NflUpstream>,
    cache: CacheStore,
    ttls: CacheTtls,
}

impl NflService {
    pub fn new(api: Arc<dyn NflUpstream>, cache: CacheStore, ttls: CacheTtls) -> Self {
        Self { api, cache, ttls }
    }

    pub async fn fetch(&self, resource: &Resource) -> Result<Value> {
        resource.validate()?;
        let key = resource.cache_key();
        if let Some(data) = self.cache.get(&key) {
            return Ok(data);
        }

        let endpoint = resource.endpoint();
        debug!("Fetching {} from upstream", endpoint);
        let data = self.api.get_data(&endpoint).await.map_err(|e| {
            warn!("Upstream fetch for {} failed: {}", key, e);
            e
        })?;

        self.cache
            .set(key, data.clone(), self.ttls.for_kind(resource.kind()));
        Ok(data)
    }

    pub async fn get_teams(&self) -> Result<Value> {
        self.fetch(&Resource::Hierarchy).await
    }

    pub async fn get_schedule(&self, year: u16, season_type: &str) -> Result<Value> {
        self.fetch(&Resource::Schedule {
            year,
            season_type: season_type.to_string(),
        })
        .await
    }

    pub async fn get_team_profile(&self, team_id: &str) -> Result<Value> {
        self.fetch(&Resource::TeamProfile {
            team_id: team_id.to_string(),
        })
        .await
    }

    pub async fn get_player_profile(&self, player_id: &str) -> Result<Value> {
        self.fetch(&Resource::PlayerProfile {
            player_id: player_id.to_string(),
        })
        .await
    }

    pub async fn get_game_boxscore(&self, game_id: &str) -> Result<Value> {
        self.fetch(&Resource::Boxscore {
            game_id: game_id.to_string(),
        })
        .await
    }

    pub async fn get_standings(&self, year: u16, season_type: &str) -> Result<Value> {
        self.fetch(&Resource::Standings {
            year,
            season_type: season_type.to_string(),
        })
        .await
    }

    pub async fn get_weekly_injuries(&self, year: u16, season_type: &str, week: &str) -> Result<Value> {
        self.fetch(&Resource::WeeklyInjuries {
            year,
            season_type: season_type.to_string(),
            week: week.to_string(),
        })
        .await
    }

    pub fn clear_cache(&self) -> usize {
        let cleared = self.cache.clear();
        info!("Cleared {} cached responses", cleared);
        cleared
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Upstream double that records every endpoint it is asked for.
    #[derive(Default)]
    pub(crate) struct RecordingUpstream {
        pub calls: Mutex<Vec<String>>,
        pub fail_with: Mutex<Option<u16>>,
        pub payload: Mutex<Option<Value>>,
    }

    impl RecordingUpstream {
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl NflUpstream for RecordingUpstream {
        async fn get_data(&self, endpoint: &str) -> Result<Value> {
            self.calls.lock().unwrap().push(endpoint.to_string());
            if let Some(status) = *self.fail_with.lock().unwrap() {
                return Err(ApiError::from_status(status, endpoint));
            }
            if let Some(payload) = self.payload.lock().unwrap().clone() {
                return Ok(payload);
            }
            Ok(json!({ "endpoint": endpoint }))
        }
    }

    fn service_with(ttls: CacheTtls) -> (NflService, Arc<RecordingUpstream>, CacheStore) {
        let upstream = Arc::new(RecordingUpstream::default());
        let cache = CacheStore::new();
        let service = NflService::new(upstream.clone(), cache.clone(), ttls);
        (service, upstream, cache)
    }

    #[tokio::test(start_paused = true)]
    async fn second_call_within_ttl_is_served_from_cache() {
        let (service, upstream, _) = service_with(CacheTtls::default());

        let first = service.get_schedule(2024, "REG").await.unwrap();
        let second = service.get_schedule(2024, "REG").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(upstream.call_count(), 1);
        assert_eq!(
            upstream.calls.lock().unwrap()[0],
            "en/games/2024/REG/schedule"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn different_years_are_fetched_separately() {
        let (service, upstream, _) = service_with(CacheTtls::default());

        service.get_schedule(2023, "REG").await.unwrap();
        service.get_schedule(2024, "REG").await.unwrap();

        assert_eq!(upstream.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_refetched() {
        let mut ttls = CacheTtls::default();
        ttls.boxscore = Duration::from_secs(60);
        let (service, upstream, _) = service_with(ttls);

        service.get_game_boxscore("g1").await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        service.get_game_boxscore("g1").await.unwrap();
        assert_eq!(upstream.call_count(), 1);

        tokio::time::advance(Duration::from_secs(30)).await;
        service.get_game_boxscore("g1").await.unwrap();
        assert_eq!(upstream.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn each_resource_uses_its_own_ttl() {
        let mut ttls = CacheTtls::uniform(Duration::from_secs(3600));
        ttls.boxscore = Duration::from_secs(10);
        let (service, upstream, _) = service_with(ttls);

        service.get_teams().await.unwrap();
        service.get_game_boxscore("g1").await.unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;
        service.get_teams().await.unwrap();
        service.get_game_boxscore("g1").await.unwrap();

        let calls = upstream.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "en/league/hierarchy",
                "en/games/g1/boxscore",
                "en/games/g1/boxscore"
            ]
        );
    }

    #[tokio::test]
    async fn clear_forces_a_fresh_fetch() {
        let (service, upstream, _) = service_with(CacheTtls::default());

        service.get_team_profile("t1").await.unwrap();
        assert_eq!(service.clear_cache(), 1);
        service.get_team_profile("t1").await.unwrap();

        assert_eq!(upstream.call_count(), 2);
    }

    #[tokio::test]
    async fn upstream_failure_is_returned_and_not_cached() {
        let (service, upstream, cache) = service_with(CacheTtls::default());
        *upstream.fail_with.lock().unwrap() = Some(500);

        let err = service.get_player_profile("p1").await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream { status: 500, .. }));

        let key = Resource::PlayerProfile {
            player_id: "p1".to_string(),
        }
        .cache_key();
        assert_eq!(cache.get(&key), None);

        *upstream.fail_with.lock().unwrap() = None;
        service.get_player_profile("p1").await.unwrap();
        assert_eq!(upstream.call_count(), 2);
    }

    #[tokio::test]
    async fn supplementary_resources_hit_expected_endpoints() {
        let (service, upstream, _) = service_with(CacheTtls::default());

        service.get_standings(2023, "REG").await.unwrap();
        service.get_weekly_injuries(2023, "REG", "1").await.unwrap();

        let calls = upstream.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "en/seasons/2023/REG/standings/season",
                "en/seasons/2023/REG/1/injuries"
            ]
        );
    }

    #[tokio::test]
    async fn payload_is_returned_unmodified() {
        let (service, _, _) = service_with(CacheTtls::default());

        let data = service.get_teams().await.unwrap();

        assert_eq!(data, json!({"endpoint": "en/league/hierarchy"}));
    }
}

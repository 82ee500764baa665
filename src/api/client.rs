use crate::config::Config;
use crate::engine::pipeline::MatchSource;
use crate::error::AppError;
use crate::items::ItemCatalog;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints;
use super::models::*;

const MAX_RETRIES: u32 = 3;
const REQUESTS_PER_SECOND: u32 = 20;
const USER_AGENT: &str = "league_coach/0.1.0";

pub struct RiotApiClient {
    api_key: String,
    region: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl RiotApiClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let api_key = config.api_key()?.to_string();
        let per_second = NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        Ok(RiotApiClient {
            api_key,
            region: config.region.clone(),
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    fn routing(&self) -> &'static str {
        endpoints::regional_routing(&self.region)
    }

    fn wait_for_quota(&self) {
        while self.rate_limiter.check().is_err() {
            thread::sleep(Duration::from_millis(50));
        }
    }

    /// GET with the API key. `Ok(None)` means the resource does not exist.
    fn execute_request(&self, url: &str) -> Result<Option<String>, AppError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_quota();
            debug!(url, "GET");
            let response = ureq::get(url)
                .set("User-Agent", USER_AGENT)
                .set("X-Riot-Token", &self.api_key)
                .call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map(Some)
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(404, _)) => return Ok(None),
                Err(ureq::Error::Status(429, _)) => {
                    // Rate limited - wait and retry
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * u64::from(retry_count + 1);
                    warn!(wait_ms, "rate limited, backing off");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(AppError::ApiError(format!("{} returned status {}", url, code)));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, AppError> {
        match self.execute_request(url)? {
            Some(body) => serde_json::from_str(&body)
                .map(Some)
                .map_err(|e| AppError::JsonError(e.to_string())),
            None => Ok(None),
        }
    }

    pub fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = endpoints::account_by_riot_id(self.routing(), game_name, tag_line);
        self.get_json(&url)?
            .ok_or_else(|| AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line)))
    }

    pub fn get_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids_by_puuid(self.routing(), puuid, count);
        Ok(self.get_json(&url)?.unwrap_or_default())
    }

    pub fn get_match(&self, match_id: &str) -> Result<Option<MatchDto>, AppError> {
        self.get_json(&endpoints::match_detail(self.routing(), match_id))
    }

    /// A failed timeline fetch is partial data, not an error: the caller still
    /// keeps the match stats.
    pub fn get_timeline(&self, match_id: &str) -> Option<TimelineDto> {
        match self.get_json(&endpoints::match_timeline(self.routing(), match_id)) {
            Ok(timeline) => timeline,
            Err(e) => {
                warn!(match_id, error = %e, "timeline fetch failed");
                None
            }
        }
    }

    /// Item catalog for the newest Data Dragon release. No API key is sent.
    pub fn get_item_data(&self) -> Result<ItemCatalog, AppError> {
        let fetch = |url: &str| -> Result<String, AppError> {
            ureq::get(url)
                .set("User-Agent", USER_AGENT)
                .call()
                .map_err(|e| AppError::HttpError(e.to_string()))?
                .into_string()
                .map_err(|e| AppError::HttpError(e.to_string()))
        };

        let versions: Vec<String> = serde_json::from_str(&fetch(endpoints::DATA_DRAGON_VERSIONS)?)
            .map_err(|e| AppError::JsonError(e.to_string()))?;
        let version = versions
            .first()
            .ok_or_else(|| AppError::ApiError("Data Dragon returned no versions".to_string()))?;

        let raw: DataDragonItems = serde_json::from_str(&fetch(&endpoints::data_dragon_items(version))?)
            .map_err(|e| AppError::JsonError(e.to_string()))?;
        Ok(ItemCatalog::from_data_dragon(&raw))
    }
}

impl MatchSource for RiotApiClient {
    fn fetch_match(&self, match_id: &str) -> Result<Option<MatchDto>, AppError> {
        self.get_match(match_id)
    }

    fn fetch_timeline(&self, match_id: &str) -> Option<TimelineDto> {
        self.get_timeline(match_id)
    }
}

// Foursquare Places v3 client
use crate::model::{Coordinate, PlacesError, Venue};
use crate::places::traits::PlaceDataSource;
use crate::storage::SqliteStorage;
use chrono::Duration as ChronoDuration;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::warn;

/// Category ids swept for the area overview: food & beverage, retail,
/// entertainment, professional services, transportation.
const NEARBY_CATEGORY_IDS: &[&str] = &["13065", "17069", "10032", "12022", "19014"];

const NEARBY_LIMIT: u32 = 50;

pub struct FoursquareClient {
    client: Client,
    auth_header: String,
    base_url: String,
    cache: Option<ResponseCache>,
}

struct ResponseCache {
    storage: Arc<Mutex<SqliteStorage>>,
    ttl: ChronoDuration,
}

impl FoursquareClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("SpotScoutBot/0.1")
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            auth_header: format!("Bearer {api_key}"),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: None,
        }
    }

    /// Reuse identical responses from storage instead of re-fetching.
    pub fn with_cache(mut self, storage: Arc<Mutex<SqliteStorage>>, ttl_seconds: i64) -> Self {
        self.cache = Some(ResponseCache {
            storage,
            ttl: ChronoDuration::seconds(ttl_seconds),
        });
        self
    }

    async fn get_payload(
        &self,
        path: &str,
        params: &[(&str, String)],
        cache_key: &str,
    ) -> Result<String, PlacesError> {
        if let Some(cache) = &self.cache {
            match cache.storage.lock().await.cache_get(cache_key, cache.ttl) {
                Ok(Some(payload)) => return Ok(payload),
                Ok(None) => {}
                Err(e) => warn!("Cache read failed for {}: {}", cache_key, e),
            }
        }

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlacesError::Timeout
                } else {
                    PlacesError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "unknown".into());
            return Err(PlacesError::Api { status: status.as_u16(), message });
        }

        let payload = response.text().await.map_err(|e| PlacesError::Http(e.to_string()))?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.storage.lock().await.cache_put(cache_key, &payload) {
                warn!("Cache write failed for {}: {}", cache_key, e);
            }
        }

        Ok(payload)
    }
}

#[async_trait::async_trait]
impl PlaceDataSource for FoursquareClient {
    async fn search(
        &self,
        query: &str,
        near: Coordinate,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<Venue>, PlacesError> {
        let ll = format!("{},{}", near.lat, near.lng);
        let cache_key = format!("search_{query}_{ll}_{radius_m}_{limit}");
        let params = [
            ("query", query.to_string()),
            ("ll", ll),
            ("radius", radius_m.to_string()),
            ("limit", limit.to_string()),
        ];
        let payload = self.get_payload("/places/search", &params, &cache_key).await?;
        parse_venue_list(&payload)
    }

    async fn nearby_categories(
        &self,
        at: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Venue>, PlacesError> {
        let ll = format!("{},{}", at.lat, at.lng);
        let cache_key = format!("nearby_categories_{ll}_{radius_m}");
        let params = [
            ("ll", ll),
            ("radius", radius_m.to_string()),
            ("categories", NEARBY_CATEGORY_IDS.join(",")),
            ("limit", NEARBY_LIMIT.to_string()),
        ];
        let payload = self.get_payload("/places/nearby", &params, &cache_key).await?;
        parse_venue_list(&payload)
    }

    async fn place_details(&self, id: &str) -> Result<Venue, PlacesError> {
        let cache_key = format!("place_details_{id}");
        let path = format!("/places/{id}");
        let payload = self.get_payload(&path, &[], &cache_key).await?;
        let place: FsqPlace =
            serde_json::from_str(&payload).map_err(|_| PlacesError::InvalidResponse)?;
        place.into_venue().ok_or(PlacesError::InvalidResponse)
    }
}

fn parse_venue_list(payload: &str) -> Result<Vec<Venue>, PlacesError> {
    let response: FsqSearchResponse =
        serde_json::from_str(payload).map_err(|_| PlacesError::InvalidResponse)?;

    let total = response.results.len();
    let venues: Vec<Venue> =
        response.results.into_iter().filter_map(FsqPlace::into_venue).collect();
    if venues.len() < total {
        warn!("Dropped {} places without geocodes", total - venues.len());
    }
    Ok(venues)
}

// Wire format of the Places v3 API.

#[derive(Debug, Deserialize)]
struct FsqSearchResponse {
    #[serde(default)]
    results: Vec<FsqPlace>,
}

#[derive(Debug, Deserialize)]
struct FsqPlace {
    #[serde(default)]
    fsq_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    categories: Vec<FsqCategory>,
    geocodes: Option<FsqGeocodes>,
    rating: Option<f64>,
    popularity: Option<f64>,
    price: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct FsqCategory {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct FsqGeocodes {
    main: Option<FsqPoint>,
}

#[derive(Debug, Deserialize)]
struct FsqPoint {
    latitude: f64,
    longitude: f64,
}

impl FsqPlace {
    /// Places without a main geocode cannot be distance-scored and are dropped.
    fn into_venue(self) -> Option<Venue> {
        let point = self.geocodes.and_then(|g| g.main)?;
        Some(Venue {
            id: self.fsq_id,
            name: self.name,
            categories: self.categories.into_iter().map(|c| c.name).collect(),
            coordinate: Coordinate::new(point.latitude, point.longitude),
            rating: self.rating,
            popularity: self.popularity,
            price_level: self.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_places_and_drops_geocodeless_ones() {
        let payload = r#"{
            "results": [
                {
                    "fsq_id": "abc123",
                    "name": "Blue Bottle Coffee",
                    "categories": [{"id": 13034, "name": "Coffee Shop"}],
                    "geocodes": {"main": {"latitude": 37.776, "longitude": -122.423}},
                    "rating": 4.4,
                    "popularity": 87.0,
                    "price": 2
                },
                {
                    "fsq_id": "nogeo",
                    "name": "Phantom Venue",
                    "categories": []
                }
            ]
        }"#;
        let venues = parse_venue_list(payload).unwrap();
        assert_eq!(venues.len(), 1);
        let venue = &venues[0];
        assert_eq!(venue.id, "abc123");
        assert_eq!(venue.categories, vec!["Coffee Shop".to_string()]);
        assert_eq!(venue.rating, Some(4.4));
        assert_eq!(venue.price_level, Some(2));
        assert!((venue.coordinate.lat - 37.776).abs() < 1e-9);
    }

    #[test]
    fn empty_results_parse_to_an_empty_list() {
        assert!(parse_venue_list(r#"{"results": []}"#).unwrap().is_empty());
        assert!(parse_venue_list(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_payload_is_an_invalid_response() {
        assert!(matches!(
            parse_venue_list("not json"),
            Err(PlacesError::InvalidResponse)
        ));
    }
}

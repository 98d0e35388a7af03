use serde::Deserialize;
use std::fs;

/// One candidate location to analyze.
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    pub lat: f64,
    pub lng: f64,
    pub business_type: String,
    #[serde(default)]
    pub target_demographics: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub foursquare_api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: i64,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    pub targets: Vec<TargetConfig>,
}

fn default_base_url() -> String {
    "https://api.foursquare.com/v3".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cache_ttl() -> i64 {
    3600
}

fn default_db_path() -> String {
    "data.db".to_string()
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_in_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "foursquare_api_key": "fsq-key",
                "targets": [
                    {"lat": 52.52, "lng": 13.405, "business_type": "food_truck"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://api.foursquare.com/v3");
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.db_path, "data.db");
        assert_eq!(config.targets.len(), 1);
        assert!(config.targets[0].target_demographics.is_empty());
    }

    #[test]
    fn demographics_parse_when_present() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "foursquare_api_key": "fsq-key",
                "cache_ttl_seconds": 60,
                "targets": [
                    {
                        "lat": 40.71,
                        "lng": -74.0,
                        "business_type": "retail",
                        "target_demographics": ["tourists", "professionals"]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(
            config.targets[0].target_demographics,
            vec!["tourists".to_string(), "professionals".to_string()]
        );
    }
}

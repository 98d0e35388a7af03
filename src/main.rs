mod analyzer;
mod config;
mod geo;
mod model;
mod places;
mod profiles;
mod service;
mod storage;

use config::{load_config, AppConfig, TargetConfig};
use futures::future::join_all;
use model::{AnalysisRecord, BusinessType, Coordinate};
use places::FoursquareClient;
use service::AnalysisOrchestrator;
use std::sync::Arc;
use std::time::Duration;
use storage::SqliteStorage;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    // Initialize storage (SQLite) with async access (wrapped in a Mutex)
    let storage = match SqliteStorage::new(&config.db_path) {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => {
            error!("Failed to initialize storage: {:?}", e);
            return;
        }
    };

    let source = FoursquareClient::new(
        &config.foursquare_api_key,
        &config.base_url,
        Duration::from_secs(config.request_timeout_seconds),
    )
    .with_cache(storage.clone(), config.cache_ttl_seconds);
    let orchestrator = AnalysisOrchestrator::new(source);

    info!("🚀 SpotScout started!");
    info!("Targets to analyze: {}", config.targets.len());

    // Process all targets concurrently
    let tasks: Vec<_> = config
        .targets
        .iter()
        .map(|target| process_target(target, &orchestrator, storage.clone()))
        .collect();
    join_all(tasks).await;

    info!("All analyses complete.");
}

/// Analyzes a single configured target and persists the outcome.
async fn process_target(
    target: &TargetConfig,
    orchestrator: &AnalysisOrchestrator<FoursquareClient>,
    storage: Arc<Mutex<SqliteStorage>>,
) {
    let coordinate = Coordinate::new(target.lat, target.lng);

    let business_type: BusinessType = match target.business_type.parse() {
        Ok(bt) => bt,
        Err(e) => {
            warn!("Skipping target ({}, {}): {}", target.lat, target.lng, e);
            return;
        }
    };

    info!("Analyzing ({}, {}) for {}...", target.lat, target.lng, business_type);

    let recommendation = match orchestrator
        .analyze_location(coordinate, business_type, &target.target_demographics)
        .await
    {
        Ok(rec) => rec,
        Err(e) => {
            warn!("Analysis failed for ({}, {}): {}", target.lat, target.lng, e);
            let event = serde_json::json!({
                "business_type": target.business_type,
                "lat": target.lat,
                "lng": target.lng,
                "success": false,
            });
            if let Err(e) = storage.lock().await.record_event("location_analysis", &event) {
                warn!("Analytics write failed: {}", e);
            }
            return;
        }
    };

    info!(
        "Confidence {:.1} | {} | {}",
        recommendation.confidence_score,
        recommendation.revenue_potential,
        recommendation.recommended_duration
    );
    info!("Reasoning: {}", recommendation.reasoning);
    for risk in &recommendation.insight.risk_factors {
        info!("Risk: {}", risk);
    }

    let record = AnalysisRecord {
        analysis_id: format!(
            "analysis_{}_{}",
            recommendation.generated_at.timestamp(),
            business_type
        ),
        coordinate,
        business_type,
        target_demographics: target.target_demographics.clone(),
        recommendation,
        created_at: chrono::Utc::now(),
    };

    if let Err(e) = storage.lock().await.save_analysis(&record) {
        warn!("Failed to save analysis {}: {}", record.analysis_id, e);
    }

    let event = serde_json::json!({
        "business_type": target.business_type,
        "lat": target.lat,
        "lng": target.lng,
        "analysis_id": record.analysis_id,
        "success": true,
    });
    if let Err(e) = storage.lock().await.record_event("location_analysis", &event) {
        warn!("Analytics write failed: {}", e);
    }
}

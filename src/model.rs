// Core structs: Coordinate, Venue, scoring reports, BusinessRecommendation
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A place record from the external data source. Read-only input to the
/// scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub categories: Vec<String>,
    pub coordinate: Coordinate,
    pub rating: Option<f64>,
    pub popularity: Option<f64>,
    pub price_level: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    FoodTruck,
    Retail,
    Service,
    Entertainment,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::FoodTruck => "food_truck",
            BusinessType::Retail => "retail",
            BusinessType::Service => "service",
            BusinessType::Entertainment => "entertainment",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food_truck" => Ok(BusinessType::FoodTruck),
            "retail" => Ok(BusinessType::Retail),
            "service" => Ok(BusinessType::Service),
            "entertainment" => Ok(BusinessType::Entertainment),
            other => Err(AnalysisError::InvalidBusinessType(other.to_string())),
        }
    }
}

/// A competitor paired with its distance from the analyzed coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCompetitor {
    pub venue: Venue,
    pub distance_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionReport {
    pub total_competitors: usize,
    /// Mean rating over competitors that report one; 0.0 when none do.
    pub average_competitor_rating: f64,
    pub density_score: f64,
    pub nearby_competitors: Vec<RankedCompetitor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicProfile {
    pub affluence_indicator: f64,
    /// Raw category-frequency counts, not normalized to 0-100.
    pub family_friendly: u32,
    pub young_professional: u32,
    pub tourist_area: u32,
    pub dominant_categories: Vec<(String, u32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInsight {
    pub coordinate: Coordinate,
    pub foot_traffic_score: f64,
    pub competition_density: f64,
    pub demographic_match: f64,
    pub optimal_hours: Vec<String>,
    pub category_gaps: Vec<String>,
    pub nearby_attractions: Vec<String>,
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecommendation {
    pub insight: LocationInsight,
    pub confidence_score: f64,
    pub reasoning: String,
    pub revenue_potential: String,
    pub setup_requirements: Vec<String>,
    pub recommended_duration: String,
    pub generated_at: DateTime<Utc>,
}

/// A finished analysis as persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: String,
    pub coordinate: Coordinate,
    pub business_type: BusinessType,
    pub target_demographics: Vec<String>,
    pub recommendation: BusinessRecommendation,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("invalid response payload")]
    InvalidResponse,
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The only errors that cross the scoring core's boundary. Upstream data
/// failures are recovered inside the pipeline by scoring on empty input.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("coordinate out of range: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("unknown business type: {0}")]
    InvalidBusinessType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_bounds() {
        assert!(Coordinate::new(52.52, 13.405).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
    }

    #[test]
    fn business_type_parses_wire_strings() {
        assert_eq!("food_truck".parse::<BusinessType>().unwrap(), BusinessType::FoodTruck);
        assert_eq!("RETAIL".parse::<BusinessType>().unwrap(), BusinessType::Retail);
        assert_eq!(
            "bakery".parse::<BusinessType>(),
            Err(AnalysisError::InvalidBusinessType("bakery".to_string()))
        );
    }
}

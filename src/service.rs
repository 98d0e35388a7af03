// Analysis orchestration: fetch area data, score it, synthesize advice.
use crate::analyzer::{
    CompetitionAnalyzer, DemographicProfiler, GapFinder, RecommendationSynthesizer,
    TrafficEstimator,
};
use crate::model::{
    AnalysisError, BusinessRecommendation, BusinessType, Coordinate, LocationInsight, PlacesError,
    Venue,
};
use crate::places::PlaceDataSource;
use tracing::{info, warn};

const AREA_RADIUS_M: u32 = 1000;
const COMPETITOR_LIMIT: u32 = 30;
const ATTRACTION_LIMIT: u32 = 20;
const ATTRACTION_QUERY: &str = "popular attractions restaurants";
const ATTRACTION_DISPLAY_LIMIT: usize = 5;

pub struct AnalysisOrchestrator<S: PlaceDataSource> {
    source: S,
}

impl<S: PlaceDataSource> AnalysisOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Scores a candidate coordinate for the given business type.
    ///
    /// Invalid inputs are the only fatal failures. Upstream trouble degrades
    /// to empty venue lists, so scores bottom out at their floor or neutral
    /// values instead of aborting the analysis.
    pub async fn analyze_location(
        &self,
        coordinate: Coordinate,
        business_type: BusinessType,
        target_demographics: &[String],
    ) -> Result<BusinessRecommendation, AnalysisError> {
        if !coordinate.is_valid() {
            return Err(AnalysisError::InvalidCoordinate {
                lat: coordinate.lat,
                lng: coordinate.lng,
            });
        }

        let profile = business_type.profile();

        // The three fetches are independent; run them concurrently and let
        // the scoring step block on all of them.
        let (all_venues, competitors, attractions) = tokio::join!(
            self.source.nearby_categories(coordinate, AREA_RADIUS_M),
            self.source
                .search(profile.competitor_query, coordinate, AREA_RADIUS_M, COMPETITOR_LIMIT),
            self.source
                .search(ATTRACTION_QUERY, coordinate, AREA_RADIUS_M, ATTRACTION_LIMIT),
        );
        let all_venues = recover_empty(all_venues, "nearby categories");
        let competitors = recover_empty(competitors, "competitor search");
        let attractions = recover_empty(attractions, "attraction search");

        if all_venues.is_empty() && competitors.is_empty() {
            warn!(
                "No venue data for ({}, {}); scoring on floor values",
                coordinate.lat, coordinate.lng
            );
        }

        let foot_traffic_score = TrafficEstimator::score(coordinate, &all_venues);
        let competition = CompetitionAnalyzer::new(business_type).analyze(coordinate, &competitors);
        let demographics = DemographicProfiler::profile(&all_venues);
        let category_gaps = GapFinder::new(business_type).find_gaps(&all_venues);

        let demographic_match =
            RecommendationSynthesizer::demographic_match(&demographics, target_demographics);
        let risk_factors =
            RecommendationSynthesizer::risk_factors(&competition, &demographics, foot_traffic_score);

        let nearby_attractions = attractions
            .iter()
            .take(ATTRACTION_DISPLAY_LIMIT)
            .map(|v| v.name.clone())
            .collect();

        let insight = LocationInsight {
            coordinate,
            foot_traffic_score,
            competition_density: competition.density_score,
            demographic_match,
            optimal_hours: profile.optimal_hours.iter().map(|h| h.to_string()).collect(),
            category_gaps,
            nearby_attractions,
            risk_factors,
        };

        info!(
            "Scored ({}, {}) for {}: traffic {:.1}, density {:.1}, {} gaps",
            coordinate.lat,
            coordinate.lng,
            business_type,
            insight.foot_traffic_score,
            insight.competition_density,
            insight.category_gaps.len()
        );

        Ok(RecommendationSynthesizer::new(business_type).synthesize(insight))
    }
}

fn recover_empty(result: Result<Vec<Venue>, PlacesError>, what: &str) -> Vec<Venue> {
    match result {
        Ok(venues) => venues,
        Err(e) => {
            warn!("{} fetch failed, treating as zero-signal input: {}", what, e);
            Vec::new()
        }
    }
}

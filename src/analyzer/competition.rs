use crate::geo;
use crate::model::{BusinessType, CompetitionReport, Coordinate, RankedCompetitor, Venue};
use crate::profiles::BusinessProfile;

/// Radius inside which a venue counts toward competition.
const COMPETITION_RADIUS_M: f64 = 500.0;

/// How many of the nearest competitors the report carries for display.
const NEARBY_DISPLAY_LIMIT: usize = 5;

pub struct CompetitionAnalyzer {
    profile: &'static BusinessProfile,
}

impl CompetitionAnalyzer {
    pub fn new(business_type: BusinessType) -> Self {
        Self { profile: business_type.profile() }
    }

    /// Classifies venues as competitors and scores how saturated the area is.
    ///
    /// Density decays linearly: 10 points per competitor within 500 m,
    /// floored at 0 once the area holds 10 or more.
    pub fn analyze(&self, target: Coordinate, venues: &[Venue]) -> CompetitionReport {
        let mut competitors: Vec<(&Venue, f64)> =
            geo::within_radius(target, venues, COMPETITION_RADIUS_M)
                .into_iter()
                .filter(|(v, _)| is_competitor(v, self.profile.competitor_keywords))
                .collect();

        let total_competitors = competitors.len();
        let density_score = (100.0 - 10.0 * total_competitors as f64).max(0.0);

        let ratings: Vec<f64> = competitors.iter().filter_map(|(v, _)| v.rating).collect();
        // Unrated markets report 0.0, indistinguishable from an all-zero
        // market. Legacy behavior, kept until product decides otherwise.
        let average_competitor_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        competitors.sort_by(|a, b| a.1.total_cmp(&b.1));
        let nearby_competitors = competitors
            .into_iter()
            .take(NEARBY_DISPLAY_LIMIT)
            .map(|(venue, distance_m)| RankedCompetitor { venue: venue.clone(), distance_m })
            .collect();

        CompetitionReport {
            total_competitors,
            average_competitor_rating,
            density_score,
            nearby_competitors,
        }
    }
}

/// A venue competes when any keyword appears (case-insensitively) in one of
/// its category names or in the venue name itself.
pub fn is_competitor(venue: &Venue, keywords: &[&str]) -> bool {
    let name = venue.name.to_lowercase();
    keywords.iter().any(|kw| {
        name.contains(kw) || venue.categories.iter().any(|c| c.to_lowercase().contains(kw))
    })
}

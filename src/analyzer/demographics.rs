use crate::model::{DemographicProfile, Venue};
use std::cmp::Reverse;

const FAMILY_KEYWORDS: &[&str] = &["park", "playground", "school", "family", "kids"];
const PROFESSIONAL_KEYWORDS: &[&str] = &["office", "coworking", "coffee", "gym", "bar"];
const TOURIST_KEYWORDS: &[&str] = &["museum", "tourist", "hotel", "attraction", "landmark"];

/// Mid-range default when no venue reports a price level.
const NEUTRAL_PRICE_LEVEL: f64 = 2.0;

const DOMINANT_LIMIT: usize = 5;

/// Infers who an area serves from what kinds of venues it holds.
pub struct DemographicProfiler;

impl DemographicProfiler {
    pub fn profile(venues: &[Venue]) -> DemographicProfile {
        // Counts keep first-seen order so top-5 tie-breaks are deterministic.
        let mut counts: Vec<(String, u32)> = Vec::new();
        let mut price_levels: Vec<f64> = Vec::new();

        for venue in venues {
            for category in &venue.categories {
                match counts.iter_mut().find(|(name, _)| name == category) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((category.clone(), 1)),
                }
            }
            if let Some(price) = venue.price_level {
                price_levels.push(price as f64);
            }
        }

        let affluence_indicator = if price_levels.is_empty() {
            NEUTRAL_PRICE_LEVEL
        } else {
            price_levels.iter().sum::<f64>() / price_levels.len() as f64
        };

        let mut dominant_categories = counts.clone();
        dominant_categories.sort_by_key(|(_, n)| Reverse(*n));
        dominant_categories.truncate(DOMINANT_LIMIT);

        DemographicProfile {
            affluence_indicator,
            family_friendly: keyword_frequency(&counts, FAMILY_KEYWORDS),
            young_professional: keyword_frequency(&counts, PROFESSIONAL_KEYWORDS),
            tourist_area: keyword_frequency(&counts, TOURIST_KEYWORDS),
            dominant_categories,
        }
    }
}

/// Sum of frequencies of category names containing any of the keywords.
/// These are raw counts, deliberately not squeezed into 0-100.
fn keyword_frequency(counts: &[(String, u32)], keywords: &[&str]) -> u32 {
    counts
        .iter()
        .filter(|(name, _)| {
            let lower = name.to_lowercase();
            keywords.iter().any(|kw| lower.contains(kw))
        })
        .map(|(_, n)| *n)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    fn venue(categories: &[&str], price_level: Option<u8>) -> Venue {
        Venue {
            id: categories.join("/"),
            name: "venue".to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            coordinate: Coordinate::new(0.0, 0.0),
            rating: None,
            popularity: None,
            price_level,
        }
    }

    #[test]
    fn empty_area_defaults_to_mid_range() {
        let profile = DemographicProfiler::profile(&[]);
        assert_eq!(profile.affluence_indicator, 2.0);
        assert_eq!(profile.family_friendly, 0);
        assert!(profile.dominant_categories.is_empty());
    }

    #[test]
    fn affluence_is_the_mean_of_reported_price_levels() {
        let venues = vec![
            venue(&["Cafe"], Some(1)),
            venue(&["Cafe"], Some(4)),
            venue(&["Cafe"], None),
        ];
        let profile = DemographicProfiler::profile(&venues);
        assert_eq!(profile.affluence_indicator, 2.5);
    }

    #[test]
    fn sub_scores_sum_category_frequencies() {
        let venues = vec![
            venue(&["Coffee Shop", "Dog Park"], None),
            venue(&["Coffee Shop"], None),
            venue(&["Hotel Bar"], None),
        ];
        let profile = DemographicProfiler::profile(&venues);
        // "Coffee Shop" x2 + "Hotel Bar" (bar) x1
        assert_eq!(profile.young_professional, 3);
        assert_eq!(profile.family_friendly, 1); // Dog Park
        assert_eq!(profile.tourist_area, 1); // Hotel Bar
    }

    #[test]
    fn dominant_categories_rank_by_frequency_with_first_seen_ties() {
        let venues = vec![
            venue(&["Alpha", "Beta"], None),
            venue(&["Beta", "Gamma"], None),
            venue(&["Delta", "Epsilon", "Zeta"], None),
        ];
        let profile = DemographicProfiler::profile(&venues);
        assert_eq!(profile.dominant_categories.len(), 5);
        assert_eq!(profile.dominant_categories[0], ("Beta".to_string(), 2));
        // Ties at frequency 1 keep first-seen order.
        assert_eq!(profile.dominant_categories[1].0, "Alpha");
        assert_eq!(profile.dominant_categories[2].0, "Gamma");
    }
}

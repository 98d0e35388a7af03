use crate::geo;
use crate::model::{Coordinate, Venue};

/// Estimates pedestrian exposure from the popularity of surrounding venues.
///
/// No sensor data is available, so popularity weighted by proximity stands
/// in for real foot-traffic counts.
pub struct TrafficEstimator;

impl TrafficEstimator {
    /// Proximity-weighted popularity sum, normalized into 0-100.
    pub fn score(target: Coordinate, venues: &[Venue]) -> f64 {
        let mut raw = 0.0;
        for venue in venues {
            let d = geo::distance(target, venue.coordinate);
            let weight = if d <= 200.0 {
                1.5
            } else if d <= 500.0 {
                1.0
            } else if d <= 1000.0 {
                0.5
            } else {
                0.0
            };
            raw += venue.popularity.unwrap_or(0.0) * weight;
        }
        (raw / 10.0).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(lng: f64, popularity: Option<f64>) -> Venue {
        Venue {
            id: format!("v{lng}"),
            name: "venue".to_string(),
            categories: vec![],
            coordinate: Coordinate::new(0.0, lng),
            rating: None,
            popularity,
            price_level: None,
        }
    }

    const TARGET: Coordinate = Coordinate { lat: 0.0, lng: 0.0 };

    #[test]
    fn no_venues_scores_zero() {
        assert_eq!(TrafficEstimator::score(TARGET, &[]), 0.0);
    }

    #[test]
    fn weights_drop_with_distance() {
        // 0.001 deg of longitude at the equator is ~111 m.
        let at_100m = TrafficEstimator::score(TARGET, &[venue(0.0009, Some(40.0))]);
        let at_400m = TrafficEstimator::score(TARGET, &[venue(0.0036, Some(40.0))]);
        let at_800m = TrafficEstimator::score(TARGET, &[venue(0.0072, Some(40.0))]);
        let at_2km = TrafficEstimator::score(TARGET, &[venue(0.018, Some(40.0))]);
        assert_eq!(at_100m, 6.0); // 40 * 1.5 / 10
        assert_eq!(at_400m, 4.0); // 40 * 1.0 / 10
        assert_eq!(at_800m, 2.0); // 40 * 0.5 / 10
        assert_eq!(at_2km, 0.0);
    }

    #[test]
    fn missing_popularity_contributes_nothing() {
        let score = TrafficEstimator::score(TARGET, &[venue(0.0009, None)]);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn monotone_in_popularity_and_capped_at_100() {
        let mut last = 0.0;
        for pop in [10.0, 30.0, 60.0, 90.0] {
            let score = TrafficEstimator::score(TARGET, &[venue(0.0009, Some(pop))]);
            assert!(score >= last);
            last = score;
        }
        let crowd: Vec<Venue> = (0..30).map(|_| venue(0.0009, Some(100.0))).collect();
        assert_eq!(TrafficEstimator::score(TARGET, &crowd), 100.0);
    }

    #[test]
    fn dense_block_sums_across_venues() {
        // 120 popularity points weighted at 1.5 within 200 m.
        let venues = vec![venue(0.0009, Some(50.0)), venue(0.0005, Some(30.0))];
        assert_eq!(TrafficEstimator::score(TARGET, &venues), 12.0);
    }
}

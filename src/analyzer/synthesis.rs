use crate::model::{
    BusinessRecommendation, BusinessType, CompetitionReport, DemographicProfile, LocationInsight,
};
use crate::profiles::BusinessProfile;
use chrono::Utc;

/// Weights of the confidence composite. The gap term rewards missing
/// essentials as untapped demand, so it is an opportunity signal and is
/// unbounded before the final clamp.
const WEIGHT_FOOT_TRAFFIC: f64 = 0.30;
const WEIGHT_COMPETITION: f64 = 0.25;
const WEIGHT_DEMOGRAPHIC: f64 = 0.25;
const WEIGHT_CATEGORY_GAPS: f64 = 0.20;

const NEUTRAL_DEMOGRAPHIC_MATCH: f64 = 70.0;

/// Folds the per-component scores into a final recommendation.
pub struct RecommendationSynthesizer {
    profile: &'static BusinessProfile,
}

impl RecommendationSynthesizer {
    pub fn new(business_type: BusinessType) -> Self {
        Self { profile: business_type.profile() }
    }

    pub fn synthesize(&self, insight: LocationInsight) -> BusinessRecommendation {
        let confidence_score = confidence_score(&insight);
        let reasoning = reasoning(&insight);
        let setup_requirements = self.setup_requirements(&insight);

        BusinessRecommendation {
            confidence_score,
            reasoning,
            revenue_potential: revenue_band(confidence_score).to_string(),
            setup_requirements,
            recommended_duration: duration_band(confidence_score).to_string(),
            generated_at: Utc::now(),
            insight,
        }
    }

    /// How well the area's venue mix fits the demographics the operator
    /// wants to reach. No stated targets means a neutral 70.
    pub fn demographic_match(profile: &DemographicProfile, targets: &[String]) -> f64 {
        if targets.is_empty() {
            return NEUTRAL_DEMOGRAPHIC_MATCH;
        }

        let mut score = 0.0;
        let mut total_weight = 0.0;
        for target in targets {
            let weight = 25.0;
            score += weight
                * match target.to_lowercase().as_str() {
                    "families" | "family" => profile.family_friendly as f64,
                    "professionals" | "young_professional" => profile.young_professional as f64,
                    "tourists" | "tourist" => profile.tourist_area as f64,
                    _ => 50.0,
                };
            total_weight += weight;
        }

        (score / total_weight).min(100.0)
    }

    pub fn risk_factors(
        report: &CompetitionReport,
        demographics: &DemographicProfile,
        foot_traffic_score: f64,
    ) -> Vec<String> {
        let mut risks = Vec::new();
        if report.total_competitors > 5 {
            risks.push("High competition density".to_string());
        }
        if foot_traffic_score < 30.0 {
            risks.push("Low foot traffic area".to_string());
        }
        if report.average_competitor_rating > 4.5 {
            risks.push("High-quality established competitors".to_string());
        }
        if demographics.affluence_indicator < 2.0 {
            risks.push("Lower-income area may affect pricing".to_string());
        }
        risks
    }

    fn setup_requirements(&self, insight: &LocationInsight) -> Vec<String> {
        let mut requirements: Vec<String> =
            self.profile.base_requirements.iter().map(|r| r.to_string()).collect();

        if insight.competition_density < 50.0 {
            requirements.push("Strong branding to stand out from competition".to_string());
        }
        if insight.foot_traffic_score < 50.0 {
            requirements.push("Marketing strategy for customer acquisition".to_string());
        }
        if insight.risk_factors.len() > 2 {
            requirements.push("Risk mitigation strategy".to_string());
        }
        requirements
    }
}

fn confidence_score(insight: &LocationInsight) -> f64 {
    let gap_term = 10.0 * insight.category_gaps.len() as f64;
    (WEIGHT_FOOT_TRAFFIC * insight.foot_traffic_score
        + WEIGHT_COMPETITION * insight.competition_density
        + WEIGHT_DEMOGRAPHIC * insight.demographic_match
        + WEIGHT_CATEGORY_GAPS * gap_term)
        .clamp(0.0, 100.0)
}

fn reasoning(insight: &LocationInsight) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if insight.foot_traffic_score > 70.0 {
        reasons.push("High foot traffic from nearby popular venues".to_string());
    } else if insight.foot_traffic_score < 30.0 {
        reasons.push("Low foot traffic may require strong marketing".to_string());
    }

    if insight.competition_density > 70.0 {
        reasons.push("Low competition provides market opportunity".to_string());
    } else if insight.competition_density < 30.0 {
        reasons.push("High competition requires strong differentiation".to_string());
    }

    if !insight.category_gaps.is_empty() {
        let listed: Vec<&str> =
            insight.category_gaps.iter().take(3).map(String::as_str).collect();
        reasons.push(format!("Market gaps identified: {}", listed.join(", ")));
    }

    if !insight.nearby_attractions.is_empty() {
        let listed: Vec<&str> =
            insight.nearby_attractions.iter().take(2).map(String::as_str).collect();
        reasons.push(format!("Benefit from proximity to: {}", listed.join(", ")));
    }

    if reasons.is_empty() {
        "Standard market conditions observed".to_string()
    } else {
        reasons.join(". ")
    }
}

fn revenue_band(confidence: f64) -> &'static str {
    if confidence > 80.0 {
        "High ($2000-5000/week)"
    } else if confidence > 60.0 {
        "Medium-High ($1000-2000/week)"
    } else if confidence > 40.0 {
        "Medium ($500-1000/week)"
    } else {
        "Low-Medium ($200-500/week)"
    }
}

fn duration_band(confidence: f64) -> &'static str {
    if confidence > 70.0 {
        "2-4 weeks for market validation, potential for longer"
    } else if confidence > 50.0 {
        "1-2 weeks with careful monitoring"
    } else {
        "3-5 days trial period recommended"
    }
}

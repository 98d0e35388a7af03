// Per-business-type lookup tables used across the scoring pipeline.
use crate::model::BusinessType;

/// Immutable per-business-type configuration. Keeping these as statics
/// means adding a business type never touches the scoring logic.
#[derive(Debug)]
pub struct BusinessProfile {
    /// Substring keywords that mark a venue as a competitor.
    pub competitor_keywords: &'static [&'static str],
    /// Categories a healthy area is expected to have; missing ones are gaps.
    pub essential_categories: &'static [&'static str],
    pub optimal_hours: &'static [&'static str],
    pub base_requirements: &'static [&'static str],
    /// Query sent to the places API when fetching the competitor set.
    pub competitor_query: &'static str,
}

static FOOD_TRUCK: BusinessProfile = BusinessProfile {
    competitor_keywords: &["food", "restaurant", "cafe", "truck"],
    essential_categories: &["Coffee Shop", "Fast Food", "Grocery Store", "Bakery"],
    optimal_hours: &["11:00-14:00", "17:00-21:00"],
    base_requirements: &[
        "Food service permits and licenses",
        "Mobile kitchen equipment",
        "Generator or power source",
    ],
    competitor_query: "food truck restaurant fast food",
};

static RETAIL: BusinessProfile = BusinessProfile {
    competitor_keywords: &["shop", "store", "boutique", "market"],
    essential_categories: &["Clothing Store", "Electronics Store", "Bookstore", "Pharmacy"],
    optimal_hours: &["09:00-18:00"],
    base_requirements: &[
        "Retail trading license",
        "Display fixtures and shelving",
        "Point-of-sale system",
    ],
    competitor_query: "shop store boutique retail",
};

static SERVICE: BusinessProfile = BusinessProfile {
    competitor_keywords: &["salon", "repair", "cleaning", "consultation"],
    essential_categories: &["Hair Salon", "Laundry", "Bank", "Post Office"],
    optimal_hours: &["09:00-17:00"],
    base_requirements: &[
        "Service business license",
        "Appointment booking system",
        "Professional liability insurance",
    ],
    competitor_query: "salon service repair",
};

static ENTERTAINMENT: BusinessProfile = BusinessProfile {
    competitor_keywords: &["music", "art", "performance", "event"],
    essential_categories: &["Cinema", "Bar", "Gym", "Park"],
    optimal_hours: &["18:00-23:00"],
    base_requirements: &[
        "Entertainment and event permits",
        "Sound and lighting equipment",
        "Event liability insurance",
    ],
    competitor_query: "entertainment music art event",
};

impl BusinessType {
    pub fn profile(&self) -> &'static BusinessProfile {
        match self {
            BusinessType::FoodTruck => &FOOD_TRUCK,
            BusinessType::Retail => &RETAIL,
            BusinessType::Service => &SERVICE,
            BusinessType::Entertainment => &ENTERTAINMENT,
        }
    }
}

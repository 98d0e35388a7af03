use crate::model::{BusinessType, Venue};
use crate::profiles::BusinessProfile;

/// Diffs an essential-category checklist against what the area already has.
/// A missing essential reads as opportunity, not as a defect of the spot.
pub struct GapFinder {
    profile: &'static BusinessProfile,
}

impl GapFinder {
    pub fn new(business_type: BusinessType) -> Self {
        Self { profile: business_type.profile() }
    }

    /// Checklist items with no matching observed category, in checklist order.
    ///
    /// An item counts as present when its lowercase form appears as a
    /// substring of any observed category's lowercase form. One direction
    /// only; "Fast Food" is covered by "Vegan Fast Food Stand", not the
    /// other way around.
    pub fn find_gaps(&self, venues: &[Venue]) -> Vec<String> {
        let observed: Vec<String> = venues
            .iter()
            .flat_map(|v| v.categories.iter())
            .map(|c| c.to_lowercase())
            .collect();

        self.profile
            .essential_categories
            .iter()
            .filter(|item| {
                let needle = item.to_lowercase();
                !observed.iter().any(|category| category.contains(&needle))
            })
            .map(|item| item.to_string())
            .collect()
    }
}

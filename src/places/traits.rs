use crate::model::{Coordinate, PlacesError, Venue};

#[async_trait::async_trait]
pub trait PlaceDataSource: Send + Sync {
    /// Free-text place search around a coordinate.
    async fn search(
        &self,
        query: &str,
        near: Coordinate,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<Venue>, PlacesError>;

    /// Broad category sweep of everything around a coordinate.
    async fn nearby_categories(
        &self,
        at: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Venue>, PlacesError>;

    async fn place_details(&self, id: &str) -> Result<Venue, PlacesError>;
}

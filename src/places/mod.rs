// Place data layer: the external POI source behind a trait.

pub mod foursquare;
pub mod traits;

pub use foursquare::FoursquareClient;
pub use traits::PlaceDataSource;

use serde::{Deserialize, Serialize};
use utility::{
    geo::Coordinates,
    id::{HasId, Id},
};

/// The simulated position of a tourist, maintained by the location service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouristLocation {
    pub id: Id<TouristLocation>,
    pub username: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl HasId for TouristLocation {
    type IdType = i64;
}

impl TouristLocation {
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouristLocationUpdate {
    pub username: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TouristLocationUpdate {
    pub fn new<S: Into<String>>(username: S, position: Coordinates) -> Self {
        Self {
            username: username.into(),
            latitude: position.latitude,
            longitude: position.longitude,
        }
    }
}

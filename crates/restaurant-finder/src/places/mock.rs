//! Mock Places Client
//!
//! For testing and demo purposes. Serves a fixed set of places per location.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{MAX_RESULTS, PlacesClient};
use crate::error::Result;
use crate::model::{LatLng, Place, PlaceDetails};

/// In-memory places client with static fixtures
#[derive(Clone, Debug, Default)]
pub struct MockPlacesClient {
    /// Places keyed by the exact location string
    places: HashMap<String, Vec<Place>>,
    details: HashMap<String, PlaceDetails>,
}

impl MockPlacesClient {
    /// Empty client: every search misses geocoding
    pub fn new() -> Self {
        Self::default()
    }

    /// Client preloaded with two San Francisco ramen shops
    pub fn san_francisco() -> Self {
        let ramen_house = Place {
            address: Some("123 Main St, San Francisco, CA".into()),
            rating: Some(4.5),
            price_level: Some(2),
            types: vec!["restaurant".into(), "food".into()],
            location: Some(LatLng { lat: 37.77, lng: -122.41 }),
            ..Place::new("ChIJtest1", "Ramen House")
        };
        let spicy_noodles = Place {
            address: Some("456 Market St, San Francisco, CA".into()),
            rating: Some(4.2),
            price_level: Some(1),
            types: vec!["restaurant".into(), "food".into()],
            location: Some(LatLng { lat: 37.78, lng: -122.42 }),
            ..Place::new("ChIJtest2", "Spicy Noodles")
        };

        Self::new()
            .with_details(
                "ChIJtest1",
                PlaceDetails {
                    name: Some("Ramen House".into()),
                    address: Some("123 Main St, San Francisco, CA".into()),
                    phone: Some("(415) 555-0101".into()),
                    rating: Some(4.5),
                    price_level: Some(2),
                    ..Default::default()
                },
            )
            .with_places("San Francisco, CA", vec![ramen_house, spicy_noodles])
    }

    pub fn with_places(mut self, location: impl Into<String>, places: Vec<Place>) -> Self {
        self.places.insert(location.into(), places);
        self
    }

    pub fn with_details(mut self, place_id: impl Into<String>, details: PlaceDetails) -> Self {
        self.details.insert(place_id.into(), details);
        self
    }
}

#[async_trait]
impl PlacesClient for MockPlacesClient {
    async fn search(&self, _query: &str, location: &str, _radius_meters: u32) -> Result<Vec<Place>> {
        Ok(self
            .places
            .get(location)
            .map(|places| places.iter().take(MAX_RESULTS).cloned().collect())
            .unwrap_or_default())
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails> {
        Ok(self.details.get(place_id).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "MockPlaces"
    }
}

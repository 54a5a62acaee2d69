//! Places Integration
//!
//! Abstractions and implementations for restaurant search providers.

mod google;
mod mock;

pub use google::{GooglePlacesClient, GooglePlacesConfig};
pub use mock::MockPlacesClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Place, PlaceDetails};

/// Default search radius in metres
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Maximum number of places returned by a search
pub const MAX_RESULTS: usize = 10;

/// Places client trait (Strategy pattern)
#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Search restaurants matching `query` near a human-readable location.
    ///
    /// Returns at most `MAX_RESULTS` places, and none when the location
    /// cannot be geocoded.
    async fn search(&self, query: &str, location: &str, radius_meters: u32) -> Result<Vec<Place>>;

    /// Look up details for one place; empty when the place is unknown
    async fn details(&self, place_id: &str) -> Result<PlaceDetails>;

    /// Client name
    fn name(&self) -> &str;
}

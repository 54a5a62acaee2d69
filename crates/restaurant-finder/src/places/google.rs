//! Google Maps Places Client
//!
//! Geocodes the location string, then runs a restaurant text search around
//! the resulting coordinate. Details use the Place Details endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{MAX_RESULTS, PlacesClient};
use crate::error::{FinderError, Result};
use crate::model::{LatLng, OpeningHours, Place, PlaceDetails, Review};

const DETAIL_FIELDS: &str = "name,formatted_address,formatted_phone_number,website,rating,price_level,opening_hours,reviews,url";

/// Google Places configuration
#[derive(Clone, Debug)]
pub struct GooglePlacesConfig {
    /// API key; checked when a call is made, not at construction
    pub api_key: Option<String>,

    /// Maps API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GooglePlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://maps.googleapis.com".into(),
            timeout_secs: 30,
        }
    }
}

impl GooglePlacesConfig {
    /// Read `GOOGLE_PLACES_API_KEY` and optional `GOOGLE_MAPS_BASE_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// An empty key counts as unset
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup("GOOGLE_PLACES_API_KEY").filter(|k| !k.is_empty()),
            base_url: lookup("GOOGLE_MAPS_BASE_URL").unwrap_or_else(|| Self::default().base_url),
            ..Default::default()
        }
    }
}

/// Places client backed by the Google Maps web services
pub struct GooglePlacesClient {
    client: Client,
    config: GooglePlacesConfig,
}

#[derive(Deserialize)]
struct Envelope<T> {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default = "Option::default")]
    results: Option<Vec<T>>,
    #[serde(default = "Option::default")]
    result: Option<T>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct SearchResult {
    place_id: String,
    name: String,
    formatted_address: Option<String>,
    rating: Option<f64>,
    price_level: Option<u8>,
    #[serde(default)]
    types: Vec<String>,
    geometry: Option<Geometry>,
}

impl From<SearchResult> for Place {
    fn from(r: SearchResult) -> Self {
        Self {
            place_id: r.place_id,
            name: r.name,
            address: r.formatted_address,
            rating: r.rating,
            price_level: r.price_level,
            types: r.types,
            location: r.geometry.map(|g| g.location),
        }
    }
}

#[derive(Deserialize)]
struct DetailsResult {
    name: Option<String>,
    formatted_address: Option<String>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    rating: Option<f64>,
    price_level: Option<u8>,
    opening_hours: Option<OpeningHours>,
    reviews: Option<Vec<Review>>,
    url: Option<String>,
}

impl From<DetailsResult> for PlaceDetails {
    fn from(r: DetailsResult) -> Self {
        Self {
            name: r.name,
            address: r.formatted_address,
            phone: r.formatted_phone_number,
            website: r.website,
            rating: r.rating,
            price_level: r.price_level,
            opening_hours: r.opening_hours,
            reviews: r.reviews,
            url: r.url,
        }
    }
}

impl GooglePlacesClient {
    pub fn new(config: GooglePlacesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GooglePlacesConfig::from_env())
    }

    fn api_key(&self) -> Result<&str> {
        self.config.api_key.as_deref().ok_or_else(|| {
            FinderError::Config("GOOGLE_PLACES_API_KEY environment variable is not set".into())
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Envelope<T>> {
        let key = self.api_key()?;
        let url = format!(
            "{}/maps/api/{}/json",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        );

        // The request URL carries the key; keep it out of error text
        let envelope: Envelope<T> = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", key)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(reqwest::Error::without_url)?
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        match envelope.status.as_str() {
            "OK" | "ZERO_RESULTS" | "NOT_FOUND" => Ok(envelope),
            status => Err(FinderError::Places(match &envelope.error_message {
                Some(message) => format!("{}: {}", status, message),
                None => status.to_string(),
            })),
        }
    }

    async fn geocode(&self, location: &str) -> Result<Option<LatLng>> {
        let envelope: Envelope<GeocodeResult> =
            self.get("geocode", &[("address", location)]).await?;

        Ok(envelope
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|r| r.geometry.location))
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    async fn search(&self, query: &str, location: &str, radius_meters: u32) -> Result<Vec<Place>> {
        let Some(center) = self.geocode(location).await? else {
            tracing::debug!(location, "Location did not geocode");
            return Ok(Vec::new());
        };

        let query = format!("restaurant {}", query);
        let center = format!("{},{}", center.lat, center.lng);
        let radius = radius_meters.to_string();

        let envelope: Envelope<SearchResult> = self
            .get(
                "place/textsearch",
                &[
                    ("query", query.as_str()),
                    ("location", center.as_str()),
                    ("radius", radius.as_str()),
                    ("type", "restaurant"),
                ],
            )
            .await?;

        Ok(envelope
            .results
            .unwrap_or_default()
            .into_iter()
            .take(MAX_RESULTS)
            .map(Place::from)
            .collect())
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails> {
        let envelope: Envelope<DetailsResult> = self
            .get(
                "place/details",
                &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
            )
            .await?;

        Ok(envelope.result.map(PlaceDetails::from).unwrap_or_default())
    }

    fn name(&self) -> &str {
        "GooglePlaces"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GooglePlacesClient {
        GooglePlacesClient::new(GooglePlacesConfig {
            api_key: Some("test_key".into()),
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    async fn mount_geocode(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("address", "San Francisco, CA"))
            .and(query_param("key", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn search_result(i: usize) -> serde_json::Value {
        json!({
            "place_id": format!("ChIJ{}", i),
            "name": format!("Place {}", i),
            "formatted_address": "1 Test St",
            "rating": 4.0,
            "price_level": 2,
            "types": ["restaurant"],
            "geometry": {"location": {"lat": 37.7, "lng": -122.4}}
        })
    }

    #[tokio::test]
    async fn test_search_geocodes_then_searches() {
        let server = MockServer::start().await;
        mount_geocode(
            &server,
            json!({
                "status": "OK",
                "results": [{"geometry": {"location": {"lat": 37.7749, "lng": -122.4194}}}]
            }),
        )
        .await;

        let results: Vec<_> = (0..12).map(search_result).collect();
        Mock::given(method("GET"))
            .and(path("/maps/api/place/textsearch/json"))
            .and(query_param("query", "restaurant ramen"))
            .and(query_param("location", "37.7749,-122.4194"))
            .and(query_param("radius", "5000"))
            .and(query_param("type", "restaurant"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": results
            })))
            .expect(1)
            .mount(&server)
            .await;

        let places = client_for(&server)
            .search("ramen", "San Francisco, CA", 5000)
            .await
            .unwrap();

        assert_eq!(places.len(), MAX_RESULTS);
        assert_eq!(places[0].place_id, "ChIJ0");
        assert_eq!(places[0].address.as_deref(), Some("1 Test St"));
        assert_eq!(places[0].price_level, Some(2));
    }

    #[tokio::test]
    async fn test_ungeocodable_location_is_empty() {
        let server = MockServer::start().await;
        mount_geocode(&server, json!({"status": "ZERO_RESULTS", "results": []})).await;

        let places = client_for(&server)
            .search("ramen", "San Francisco, CA", 5000)
            .await
            .unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_denied_status_is_error() {
        let server = MockServer::start().await;
        mount_geocode(
            &server,
            json!({"status": "REQUEST_DENIED", "error_message": "bad key", "results": []}),
        )
        .await;

        let err = client_for(&server)
            .search("ramen", "San Francisco, CA", 5000)
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::Places(ref m) if m.contains("REQUEST_DENIED")));
    }

    #[tokio::test]
    async fn test_details_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/place/details/json"))
            .and(query_param("place_id", "ChIJtest1"))
            .and(query_param("fields", DETAIL_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "result": {
                    "name": "Ramen House",
                    "formatted_address": "123 Main St",
                    "formatted_phone_number": "(415) 555-0101",
                    "rating": 4.5,
                    "opening_hours": {"open_now": true, "weekday_text": ["Monday: 11AM-10PM"]},
                    "reviews": [{"author_name": "Kim", "rating": 5, "text": "Great broth"}]
                }
            })))
            .mount(&server)
            .await;

        let details = client_for(&server).details("ChIJtest1").await.unwrap();
        assert_eq!(details.name.as_deref(), Some("Ramen House"));
        assert_eq!(details.phone.as_deref(), Some("(415) 555-0101"));
        assert_eq!(details.opening_hours.unwrap().open_now, Some(true));
        assert_eq!(details.reviews.unwrap()[0].text.as_deref(), Some("Great broth"));
        assert!(details.website.is_none());
    }

    #[tokio::test]
    async fn test_unknown_place_details_are_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/place/details/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "NOT_FOUND"})))
            .mount(&server)
            .await;

        let details = client_for(&server).details("nope").await.unwrap();
        assert!(details.is_empty());
    }

    #[tokio::test]
    async fn test_http_failure_does_not_expose_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search("ramen", "San Francisco, CA", 5000)
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::Network(_)));
        assert!(err.to_string().contains("500"));
        assert!(!err.to_string().contains("test_key"));

        let contained = agent_core::AgentError::from(err).to_string();
        assert!(!contained.contains("test_key"));
    }

    #[tokio::test]
    async fn test_unreachable_host_does_not_expose_key() {
        let server = MockServer::start().await;
        let base_url = server.uri();
        drop(server);

        let client = GooglePlacesClient::new(GooglePlacesConfig {
            api_key: Some("test_key".into()),
            base_url,
            timeout_secs: 5,
        })
        .unwrap();

        let err = client.details("ChIJtest1").await.unwrap_err();
        assert!(matches!(err, FinderError::Network(_)));
        assert!(!err.to_string().contains("test_key"));
    }

    #[test]
    fn test_empty_key_counts_as_unset() {
        let config = GooglePlacesConfig::from_lookup(|key| match key {
            "GOOGLE_PLACES_API_KEY" => Some(String::new()),
            _ => None,
        });
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://maps.googleapis.com");

        let config = GooglePlacesConfig::from_lookup(|key| {
            (key == "GOOGLE_PLACES_API_KEY").then(|| "abc".to_string())
        });
        assert_eq!(config.api_key.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_call_time() {
        let client = GooglePlacesClient::new(GooglePlacesConfig::default()).unwrap();
        let err = client.details("ChIJtest1").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: GOOGLE_PLACES_API_KEY environment variable is not set"
        );
    }
}

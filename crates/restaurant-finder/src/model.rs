//! Domain Models
//!
//! Places returned by the search provider and per-user dining preferences.

use serde::{Deserialize, Serialize};

/// Geographic coordinate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A restaurant returned by text search
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Provider place identifier
    pub place_id: String,

    pub name: String,

    /// Formatted street address
    pub address: Option<String>,

    /// Average rating, 0.0 to 5.0
    pub rating: Option<f64>,

    /// Price level, 0 (free) to 4 (very expensive)
    pub price_level: Option<u8>,

    /// Category tags (e.g., "restaurant", "food")
    #[serde(default)]
    pub types: Vec<String>,

    pub location: Option<LatLng>,
}

impl Place {
    pub fn new(place_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            address: None,
            rating: None,
            price_level: None,
            types: Vec::new(),
            location: None,
        }
    }
}

/// Opening hours summary
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,

    /// Human-readable line per weekday
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekday_text: Vec<String>,
}

/// A single customer review
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub relative_time_description: Option<String>,
}

/// Detailed information for one place.
///
/// Absent fields are omitted, so an unknown place serializes to `{}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,

    /// Maps URL for the place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PlaceDetails {
    /// True when the provider had nothing for the place
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Preferred price tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Expensive,
    #[serde(rename = "$$$$")]
    VeryExpensive,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [
        PriceRange::Budget,
        PriceRange::Moderate,
        PriceRange::Expensive,
        PriceRange::VeryExpensive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Budget => "$",
            PriceRange::Moderate => "$$",
            PriceRange::Expensive => "$$$",
            PriceRange::VeryExpensive => "$$$$",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored dining preferences for one user
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub cuisines_liked: Vec<String>,
    pub cuisines_disliked: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub price_range: Option<PriceRange>,
    pub liked_place_ids: Vec<String>,
    pub disliked_place_ids: Vec<String>,
}

/// Partial update: `None` leaves the stored value untouched
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    #[serde(default)]
    pub cuisines_liked: Option<Vec<String>>,
    #[serde(default)]
    pub cuisines_disliked: Option<Vec<String>>,
    #[serde(default)]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub liked_place_ids: Option<Vec<String>>,
    #[serde(default)]
    pub disliked_place_ids: Option<Vec<String>>,
}

impl Preferences {
    /// Apply a partial update.
    ///
    /// List fields are unioned with existing values keeping first-seen
    /// order; `price_range` is overwritten when present.
    pub fn merge(&mut self, update: PreferenceUpdate) {
        union_into(&mut self.cuisines_liked, update.cuisines_liked);
        union_into(&mut self.cuisines_disliked, update.cuisines_disliked);
        union_into(&mut self.dietary_restrictions, update.dietary_restrictions);
        union_into(&mut self.liked_place_ids, update.liked_place_ids);
        union_into(&mut self.disliked_place_ids, update.disliked_place_ids);
        if let Some(price_range) = update.price_range {
            self.price_range = Some(price_range);
        }
    }
}

fn union_into(existing: &mut Vec<String>, incoming: Option<Vec<String>>) {
    for value in incoming.into_iter().flatten() {
        if !existing.contains(&value) {
            existing.push(value);
        }
    }
}

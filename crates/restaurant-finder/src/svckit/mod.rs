//! Service Kit - Agent Tools
//!
//! Domain-specific tools that implement `agent_core::Tool` for the restaurant finder.

mod search_restaurants;
mod place_details;
mod save_preference;
mod get_preferences;

pub use search_restaurants::{SearchRestaurantsInput, SearchRestaurantsTool};
pub use place_details::{PlaceDetailsInput, PlaceDetailsTool};
pub use save_preference::{SavePreferenceInput, SavePreferenceOutput, SavePreferenceTool};
pub use get_preferences::{GetPreferencesInput, GetPreferencesOutput, GetPreferencesTool};

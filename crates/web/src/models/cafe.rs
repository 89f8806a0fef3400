//! Cafe domain types.

use chrono::{DateTime, Utc};

use coffee_wifi_core::{CafeId, UserId};

/// A catalogued cafe (domain type).
#[derive(Debug, Clone)]
pub struct Cafe {
    /// Unique cafe ID.
    pub id: CafeId,
    /// Cafe name, unique across the catalogue.
    pub name: String,
    /// Link to the cafe on a map service.
    pub map_url: String,
    /// Optional link to a picture.
    pub img_url: Option<String>,
    /// Neighbourhood or area description.
    pub location: String,
    /// Free-text seating capacity (e.g., "20-30").
    pub seats: String,
    /// Customer toilet available.
    pub has_toilet: bool,
    /// Wifi available.
    pub has_wifi: bool,
    /// Power sockets available.
    pub has_sockets: bool,
    /// Phone calls tolerated.
    pub can_take_calls: bool,
    /// Typical coffee price, free text.
    pub coffee_price: Option<String>,
    /// The user who contributed this cafe, if tracked.
    pub user_id: Option<UserId>,
    /// When the cafe was added.
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new cafe.
#[derive(Debug, Clone)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: Option<String>,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
    pub user_id: Option<UserId>,
}

/// Cafe display data for the listing templates.
///
/// The projection from [`Cafe`] is an explicit, enumerated field mapping so
/// the template contract stays statically checkable.
#[derive(Debug, Clone)]
pub struct CafeView {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: Option<String>,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
    /// Display name of the contributing user, when known.
    pub contributor: Option<String>,
}

impl CafeView {
    /// Project a cafe row plus its resolved contributor name into view data.
    #[must_use]
    pub fn project(cafe: &Cafe, contributor: Option<String>) -> Self {
        Self {
            id: cafe.id.as_i64(),
            name: cafe.name.clone(),
            map_url: cafe.map_url.clone(),
            img_url: cafe.img_url.clone(),
            location: cafe.location.clone(),
            seats: cafe.seats.clone(),
            has_toilet: cafe.has_toilet,
            has_wifi: cafe.has_wifi,
            has_sockets: cafe.has_sockets,
            can_take_calls: cafe.can_take_calls,
            coffee_price: cafe.coffee_price.clone(),
            contributor,
        }
    }
}

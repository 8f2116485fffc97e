//! Restaurant locations.

use serde::{Deserialize, Serialize};

use crate::types::LocationId;

/// One Cafe Nine restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
    pub image: String,
    pub latitude: f64,
    pub longitude: f64,
    pub features: Vec<String>,
}

impl Location {
    /// `tel:` link target with formatting characters stripped.
    #[must_use]
    pub fn phone_href(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }

    /// Map search link for the address.
    #[must_use]
    pub fn map_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.latitude, self.longitude
        )
    }
}

const HOURS: &str = "Mon-Thu: 11am-10pm, Fri-Sat: 11am-11pm, Sun: 10am-9pm";

pub(crate) fn builtin_locations() -> Vec<Location> {
    let location = |id: &str,
                    name: &str,
                    address: &str,
                    phone: &str,
                    photo: &str,
                    (latitude, longitude): (f64, f64),
                    features: [&str; 4]| Location {
        id: LocationId::new(id),
        name: name.to_owned(),
        address: address.to_owned(),
        phone: phone.to_owned(),
        hours: HOURS.to_owned(),
        image: format!("https://images.unsplash.com/{photo}?w=800"),
        latitude,
        longitude,
        features: features.iter().map(|&f| f.to_owned()).collect(),
    };

    vec![
        location(
            "downtown",
            "Cafe Nine Downtown",
            "123 Culinary Street, Fine Dining District, New York, NY 10001",
            "+1 (234) 567-8901",
            "photo-1517248135467-4c7edcad34c4",
            (40.7589, -73.9851),
            ["Private Dining", "Outdoor Seating", "Bar", "Valet Parking"],
        ),
        location(
            "waterfront",
            "Cafe Nine Waterfront",
            "456 Harbor Avenue, Marina District, New York, NY 10002",
            "+1 (234) 567-8902",
            "photo-1552566626-52f8b828add9",
            (40.7484, -73.9857),
            ["Waterfront Views", "Rooftop Bar", "Live Music", "Event Space"],
        ),
        location(
            "uptown",
            "Cafe Nine Uptown",
            "789 Elegance Boulevard, Upper District, New York, NY 10003",
            "+1 (234) 567-8903",
            "photo-1414235077428-338989a2e8c0",
            (40.7794, -73.9632),
            ["Wine Cellar", "Private Events", "Chef's Table", "Garden Patio"],
        ),
    ]
}

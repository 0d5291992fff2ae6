//! Conversion from provider wire types into feed records.

use placefeed_core::{Coord, PlaceRecord};

use crate::types::{PlaceDetails, RawPlace, RawPlaceDetails};

pub const UNNAMED_PLACE: &str = "Unnamed place";
pub const MISSING_ADDRESS: &str = "Address unavailable";

/// Normalize one nearby-search result.
///
/// Returns `None` when the result has no `place_id`: it could never be
/// deduplicated. `photo_url` builds a URL from the first photo reference.
/// Distance is left empty for the engine to compute.
pub fn normalize_place<F>(raw: RawPlace, photo_url: F) -> Option<PlaceRecord>
where
    F: Fn(&str) -> String,
{
    let place_id = raw.place_id.filter(|id| !id.trim().is_empty())?;
    let location = raw
        .geometry
        .map_or(Coord::new(0.0, 0.0), |g| Coord::new(g.location.lat, g.location.lng));

    let mut record = PlaceRecord::new(
        place_id,
        raw.name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_PLACE.to_string()),
        raw.vicinity
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| MISSING_ADDRESS.to_string()),
        location,
    );
    record.rating = raw.rating;
    record.photo_url = raw
        .photos
        .first()
        .map(|photo| photo_url(&photo.photo_reference));
    record.is_open = raw.opening_hours.and_then(|h| h.open_now);
    Some(record)
}

pub fn normalize_details(place_id: &str, raw: RawPlaceDetails) -> PlaceDetails {
    let (open_now, weekday_text) = raw
        .opening_hours
        .map_or((None, Vec::new()), |h| (h.open_now, h.weekday_text));
    PlaceDetails {
        place_id: place_id.to_string(),
        name: raw.name.unwrap_or_else(|| UNNAMED_PLACE.to_string()),
        address: raw.formatted_address,
        phone: raw.formatted_phone_number,
        website: raw.website,
        rating: raw.rating,
        open_now,
        weekday_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: serde_json::Value) -> RawPlace {
        serde_json::from_value(value).expect("valid raw place")
    }

    fn photo(reference: &str) -> String {
        format!("photo:{reference}")
    }

    #[test]
    fn full_result_is_normalized() {
        let record = normalize_place(
            raw(serde_json::json!({
                "place_id": "ChIJ1",
                "name": "La Esquina",
                "vicinity": "San Martín 450",
                "rating": 4.4,
                "geometry": {"location": {"lat": -27.34, "lng": -65.59}},
                "photos": [{"photo_reference": "ref-1"}, {"photo_reference": "ref-2"}],
                "opening_hours": {"open_now": true}
            })),
            photo,
        )
        .expect("record");

        assert_eq!(record.place_id, "ChIJ1");
        assert_eq!(record.name, "La Esquina");
        assert_eq!(record.address, "San Martín 450");
        assert_eq!(record.rating, Some(4.4));
        assert_eq!(record.photo_url.as_deref(), Some("photo:ref-1"));
        assert_eq!(record.is_open, Some(true));
        assert!(record.distance_km.is_none());
        assert!(!record.is_partner);
    }

    #[test]
    fn missing_open_state_stays_unknown() {
        let record = normalize_place(
            raw(serde_json::json!({"place_id": "a", "name": "A", "vicinity": "x"})),
            photo,
        )
        .expect("record");
        assert_eq!(record.is_open, None);
        assert!(record.photo_url.is_none());
    }

    #[test]
    fn missing_name_and_address_get_placeholders() {
        let record =
            normalize_place(raw(serde_json::json!({"place_id": "a"})), photo).expect("record");
        assert_eq!(record.name, UNNAMED_PLACE);
        assert_eq!(record.address, MISSING_ADDRESS);
    }

    #[test]
    fn result_without_place_id_is_dropped() {
        assert!(normalize_place(raw(serde_json::json!({"name": "Ghost"})), photo).is_none());
        assert!(
            normalize_place(raw(serde_json::json!({"place_id": " ", "name": "Ghost"})), photo)
                .is_none()
        );
    }

    #[test]
    fn details_flatten_opening_hours() {
        let details: RawPlaceDetails = serde_json::from_value(serde_json::json!({
            "name": "La Esquina",
            "formatted_address": "San Martín 450, Catamarca",
            "formatted_phone_number": "0383 442-0000",
            "opening_hours": {"open_now": false, "weekday_text": ["Monday: 9:00 AM – 6:00 PM"]}
        }))
        .unwrap();
        let d = normalize_details("ChIJ1", details);
        assert_eq!(d.place_id, "ChIJ1");
        assert_eq!(d.open_now, Some(false));
        assert_eq!(d.weekday_text.len(), 1);
        assert!(d.website.is_none());
    }
}

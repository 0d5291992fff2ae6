//! Conversion from directory rows into feed partners.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use placefeed_core::{
    distance_km, is_open_or_unscheduled, Coord, Partner, PartnerProfile, PlaceRecord,
    WeeklySchedule,
};

use super::types::PartnerRow;

/// Convert a listed row for a caller at `center`.
///
/// Returns `None` when the row has no coordinates or lies farther than
/// `max_distance_km`.
#[must_use]
pub fn partner_from_row(
    row: PartnerRow,
    center: Coord,
    max_distance_km: f64,
    now: NaiveDateTime,
) -> Option<Partner> {
    let Some(location) = row.coord() else {
        tracing::debug!(partner = %row.public_id, "skipping partner without coordinates");
        return None;
    };
    let distance = distance_km(center, location);
    if distance > max_distance_km {
        return None;
    }
    Some(into_partner(row, location, Some(distance), now))
}

/// Convert a row fetched by key, where no caller location is involved.
///
/// A row without coordinates is placed at `(0, 0)`.
#[must_use]
pub fn partner_from_lookup(row: PartnerRow, now: NaiveDateTime) -> Partner {
    let location = row.coord().unwrap_or(Coord::new(0.0, 0.0));
    into_partner(row, location, None, now)
}

fn into_partner(
    row: PartnerRow,
    location: Coord,
    distance: Option<f64>,
    now: NaiveDateTime,
) -> Partner {
    let place_id = row.place_id();
    let (schedule, is_open) = evaluate_schedule(&row, now);

    let mut record = PlaceRecord::new(place_id, row.name, row.address, location);
    record.rating = row.rating;
    record.photo_url = row.photo_url;
    record.phone = row.phone;
    record.distance_km = distance;
    record.is_open = is_open;
    record.is_partner = true;
    record.slug = row.slug.filter(|s| !s.trim().is_empty());

    Partner {
        record,
        profile: PartnerProfile {
            whatsapp: row.whatsapp,
            logo: row.logo_url,
            categories: row.categories.into_iter().collect::<BTreeSet<_>>(),
            schedule,
            has_menu: row.has_menu,
        },
    }
}

/// Parse the stored schedule and decide the open state.
///
/// No schedule at all reads as open. A schedule that fails to parse leaves
/// the state unknown rather than guessing.
fn evaluate_schedule(
    row: &PartnerRow,
    now: NaiveDateTime,
) -> (Option<WeeklySchedule>, Option<bool>) {
    match row.schedule.as_ref() {
        None | Some(serde_json::Value::Null) => (None, Some(is_open_or_unscheduled(None, now))),
        Some(raw) => match serde_json::from_value::<WeeklySchedule>(raw.clone()) {
            Ok(schedule) => {
                let open = is_open_or_unscheduled(Some(&schedule), now);
                (Some(schedule), Some(open))
            }
            Err(e) => {
                tracing::warn!(
                    partner = %row.public_id,
                    error = %e,
                    "ignoring malformed partner schedule"
                );
                (None, None)
            }
        },
    }
}

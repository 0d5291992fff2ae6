//! Table and JSON rendering for CLI output.

use placefeed_core::{Partner, PlaceRecord};
use placefeed_directory::MenuItemRow;
use placefeed_engine::FeedState;

pub(crate) const DASH: &str = "\u{2014}";

const NAME_WIDTH: usize = 32;
const ADDRESS_WIDTH: usize = 36;

pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(DASH)
}

/// Unknown is shown as such, never as closed.
pub(crate) fn open_label(is_open: Option<bool>) -> &'static str {
    match is_open {
        Some(true) => "open",
        Some(false) => "closed",
        None => "?",
    }
}

pub(crate) fn format_distance(distance_km: Option<f64>) -> String {
    distance_km.map_or_else(|| DASH.to_string(), |d| format!("{d:.2} km"))
}

pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

pub(crate) fn print_feed_table(feed: &FeedState, records: &[PlaceRecord]) {
    println!(
        "{} of {} places within {} m of {} ({} partners){}",
        records.len(),
        feed.len(),
        feed.current_radius_m(),
        feed.center(),
        feed.partner_count(),
        if feed.has_more() {
            "; more available with --expand"
        } else {
            ""
        }
    );
    if records.is_empty() {
        return;
    }

    println!(
        "{:>9}  {:<2} {:<7}{:<NAME_WIDTH$}  {:<ADDRESS_WIDTH$}  KEY",
        "DIST", "", "STATE", "NAME", "ADDRESS"
    );
    for record in records {
        println!(
            "{:>9}  {:<2} {:<7}{:<NAME_WIDTH$}  {:<ADDRESS_WIDTH$}  {}",
            format_distance(record.distance_km),
            if record.is_partner { "*" } else { "" },
            open_label(record.is_open),
            truncate(&record.name, NAME_WIDTH),
            truncate(&record.address, ADDRESS_WIDTH),
            record.navigation_key(),
        );
    }
}

pub(crate) fn print_feed_json(feed: &FeedState, records: &[PlaceRecord]) -> anyhow::Result<()> {
    let body = serde_json::json!({
        "center": feed.center(),
        "radiusM": feed.current_radius_m(),
        "hasMore": feed.has_more(),
        "total": feed.len(),
        "places": records,
    });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

pub(crate) fn print_partner(partner: &Partner, menu: &[MenuItemRow]) {
    let record = &partner.record;
    let profile = &partner.profile;
    println!("{}", record.name);
    println!("Key:        {}", record.navigation_key());
    println!("Address:    {}", or_dash(Some(record.address.as_str())));
    println!("Phone:      {}", or_dash(record.phone.as_deref()));
    println!("WhatsApp:   {}", or_dash(profile.whatsapp.as_deref()));
    println!("Open:       {}", open_label(record.is_open));
    if !profile.categories.is_empty() {
        let categories: Vec<&str> = profile.categories.iter().map(String::as_str).collect();
        println!("Categories: {}", categories.join(", "));
    }
    println!("Map:        {}", record.maps_url());

    if menu.is_empty() {
        println!();
        println!("no menu items available");
        return;
    }
    println!();
    println!("{:<NAME_WIDTH$}  {:<16}  {:>10}", "ITEM", "CATEGORY", "PRICE");
    for item in menu {
        println!(
            "{:<NAME_WIDTH$}  {:<16}  {:>10}",
            truncate(&item.name, NAME_WIDTH),
            truncate(or_dash(Some(item.category.as_str())), 16),
            item.price
        );
    }
}

pub(crate) fn print_partner_json(partner: &Partner, menu: &[MenuItemRow]) -> anyhow::Result<()> {
    let items: Vec<serde_json::Value> = menu
        .iter()
        .map(|item| {
            serde_json::json!({
                "id": item.id,
                "name": item.name,
                "description": item.description,
                "price": item.price.to_string(),
                "category": item.category,
                "photoUrl": item.photo_url,
                "position": item.position,
            })
        })
        .collect();
    let body = serde_json::json!({
        "partner": partner.clone().into_record(),
        "menu": items,
    });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_open_state_is_not_closed() {
        assert_eq!(open_label(None), "?");
        assert_eq!(open_label(Some(false)), "closed");
        assert_eq!(open_label(Some(true)), "open");
    }

    #[test]
    fn distance_uses_two_decimals() {
        assert_eq!(format_distance(Some(1.5)), "1.50 km");
        assert_eq!(format_distance(None), DASH);
    }

    #[test]
    fn long_text_is_truncated_on_char_boundaries() {
        assert_eq!(truncate("Pizzería", 20), "Pizzería");
        assert_eq!(truncate("Heladería Grido Centro", 10), "Helader...");
    }

    #[test]
    fn blank_values_render_as_dash() {
        assert_eq!(or_dash(None), DASH);
        assert_eq!(or_dash(Some("")), DASH);
        assert_eq!(or_dash(Some("0383")), "0383");
    }
}

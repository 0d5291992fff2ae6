//! `details`: provider details for one place.

use anyhow::Context;
use placefeed_core::AppConfig;
use placefeed_places::PlacesClient;

use crate::output;

/// Build a provider client from configuration.
///
/// # Errors
///
/// Returns an error if `PLACES_API_KEY` is unset or the client cannot be built.
pub(crate) fn places_client(config: &AppConfig) -> anyhow::Result<PlacesClient> {
    let api_key = config
        .places_api_key
        .as_deref()
        .context("PLACES_API_KEY is not set")?;
    let client = PlacesClient::with_base_url(
        api_key,
        config.places_request_timeout_secs,
        &config.places_user_agent,
        config.places_max_retries,
        config.places_retry_backoff_base_ms,
        &config.places_base_url,
    )?;
    Ok(client)
}

/// Fetch and print provider details for `place_id`.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the lookup fails.
pub(crate) async fn run_details(
    config: &AppConfig,
    place_id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let client = places_client(config)?;
    let details = client
        .place_details(place_id)
        .await
        .with_context(|| format!("failed to fetch details for '{place_id}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    println!("{}", details.name);
    println!("Address: {}", output::or_dash(details.address.as_deref()));
    println!("Phone:   {}", output::or_dash(details.phone.as_deref()));
    println!("Website: {}", output::or_dash(details.website.as_deref()));
    println!(
        "Rating:  {}",
        details
            .rating
            .map_or_else(|| output::DASH.to_string(), |r| format!("{r:.1}"))
    );
    println!("Open:    {}", output::open_label(details.open_now));
    for line in &details.weekday_text {
        println!("  {line}");
    }
    Ok(())
}

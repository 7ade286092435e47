use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::constant::OSRM_TIMEOUT_SECS;
use crate::domain::types::Point;

/// Single-pair driving distance from the OSRM route endpoint, in km.
/// Returns None on any failure; the caller degrades to the fallback.
pub async fn route_distance_km(
    client: &Client,
    base_url: &str,
    from: Point,
    to: Point,
) -> Option<f64> {
    // OSRM wants longitude,latitude in that order
    let url = format!(
        "{}/{},{};{},{}?overview=false",
        base_url, from.lon, from.lat, to.lon, to.lat
    );
    trace!("route_distance_km: sending GET to {url}");

    let response = match client
        .get(&url)
        .timeout(Duration::from_secs(OSRM_TIMEOUT_SECS))
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            debug!("OSRM request failed: {e}");
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(
            "OSRM returned HTTP {}: {}",
            status,
            status.canonical_reason().unwrap_or("Unknown")
        );
        return None;
    }

    let text = match response.text().await {
        Ok(t) => t,
        Err(e) => {
            debug!("failed to read OSRM response body: {e}");
            return None;
        }
    };

    let json: Value = match serde_json::from_str(&text) {
        Ok(js) => js,
        Err(e) => {
            debug!(
                "failed to parse OSRM JSON: {e} (first 200 chars: {})",
                &text[..text.len().min(200)]
            );
            return None;
        }
    };

    let routes = json["routes"].as_array()?;
    if routes.is_empty() {
        debug!("OSRM response carried no routes");
        return None;
    }

    // Distance comes back in metres
    routes[0]["distance"].as_f64().map(|m| m / 1000.0)
}

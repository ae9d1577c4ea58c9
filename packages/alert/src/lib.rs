#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! SOS alert collaborator.
//!
//! The rest of the system only knows `notify(coordinate) -> success or
//! failure`; the transport and its credentials are deployment
//! configuration. The shipped transport POSTs a JSON payload (with a
//! Google Maps link, matching the legacy alert content) to a configured
//! webhook URL.

use safe_route_risk_models::Coordinate;
use thiserror::Error;

/// Errors from alert delivery.
#[derive(Debug, Error)]
pub enum AlertError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status.
    #[error("Alert webhook returned HTTP {status}")]
    Rejected {
        /// The webhook's response status code.
        status: u16,
    },

    /// No alert transport is configured for this deployment.
    #[error("No alert webhook configured")]
    Unconfigured,
}

/// Alert dispatch, chosen at startup from deployment configuration.
pub enum Notifier {
    /// POST alerts to a webhook URL.
    Webhook(WebhookNotifier),
    /// No transport configured; every notify fails with
    /// [`AlertError::Unconfigured`].
    Noop,
}

impl Notifier {
    /// Sends an SOS alert for the given coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError`] if no transport is configured or delivery
    /// fails.
    pub async fn notify(&self, coordinate: Coordinate) -> Result<(), AlertError> {
        match self {
            Self::Webhook(webhook) => webhook.notify(coordinate).await,
            Self::Noop => Err(AlertError::Unconfigured),
        }
    }
}

/// Webhook transport for SOS alerts.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Creates a webhook notifier posting to `url`.
    #[must_use]
    pub const fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    /// POSTs the alert payload to the configured webhook.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError`] if the request fails or the webhook
    /// answers with a non-success status.
    pub async fn notify(&self, coordinate: Coordinate) -> Result<(), AlertError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&alert_payload(coordinate))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            log::info!(
                "SOS alert delivered for ({}, {})",
                coordinate.latitude,
                coordinate.longitude
            );
            Ok(())
        } else {
            Err(AlertError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

/// Builds the alert payload: the coordinate plus a live map link.
fn alert_payload(coordinate: Coordinate) -> serde_json::Value {
    serde_json::json!({
        "lat": coordinate.latitude,
        "lon": coordinate.longitude,
        "mapsUrl": format!(
            "https://maps.google.com/?q={},{}",
            coordinate.latitude, coordinate.longitude
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_coordinate_and_map_link() {
        let coordinate = Coordinate::new(17.3850, 78.4867).unwrap();
        let payload = alert_payload(coordinate);
        assert_eq!(payload["lat"], 17.3850);
        assert_eq!(payload["lon"], 78.4867);
        assert_eq!(
            payload["mapsUrl"],
            "https://maps.google.com/?q=17.385,78.4867"
        );
    }
}

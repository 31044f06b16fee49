pub mod auth;
pub mod client;

pub use client::AmadeusClient;

use blueflights_core::UpstreamError;

pub(crate) fn transport_error(e: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport(e.to_string())
}

/// Turns a non-2xx response into a `Provider` error carrying whatever
/// diagnostic body the upstream sent, JSON or not.
pub(crate) async fn provider_error(response: reqwest::Response) -> UpstreamError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let details = serde_json::from_str(&text)
        .unwrap_or_else(|_| serde_json::Value::String(text));
    UpstreamError::Provider { status, details }
}

//! Push notifications through Pushover.

use super::{FetchError, send_json};
use crate::config::{self, PushoverConfig};
use reqwest::blocking::Client;
use serde::Deserialize;

#[derive(Deserialize)]
struct MessageResponse {
    status: i64,
    #[serde(default)]
    errors: Vec<String>,
}

/// Send a notification. Returns `true` when Pushover accepted it.
pub fn notify(http: &Client, config: &PushoverConfig, title: &str, message: &str) -> bool {
    match try_notify(http, config, title, message) {
        Ok(()) => {
            log::info!("Pushover notification sent: {title}");
            true
        }
        Err(e) => {
            log::warn!("Pushover notification failed: {e}");
            false
        }
    }
}

pub fn try_notify(
    http: &Client,
    config: &PushoverConfig,
    title: &str,
    message: &str,
) -> Result<(), FetchError> {
    let token = config::secret(&config.token_env)
        .ok_or_else(|| FetchError::MissingCredential(config.token_env.clone()))?;
    let user = config::secret(&config.user_env)
        .ok_or_else(|| FetchError::MissingCredential(config.user_env.clone()))?;
    let request = http.post(&config.api_base).form(&[
        ("token", token.as_str()),
        ("user", user.as_str()),
        ("title", title),
        ("message", message),
    ]);
    let response: MessageResponse = send_json(request)?;
    if response.status != 1 {
        return Err(FetchError::Api(response.errors.join("; ")));
    }
    Ok(())
}

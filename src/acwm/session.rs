use crate::acwm::channel::{CommandChannel, Payload, payload};
use crate::domain::SessionToken;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

/// Logs in and returns the session token, or `None` when the unit did not hand one out.
#[instrument(skip_all, fields(username = %username))]
pub async fn login(channel: &dyn CommandChannel, username: &str, password: &str) -> Option<SessionToken> {
    info!("Logging in...");
    let payload = payload([("username", json!(username)), ("password", json!(password))]);

    let response = match channel.send("login", payload).await {
        Ok(response) => response,
        Err(e) => {
            warn!("⚠️ Login failed: {}", e);
            return None;
        }
    };

    let token = session_id(&response).map(SessionToken::new);
    match &token {
        Some(_) => info!("Logging in... OK"),
        None => warn!("⚠️ Login response carries no data.id.sessionID"),
    }
    token
}

/// Closes the session. The unit's answer is not inspected.
#[instrument(skip_all)]
pub async fn logout(channel: &dyn CommandChannel, token: SessionToken) {
    let payload = payload([("sessionID", json!(token.as_str()))]);

    match channel.send("logout", payload).await {
        Ok(_) => info!("Logged out"),
        Err(e) => debug!("Logout was not confirmed: {}", e),
    }
}

fn session_id(response: &Payload) -> Option<String> {
    response
        .get("data")?
        .get("id")?
        .get("sessionID")?
        .as_str()
        .map(str::to_string)
}

use crate::acwm::channel::{CommandChannel, payload};
use crate::domain::{DatapointValue, SessionToken};
use serde_json::json;
use tracing::{info, instrument, warn};

/// Writes one value to a control point. Returns whether the unit confirmed the write with a
/// positive integer `success`.
#[instrument(skip(channel, token))]
pub async fn set_datapoint(channel: &dyn CommandChannel, token: &SessionToken, datapoint: DatapointValue) -> bool {
    let payload = payload([
        ("sessionID", json!(token.as_str())),
        ("uid", json!(datapoint.control_point.uid())),
        ("value", json!(datapoint.value)),
    ]);

    match channel.send("setdatapointvalue", payload).await {
        Ok(response) => {
            let succeeded = response.get("success").and_then(|success| success.as_u64()).is_some_and(|success| success > 0);
            info!(succeeded, "Set {}", datapoint);
            succeeded
        }
        Err(e) => {
            warn!("⚠️ Unable to set {}: {}", datapoint, e);
            false
        }
    }
}

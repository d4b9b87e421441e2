use crate::acwm::domain::{DataJson, UidValue};
use crate::domain::{ControlPoint, Endpoint};
use reqwest::Client;
use thiserror::Error;
use tracing::{info, instrument};

/// Fetches the schema document of the unit and checks that every required control point is
/// advertised with the expected label. Nothing is written to the unit.
#[instrument(skip_all)]
pub async fn verify_control_surface(client: &Client, endpoint: &Endpoint) -> Result<(), InitError> {
    info!("Retrieving the schema document...");

    let url = endpoint.schema_url();
    let body = client.get(&url).send().await?.error_for_status()?.bytes().await?;
    let data_json = serde_json::from_slice::<DataJson>(&body)?;

    info!("Retrieving the schema document... OK, {} control points", data_json.signals.uid.len());

    for control_point in ControlPoint::REQUIRED {
        verify_control_point(&data_json, control_point)?;
    }

    Ok(())
}

fn verify_control_point(data_json: &DataJson, control_point: ControlPoint) -> Result<(), InitError> {
    let values = data_json
        .signals
        .uid
        .get(&control_point.key())
        .ok_or(InitError::MissingControlPoint(control_point))?;

    match values.first() {
        None => Err(InitError::EmptyControlPoint(control_point)),
        Some(UidValue::Text(label)) if label != control_point.expected_label() => Err(InitError::UnexpectedLabel {
            control_point,
            expected: control_point.expected_label(),
            found: label.clone(),
        }),
        Some(UidValue::Text(_)) => Ok(()),
        // Only plain labels are compared.
        Some(UidValue::Labels(_)) => Ok(()),
    }
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("error executing request: {0}")]
    TransportFailure(#[from] reqwest::Error),
    #[error("unable to decode the schema document: {0}")]
    DecodeFailure(#[from] serde_json::Error),
    #[error("unable to find {} in signals.uid", .0.uid())]
    MissingControlPoint(ControlPoint),
    #[error("bad value for {} in signals.uid", .0.uid())]
    EmptyControlPoint(ControlPoint),
    #[error("init fail, key {} expected {expected} found {found}", .control_point.uid())]
    UnexpectedLabel {
        control_point: ControlPoint,
        expected: &'static str,
        found: String,
    },
}

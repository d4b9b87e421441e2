use crate::domain::Endpoint;
use reqwest::Client;
use thiserror::Error;

/// Builds the HTTP client used for every call of one invocation. No cookie store is enabled,
/// the session travels in the command payload only.
pub fn new_client(endpoint: &Endpoint) -> Result<Client, AcwmClientError> {
    let mut builder = Client::builder();
    if let Some(timeout) = endpoint.timeout() {
        builder = builder.timeout(timeout);
    }

    let client = builder.build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum AcwmClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

use crate::domain::Endpoint;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub type Payload = Map<String, Value>;

/// Transport for `{command, data}` envelopes sent to the unit's control endpoint.
#[async_trait]
pub trait CommandChannel: Send + Sync {
    async fn send(&self, command: &str, payload: Payload) -> Result<Payload, ChannelError>;
}

/// Builds the `data` object of a command from its fields.
pub fn payload<const N: usize>(fields: [(&str, Value); N]) -> Payload {
    fields.into_iter().map(|(key, value)| (key.to_string(), value)).collect()
}

#[derive(Debug, Serialize)]
struct CommandEnvelope<'a> {
    command: &'a str,
    data: Payload,
}

#[derive(Debug)]
pub struct HttpCommandChannel {
    client: Client,
    url: String,
}

impl HttpCommandChannel {
    pub fn new(client: Client, endpoint: &Endpoint) -> Self {
        HttpCommandChannel {
            client,
            url: endpoint.command_url(),
        }
    }
}

#[async_trait]
impl CommandChannel for HttpCommandChannel {
    #[instrument(skip(self, payload))]
    async fn send(&self, command: &str, payload: Payload) -> Result<Payload, ChannelError> {
        let envelope = CommandEnvelope { command, data: payload };

        // The unit reports failures in the body, the status code is not inspected.
        let response = self.client.post(&self.url).json(&envelope).send().await?;
        debug!(status = %response.status(), "Sent '{}' to {}", command, self.url);

        let body = response.bytes().await?;
        if body.is_empty() {
            warn!("⚠️ No response body for '{}'", command);
            return Err(ChannelError::EmptyResponse);
        }

        serde_json::from_slice::<Payload>(&body).map_err(|e| {
            warn!("⚠️ Response for '{}' is not a JSON object: {}", command, e);
            ChannelError::MalformedResponse(e)
        })
    }
}

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("no result from write")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    MalformedResponse(serde_json::Error),
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::net::SocketAddr;

    fn channel_for(address: SocketAddr) -> HttpCommandChannel {
        let config = AppConfigBuilder::new().address(address).build();
        HttpCommandChannel::new(Client::new(), config.endpoint())
    }

    #[tokio::test]
    async fn send_posts_the_envelope_as_json() -> Result<(), ChannelError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api.cgi")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "command": "login",
                "data": { "username": "admin", "password": "secret" }
            })))
            .with_status(200)
            .with_body(r#"{"success": 1}"#)
            .create_async()
            .await;

        let channel = channel_for(server.socket_address());
        let response = channel
            .send("login", payload([("username", json!("admin")), ("password", json!("secret"))]))
            .await?;

        mock.assert_async().await;
        assert_eq!(Value::Object(response), json!({ "success": 1 }));

        Ok(())
    }

    #[tokio::test]
    async fn send_preserves_an_echoed_data_object() -> Result<(), ChannelError> {
        let fields = payload([
            ("sessionID", json!("abc123")),
            ("uid", json!(4)),
            ("value", json!(2)),
            ("nested", json!({ "a": [1, 2] })),
        ]);
        let data = Value::Object(fields.clone());
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api.cgi")
            .match_body(Matcher::PartialJson(json!({ "data": data.clone() })))
            .with_body(json!({ "data": data.clone() }).to_string())
            .create_async()
            .await;

        let channel = channel_for(server.socket_address());
        let response = channel.send("setdatapointvalue", fields).await?;

        assert_eq!(response.get("data"), Some(&data));

        Ok(())
    }

    #[test]
    fn payload_keeps_every_field() {
        let fields = payload([("sessionID", json!("abc123")), ("uid", json!(1)), ("value", json!(0))]);

        assert_eq!(Value::Object(fields), json!({ "sessionID": "abc123", "uid": 1, "value": 0 }));
    }

    #[tokio::test]
    async fn send_ignores_the_status_code() -> Result<(), ChannelError> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api.cgi")
            .with_status(500)
            .with_body(r#"{"success": 0, "message": "busy"}"#)
            .create_async()
            .await;

        let channel = channel_for(server.socket_address());
        let response = channel.send("logout", Payload::new()).await?;

        assert_eq!(response.get("success"), Some(&json!(0)));

        Ok(())
    }

    #[tokio::test]
    async fn send_reports_an_empty_body() {
        let mut server = mockito::Server::new_async().await;
        server.mock("POST", "/api.cgi").with_status(200).create_async().await;

        let channel = channel_for(server.socket_address());
        let result = channel.send("logout", Payload::new()).await;

        assert!(matches!(result, Err(ChannelError::EmptyResponse)));
    }

    #[tokio::test]
    async fn send_reports_a_body_that_is_not_an_object() {
        let mut server = mockito::Server::new_async().await;
        server.mock("POST", "/api.cgi").with_body("[1, 2, 3]").create_async().await;

        let channel = channel_for(server.socket_address());
        let result = channel.send("logout", Payload::new()).await;

        assert!(matches!(result, Err(ChannelError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn send_reports_transport_failures() {
        // Nothing listens on the tcpmux port of the loopback interface.
        let channel = channel_for(SocketAddr::from(([127, 0, 0, 1], 1)));

        let result = channel.send("logout", Payload::new()).await;

        assert!(matches!(result, Err(ChannelError::Transport(_))));
    }
}

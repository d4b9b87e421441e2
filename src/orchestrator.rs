use crate::acwm::{CommandChannel, InitError, login, logout, set_datapoint, verify_control_surface};
use crate::domain::{DatapointValue, Endpoint, SessionToken};
use reqwest::Client;
use std::fmt::Display;
use std::io::Write;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Drives one command through schema check, login, write and logout.
pub struct Orchestrator<'a, W: Write> {
    client: &'a Client,
    channel: &'a dyn CommandChannel,
    endpoint: &'a Endpoint,
    out: W,
}

enum Stage {
    Init,
    Authenticating,
    Mutating(SessionToken),
    LoggingOut { token: SessionToken, succeeded: bool },
    Done(Outcome),
}

#[derive(Debug)]
pub enum Outcome {
    /// A session was opened and closed. `succeeded` tells whether the unit confirmed the write.
    Completed { succeeded: bool },
    Aborted(FatalError),
}

impl Outcome {
    /// 0 once logout was issued, whatever the outcome of the write.
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Completed { .. } => 0,
            Outcome::Aborted(_) => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_status())
    }
}

#[derive(Error, Debug)]
pub enum FatalError {
    #[error("there were errors during init process: {0}")]
    Init(#[from] InitError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Error, Debug)]
#[error("unable to auth, bad sessionID")]
pub struct AuthError;

impl<'a, W: Write> Orchestrator<'a, W> {
    pub fn new(client: &'a Client, channel: &'a dyn CommandChannel, endpoint: &'a Endpoint, out: W) -> Self {
        Orchestrator {
            client,
            channel,
            endpoint,
            out,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&mut self, datapoint: DatapointValue) -> Outcome {
        let mut stage = Stage::Init;

        loop {
            stage = match stage {
                Stage::Init => match verify_control_surface(self.client, self.endpoint).await {
                    Ok(()) => {
                        info!("✅ Control surface verified");
                        Stage::Authenticating
                    }
                    Err(e) => self.abort(e.into()),
                },
                Stage::Authenticating => {
                    match login(self.channel, self.endpoint.username(), self.endpoint.password()).await {
                        Some(token) => Stage::Mutating(token),
                        None => self.abort(AuthError.into()),
                    }
                }
                Stage::Mutating(token) => {
                    let succeeded = set_datapoint(self.channel, &token, datapoint).await;
                    let result = if succeeded { "success" } else { "fail" };
                    self.report(format_args!("setdatapointvalue {}: {}", datapoint, result));
                    Stage::LoggingOut { token, succeeded }
                }
                Stage::LoggingOut { token, succeeded } => {
                    logout(self.channel, token).await;
                    Stage::Done(Outcome::Completed { succeeded })
                }
                Stage::Done(outcome) => {
                    debug!(?outcome, "Finished");
                    return outcome;
                }
            };
        }
    }

    fn abort(&mut self, error: FatalError) -> Stage {
        self.report(&error);
        Stage::Done(Outcome::Aborted(error))
    }

    fn report(&mut self, line: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!("⚠️ Unable to write to the output: {}", e);
        }
    }
}

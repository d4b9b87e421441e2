mod channel;
mod client;
mod datapoint;
mod domain;
mod schema;
mod session;

pub use channel::{CommandChannel, HttpCommandChannel};
pub use client::new_client;
pub use datapoint::set_datapoint;
pub use schema::{InitError, verify_control_surface};
pub use session::{login, logout};

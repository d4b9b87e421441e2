mod control_point;
mod endpoint;
mod session_token;

pub use control_point::{ControlPoint, DatapointValue};
pub use endpoint::Endpoint;
pub use session_token::SessionToken;

//! Host-facing APIs.

pub mod session_json;

pub use session_json::{
    request_schema, response_schema, JsonSession, SessionOutcome, SessionRequest, SessionResponse,
};

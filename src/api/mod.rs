//! HTTP-facing surface: response envelopes, endpoint handlers, and the server.

pub mod envelope;
pub mod handlers;
pub mod server;

pub use envelope::*;
pub use handlers::*;

//! Host bridge: newline-delimited JSON over stdin/stdout for the agent runtime.

pub mod contract;
pub mod handler;
pub mod stdio;

pub use contract::{CommandName, HostRequest, RequestEnvelope, ResponseEnvelope};
pub use handler::HostHandler;
pub use stdio::{run_bridge, run_stdio_bridge};

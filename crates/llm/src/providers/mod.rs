//! Generation transports.

pub mod hosted;
pub mod local;

pub use hosted::HostedChatClient;
pub use local::LocalRunnerClient;

pub mod client;
pub mod rpc;
pub mod session;
pub mod transport;

pub use client::DeribitClient;
pub use session::{Credentials, Session};
pub use transport::Transport;

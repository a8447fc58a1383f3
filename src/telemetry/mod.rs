pub mod error_log;
pub mod latency;

pub use error_log::ErrorLog;

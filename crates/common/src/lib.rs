pub mod config;
pub mod error_log;
pub mod logging;

pub use config::AppConfig;
pub use error_log::ErrorLog;

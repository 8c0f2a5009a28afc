//! Optional log4rs output for hosts that do not install a logger of their own.

mod logger_bridge;
mod logger_config;

pub use logger_bridge::{SearchExecLogger, LOG4RS_HANDLE};
pub use logger_config::LoggerConfig;

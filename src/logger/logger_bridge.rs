use log::info;
use log4rs::config::Config;
use log4rs::Handle;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::LoggerConfig;
use crate::{Result, SearchError};

/// Handle of the installed log4rs logger, `None` until the first init.
pub static LOG4RS_HANDLE: Lazy<Mutex<Option<Handle>>> = Lazy::new(|| Mutex::new(None));

pub struct SearchExecLogger;

impl SearchExecLogger {
    /// Installs `config` as the global logger, or swaps it in if a log4rs
    /// logger was already installed through this handle.
    pub fn update_log4rs_handler(handle: &Lazy<Mutex<Option<Handle>>>, config: Config) -> Result<()> {
        let mut guard = handle.lock();
        match guard.as_ref() {
            Some(existing) => existing.set_config(config),
            None => {
                let new_handle = log4rs::init_config(config)
                    .map_err(|e| SearchError::SystemError(format!("failed to install log4rs logger: {e}")))?;
                *guard = Some(new_handle);
            }
        }
        Ok(())
    }

    pub fn init(logger_config: &LoggerConfig) -> Result<()> {
        let config = logger_config.build_logger_config()?;
        Self::update_log4rs_handler(&LOG4RS_HANDLE, config)?;
        info!("search_exec logger initialized at level {}.", logger_config.log_level);
        Ok(())
    }
}

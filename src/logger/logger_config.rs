use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} [{T}] {t} - {m}{n}";
const LOG_FILE_NAME: &str = "search_exec.log";
const CRATE_TARGET: &str = "search_exec";
const CONSOLE_APPENDER: &str = "console";
const FILE_APPENDER: &str = "file";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Directory receiving `search_exec.log` when `log_in_file` is set.
    pub log_directory: String,
    /// One of `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub log_level: String,
    pub log_in_file: bool,
    pub console_display: bool,
    /// Only record records whose target is this crate.
    pub only_record_search_exec: bool,
}

impl LoggerConfig {
    pub fn new(
        log_directory: String,
        log_level: String,
        log_in_file: bool,
        console_display: bool,
        only_record_search_exec: bool,
    ) -> Self {
        Self { log_directory, log_level, log_in_file, console_display, only_record_search_exec }
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| SearchError::InvalidArgument(format!("unknown log level '{}'", self.log_level)))
    }

    pub fn log_file(&self) -> PathBuf {
        PathBuf::from(&self.log_directory).join(LOG_FILE_NAME)
    }

    pub fn build_logger_config(&self) -> Result<Config> {
        let level = self.level_filter()?;
        let mut builder = Config::builder();
        let mut appenders = vec![];

        if self.console_display {
            let console = ConsoleAppender::builder().encoder(Box::new(PatternEncoder::new(LOG_PATTERN))).build();
            builder = builder.appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));
            appenders.push(CONSOLE_APPENDER);
        }
        if self.log_in_file {
            let file = FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
                .build(self.log_file())?;
            builder = builder.appender(Appender::builder().build(FILE_APPENDER, Box::new(file)));
            appenders.push(FILE_APPENDER);
        }

        let root = if self.only_record_search_exec {
            builder = builder.logger(
                Logger::builder().appenders(appenders.iter().copied()).additive(false).build(CRATE_TARGET, level),
            );
            Root::builder().build(LevelFilter::Off)
        } else {
            Root::builder().appenders(appenders.iter().copied()).build(level)
        };

        builder.build(root).map_err(|e| SearchError::InvalidArgument(format!("invalid logger config: {e}")))
    }
}

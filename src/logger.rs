use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, Sink, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

impl LogLevel {
    pub fn as_level(self) -> Level {
        match self {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

fn console_sink(stream: StdStream, filter: LevelFilter) -> spdlog::Result<Arc<dyn Sink>> {
    let sink = StdStreamSink::builder()
        .std_stream(stream)
        .level_filter(filter)
        .build()?;
    Ok(Arc::new(sink))
}

/// `Rename:` and `Fixing:` lines go to stdout, warnings and errors to stderr.
fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    builder
        .sink(console_sink(StdStream::Stdout, LevelFilter::MoreVerbose(Level::Warn))?)
        .sink(console_sink(StdStream::Stderr, LevelFilter::MoreSevereEqual(Level::Warn))?);
    Ok(())
}

/// Replaces the default logger when the configuration has a `[log]` section.
/// Without one, spdlog's default console logger is kept.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    let Some(ref log) = config.log else {
        return Ok(());
    };

    let mut builder = Logger::builder();

    if let Some(ref location) = log.location {
        let daily_sink = Arc::new(RotatingFileSink::builder()
            .base_path(location)
            .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
            .max_files(30)
            .rotate_on_open(false)
            .build()?);
        builder.sink(daily_sink);
    }

    // A file-less configuration still needs somewhere to write
    if log.log_to_console || log.location.is_none() {
        add_console_sinks(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(log.level.as_level()));

    spdlog::set_default_logger(logger);

    Ok(())
}

use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("logging already initialized")]
    AlreadyInitialized,
    #[error("subscriber init failed: {0}")]
    SubscriberInit(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Clone, Copy, Debug)]
pub struct LogOptions {
    pub debug: bool,
    pub use_color: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            debug: false,
            use_color: true,
        }
    }
}

impl LogOptions {
    fn level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }
}

/// Install the global console subscriber. Call once, before any work starts.
pub fn init(options: LogOptions) -> Result<(), LogError> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(options.use_color)
        .with_writer(io::stdout)
        .with_filter(options.level());

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("global subscriber") || msg.contains("already") {
                LogError::AlreadyInitialized
            } else {
                LogError::SubscriberInit(e)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_follows_debug_flag() {
        let options = LogOptions::default();
        assert_eq!(options.level(), LevelFilter::INFO);

        let options = LogOptions {
            debug: true,
            ..LogOptions::default()
        };
        assert_eq!(options.level(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_second_init_is_rejected() {
        let _ = init(LogOptions::default());
        assert!(init(LogOptions::default()).is_err());
    }
}

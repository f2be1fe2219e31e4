use std::sync::Once;

use log::LevelFilter;

/// Logger settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter string, e.g. `"sequel_engine=trace,wgpu_core=warn"`.
    /// Falls back to `RUST_LOG`, then to `default_level`.
    pub filter: Option<String>,

    pub default_level: LevelFilter,

    /// Cap for the wgpu crates when no explicit filter is given; they are
    /// chatty at `info`.
    pub wgpu_level: LevelFilter,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: LevelFilter::Info,
            wgpu_level: LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn resolved_filter(&self) -> Option<String> {
        self.filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls do nothing.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolved_filter() {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder
                    .filter_level(config.default_level)
                    .filter_module("wgpu_core", config.wgpu_level)
                    .filter_module("wgpu_hal", config.wgpu_level)
                    .filter_module("naga", config.wgpu_level);
            }
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed by the host.
        if builder.try_init().is_err() {
            log::debug!("logger already installed; init_logging skipped");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig::default().with_filter("sequel_engine=trace");
        assert_eq!(cfg.resolved_filter().as_deref(), Some("sequel_engine=trace"));
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default().with_filter("off"));
        log::info!("still alive");
    }
}

use std::sync::Once;

/// Logger configuration for stratum binaries.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit `env_logger` filter, e.g. `"stratum_layout=trace,wgpu=warn"`.
    /// Wins over `RUST_LOG` when set.
    pub env_filter: Option<String>,

    /// Appends `stratum_layout=trace` so every resolved offset is logged.
    pub trace_layouts: bool,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            trace_layouts: false,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn";

/// Picks the filter string: config, then `rust_log`, then [`DEFAULT_FILTER`].
fn resolve_filter(config: &LoggingConfig, rust_log: Option<&str>) -> String {
    let base = config
        .env_filter
        .as_deref()
        .or(rust_log)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER);

    if config.trace_layouts {
        format!("{base},stratum_layout=trace")
    } else {
        base.to_owned()
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = resolve_filter(&config, rust_log.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(config.write_style);

        // A host application may already own the global logger.
        if builder.try_init().is_err() {
            log::debug!("global logger already set; keeping it");
            return;
        }

        log::debug!("logging initialized with `{filter}`");
    });
}

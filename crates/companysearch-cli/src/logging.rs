use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "COMPANYSEARCH_LOG";

/// Install a stderr subscriber when `COMPANYSEARCH_LOG` is set.
///
/// stdout carries the JSON plans, so logs never go there.
pub fn init() -> anyhow::Result<()> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(());
    };

    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("invalid {LOG_ENV} value {directives:?}: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// Console output always goes to stdout. When `log_dir` is set, a daily
/// rolling JSON log named after `service_name` is written there as well; the
/// returned guard must stay alive for the file writer to flush.
pub fn init_logger(service_name: &str, log_dir: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{service_name}.log"));
            let (writer, guard) = tracing_appender::non_blocking(appender);

            registry
                .with(fmt::layer().json().with_writer(writer))
                .try_init()
                .map_err(|err| anyhow!(err))?;

            Ok(Some(guard))
        }
        None => {
            registry.try_init().map_err(|err| anyhow!(err))?;
            Ok(None)
        }
    }
}

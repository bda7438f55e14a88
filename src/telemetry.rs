use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;
use crate::Error;

/// ログ出力を初期化する。標準出力は結果用に空けておき、ログは標準エラーへ出す。
pub fn init(config: &TelemetryConfig) -> Result<(), Error> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|source| Error::LogFilter {
            value: config.log_level.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(Error::Telemetry)
}

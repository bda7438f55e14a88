use std::env;
use std::path::PathBuf;

use crate::answer::Gender;
use crate::Error;

pub const DEFAULT_DATA_DIR: &str = "resources";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// 実行時の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 参照データ（questions.json ほか）のディレクトリ
    pub data_dir: PathBuf,
    /// 性別の既定値
    pub gender: Gender,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            gender: Gender::default(),
            telemetry: TelemetryConfig {
                log_level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

impl AppConfig {
    /// `.env` と環境変数から読み込む
    pub fn load() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let defaults = Self::default();
        let gender = match lookup("STRESSCHECK_GENDER") {
            Some(value) => value
                .parse::<Gender>()
                .map_err(|_| Error::Config(format!("STRESSCHECK_GENDER={value:?}")))?,
            None => defaults.gender,
        };
        Ok(Self {
            data_dir: lookup("STRESSCHECK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            gender,
            telemetry: TelemetryConfig {
                log_level: lookup("STRESSCHECK_LOG_LEVEL")
                    .unwrap_or(defaults.telemetry.log_level),
            },
        })
    }
}

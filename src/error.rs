use thiserror::Error;

use crate::answer::Gender;

#[derive(Debug, Error)]
pub enum Error {
    /// 因子に性別の換算表キーが割り当てられていない
    #[error("factor {factor} has no scale assigned for gender {gender}")]
    UnknownGender { factor: String, gender: Gender },
    /// 換算表キーが素点換算表に存在しない
    #[error("factor {factor} refers to undefined scale map {scale}")]
    UnknownScale { factor: String, scale: String },
    /// 重みが存在しない設問を参照している
    #[error("factor {factor} weights unknown question {question}")]
    UnknownQuestion { factor: String, question: String },
    /// チャートグループに属さない因子ID
    #[error("factor {0} does not belong to any chart group")]
    UnknownChartGroup(String),
    /// 評価点キーが1〜5ではない
    #[error("scale map {scale} has illegal scale value {value:?}")]
    IllegalScaleValue { scale: String, value: String },
    /// 同じ因子IDが複数の領域に定義されている
    #[error("factor {0} is defined more than once")]
    DuplicateFactor(String),
    /// 同じ換算表の素点範囲が重なっている
    #[error("scale map {scale} has overlapping ranges for scale values {first} and {second}")]
    OverlappingScaleRange {
        scale: String,
        first: String,
        second: String,
    },
    /// 素点範囲の下限が上限を超えている
    #[error("scale map {scale} has an empty range for scale value {value}")]
    IllegalScaleRange { scale: String, value: String },
    /// male/female 以外の性別
    #[error("gender must be \"male\" or \"female\", got {0:?}")]
    IllegalGender(String),
    /// 回答選択肢が違反
    #[error("answer must be a number between 1 and 4")]
    IllegalAnswer,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid log level/filter {value:?}")]
    LogFilter {
        value: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("telemetry error: {0}")]
    Telemetry(Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// 参照データとコードの不整合を示すエラーかどうか
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            Error::UnknownGender { .. }
                | Error::UnknownScale { .. }
                | Error::UnknownQuestion { .. }
                | Error::UnknownChartGroup(_)
                | Error::DuplicateFactor(_)
                | Error::OverlappingScaleRange { .. }
                | Error::IllegalScaleValue { .. }
                | Error::IllegalScaleRange { .. }
        )
    }
}

//! 職業性ストレス簡易調査票（57 項目）の採点
//!
//! 個人の回答からは素点換算表による尺度ごとの評価点と合計点数方式による
//! 高ストレス判定を、集団の回答からは仕事のストレス判定図による健康リスクを求める。
//! 詳細 https://www.mhlw.go.jp/bunya/roudoukijun/anzeneisei12/dl/stress-check_j.pdf

pub mod answer;
pub mod bulk;
pub mod chart;
pub mod config;
pub mod error;
pub mod factor;
pub mod organization;
pub mod reference;
pub mod service;
pub mod stress;
pub mod telemetry;

pub use answer::{reverse_score, AnswerSet, Gender};
pub use bulk::read_bulk;
pub use chart::{Chart, ChartAxis, ChartGroup, DiagnosisResult};
pub use error::Error;
pub use factor::{compute_factors, FactorResult};
pub use organization::{OrganizationAggregate, OrganizationOutcome};
pub use reference::{Question, ReferenceData, Section};
pub use service::DiagnosisService;
pub use stress::{is_high_stress, Stress, SumupScore};

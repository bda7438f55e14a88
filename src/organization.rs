//! 仕事のストレス判定図による集団分析
//!
//! 量–コントロール判定図と職場の支援判定図から、全国平均を100とした
//! 健康リスクを求める。各軸は3設問の逆転得点の合計を回答者平均したもの。

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::answer::{reverse_score, AnswerSet, Gender};

/// 仕事の量的負担
pub const QUANTITATIVE_BURDEN_ITEMS: [&str; 3] = ["A1", "A2", "A3"];
/// 仕事のコントロール
pub const CONTROL_ITEMS: [&str; 3] = ["A8", "A9", "A10"];
/// 上司の支援
pub const SUPERVISOR_SUPPORT_ITEMS: [&str; 3] = ["C1", "C4", "C7"];
/// 同僚の支援
pub const COWORKER_SUPPORT_ITEMS: [&str; 3] = ["C2", "C5", "C8"];

/// 量–コントロール判定図の基準点と係数
pub const BURDEN_MEAN: f64 = 8.25;
pub const CONTROL_MEAN: f64 = 7.4688;
pub const BURDEN_COEFFICIENT: f64 = 0.07668;
pub const CONTROL_COEFFICIENT: f64 = -0.08896;

/// 職場の支援判定図の基準点と係数
pub const SUPERVISOR_MEAN: f64 = 7.30;
pub const COWORKER_MEAN: f64 = 8.2668;
pub const SUPERVISOR_COEFFICIENT: f64 = -0.09711;
pub const COWORKER_COEFFICIENT: f64 = -0.09711;

pub const NO_VALID_DATA: &str = "No valid data found for analysis";

/// 一人分の4軸の値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisScores {
    pub quantitative_burden: i64,
    pub control: i64,
    pub supervisor_support: i64,
    pub coworker_support: i64,
}

impl AxisScores {
    /// 12設問のうち1つでも欠落・範囲外があれば `None`
    pub fn from_answers(answers: &AnswerSet) -> Option<Self> {
        Some(Self {
            quantitative_burden: reverse_sum(answers, &QUANTITATIVE_BURDEN_ITEMS)?,
            control: reverse_sum(answers, &CONTROL_ITEMS)?,
            supervisor_support: reverse_sum(answers, &SUPERVISOR_SUPPORT_ITEMS)?,
            coworker_support: reverse_sum(answers, &COWORKER_SUPPORT_ITEMS)?,
        })
    }
}

fn reverse_sum(answers: &AnswerSet, items: &[&str]) -> Option<i64> {
    items
        .iter()
        .map(|id| answers.raw(id).and_then(reverse_score))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    #[serde(serialize_with = "round2")]
    pub quantitative_burden: f64,
    #[serde(serialize_with = "round2")]
    pub control: f64,
    #[serde(serialize_with = "round2")]
    pub supervisor_support: f64,
    #[serde(serialize_with = "round2")]
    pub coworker_support: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthRisk {
    #[serde(serialize_with = "round1")]
    pub work_burden_risk: f64,
    #[serde(serialize_with = "round1")]
    pub support_risk: f64,
    #[serde(serialize_with = "round1")]
    pub comprehensive_risk: f64,
}

impl HealthRisk {
    pub fn from_averages(averages: &Averages) -> Self {
        let work_burden_risk = work_burden_risk(averages.quantitative_burden, averages.control);
        let support_risk = support_risk(averages.supervisor_support, averages.coworker_support);
        Self {
            work_burden_risk,
            support_risk,
            comprehensive_risk: work_burden_risk * support_risk / 100.0,
        }
    }
}

/// 集団分析の結果。値は丸めずに保持し、シリアライズ時に丸める。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrganizationAggregate {
    pub count: usize,
    pub averages: Averages,
    pub health_risk: HealthRisk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoValidData {
    pub error: String,
}

impl Default for NoValidData {
    fn default() -> Self {
        Self {
            error: NO_VALID_DATA.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrganizationOutcome {
    Aggregate(OrganizationAggregate),
    NoValidData(NoValidData),
}

impl OrganizationOutcome {
    pub fn aggregate(&self) -> Option<&OrganizationAggregate> {
        match self {
            OrganizationOutcome::Aggregate(aggregate) => Some(aggregate),
            OrganizationOutcome::NoValidData(_) => None,
        }
    }
}

pub fn work_burden_risk(burden: f64, control: f64) -> f64 {
    100.0
        * ((burden - BURDEN_MEAN) * BURDEN_COEFFICIENT
            + (control - CONTROL_MEAN) * CONTROL_COEFFICIENT)
            .exp()
}

pub fn support_risk(supervisor: f64, coworker: f64) -> f64 {
    100.0
        * ((supervisor - SUPERVISOR_MEAN) * SUPERVISOR_COEFFICIENT
            + (coworker - COWORKER_MEAN) * COWORKER_COEFFICIENT)
            .exp()
}

/// 回答者集団の健康リスクを求める
///
/// 12設問を全て有効に回答した者だけを平均の対象にする。
/// `gender` は受け付けるが係数は男女共通。
pub fn aggregate<'a, I>(answer_sets: I, gender: Gender) -> OrganizationOutcome
where
    I: IntoIterator<Item = &'a AnswerSet>,
{
    let mut submitted = 0usize;
    let mut count = 0usize;
    let mut totals = [0i64; 4];
    for answers in answer_sets {
        submitted += 1;
        let Some(axes) = AxisScores::from_answers(answers) else {
            continue;
        };
        count += 1;
        totals[0] += axes.quantitative_burden;
        totals[1] += axes.control;
        totals[2] += axes.supervisor_support;
        totals[3] += axes.coworker_support;
    }

    if submitted > count {
        warn!(excluded = submitted - count, submitted, "incomplete respondents excluded");
    }
    if count == 0 {
        return OrganizationOutcome::NoValidData(NoValidData::default());
    }

    let mean = |total: i64| total as f64 / count as f64;
    let averages = Averages {
        quantitative_burden: mean(totals[0]),
        control: mean(totals[1]),
        supervisor_support: mean(totals[2]),
        coworker_support: mean(totals[3]),
    };
    let health_risk = HealthRisk::from_averages(&averages);
    debug!(
        count,
        %gender,
        comprehensive_risk = health_risk.comprehensive_risk,
        "organization aggregated"
    );
    OrganizationOutcome::Aggregate(OrganizationAggregate {
        count,
        averages,
        health_risk,
    })
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

fn round1<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 1))
}

fn round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

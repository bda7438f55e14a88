use std::collections::BTreeMap;

use serde::Serialize;

use crate::factor::FactorResult;
use crate::stress::SumupScore;
use crate::Error;

/// レーダーチャートのグループ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartGroup {
    /// ストレスの原因と考えられる因子（領域Ａ）
    Causes,
    /// ストレスによって起こる心身の反応（領域Ｂ）
    Responses,
    /// ストレス反応に影響を与える他の因子（領域Ｃ・Ｄ）
    Support,
}

impl ChartGroup {
    pub const ALL: [ChartGroup; 3] = [
        ChartGroup::Causes,
        ChartGroup::Responses,
        ChartGroup::Support,
    ];

    /// 因子IDの接頭辞からグループを決める
    pub fn for_factor(id: &str) -> Result<Self, Error> {
        if id.starts_with("F-A") {
            Ok(ChartGroup::Causes)
        } else if id.starts_with("F-B") {
            Ok(ChartGroup::Responses)
        } else if id.starts_with("F-C") || id.starts_with("F-D") {
            Ok(ChartGroup::Support)
        } else {
            Err(Error::UnknownChartGroup(id.to_string()))
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartGroup::Causes => "ストレスの原因と考えられる因子 (A)",
            ChartGroup::Responses => "ストレスによって起こる心身の反応 (B)",
            ChartGroup::Support => "ストレス反応に影響を与える他の因子 (C & D)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartAxis {
    pub id: String,
    pub label: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub label: String,
    pub axes: Vec<ChartAxis>,
}

/// 個人向けの診断結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisResult {
    pub high_stress: bool,
    pub summary_scores: SumupScore,
    pub charts: Vec<Chart>,
}

/// 因子の評価点と合計点数を診断結果にまとめる
///
/// 各チャートの軸は因子IDの辞書順に並ぶ。
pub fn format_result(
    factors: &BTreeMap<String, FactorResult>,
    summary_scores: SumupScore,
    high_stress: bool,
) -> Result<DiagnosisResult, Error> {
    let mut charts: Vec<(ChartGroup, Vec<ChartAxis>)> = ChartGroup::ALL
        .iter()
        .map(|&group| (group, Vec::new()))
        .collect();

    for (id, factor) in factors {
        let group = ChartGroup::for_factor(id)?;
        if let Some((_, axes)) = charts.iter_mut().find(|(g, _)| *g == group) {
            axes.push(ChartAxis {
                id: id.clone(),
                label: factor.label.clone(),
                score: factor.chart_point,
            });
        }
    }

    Ok(DiagnosisResult {
        high_stress,
        summary_scores,
        charts: charts
            .into_iter()
            .map(|(group, axes)| Chart {
                label: group.label().to_string(),
                axes,
            })
            .collect(),
    })
}

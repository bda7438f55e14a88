//! 素点換算表に基づく尺度ごとの評価点
//!
//! ○ 素点換算表では、職業性ストレス簡易調査票の質問項目が、いくつかの
//! まとまりごとに尺度としてまとめられ、計算方法が示されています。
//! ○ 尺度ごとの計算結果を素点換算表に当てはめ、５段階評価の評価点を出します。

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::answer::{AnswerSet, Gender};
use crate::reference::{FactorDefinition, ReferenceData, ScaleMap, Section};
use crate::Error;

/// どの範囲にも当てはまらない素点の評価点（中央値）
pub const FALLBACK_SCALE: u8 = 3;

/// チャート上で反転させる因子グループ
pub const INVERTED_GROUP: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorResult {
    pub label: String,
    /// 素点
    pub raw: f64,
    /// 評価点（1〜5）
    pub scale: u8,
    /// チャート用の点（1〜5）
    pub chart_point: u8,
}

/// 全因子の評価点を算出する。結果は因子IDの辞書順。
pub fn compute_factors(
    reference: &ReferenceData,
    answers: &AnswerSet,
    gender: Gender,
) -> Result<BTreeMap<String, FactorResult>, Error> {
    let mut results = BTreeMap::new();
    for section in Section::ALL {
        let Some(factors) = reference.factors().get(&section) else {
            continue;
        };
        for (id, factor) in factors {
            let result = compute_factor(reference, id, factor, answers, gender)?;
            results.insert(id.clone(), result);
        }
    }
    Ok(results)
}

fn compute_factor(
    reference: &ReferenceData,
    id: &str,
    factor: &FactorDefinition,
    answers: &AnswerSet,
    gender: Gender,
) -> Result<FactorResult, Error> {
    let raw = raw_score(factor, answers);
    let scale_key = factor
        .scales
        .get(gender.as_str())
        .ok_or_else(|| Error::UnknownGender {
            factor: id.to_string(),
            gender,
        })?;
    let scale_map = reference
        .scoring_map(scale_key)
        .ok_or_else(|| Error::UnknownScale {
            factor: id.to_string(),
            scale: scale_key.clone(),
        })?;
    let scale = map_score_to_scale(raw, scale_map).unwrap_or_else(|| {
        warn!(factor = id, raw, scale_key = %scale_key, "raw score outside every range");
        FALLBACK_SCALE
    });
    Ok(FactorResult {
        label: factor.label.clone(),
        raw,
        scale,
        chart_point: chart_point(scale, factor.group),
    })
}

/// 素点 = base + Σ 重み × 回答番号
///
/// 重みに挙がった設問だけを見る。欠落・範囲外の回答は0として足す。
pub fn raw_score(factor: &FactorDefinition, answers: &AnswerSet) -> f64 {
    factor
        .weights
        .iter()
        .fold(factor.base as f64, |raw, (question, weight)| {
            raw + weight * answers.index(question) as f64
        })
}

/// 素点を評価点に換算する。どの範囲にも当てはまらなければ `None`。
pub fn map_score_to_scale(raw: f64, scale_map: &ScaleMap) -> Option<u8> {
    scale_map.scale_for(raw)
}

/// グループ1（ストレス要因側）は 6 - 評価点、それ以外はそのまま
///
/// 評価点は1〜5に丸めてから扱う。
pub fn chart_point(scale: u8, group: u8) -> u8 {
    let scale = scale.clamp(1, 5);
    if group == INVERTED_GROUP {
        6 - scale
    } else {
        scale
    }
}

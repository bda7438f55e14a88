//! 合計点数方式による高ストレス者の選定
//!
//! マニュアルにおいて、高ストレス者を選定する評価基準の設定例（その
//! １）では、職業性ストレス簡易調査票（57 項目）を使用する場合、以下の
//! いずれかを満たす場合に、高ストレス者と選定することとなっています。
//!
//! ㋐ 領域Ｂの合計点数が 77 点以上（最高点は４×29＝116 点）であること
//! ㋑ 領域ＡとＣの合算の合計点数が76点以上（最高点は４×17＋４×９＝104
//! 点）であり、かつ領域Ｂの合計点数が 63 点以上であること
//!
//! 逆転項目は設問マスタの選択肢得点であらかじめ逆向きに設定されている。

use serde::Serialize;

use crate::answer::{is_valid_index, AnswerSet};
use crate::reference::ReferenceData;

/// 領域Ａの設問数
pub const SECTION_A_COUNT: u32 = 17;
/// 領域Ｂの設問数
pub const SECTION_B_COUNT: u32 = 29;
/// 領域Ｃの設問数
pub const SECTION_C_COUNT: u32 = 9;

/// ㋐ 領域Ｂ単独の基準
pub const RESPONSE_THRESHOLD: i64 = 77;
/// ㋑ 領域Ａ＋Ｃの基準
pub const CAUSE_SUPPORT_THRESHOLD: i64 = 76;
/// ㋑ と併せて満たすべき領域Ｂの基準
pub const RESPONSE_SUB_THRESHOLD: i64 = 63;

pub trait Stress {
    fn scores(&self) -> (i64, i64, i64);
    fn has_stress(&self) -> bool;
}

/// 領域ごとの合計点数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SumupScore {
    pub sum_a: i64,
    pub sum_b: i64,
    pub sum_c: i64,
}

impl SumupScore {
    pub fn from_answers(reference: &ReferenceData, answers: &AnswerSet) -> Self {
        Self {
            sum_a: sum_section(reference, answers, "A", SECTION_A_COUNT),
            sum_b: sum_section(reference, answers, "B", SECTION_B_COUNT),
            sum_c: sum_section(reference, answers, "C", SECTION_C_COUNT),
        }
    }
}

impl Stress for SumupScore {
    fn has_stress(&self) -> bool {
        is_high_stress(self.sum_a, self.sum_b, self.sum_c)
    }

    fn scores(&self) -> (i64, i64, i64) {
        (self.sum_a, self.sum_b, self.sum_c)
    }
}

pub fn is_high_stress(sum_a: i64, sum_b: i64, sum_c: i64) -> bool {
    if sum_b >= RESPONSE_THRESHOLD {
        true
    } else {
        sum_a + sum_c >= CAUSE_SUPPORT_THRESHOLD && sum_b >= RESPONSE_SUB_THRESHOLD
    }
}

/// `prefix`1〜`prefix``count` の選択肢得点の合計
pub fn sum_section(
    reference: &ReferenceData,
    answers: &AnswerSet,
    prefix: &str,
    count: u32,
) -> i64 {
    (1..=count)
        .map(|number| {
            let id = format!("{}{}", prefix, number);
            option_score(reference, &id, answers.raw(&id).unwrap_or(0))
        })
        .sum()
}

/// 回答番号に対応する選択肢の得点。範囲外や未知の設問は0。
pub fn option_score(reference: &ReferenceData, question_id: &str, index: i64) -> i64 {
    if !is_valid_index(index) {
        return 0;
    }
    reference
        .question(question_id)
        .and_then(|question| question.option_score(index))
        .unwrap_or(0)
}

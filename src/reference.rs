use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Error;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const FACTOR_DEFINITIONS_FILE: &str = "factor_definitions.json";
pub const SCORING_MAPS_FILE: &str = "scoring_maps.json";

/// 調査票の領域
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
    C,
    D,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::A, Section::B, Section::C, Section::D];

    /// 領域ごとの教示文
    /// 詳細 https://www.mhlw.go.jp/bunya/roudoukijun/anzeneisei12/dl/stress-check_j.pdf
    pub fn instruction(&self) -> &'static str {
        match self {
            Section::A => "あなたの仕事についてうかがいます。最もあてはまるものに○を付けてください。",
            Section::B => "最近 1 か月間のあなたの状態についてうかがいます。最もあてはまるものに○を付けてください。",
            Section::C => "あなたの周りの方々についてうかがいます。最もあてはまるものに○を付けてください。",
            Section::D => "満足度について",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 回答選択肢
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    /// 合計点数方式で用いる得点。回答番号とは別物。
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub section: Section,
    pub number: u32,
    pub text: String,
    /// 回答番号1〜4に対応する選択肢
    pub options: [AnswerOption; 4],
}

impl Question {
    /// 回答番号に対応する選択肢の得点。範囲外は `None`。
    pub fn option_score(&self, index: i64) -> Option<i64> {
        let offset = usize::try_from(index.checked_sub(1)?).ok()?;
        self.options.get(offset).map(|option| option.score)
    }
}

fn default_group() -> u8 {
    1
}

/// 尺度（因子）の定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorDefinition {
    pub label: String,
    #[serde(default)]
    pub base: i64,
    /// 設問ID ⇒ 重み。逆転項目は負の重みで表す。
    pub weights: BTreeMap<String, f64>,
    /// 性別 ⇒ 換算表キー
    pub scales: BTreeMap<String, String>,
    /// 1 はストレス要因側の尺度で、チャート上では反転する
    #[serde(default = "default_group")]
    pub group: u8,
}

/// 領域 ⇒ 因子ID ⇒ 定義
pub type FactorDefinitions = BTreeMap<Section, BTreeMap<String, FactorDefinition>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: i64,
    pub max: i64,
}

impl ScaleRange {
    pub fn contains(&self, raw: f64) -> bool {
        self.min as f64 <= raw && raw <= self.max as f64
    }
}

/// 素点換算表の一行（評価点 "1"〜"5" ⇒ 素点範囲）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleMap(BTreeMap<String, Option<ScaleRange>>);

impl ScaleMap {
    pub fn new(ranges: impl IntoIterator<Item = (u8, Option<ScaleRange>)>) -> Self {
        Self(
            ranges
                .into_iter()
                .map(|(value, range)| (value.to_string(), range))
                .collect(),
        )
    }

    /// 素点を含む範囲の評価点。どの範囲にも当てはまらなければ `None`。
    pub fn scale_for(&self, raw: f64) -> Option<u8> {
        self.0.iter().find_map(|(value, range)| match range {
            Some(range) if range.contains(raw) => value.parse().ok(),
            _ => None,
        })
    }

    pub fn ranges(&self) -> impl Iterator<Item = (&str, Option<&ScaleRange>)> {
        self.0
            .iter()
            .map(|(value, range)| (value.as_str(), range.as_ref()))
    }
}

/// 読み込み済みの参照データ
///
/// 一度構築したら変更しない。複数スレッドから同時に参照してよい。
#[derive(Debug)]
pub struct ReferenceData {
    questions: Vec<Question>,
    factors: FactorDefinitions,
    scoring_maps: BTreeMap<String, ScaleMap>,
    question_index: OnceCell<HashMap<String, usize>>,
}

impl ReferenceData {
    /// 参照データを組み立て、整合性を検証する
    pub fn new(
        questions: Vec<Question>,
        factors: FactorDefinitions,
        scoring_maps: BTreeMap<String, ScaleMap>,
    ) -> Result<Self, Error> {
        let data = Self {
            questions,
            factors,
            scoring_maps,
            question_index: OnceCell::new(),
        };
        data.validate()?;
        Ok(data)
    }

    /// ディレクトリから3つのJSONを読み込む
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let data = Self::new(
            read_json(&dir.join(QUESTIONS_FILE))?,
            read_json(&dir.join(FACTOR_DEFINITIONS_FILE))?,
            read_json(&dir.join(SCORING_MAPS_FILE))?,
        )?;
        info!(
            dir = %dir.display(),
            questions = data.questions.len(),
            factors = data.factor_count(),
            scoring_maps = data.scoring_maps.len(),
            "reference data loaded"
        );
        Ok(data)
    }

    /// 因子IDの重複、未知の設問・換算表、評価点キーが "1"〜"5" 以外のもの、
    /// 下限が上限を超える範囲、同じ換算表内で重なる範囲をエラーにする
    pub fn validate(&self) -> Result<(), Error> {
        let known: HashSet<&str> = self
            .questions
            .iter()
            .map(|question| question.id.as_str())
            .collect();

        let mut seen = HashSet::new();
        for (id, factor) in self.factors.values().flatten() {
            if !seen.insert(id.as_str()) {
                return Err(Error::DuplicateFactor(id.clone()));
            }
            if let Some(question) = factor
                .weights
                .keys()
                .find(|question| !known.contains(question.as_str()))
            {
                return Err(Error::UnknownQuestion {
                    factor: id.clone(),
                    question: question.clone(),
                });
            }
            if let Some(scale) = factor
                .scales
                .values()
                .find(|scale| !self.scoring_maps.contains_key(scale.as_str()))
            {
                return Err(Error::UnknownScale {
                    factor: id.clone(),
                    scale: scale.clone(),
                });
            }
        }

        for (scale, map) in &self.scoring_maps {
            let mut assigned: Vec<(&str, &ScaleRange)> = Vec::new();
            for (value, range) in map.ranges() {
                if !matches!(value, "1" | "2" | "3" | "4" | "5") {
                    return Err(Error::IllegalScaleValue {
                        scale: scale.clone(),
                        value: value.to_string(),
                    });
                }
                let Some(range) = range else {
                    continue;
                };
                if range.min > range.max {
                    return Err(Error::IllegalScaleRange {
                        scale: scale.clone(),
                        value: value.to_string(),
                    });
                }
                if let Some((other, _)) = assigned
                    .iter()
                    .find(|(_, other)| range.min <= other.max && other.min <= range.max)
                {
                    return Err(Error::OverlappingScaleRange {
                        scale: scale.clone(),
                        first: other.to_string(),
                        second: value.to_string(),
                    });
                }
                assigned.push((value, range));
            }
        }
        Ok(())
    }

    /// 全設問を取得する
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 設問IDを指定して設問を取得する
    pub fn question(&self, id: &str) -> Option<&Question> {
        let index = self.question_index.get_or_init(|| {
            self.questions
                .iter()
                .enumerate()
                .map(|(offset, question)| (question.id.clone(), offset))
                .collect()
        });
        index.get(id).map(|&offset| &self.questions[offset])
    }

    pub fn factors(&self) -> &FactorDefinitions {
        &self.factors
    }

    pub fn factor_count(&self) -> usize {
        self.factors.values().map(BTreeMap::len).sum()
    }

    pub fn scoring_map(&self, key: &str) -> Option<&ScaleMap> {
        self.scoring_maps.get(key)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

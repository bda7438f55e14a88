use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// 回答番号の下限
pub const MIN_ANSWER: i64 = 1;
/// 回答番号の上限
pub const MAX_ANSWER: i64 = 4;

/// 回答番号が1〜4の範囲に収まっているか
pub fn is_valid_index(index: i64) -> bool {
    (MIN_ANSWER..=MAX_ANSWER).contains(&index)
}

/// 逆転項目の得点化
///
/// 回答番号 1⇒4、2⇒3、3⇒2、4⇒1 に置き換える。範囲外の回答は `None`。
pub fn reverse_score(index: i64) -> Option<i64> {
    is_valid_index(index).then(|| MAX_ANSWER + MIN_ANSWER - index)
}

/// 素点換算表の選択に用いる性別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(Error::IllegalGender(value.to_string())),
        }
    }
}

/// 一人分の回答（設問ID ⇒ 回答番号）
///
/// 値は検証せずに保持する。範囲外や欠落した回答は集計時に0点として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, i64>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 設問IDを指定して回答を格納する
    pub fn insert(&mut self, question_id: impl Into<String>, index: i64) -> Option<i64> {
        self.0.insert(question_id.into(), index)
    }

    /// 格納された値をそのまま返す
    pub fn raw(&self, question_id: &str) -> Option<i64> {
        self.0.get(question_id).copied()
    }

    /// 有効な回答番号（1〜4）を返す。欠落・範囲外は0。
    pub fn index(&self, question_id: &str) -> i64 {
        self.valid(question_id).unwrap_or(0)
    }

    /// 有効な回答番号のみ `Some` を返す
    pub fn valid(&self, question_id: &str) -> Option<i64> {
        self.raw(question_id).filter(|&index| is_valid_index(index))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(id, index)| (id.into(), index)).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reverse_score() {
        assert_eq!(reverse_score(1), Some(4));
        assert_eq!(reverse_score(2), Some(3));
        assert_eq!(reverse_score(3), Some(2));
        assert_eq!(reverse_score(4), Some(1));
        assert_eq!(reverse_score(0), None);
        assert_eq!(reverse_score(5), None);
        assert_eq!(reverse_score(-1), None);
    }

    #[test]
    fn test_index_treats_out_of_range_as_zero() {
        let answers: AnswerSet = [("A1", 3), ("A2", 0), ("A3", 5), ("A4", -2)]
            .into_iter()
            .collect();
        assert_eq!(answers.index("A1"), 3);
        assert_eq!(answers.index("A2"), 0);
        assert_eq!(answers.index("A3"), 0);
        assert_eq!(answers.index("A4"), 0);
        assert_eq!(answers.index("A5"), 0);
        assert_eq!(answers.raw("A3"), Some(5));
        assert_eq!(answers.valid("A3"), None);
    }

    #[test]
    fn test_answer_set_json() {
        let answers: AnswerSet = serde_json::from_str(r#"{"A1": 1, "B2": 4, "C3": 9}"#).unwrap();
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.index("B2"), 4);
        assert_eq!(answers.index("C3"), 0);
    }

    #[test]
    fn test_gender() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" Female ".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
        assert_eq!(Gender::Female.to_string(), "female");
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"male\"");
    }
}

use std::sync::Arc;

use tracing::debug;

use crate::answer::{AnswerSet, Gender};
use crate::chart::{format_result, DiagnosisResult};
use crate::factor::compute_factors;
use crate::organization::{self, OrganizationOutcome};
use crate::reference::{Question, ReferenceData};
use crate::stress::{Stress, SumupScore};
use crate::Error;

/// 診断の入口
///
/// 参照データは構築時に受け取り、以降は読み取るだけ。`Clone` は `Arc` の複製のみ。
#[derive(Debug, Clone)]
pub struct DiagnosisService {
    reference: Arc<ReferenceData>,
}

impl DiagnosisService {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// 個人の回答から評価点と高ストレス判定を求める
    pub fn calculate(&self, answers: &AnswerSet, gender: Gender) -> Result<DiagnosisResult, Error> {
        let factors = compute_factors(&self.reference, answers, gender)?;
        let score = SumupScore::from_answers(&self.reference, answers);
        let high_stress = score.has_stress();
        debug!(
            %gender,
            answered = answers.len(),
            sum_a = score.sum_a,
            sum_b = score.sum_b,
            sum_c = score.sum_c,
            high_stress,
            "diagnosis calculated"
        );
        format_result(&factors, score, high_stress)
    }

    /// 集団の回答から健康リスクを求める
    pub fn calculate_organization(
        &self,
        answers_list: &[AnswerSet],
        gender: Gender,
    ) -> OrganizationOutcome {
        organization::aggregate(answers_list, gender)
    }

    /// 全設問を取得する
    pub fn get_questions(&self) -> &[Question] {
        self.reference.questions()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chart::ChartGroup;

    fn service() -> DiagnosisService {
        DiagnosisService::new(Arc::new(ReferenceData::load("resources").unwrap()))
    }

    fn answers(a: &[i64], b: &[i64], c: &[i64], d: &[i64]) -> AnswerSet {
        let mut answers = AnswerSet::new();
        for (prefix, values) in [("A", a), ("B", b), ("C", c), ("D", d)] {
            for (i, &value) in values.iter().enumerate() {
                answers.insert(format!("{}{}", prefix, i + 1), value);
            }
        }
        answers
    }

    #[test]
    fn test_get_questions() {
        let service = service();
        let questions = service.get_questions();
        assert_eq!(questions.len(), 57);
        assert_eq!(questions[0].options[0].label, "そうだ");
    }

    #[test]
    fn test_high_stress_end_to_end() {
        let service = service();
        let answers = answers(&[4; 17], &[4; 29], &[1; 9], &[1; 2]);
        let result = service.calculate(&answers, Gender::Male).unwrap();
        assert!(result.high_stress);
        assert!(result.summary_scores.sum_b >= 77);
        assert_eq!(result.summary_scores.sum_b, 107);
        assert_eq!(result.summary_scores.sum_a, 35);
        assert_eq!(result.summary_scores.sum_c, 9);

        let labels: Vec<&str> = result.charts.iter().map(|c| c.label.as_str()).collect();
        let expected: Vec<&str> = ChartGroup::ALL.iter().map(ChartGroup::label).collect();
        assert_eq!(labels, expected);
        assert_eq!(result.charts[0].axes.len(), 9);
        assert_eq!(result.charts[1].axes.len(), 6);
        assert_eq!(result.charts[2].axes.len(), 4);
    }

    #[test]
    fn test_sample_respondent() {
        let service = service();
        let answers = answers(
            &[1, 1, 2, 3, 3, 1, 4, 4, 3, 3, 2, 3, 2, 4, 3, 3, 4],
            &[
                1, 1, 1, 2, 3, 3, 4, 4, 4, 3, 3, 4, 4, 4, 3, 3, 2, 2, 2, 2, 3, 4, 3, 4, 2, 3, 3, 3,
                3,
            ],
            &[4, 3, 3, 4, 3, 4, 4, 3, 3],
            &[1, 1],
        );
        let result = service.calculate(&answers, Gender::Male).unwrap();
        assert_eq!(result.summary_scores.sum_a, 51);
        assert_eq!(result.summary_scores.sum_b, 92);
        assert_eq!(result.summary_scores.sum_c, 31);
        assert!(result.high_stress);

        // 量的負担: 15 - (1+1+2) = 11 ⇒ 評価点4、チャートは 6 - 4
        let volume = &result.charts[0].axes[0];
        assert_eq!(volume.id, "F-A1");
        assert_eq!(volume.score, 2);
        for chart in &result.charts {
            for axis in &chart.axes {
                assert!((1..=5).contains(&axis.score), "{}", axis.id);
            }
        }
    }

    #[test]
    fn test_calculate_is_deterministic() {
        let service = service();
        let answers = answers(&[2; 17], &[3; 29], &[2; 9], &[2; 2]);
        for gender in [Gender::Male, Gender::Female] {
            assert_eq!(
                service.calculate(&answers, gender).unwrap(),
                service.calculate(&answers, gender).unwrap()
            );
        }
    }

    #[test]
    fn test_calculate_with_no_answers() {
        let service = service();
        let result = service.calculate(&AnswerSet::new(), Gender::Female).unwrap();
        assert!(!result.high_stress);
        assert_eq!(result.summary_scores, SumupScore::default());
    }

    #[test]
    fn test_calculate_organization() {
        let service = service();
        let complete = answers(&[2; 17], &[2; 29], &[2; 9], &[2; 2]);
        let partial = answers(&[2; 2], &[], &[], &[]);
        let outcome = service.calculate_organization(&[complete, partial], Gender::Male);
        let aggregate = outcome.aggregate().unwrap();
        assert_eq!(aggregate.count, 1);
        assert_eq!(aggregate.averages.quantitative_burden, 9.0);

        let outcome = service.calculate_organization(&[], Gender::Male);
        assert!(outcome.aggregate().is_none());
    }

    #[test]
    fn test_service_is_shared_across_threads() {
        let service = service();
        let answers = answers(&[4; 17], &[4; 29], &[1; 9], &[1; 2]);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                let answers = answers.clone();
                std::thread::spawn(move || service.calculate(&answers, Gender::Male).unwrap())
            })
            .collect();
        let expected = service.calculate(&answers, Gender::Male).unwrap();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}

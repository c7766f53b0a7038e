// Per-category review of a persisted result. Correctness is re-derived from
// the stored answers snapshot rather than the stored score, so a result
// always displays consistently with its own data.

use crate::models::{AnswerValue, TestResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: String,
    pub correct: u32,
    pub total: u32,
}

/// Group the result's multiple-choice questions by category, in first-seen
/// order, counting totals and correct answers per category. Essay questions
/// never appear here; they are surfaced verbatim for manual grading.
/// Returns an empty list when the result carries no question snapshot.
pub fn category_breakdown(result: &TestResult) -> Vec<CategorySummary> {
    let Some(questions) = &result.questions else {
        return Vec::new();
    };

    let mut summaries: Vec<CategorySummary> = Vec::new();
    for (index, question) in questions.iter().enumerate() {
        if !question.is_multiple_choice() {
            continue;
        }
        let pos = match summaries.iter().position(|s| s.category == question.category) {
            Some(pos) => pos,
            None => {
                summaries.push(CategorySummary {
                    category: question.category.clone(),
                    correct: 0,
                    total: 0,
                });
                summaries.len() - 1
            }
        };
        let entry = &mut summaries[pos];
        entry.total += 1;

        let answered_correctly = result.answers.iter().any(|a| {
            a.question_index == index
                && matches!(
                    &a.answer,
                    AnswerValue::Choice(i) if Some(*i) == question.correct_answer_index
                )
        });
        if answered_correctly {
            entry.correct += 1;
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, Question};
    use chrono::Utc;

    fn mc(category: &str, correct: usize) -> Question {
        Question {
            category: category.into(),
            question: "q".into(),
            options: Some(vec!["a".into(), "b".into(), "c".into()]),
            correct_answer_index: Some(correct),
            question_type: None,
        }
    }

    fn essay(category: &str) -> Question {
        Question {
            category: category.into(),
            question: "q".into(),
            options: None,
            correct_answer_index: None,
            question_type: Some("essay".into()),
        }
    }

    fn result(questions: Vec<Question>, answers: Vec<Answer>) -> TestResult {
        TestResult {
            username: "siti".into(),
            date: Utc::now(),
            score_mc: 0, // deliberately wrong: breakdown must not trust it
            total_mc: 0,
            answers,
            questions: Some(questions),
        }
    }

    #[test]
    fn groups_by_category_in_first_seen_order() {
        let r = result(
            vec![mc("Verbal", 0), mc("Math", 1), mc("Verbal", 2), essay("Math")],
            vec![
                Answer {
                    question_index: 0,
                    answer: AnswerValue::Choice(0),
                },
                Answer {
                    question_index: 1,
                    answer: AnswerValue::Choice(0),
                },
            ],
        );
        let breakdown = category_breakdown(&r);
        assert_eq!(
            breakdown,
            vec![
                CategorySummary {
                    category: "Verbal".into(),
                    correct: 1,
                    total: 2
                },
                CategorySummary {
                    category: "Math".into(),
                    correct: 0,
                    total: 1
                },
            ]
        );
    }

    #[test]
    fn essay_only_result_has_no_rows() {
        let r = result(vec![essay("Math")], vec![]);
        assert!(category_breakdown(&r).is_empty());
    }

    #[test]
    fn missing_snapshot_yields_empty_breakdown() {
        let mut r = result(vec![], vec![]);
        r.questions = None;
        assert!(category_breakdown(&r).is_empty());
    }

    #[test]
    fn essay_answer_text_never_counts_toward_score() {
        let r = result(
            vec![mc("Math", 1), essay("Math")],
            vec![Answer {
                question_index: 1,
                answer: AnswerValue::Text("long essay".into()),
            }],
        );
        let breakdown = category_breakdown(&r);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].correct, 0);
        assert_eq!(breakdown[0].total, 1);
    }
}

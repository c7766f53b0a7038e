mod common;

use std::time::Duration;

use aptitest::models::AnswerValue;
use aptitest::names::QUESTION_TIME_LIMIT_SECS;
use aptitest::session::{QuizSession, SessionRegistry};
use common::{create_test_store, essay, multiple_choice};

#[test]
fn session_requires_questions() {
    assert!(QuizSession::start("budi", vec![]).is_err());
}

#[test]
fn answers_are_last_write_wins() {
    let mut session =
        QuizSession::start("budi", vec![multiple_choice("Logika Verbal", 2)]).unwrap();

    session.submit_answer(AnswerValue::Choice(0));
    session.submit_answer(AnswerValue::Choice(2));

    let result = session.advance().expect("last question completes");
    assert_eq!(result.answers.len(), 1);
    assert_eq!(result.answers[0].answer, AnswerValue::Choice(2));
    assert_eq!(result.score_mc, 1);
}

#[test]
fn advance_resets_the_countdown() {
    let questions = vec![
        multiple_choice("Logika Verbal", 0),
        multiple_choice("Matematika Dasar", 1),
    ];
    let mut session = QuizSession::start("budi", questions).unwrap();

    for _ in 0..5 {
        assert!(session.tick().is_none());
    }
    let view = session.view().unwrap();
    assert_eq!(view.question_index, 0);
    assert_eq!(view.remaining_seconds, QUESTION_TIME_LIMIT_SECS - 5);

    assert!(session.advance().is_none());
    let view = session.view().unwrap();
    assert_eq!(view.question_index, 1);
    assert_eq!(view.remaining_seconds, QUESTION_TIME_LIMIT_SECS);
}

#[test]
fn countdown_expiry_advances_automatically() {
    let questions = vec![
        multiple_choice("Logika Verbal", 0),
        multiple_choice("Matematika Dasar", 1),
    ];
    let mut session = QuizSession::start("budi", questions).unwrap();

    for _ in 0..QUESTION_TIME_LIMIT_SECS - 1 {
        assert!(session.tick().is_none());
    }
    assert_eq!(session.view().unwrap().question_index, 0);
    assert_eq!(session.view().unwrap().remaining_seconds, 1);

    // The expiring pulse moves on without requiring an answer
    assert!(session.tick().is_none());
    let view = session.view().unwrap();
    assert_eq!(view.question_index, 1);
    assert_eq!(view.remaining_seconds, QUESTION_TIME_LIMIT_SECS);
}

#[test]
fn superseded_countdown_pulses_are_ignored() {
    let questions = vec![
        multiple_choice("Logika Verbal", 0),
        multiple_choice("Matematika Dasar", 1),
    ];
    let mut session = QuizSession::start("budi", questions).unwrap();
    let epoch = session.rearm();

    assert!(session.tick_for(epoch).is_none());
    assert_eq!(
        session.view().unwrap().remaining_seconds,
        QUESTION_TIME_LIMIT_SECS - 1
    );

    assert!(session.advance().is_none());
    let next_epoch = session.rearm();

    // A late pulse from the replaced task must not touch the fresh clock
    assert!(session.tick_for(epoch).is_none());
    assert_eq!(
        session.view().unwrap().remaining_seconds,
        QUESTION_TIME_LIMIT_SECS
    );

    assert!(session.tick_for(next_epoch).is_none());
    assert_eq!(
        session.view().unwrap().remaining_seconds,
        QUESTION_TIME_LIMIT_SECS - 1
    );
}

#[test]
fn expiry_on_the_last_question_completes_and_scores() {
    let mut session =
        QuizSession::start("budi", vec![multiple_choice("Logika Verbal", 1)]).unwrap();
    session.submit_answer(AnswerValue::Choice(1));

    let mut outcome = None;
    for _ in 0..QUESTION_TIME_LIMIT_SECS {
        outcome = session.tick();
    }
    let result = outcome.expect("expiry on the last question completes the session");
    assert_eq!(result.score_mc, 1);
    assert_eq!(result.total_mc, 1);

    // Completed sessions ignore further pulses and score only once
    assert!(session.tick().is_none());
    assert!(session.advance().is_none());
    assert!(session.view().is_none());
}

#[test]
fn scoring_counts_multiple_choice_only() {
    let questions = vec![
        multiple_choice("Logika Verbal", 0),
        essay("Penalaran Analitis"),
        multiple_choice("Matematika Dasar", 2),
    ];
    let mut session = QuizSession::start("siti", questions).unwrap();

    session.submit_answer(AnswerValue::Choice(0)); // correct
    assert!(session.advance().is_none());
    session.submit_answer(AnswerValue::Text("An essay answer.".into()));
    assert!(session.advance().is_none());
    session.submit_answer(AnswerValue::Choice(1)); // incorrect
    let result = session.advance().unwrap();

    assert_eq!(result.score_mc, 1);
    assert_eq!(result.total_mc, 2);
    // The essay answer is kept verbatim but never scored
    assert_eq!(
        result.answers[1].answer,
        AnswerValue::Text("An essay answer.".into())
    );
    // The question list is snapshotted for later review
    assert_eq!(result.questions.as_ref().unwrap().len(), 3);
}

#[test]
fn unanswered_questions_score_as_incorrect() {
    let questions = vec![
        multiple_choice("Logika Verbal", 0),
        multiple_choice("Matematika Dasar", 1),
    ];
    let mut session = QuizSession::start("budi", questions).unwrap();

    session.submit_answer(AnswerValue::Choice(0));
    assert!(session.advance().is_none());
    // Second question left unanswered
    let result = session.advance().unwrap();

    assert_eq!(result.score_mc, 1);
    assert_eq!(result.total_mc, 2);
    assert_eq!(result.answers.len(), 1);
}

#[test]
fn submitting_after_completion_is_ignored() {
    let mut session =
        QuizSession::start("budi", vec![multiple_choice("Logika Verbal", 0)]).unwrap();
    let result = session.advance().unwrap();
    assert_eq!(result.answers.len(), 0);

    session.submit_answer(AnswerValue::Choice(0));
    assert!(session.view().is_none());
}

// --- Registry: countdown task, persistence, teardown ---

#[tokio::test(start_paused = true)]
async fn countdown_completion_persists_the_result() {
    let store = create_test_store();
    let registry = SessionRegistry::default();

    registry
        .start("budi", vec![multiple_choice("Logika Verbal", 1)], &store)
        .unwrap();
    registry.submit_answer("budi", AnswerValue::Choice(1));

    tokio::time::sleep(Duration::from_secs(u64::from(QUESTION_TIME_LIMIT_SECS) + 1)).await;

    let result = store
        .latest_result_for("budi")
        .expect("countdown completion writes the result");
    assert_eq!(result.score_mc, 1);

    // The dead entry is cleaned up on the next page load
    assert!(registry.finish_if_completed("budi"));
    assert!(!registry.exists("budi"));
    assert!(!registry.finish_if_completed("budi"));
}

#[tokio::test(start_paused = true)]
async fn manual_advance_rearms_the_countdown() {
    let store = create_test_store();
    let registry = SessionRegistry::default();

    let questions = vec![
        multiple_choice("Logika Verbal", 0),
        multiple_choice("Matematika Dasar", 1),
    ];
    registry.start("budi", questions, &store).unwrap();

    tokio::time::sleep(Duration::from_millis(10_500)).await;
    assert_eq!(
        registry.view("budi").unwrap().remaining_seconds,
        QUESTION_TIME_LIMIT_SECS - 10
    );

    // Advancing by hand starts the next question on a full clock
    assert!(!registry.advance("budi", &store));
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    let view = registry.view("budi").unwrap();
    assert_eq!(view.question_index, 1);
    assert_eq!(view.remaining_seconds, QUESTION_TIME_LIMIT_SECS - 5);
}

#[tokio::test(start_paused = true)]
async fn manual_completion_persists_and_removes_the_session() {
    let store = create_test_store();
    let registry = SessionRegistry::default();

    registry
        .start("siti", vec![multiple_choice("Logika Verbal", 0)], &store)
        .unwrap();
    registry.submit_answer("siti", AnswerValue::Choice(0));

    assert!(registry.advance("siti", &store));
    assert!(!registry.exists("siti"));
    assert_eq!(store.latest_result_for("siti").unwrap().score_mc, 1);

    // No stray countdown pulse writes a second result
    tokio::time::sleep(Duration::from_secs(u64::from(QUESTION_TIME_LIMIT_SECS) * 2)).await;
    assert_eq!(store.results().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn abandoning_discards_without_scoring() {
    let store = create_test_store();
    let registry = SessionRegistry::default();

    registry
        .start("budi", vec![multiple_choice("Logika Verbal", 0)], &store)
        .unwrap();
    registry.submit_answer("budi", AnswerValue::Choice(0));
    registry.abandon("budi");

    assert!(!registry.exists("budi"));
    tokio::time::sleep(Duration::from_secs(u64::from(QUESTION_TIME_LIMIT_SECS) * 2)).await;
    assert!(store.results().is_empty());
}

#[tokio::test(start_paused = true)]
async fn restarting_replaces_the_previous_attempt() {
    let store = create_test_store();
    let registry = SessionRegistry::default();

    registry
        .start("budi", vec![multiple_choice("Logika Verbal", 0)], &store)
        .unwrap();
    registry.submit_answer("budi", AnswerValue::Choice(2));

    registry
        .start("budi", vec![multiple_choice("Matematika Dasar", 1)], &store)
        .unwrap();

    let view = registry.view("budi").unwrap();
    assert_eq!(view.question.category, "Matematika Dasar");
    assert_eq!(view.remaining_seconds, QUESTION_TIME_LIMIT_SECS);
    assert!(view.current_answer.is_none());
}

#[tokio::test(start_paused = true)]
async fn full_attempt_over_the_registry() {
    let store = create_test_store();
    let registry = SessionRegistry::default();

    let questions = vec![
        multiple_choice("Logika Verbal", 0),
        essay("Penalaran Analitis"),
        multiple_choice("Matematika Dasar", 2),
    ];
    registry.start("siti", questions, &store).unwrap();

    registry.submit_answer("siti", AnswerValue::Choice(0));
    assert!(!registry.advance("siti", &store));

    registry.submit_answer("siti", AnswerValue::Text("Because it follows.".into()));
    assert!(!registry.advance("siti", &store));

    // Final question times out unanswered
    tokio::time::sleep(Duration::from_secs(u64::from(QUESTION_TIME_LIMIT_SECS) + 1)).await;
    assert!(registry.finish_if_completed("siti"));

    let result = store.latest_result_for("siti").unwrap();
    assert_eq!(result.score_mc, 1);
    assert_eq!(result.total_mc, 2);
    assert_eq!(result.answers.len(), 2);
}

// Quiz session core: the per-attempt state machine (cursor, answer list,
// countdown, scoring) plus the registry that owns one live session per
// logged-in username and drives its countdown task.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::models::{Answer, AnswerValue, Question, TestResult};
use crate::names;
use crate::store::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    InProgress {
        question_index: usize,
        remaining_seconds: u32,
    },
    Completed,
}

/// Starting a test with no prepared questions. The session never enters
/// `InProgress`; the caller shows the "test unavailable" screen.
#[derive(Debug, thiserror::Error)]
#[error("no questions are available for this test")]
pub struct SessionUnavailable;

/// One quiz attempt. Transient: lives in memory from `start` until scoring
/// completes, at which point only the derived `TestResult` survives.
pub struct QuizSession {
    username: String,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    state: SessionState,
    timer_epoch: u64,
}

impl QuizSession {
    pub fn start(username: &str, questions: Vec<Question>) -> Result<Self, SessionUnavailable> {
        if questions.is_empty() {
            return Err(SessionUnavailable);
        }
        Ok(Self {
            username: username.to_owned(),
            questions,
            answers: Vec::new(),
            state: SessionState::InProgress {
                question_index: 0,
                remaining_seconds: names::QUESTION_TIME_LIMIT_SECS,
            },
            timer_epoch: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Record an answer for the current question. Last write wins; the
    /// cursor does not move.
    pub fn submit_answer(&mut self, value: AnswerValue) {
        let SessionState::InProgress { question_index, .. } = self.state else {
            return;
        };
        self.answers.retain(|a| a.question_index != question_index);
        self.answers.push(Answer {
            question_index,
            answer: value,
        });
    }

    /// Move to the next question with a fresh countdown, or complete the
    /// session. Completion scores exactly once and returns the result; an
    /// answer for the current question is not required.
    pub fn advance(&mut self) -> Option<TestResult> {
        let SessionState::InProgress { question_index, .. } = self.state else {
            return None;
        };
        let next = question_index + 1;
        if next < self.questions.len() {
            self.state = SessionState::InProgress {
                question_index: next,
                remaining_seconds: names::QUESTION_TIME_LIMIT_SECS,
            };
            None
        } else {
            self.state = SessionState::Completed;
            Some(self.score())
        }
    }

    /// One countdown pulse. Reaching zero is a silent auto-submit: the
    /// session advances as if the student had pressed "next".
    pub fn tick(&mut self) -> Option<TestResult> {
        self.tick_for(self.timer_epoch)
    }

    /// A pulse from the countdown task armed at `epoch`. A replaced task can
    /// still deliver one late pulse while its abort is in flight; an epoch
    /// mismatch discards it, so a fresh question keeps its full allowance.
    pub fn tick_for(&mut self, epoch: u64) -> Option<TestResult> {
        if epoch != self.timer_epoch {
            return None;
        }
        let SessionState::InProgress {
            remaining_seconds, ..
        } = &mut self.state
        else {
            return None;
        };
        if *remaining_seconds > 0 {
            *remaining_seconds -= 1;
        }
        let expired = *remaining_seconds == 0;
        if expired {
            self.advance()
        } else {
            None
        }
    }

    /// Invalidate the current countdown task's pulses. Returns the epoch
    /// the replacement task must be armed with.
    pub fn rearm(&mut self) -> u64 {
        self.timer_epoch += 1;
        self.timer_epoch
    }

    /// Multiple-choice questions only: a recorded answer whose selected
    /// index equals the correct index scores one point. Essay questions are
    /// excluded from both numerator and denominator, and an unanswered
    /// multiple-choice question is simply a non-match.
    fn score(&self) -> TestResult {
        let score_mc = self
            .answers
            .iter()
            .filter(|a| {
                let Some(question) = self.questions.get(a.question_index) else {
                    return false;
                };
                question.is_multiple_choice()
                    && matches!(
                        &a.answer,
                        AnswerValue::Choice(i) if Some(*i) == question.correct_answer_index
                    )
            })
            .count() as u32;

        let total_mc = self
            .questions
            .iter()
            .filter(|q| q.is_multiple_choice())
            .count() as u32;

        TestResult {
            username: self.username.clone(),
            date: Utc::now(),
            score_mc,
            total_mc,
            answers: self.answers.clone(),
            questions: Some(self.questions.clone()),
        }
    }

    /// Snapshot of the current question for rendering. `None` once the
    /// session has completed.
    pub fn view(&self) -> Option<SessionView> {
        let SessionState::InProgress {
            question_index,
            remaining_seconds,
        } = self.state
        else {
            return None;
        };
        let question = self.questions.get(question_index)?.clone();
        let current_answer = self
            .answers
            .iter()
            .find(|a| a.question_index == question_index)
            .map(|a| a.answer.clone());
        Some(SessionView {
            question,
            question_index,
            question_count: self.questions.len(),
            remaining_seconds,
            current_answer,
        })
    }
}

#[derive(Clone, Debug)]
pub struct SessionView {
    pub question: Question,
    pub question_index: usize,
    pub question_count: usize,
    pub remaining_seconds: u32,
    pub current_answer: Option<AnswerValue>,
}

/// One active session per logged-in identity. Each entry owns the countdown
/// task that drives its session; dropping the entry cancels the task, so no
/// pulse ever reaches a session that has ended.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<String, ActiveSession>>>,
}

struct ActiveSession {
    session: Arc<Mutex<QuizSession>>,
    timer: SessionTimer,
}

struct SessionTimer {
    handle: JoinHandle<()>,
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl SessionRegistry {
    pub fn start(
        &self,
        username: &str,
        questions: Vec<Question>,
        store: &Store,
    ) -> Result<(), SessionUnavailable> {
        let session = Arc::new(Mutex::new(QuizSession::start(username, questions)?));
        let epoch = lock(&session).rearm();
        let timer = spawn_countdown(session.clone(), store.clone(), epoch);
        lock(&self.inner).insert(
            username.to_owned(),
            ActiveSession { session, timer },
        );
        tracing::info!("quiz session started for '{username}'");
        Ok(())
    }

    pub fn view(&self, username: &str) -> Option<SessionView> {
        let map = lock(&self.inner);
        let active = map.get(username)?;
        let view = lock(&active.session).view();
        view
    }

    pub fn submit_answer(&self, username: &str, value: AnswerValue) {
        let map = lock(&self.inner);
        if let Some(active) = map.get(username) {
            lock(&active.session).submit_answer(value);
        }
    }

    /// Manual advance. Persists the result and tears the session down on
    /// completion; otherwise re-arms the countdown task so the next
    /// question starts on a clean cadence. Returns true on completion.
    pub fn advance(&self, username: &str, store: &Store) -> bool {
        let mut map = lock(&self.inner);
        let Some(active) = map.get_mut(username) else {
            return false;
        };
        // Advance and invalidate the old countdown under one session lock,
        // so a pulse the outgoing task already has in flight cannot shave a
        // second off the fresh question's clock.
        let (result, epoch) = {
            let mut session = lock(&active.session);
            let result = session.advance();
            let epoch = session.rearm();
            (result, epoch)
        };
        match result {
            Some(result) => {
                store.append_result(result);
                map.remove(username);
                tracing::info!("quiz session completed for '{username}'");
                true
            }
            None => {
                active.timer = spawn_countdown(active.session.clone(), store.clone(), epoch);
                false
            }
        }
    }

    /// Clean up after a countdown-driven completion. The countdown task has
    /// already persisted the result; this just removes the dead entry.
    /// Returns true when the session had completed.
    pub fn finish_if_completed(&self, username: &str) -> bool {
        let mut map = lock(&self.inner);
        let completed = map
            .get(username)
            .is_some_and(|active| lock(&active.session).state() == SessionState::Completed);
        if completed {
            map.remove(username);
        }
        completed
    }

    /// Discard the session without scoring, e.g. on navigating away.
    pub fn abandon(&self, username: &str) {
        if lock(&self.inner).remove(username).is_some() {
            tracing::info!("quiz session abandoned by '{username}'");
        }
    }

    pub fn exists(&self, username: &str) -> bool {
        lock(&self.inner).contains_key(username)
    }
}

/// Cooperative periodic clock: one pulse per second while the session is in
/// progress. On countdown-driven completion the task persists the result
/// and stops; it is aborted outright whenever its entry is dropped.
fn spawn_countdown(session: Arc<Mutex<QuizSession>>, store: Store, epoch: u64) -> SessionTimer {
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // the first tick of a tokio interval fires immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let outcome = lock(&session).tick_for(epoch);
            if let Some(result) = outcome {
                let username = result.username.clone();
                store.append_result(result);
                tracing::info!("quiz session completed by countdown for '{username}'");
                break;
            }
            if lock(&session).state() == SessionState::Completed {
                break;
            }
        }
    });
    SessionTimer { handle }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

// The generated question set, shared between the admin flow and student
// sessions: a pending set awaiting review and the approved set students
// draw from. In-memory only; every result keeps its own snapshot, so a
// restart loses nothing already recorded.

use std::sync::{Arc, RwLock};

use crate::models::Question;

#[derive(Clone, Default)]
pub struct QuestionBank {
    inner: Arc<RwLock<Sets>>,
}

#[derive(Default)]
struct Sets {
    pending: Vec<Question>,
    active: Vec<Question>,
}

impl QuestionBank {
    /// Replace the set awaiting admin review.
    pub fn set_pending(&self, questions: Vec<Question>) {
        self.write().pending = questions;
    }

    pub fn pending(&self) -> Vec<Question> {
        self.read().pending.clone()
    }

    /// Publish the reviewed set for students. No-op when nothing is pending.
    pub fn approve(&self) -> bool {
        let mut sets = self.write();
        if sets.pending.is_empty() {
            return false;
        }
        sets.active = std::mem::take(&mut sets.pending);
        tracing::info!("published question set with {} questions", sets.active.len());
        true
    }

    pub fn active(&self) -> Vec<Question> {
        self.read().active.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Sets> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Sets> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

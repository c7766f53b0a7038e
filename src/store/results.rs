use crate::models::TestResult;

use super::Store;

impl Store {
    /// Results are append-only: once written, never mutated or deleted.
    pub fn append_result(&self, result: TestResult) {
        {
            let mut tables = self.write();
            tables.results.push(result);
        }
        self.persist_results();
    }

    pub fn results(&self) -> Vec<TestResult> {
        self.read().results.clone()
    }

    pub fn result_by_index(&self, index: usize) -> Option<TestResult> {
        self.read().results.get(index).cloned()
    }

    /// The most recent result for one student, shown right after a test.
    pub fn latest_result_for(&self, username: &str) -> Option<TestResult> {
        self.read()
            .results
            .iter()
            .rev()
            .find(|r| r.username == username)
            .cloned()
    }
}

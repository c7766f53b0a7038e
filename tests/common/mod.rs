use aptitest::store::Store;

pub fn create_test_store() -> Store {
    Store::open(test_data_dir()).expect("failed to create test store")
}

#[allow(dead_code)]
pub fn test_data_dir() -> std::path::PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir =
        std::env::temp_dir().join(format!("aptitest_test_{}_{}", std::process::id(), id));
    // Clean up leftover files from previous runs
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[allow(dead_code)]
pub fn multiple_choice(category: &str, correct: usize) -> aptitest::models::Question {
    aptitest::models::Question {
        category: category.to_string(),
        question: format!("{category} question"),
        options: Some(vec!["A".to_string(), "B".to_string(), "C".to_string()]),
        correct_answer_index: Some(correct),
        question_type: None,
    }
}

#[allow(dead_code)]
pub fn essay(category: &str) -> aptitest::models::Question {
    aptitest::models::Question {
        category: category.to_string(),
        question: format!("{category} essay prompt"),
        options: None,
        correct_answer_index: None,
        question_type: Some("essay".to_string()),
    }
}

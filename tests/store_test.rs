mod common;

use aptitest::models::{Answer, AnswerValue, Role, TestResult};
use aptitest::names;
use aptitest::store::{AddCategoryOutcome, AddUserOutcome, Store};
use chrono::Utc;
use common::{create_test_store, test_data_dir};

fn sample_result(username: &str, score: u32) -> TestResult {
    TestResult {
        username: username.to_string(),
        date: Utc::now(),
        score_mc: score,
        total_mc: 10,
        answers: vec![Answer {
            question_index: 0,
            answer: AnswerValue::Choice(1),
        }],
        questions: None,
    }
}

#[test]
fn fresh_store_seeds_admin_account() {
    let store = create_test_store();

    let admin = store
        .verify_login(names::DEFAULT_ADMIN_USERNAME, names::DEFAULT_ADMIN_PASSWORD)
        .expect("default admin should exist");
    assert_eq!(admin.role, Role::Admin);

    assert!(store.verify_login("admin", "wrong").is_none());
    assert!(store.verify_login("nobody", "admin123").is_none());
}

#[test]
fn fresh_store_seeds_default_categories() {
    let store = create_test_store();

    let categories = store.categories();
    let category_names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(category_names, names::DEFAULT_CATEGORIES);
}

#[test]
fn added_student_can_log_in_once() {
    let store = create_test_store();

    assert!(matches!(
        store.add_student("budi", "rahasia"),
        AddUserOutcome::Added
    ));
    assert!(matches!(
        store.add_student("budi", "other"),
        AddUserOutcome::DuplicateUsername
    ));

    let student = store.verify_login("budi", "rahasia").unwrap();
    assert_eq!(student.role, Role::Student);
    assert!(!student.profile_complete());

    let students = store.list_students();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].username, "budi");
}

#[test]
fn profile_update_completes_the_account() {
    let store = create_test_store();
    store.add_student("siti", "pw");

    let updated = store
        .update_profile("siti", "Siti Rahma", "Sistem Informasi", "2024-017")
        .expect("profile update should find the student");
    assert!(updated.profile_complete());
    assert_eq!(updated.display_name(), "Siti Rahma");

    assert!(store.update_profile("nobody", "X", "Y", "Z").is_none());
}

#[test]
fn category_names_are_unique_case_insensitively() {
    let store = create_test_store();

    assert!(matches!(
        store.add_category("Bahasa Inggris"),
        AddCategoryOutcome::Added
    ));
    assert!(matches!(
        store.add_category("bahasa inggris"),
        AddCategoryOutcome::DuplicateName
    ));
    assert!(matches!(store.add_category("   "), AddCategoryOutcome::EmptyName));
}

#[test]
fn categories_can_be_renamed_and_deleted() {
    let store = create_test_store();

    let id = store.categories()[0].id;
    store.rename_category(id, "Verbal Reasoning");
    assert_eq!(store.categories()[0].name, "Verbal Reasoning");

    // Empty rename is a no-op
    store.rename_category(id, "  ");
    assert_eq!(store.categories()[0].name, "Verbal Reasoning");

    let before = store.categories().len();
    store.delete_category(id);
    let categories = store.categories();
    assert_eq!(categories.len(), before - 1);
    assert!(categories.iter().all(|c| c.id != id));
}

#[test]
fn results_append_in_order() {
    let store = create_test_store();

    store.append_result(sample_result("budi", 3));
    store.append_result(sample_result("siti", 7));
    store.append_result(sample_result("budi", 9));

    let results = store.results();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].score_mc, 3);

    assert_eq!(store.result_by_index(1).unwrap().username, "siti");
    assert!(store.result_by_index(3).is_none());

    // Most recent attempt wins
    assert_eq!(store.latest_result_for("budi").unwrap().score_mc, 9);
    assert!(store.latest_result_for("nobody").is_none());
}

#[test]
fn data_survives_a_reopen() {
    let dir = test_data_dir();

    {
        let store = Store::open(&dir).unwrap();
        store.add_student("budi", "pw");
        store.add_category("Bahasa Inggris");
        store.append_result(sample_result("budi", 5));
        store.set_background("https://example.com/bg.png");
    }

    let reopened = Store::open(&dir).unwrap();
    assert!(reopened.find_user("budi").is_some());
    assert!(reopened
        .categories()
        .iter()
        .any(|c| c.name == "Bahasa Inggris"));
    assert_eq!(reopened.latest_result_for("budi").unwrap().score_mc, 5);
    assert_eq!(reopened.background(), "https://example.com/bg.png");
}

#[test]
fn malformed_slot_falls_back_to_defaults() {
    let dir = test_data_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("users.json"), "{ not json").unwrap();
    std::fs::write(dir.join("results.json"), "42").unwrap();

    let store = Store::open(&dir).unwrap();

    // Users reset to the seed admin, results to empty
    assert!(store
        .verify_login(names::DEFAULT_ADMIN_USERNAME, names::DEFAULT_ADMIN_PASSWORD)
        .is_some());
    assert!(store.results().is_empty());
}

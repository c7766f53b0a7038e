pub const LOGIN_URL: &str = "/login";
pub const LOGOUT_URL: &str = "/logout";
pub const PROFILE_URL: &str = "/profile";
pub const DASHBOARD_URL: &str = "/dashboard";
pub const START_TEST_URL: &str = "/start-test";
pub const TEST_URL: &str = "/test";
pub const SUBMIT_ANSWER_URL: &str = "/test/answer";
pub const ADVANCE_URL: &str = "/test/next";
pub const ABANDON_TEST_URL: &str = "/test/abandon";
pub const RESULTS_URL: &str = "/results";

pub const ADMIN_URL: &str = "/admin";
pub const ADMIN_USERS_URL: &str = "/admin/users";
pub const ADMIN_CATEGORIES_URL: &str = "/admin/categories";
pub const ADMIN_QUESTIONS_URL: &str = "/admin/questions";
pub const GENERATE_QUESTIONS_URL: &str = "/admin/questions/generate";
pub const REVIEW_QUESTIONS_URL: &str = "/admin/questions/review";
pub const APPROVE_QUESTIONS_URL: &str = "/admin/questions/approve";
pub const ADMIN_RESULTS_URL: &str = "/admin/results";
pub const ADMIN_BACKGROUND_URL: &str = "/admin/background";

pub fn rename_category_url(id: i64) -> String {
    format!("/admin/categories/{id}/rename")
}

pub fn delete_category_url(id: i64) -> String {
    format!("/admin/categories/{id}/delete")
}

pub fn result_detail_url(index: usize) -> String {
    format!("/admin/results/{index}")
}

pub const USER_SESSION_COOKIE_NAME: &str = "user_session";

/// Per-question time allowance for the quiz session countdown.
pub const QUESTION_TIME_LIMIT_SECS: u32 = 30;

pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 50;
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Seed categories written into a fresh store, matching the exam's
/// original section names.
pub const DEFAULT_CATEGORIES: &[&str] =
    &["Logika Verbal", "Matematika Dasar", "Penalaran Analitis"];

pub const STUDY_PROGRAMS: &[&str] = &["Sistem Informasi", "Teknik Informatika"];

pub mod layout;

mod admin;
mod auth;
mod quiz;
mod student;

use chrono::{DateTime, Utc};
use maud::Markup;

use crate::models::{Category, Question, Role, TestResult, User};
use crate::report::CategorySummary;
use crate::session::SessionView;

/// One row of the admin results recap.
pub struct RecapEntry {
    pub index: usize,
    pub display_name: String,
    pub date: DateTime<Utc>,
    pub score_mc: u32,
    pub total_mc: u32,
}

/// Everything the admin result-detail screen needs. `result.questions` may
/// still be absent for records written by an older data shape; the screen
/// shows a "data unavailable" notice in that case.
pub struct ResultDetail {
    pub result: TestResult,
    pub student: Option<User>,
}

/// The closed set of screens. Each variant carries exactly the data its
/// screen renders, so a screen cannot be reached without the state it needs.
pub enum Screen {
    Login {
        error: Option<&'static str>,
    },
    ProfileCompletion {
        user: User,
    },
    StudentDashboard {
        user: User,
    },
    StudentResults {
        outcome: Option<(TestResult, Vec<CategorySummary>)>,
    },
    AdminDashboard,
    UserManagement {
        students: Vec<User>,
        error: Option<&'static str>,
    },
    CategoryManagement {
        categories: Vec<Category>,
        error: Option<&'static str>,
    },
    QuestionConfig {
        categories: Vec<Category>,
        error: Option<&'static str>,
    },
    QuestionReview {
        questions: Vec<Question>,
    },
    ResultsRecap {
        entries: Vec<RecapEntry>,
    },
    ResultDetail {
        detail: ResultDetail,
    },
    BackgroundManagement {
        current: String,
    },
    QuizQuestion {
        view: SessionView,
    },
    QuizUnavailable {
        role: Role,
    },
}

impl Screen {
    fn title(&self) -> &'static str {
        match self {
            Screen::Login { .. } => "Login",
            Screen::ProfileCompletion { .. } => "Complete your profile",
            Screen::StudentDashboard { .. } => "Dashboard",
            Screen::StudentResults { .. } => "Your results",
            Screen::AdminDashboard => "Admin dashboard",
            Screen::UserManagement { .. } => "User management",
            Screen::CategoryManagement { .. } => "Category management",
            Screen::QuestionConfig { .. } => "Exam questions",
            Screen::QuestionReview { .. } => "Review questions",
            Screen::ResultsRecap { .. } => "Student results",
            Screen::ResultDetail { .. } => "Result detail",
            Screen::BackgroundManagement { .. } => "Background",
            Screen::QuizQuestion { .. } => "Test in progress",
            Screen::QuizUnavailable { .. } => "Test unavailable",
        }
    }
}

/// "A.", "B.", ... prefix for a multiple-choice option.
fn quiz_option_label(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("{letter}.")
}

fn screen_body(screen: Screen) -> Markup {
    match screen {
        Screen::Login { error } => auth::login(error),
        Screen::ProfileCompletion { user } => auth::profile_completion(&user),
        Screen::StudentDashboard { user } => student::dashboard(&user),
        Screen::StudentResults { outcome } => student::results(outcome),
        Screen::AdminDashboard => admin::dashboard(),
        Screen::UserManagement { students, error } => admin::users(&students, error),
        Screen::CategoryManagement { categories, error } => admin::categories(&categories, error),
        Screen::QuestionConfig { categories, error } => admin::question_config(&categories, error),
        Screen::QuestionReview { questions } => admin::question_review(&questions),
        Screen::ResultsRecap { entries } => admin::results_recap(&entries),
        Screen::ResultDetail { detail } => admin::result_detail(&detail),
        Screen::BackgroundManagement { current } => admin::background(&current),
        Screen::QuizQuestion { view } => quiz::question(&view),
        Screen::QuizUnavailable { role } => quiz::unavailable(role),
    }
}

/// Render a screen as a full page, with the configured background applied.
pub fn render(screen: Screen, background: Option<&str>) -> Markup {
    let title = screen.title();
    layout::page(title, screen_body(screen), background)
}

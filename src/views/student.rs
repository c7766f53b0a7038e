use maud::{html, Markup};

use crate::models::{TestResult, User};
use crate::names;
use crate::report::CategorySummary;

fn logout_button() -> Markup {
    html! {
        form."inline" method="post" action=(names::LOGOUT_URL) {
            button."secondary" type="submit" { "Log out" }
        }
    }
}

pub(super) fn dashboard(user: &User) -> Markup {
    html! {
        article {
            (logout_button())
            h2 { "Welcome, " (user.display_name()) "!" }
            div."profile-info" {
                p { strong { "Name: " } (user.full_name.as_deref().unwrap_or("-")) }
                p { strong { "Program: " } (user.study_program.as_deref().unwrap_or("-")) }
                p { strong { "Registration no.: " } (user.reg_number.as_deref().unwrap_or("-")) }
            }
            p { "You are ready to take the academic aptitude test." }
            form method="post" action=(names::START_TEST_URL) {
                button type="submit" { "Start the test" }
            }
        }
    }
}

pub(super) fn results(outcome: Option<(TestResult, Vec<CategorySummary>)>) -> Markup {
    let Some((result, breakdown)) = outcome else {
        return html! {
            article {
                p { "No result found." }
                a href=(names::DASHBOARD_URL) { "Back to dashboard" }
            }
        };
    };

    html! {
        article {
            h2 { "Your test results" }
            div."results-summary" {
                h4 { "Multiple-choice score: " (result.score_mc) " / " (result.total_mc) }
                @for section in &breakdown {
                    @if section.total > 0 {
                        div."result-section-item" {
                            strong { (section.category) ": " }
                            (section.correct) " of " (section.total) " correct"
                        }
                    }
                }
            }
            p { "Your essay answers have been submitted for manual grading." }
            a href=(names::DASHBOARD_URL) { "Back to dashboard" }
        }
    }
}

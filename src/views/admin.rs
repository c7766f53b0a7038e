use maud::{html, Markup};

use crate::models::{AnswerValue, Category, Question, User};
use crate::names;

use super::{RecapEntry, ResultDetail};

fn back_link(href: &str) -> Markup {
    html! {
        a."button-back" href=(href) { "\u{2190} Back" }
    }
}

pub(super) fn dashboard() -> Markup {
    html! {
        article {
            form."inline" method="post" action=(names::LOGOUT_URL) {
                button."secondary" type="submit" { "Log out" }
            }
            h2 { "Admin dashboard" }
            div."dashboard-grid" {
                a."action-card" href=(names::ADMIN_RESULTS_URL) {
                    h3 { "Student results" }
                    p { "Review test results for all students." }
                }
                a."action-card" href=(names::ADMIN_CATEGORIES_URL) {
                    h3 { "Question categories" }
                    p { "Add, rename, or delete question categories." }
                }
                a."action-card" href=(names::ADMIN_QUESTIONS_URL) {
                    h3 { "Exam questions" }
                    p { "Generate a new question set for the exam." }
                }
                a."action-card" href=(names::ADMIN_USERS_URL) {
                    h3 { "User management" }
                    p { "Add or review student accounts." }
                }
                a."action-card" href=(names::ADMIN_BACKGROUND_URL) {
                    h3 { "Background" }
                    p { "Change the site background image." }
                }
            }
        }
    }
}

pub(super) fn users(students: &[User], error: Option<&'static str>) -> Markup {
    html! {
        article {
            (back_link(names::ADMIN_URL))
            h2 { "User management" }
            div."two-column" {
                div {
                    h3 { "Students" }
                    ul {
                        @for student in students {
                            li { (student.username) }
                        }
                        @if students.is_empty() {
                            li."muted" { "No student accounts yet." }
                        }
                    }
                }
                div {
                    h3 { "Add a student" }
                    form method="post" action=(names::ADMIN_USERS_URL) {
                        label {
                            "Username"
                            input type="text" name="username" required;
                        }
                        label {
                            "Password"
                            input type="password" name="password" required;
                        }
                        @if let Some(error) = error {
                            p."error-message" { (error) }
                        }
                        button type="submit" { "Add" }
                    }
                }
            }
        }
    }
}

pub(super) fn categories(categories: &[Category], error: Option<&'static str>) -> Markup {
    html! {
        article {
            (back_link(names::ADMIN_URL))
            h2 { "Question categories" }
            div."two-column" {
                div {
                    h3 { "Categories" }
                    ul."category-list" {
                        @for category in categories {
                            li {
                                span { (category.name) }
                                form."inline" method="post" action=(names::rename_category_url(category.id)) {
                                    input type="text" name="name" placeholder="New name" required;
                                    button."secondary" type="submit" { "Rename" }
                                }
                                form."inline" method="post" action=(names::delete_category_url(category.id)) {
                                    button."outline" type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
                div {
                    h3 { "Add a category" }
                    form method="post" action=(names::ADMIN_CATEGORIES_URL) {
                        label {
                            "Category name"
                            input type="text" name="name" required;
                        }
                        @if let Some(error) = error {
                            p."error-message" { (error) }
                        }
                        button type="submit" { "Add" }
                    }
                }
            }
        }
    }
}

pub(super) fn question_config(categories: &[Category], error: Option<&'static str>) -> Markup {
    html! {
        article {
            (back_link(names::ADMIN_URL))
            h2 { "Exam question configuration" }
            p { "Set how many questions to generate per category. Set a category to 0 to skip it." }
            form method="post" action=(names::GENERATE_QUESTIONS_URL) {
                @for category in categories {
                    div."config-row" {
                        span."config-category" { (category.name) }
                        label {
                            "Count"
                            input type="number"
                                  name=(format!("count_{}", category.id))
                                  min="0"
                                  max=(names::MAX_QUESTION_COUNT)
                                  value=(names::DEFAULT_QUESTION_COUNT);
                        }
                        label {
                            "Type"
                            select name=(format!("type_{}", category.id)) {
                                option value="multiple-choice" { "Multiple choice" }
                                option value="essay" { "Essay" }
                            }
                        }
                    }
                }
                @if let Some(error) = error {
                    p."error-message" { (error) }
                }
                button type="submit" { "Generate questions" }
            }
        }
    }
}

pub(super) fn question_review(questions: &[Question]) -> Markup {
    // Group by category in first-seen order for display.
    let mut sections: Vec<(&str, Vec<&Question>)> = Vec::new();
    for question in questions {
        match sections.iter_mut().find(|(c, _)| *c == question.category) {
            Some((_, list)) => list.push(question),
            None => sections.push((&question.category, vec![question])),
        }
    }

    html! {
        article {
            h2 { "Review generated questions" }
            div."question-review" {
                @for (category, section_questions) in &sections {
                    div."section-review" {
                        h3 { (category) }
                        @for (number, question) in section_questions.iter().enumerate() {
                            div."question-item" {
                                p { strong { "Question " (number + 1) ": " } (question.question) }
                                @if let Some(options) = question.options.as_ref().filter(|o| !o.is_empty()) {
                                    ul {
                                        @for (index, option) in options.iter().enumerate() {
                                            li."correct"[question.correct_answer_index == Some(index)] {
                                                (super::quiz_option_label(index)) " " (option)
                                            }
                                        }
                                    }
                                } @else {
                                    p."muted" { "Essay question" }
                                }
                            }
                        }
                    }
                }
            }
            div."button-group" {
                form."inline" method="post" action=(names::APPROVE_QUESTIONS_URL) {
                    button type="submit" { "Approve and publish for students" }
                }
                a."button-secondary" href=(names::ADMIN_QUESTIONS_URL) { "Regenerate" }
            }
        }
    }
}

pub(super) fn results_recap(entries: &[RecapEntry]) -> Markup {
    html! {
        article {
            (back_link(names::ADMIN_URL))
            h2 { "Student results" }
            @if entries.is_empty() {
                p { "No test results yet." }
            } @else {
                ul."results-list" {
                    @for entry in entries {
                        li {
                            a href=(names::result_detail_url(entry.index)) {
                                span {
                                    strong { (entry.display_name) }
                                    " (" (entry.date.format("%Y-%m-%d %H:%M")) ")"
                                }
                                span { "Score: " (entry.score_mc) "/" (entry.total_mc) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn result_detail(detail: &ResultDetail) -> Markup {
    let result = &detail.result;
    let display_name = detail
        .student
        .as_ref()
        .map(|s| s.display_name().to_owned())
        .unwrap_or_else(|| result.username.clone());

    let Some(questions) = &result.questions else {
        // Older records were written without a question snapshot.
        return html! {
            article {
                (back_link(names::ADMIN_RESULTS_URL))
                h2 { "Result detail" }
                p."error-message" {
                    "The question data for this result is unavailable. \
                     It may have been recorded by an older version of the application."
                }
            }
        };
    };

    html! {
        article {
            (back_link(names::ADMIN_RESULTS_URL))
            h2 { "Result detail for " (display_name) }
            div."profile-info" {
                @if let Some(student) = &detail.student {
                    p { strong { "Name: " } (student.full_name.as_deref().unwrap_or("-")) }
                    p { strong { "Program: " } (student.study_program.as_deref().unwrap_or("-")) }
                    p { strong { "Registration no.: " } (student.reg_number.as_deref().unwrap_or("-")) }
                }
                p { strong { "Test time: " } (result.date.format("%Y-%m-%d %H:%M")) }
                p { strong { "Multiple-choice score: " } (result.score_mc) "/" (result.total_mc) }
            }
            div."question-review" {
                @for (index, question) in questions.iter().enumerate() {
                    @let answer = result.answers.iter().find(|a| a.question_index == index);
                    div."question-item" {
                        p {
                            strong { (index + 1) ". (" (question.category) ") " }
                            (question.question)
                        }
                        @if let Some(options) = question.options.as_ref().filter(|o| !o.is_empty()) {
                            ul {
                                @for (opt_index, option) in options.iter().enumerate() {
                                    @let is_correct = question.correct_answer_index == Some(opt_index);
                                    @let is_selected = matches!(
                                        answer.map(|a| &a.answer),
                                        Some(AnswerValue::Choice(i)) if *i == opt_index
                                    );
                                    li."correct-selected"[is_correct && is_selected]
                                       ."correct"[is_correct && !is_selected]
                                       ."incorrect"[!is_correct && is_selected] {
                                        (super::quiz_option_label(opt_index)) " " (option)
                                    }
                                }
                            }
                        } @else {
                            div."answer-user" {
                                p { strong { "Student's answer:" } }
                                @match answer.map(|a| &a.answer) {
                                    Some(AnswerValue::Text(text)) => { p { (text) } }
                                    _ => { p."muted" { "(not answered)" } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn background(current: &str) -> Markup {
    html! {
        article {
            (back_link(names::ADMIN_URL))
            h2 { "Site background" }
            form method="post" action=(names::ADMIN_BACKGROUND_URL) {
                label {
                    "Background image URL"
                    input type="url"
                          name="url"
                          placeholder="https://example.com/image.jpg"
                          value=(current);
                }
                div."button-group" {
                    button type="submit" { "Save" }
                    button."secondary" type="submit" name="clear" value="1" { "Remove background" }
                }
            }
        }
    }
}

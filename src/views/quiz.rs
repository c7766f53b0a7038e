use maud::{html, Markup, PreEscaped};

use crate::models::{AnswerValue, Role};
use crate::names;
use crate::session::SessionView;

pub(super) fn question(view: &SessionView) -> Markup {
    let number = view.question_index + 1;
    let progress = (number * 100) / view.question_count;
    let is_last = number == view.question_count;

    let selected_option = match &view.current_answer {
        Some(AnswerValue::Choice(i)) => Some(*i),
        _ => None,
    };
    let essay_text = match &view.current_answer {
        Some(AnswerValue::Text(text)) => text.as_str(),
        _ => "",
    };

    html! {
        article."quiz-card" {
            div."quiz-header" {
                span { "Question " (number) " of " (view.question_count) }
                span."timer" { "Time left: " span #remaining { (view.remaining_seconds) } "s" }
            }
            div."progress-bar" { div style=(format!("width: {progress}%")) {} }
            h3."section-title" { (view.question.category) }
            p."question-text" { (view.question.question) }

            @if let Some(options) = view.question.options.as_ref().filter(|o| !o.is_empty()) {
                form method="post" action=(names::SUBMIT_ANSWER_URL) {
                    div."options-container" {
                        @for (index, option) in options.iter().enumerate() {
                            label."option" {
                                input type="radio"
                                      name="option"
                                      value=(index)
                                      checked[selected_option == Some(index)];
                                (super::quiz_option_label(index)) " " (option)
                            }
                        }
                    }
                    button."secondary" type="submit" { "Save answer" }
                }
            } @else {
                form method="post" action=(names::SUBMIT_ANSWER_URL) {
                    textarea."essay-input" name="text" placeholder="Type your essay answer here..." {
                        (essay_text)
                    }
                    button."secondary" type="submit" { "Save answer" }
                }
            }

            form method="post" action=(names::ADVANCE_URL) {
                button type="submit" {
                    @if is_last { "Finish test" } @else { "Next question" }
                }
            }
            form method="post" action=(names::ABANDON_TEST_URL) {
                button."outline" type="submit" { "Abandon test" }
            }

            // Mirror the server-side countdown for display; the server
            // advances the session on its own when time runs out.
            script {
                (PreEscaped(
                    "(function(){var el=document.getElementById('remaining');\
                     var t=parseInt(el.textContent,10);\
                     var iv=setInterval(function(){t-=1;\
                     if(t<=0){clearInterval(iv);location.reload();return;}\
                     el.textContent=t;},1000);})();"
                ))
            }
        }
    }
}

pub(super) fn unavailable(role: Role) -> Markup {
    let back = match role {
        Role::Admin => names::ADMIN_URL,
        Role::Student => names::DASHBOARD_URL,
    };
    html! {
        article {
            h2 { "Test unavailable" }
            p { "The administrator has not prepared questions for this test yet." }
            a href=(back) { "Back to dashboard" }
        }
    }
}

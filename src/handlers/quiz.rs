use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::{
    extractors::AuthGuard,
    models::{AnswerValue, Role},
    names,
    rejections::AppError,
    views::Screen,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::TEST_URL, get(test_page))
        .route(names::SUBMIT_ANSWER_URL, post(submit_answer))
        .route(names::ADVANCE_URL, post(advance))
        .route(names::ABANDON_TEST_URL, post(abandon))
}

async fn test_page(State(state): State<AppState>, AuthGuard(user): AuthGuard) -> Response {
    // A countdown-driven completion leaves a finished session behind; the
    // result is already persisted, so just clean up and show it.
    if state.sessions.finish_if_completed(&user.username) {
        return Redirect::to(names::RESULTS_URL).into_response();
    }

    match state.sessions.view(&user.username) {
        Some(view) => super::render(&state, Screen::QuizQuestion { view }).into_response(),
        None => super::render(&state, Screen::QuizUnavailable { role: user.role }).into_response(),
    }
}

#[derive(Deserialize)]
struct AnswerForm {
    option: Option<usize>,
    text: Option<String>,
}

async fn submit_answer(
    State(state): State<AppState>,
    AuthGuard(user): AuthGuard,
    Form(body): Form<AnswerForm>,
) -> Result<Redirect, AppError> {
    let value = match (body.option, body.text) {
        (Some(index), _) => AnswerValue::Choice(index),
        (None, Some(text)) => AnswerValue::Text(text),
        (None, None) => return Err(AppError::Input("no answer provided")),
    };

    state.sessions.submit_answer(&user.username, value);
    Ok(Redirect::to(names::TEST_URL))
}

async fn advance(State(state): State<AppState>, AuthGuard(user): AuthGuard) -> Redirect {
    if state.sessions.advance(&user.username, &state.store) {
        Redirect::to(names::RESULTS_URL)
    } else {
        Redirect::to(names::TEST_URL)
    }
}

async fn abandon(State(state): State<AppState>, AuthGuard(user): AuthGuard) -> Redirect {
    state.sessions.abandon(&user.username);
    match user.role {
        Role::Admin => Redirect::to(names::ADMIN_URL),
        Role::Student => Redirect::to(names::DASHBOARD_URL),
    }
}

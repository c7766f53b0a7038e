use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};

use crate::{
    extractors::AuthGuard, models::Role, names, report, views::Screen, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::DASHBOARD_URL, get(dashboard))
        .route(names::START_TEST_URL, post(start_test))
        .route(names::RESULTS_URL, get(results))
}

async fn dashboard(State(state): State<AppState>, AuthGuard(user): AuthGuard) -> Response {
    if user.role == Role::Admin {
        return Redirect::to(names::ADMIN_URL).into_response();
    }
    if !user.profile_complete() {
        return Redirect::to(names::PROFILE_URL).into_response();
    }
    super::render(&state, Screen::StudentDashboard { user }).into_response()
}

/// Seed a quiz session from the approved question set. An empty set means
/// the admin has not prepared the test; the session never starts.
async fn start_test(State(state): State<AppState>, AuthGuard(user): AuthGuard) -> Response {
    let questions = state.bank.active();
    match state.sessions.start(&user.username, questions, &state.store) {
        Ok(()) => Redirect::to(names::TEST_URL).into_response(),
        Err(_unavailable) => {
            super::render(&state, Screen::QuizUnavailable { role: user.role }).into_response()
        }
    }
}

async fn results(State(state): State<AppState>, AuthGuard(user): AuthGuard) -> Response {
    let outcome = state
        .store
        .latest_result_for(&user.username)
        .map(|result| {
            let breakdown = report::category_breakdown(&result);
            (result, breakdown)
        });
    super::render(&state, Screen::StudentResults { outcome }).into_response()
}

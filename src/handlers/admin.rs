use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::{
    extractors::AdminGuard,
    names,
    rejections::{AppError, OptionExt},
    services::generate,
    store::{AddCategoryOutcome, AddUserOutcome},
    views::{RecapEntry, ResultDetail, Screen},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ADMIN_URL, get(dashboard))
        .route(names::ADMIN_USERS_URL, get(users_page).post(add_user))
        .route(
            names::ADMIN_CATEGORIES_URL,
            get(categories_page).post(add_category),
        )
        .route("/admin/categories/{id}/rename", post(rename_category))
        .route("/admin/categories/{id}/delete", post(delete_category))
        .route(names::ADMIN_QUESTIONS_URL, get(question_config_page))
        .route(names::GENERATE_QUESTIONS_URL, post(generate_questions))
        .route(names::REVIEW_QUESTIONS_URL, get(review_page))
        .route(names::APPROVE_QUESTIONS_URL, post(approve_questions))
        .route(names::ADMIN_RESULTS_URL, get(results_recap))
        .route("/admin/results/{index}", get(result_detail))
        .route(
            names::ADMIN_BACKGROUND_URL,
            get(background_page).post(set_background),
        )
}

async fn dashboard(State(state): State<AppState>, AdminGuard(_user): AdminGuard) -> Response {
    super::render(&state, Screen::AdminDashboard).into_response()
}

// --- User management ---

async fn users_page(State(state): State<AppState>, AdminGuard(_user): AdminGuard) -> Response {
    super::render(
        &state,
        Screen::UserManagement {
            students: state.store.list_students(),
            error: None,
        },
    )
    .into_response()
}

#[derive(Deserialize)]
struct AddUserForm {
    username: String,
    password: String,
}

async fn add_user(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
    Form(body): Form<AddUserForm>,
) -> Response {
    match state.store.add_student(body.username.trim(), &body.password) {
        AddUserOutcome::Added => Redirect::to(names::ADMIN_USERS_URL).into_response(),
        AddUserOutcome::DuplicateUsername => super::render(
            &state,
            Screen::UserManagement {
                students: state.store.list_students(),
                error: Some("That username already exists."),
            },
        )
        .into_response(),
    }
}

// --- Category management ---

async fn categories_page(State(state): State<AppState>, AdminGuard(_user): AdminGuard) -> Response {
    super::render(
        &state,
        Screen::CategoryManagement {
            categories: state.store.categories(),
            error: None,
        },
    )
    .into_response()
}

#[derive(Deserialize)]
struct CategoryForm {
    name: String,
}

async fn add_category(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
    Form(body): Form<CategoryForm>,
) -> Response {
    let error = match state.store.add_category(&body.name) {
        AddCategoryOutcome::Added => return Redirect::to(names::ADMIN_CATEGORIES_URL).into_response(),
        AddCategoryOutcome::DuplicateName => "A category with that name already exists.",
        AddCategoryOutcome::EmptyName => "Category name cannot be empty.",
    };
    super::render(
        &state,
        Screen::CategoryManagement {
            categories: state.store.categories(),
            error: Some(error),
        },
    )
    .into_response()
}

async fn rename_category(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
    Path(id): Path<i64>,
    Form(body): Form<CategoryForm>,
) -> Redirect {
    state.store.rename_category(id, &body.name);
    Redirect::to(names::ADMIN_CATEGORIES_URL)
}

async fn delete_category(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
    Path(id): Path<i64>,
) -> Redirect {
    state.store.delete_category(id);
    Redirect::to(names::ADMIN_CATEGORIES_URL)
}

// --- Question generation ---

async fn question_config_page(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
) -> Response {
    super::render(
        &state,
        Screen::QuestionConfig {
            categories: state.store.categories(),
            error: None,
        },
    )
    .into_response()
}

fn config_error(state: &AppState, error: &'static str) -> Response {
    super::render(
        state,
        Screen::QuestionConfig {
            categories: state.store.categories(),
            error: Some(error),
        },
    )
    .into_response()
}

/// One generation attempt. On failure the admin lands back on the
/// configuration screen with a generic message and nothing retained.
async fn generate_questions(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
    Form(body): Form<HashMap<String, String>>,
) -> Response {
    let requests = generate::prepare_requests(&state.store.categories(), &body);
    if requests.is_empty() {
        return config_error(&state, "Configure at least one category with a question count.");
    }

    match generate::generate_question_set(state.generator.as_ref(), requests).await {
        Ok(questions) if !questions.is_empty() => {
            state.bank.set_pending(questions);
            Redirect::to(names::REVIEW_QUESTIONS_URL).into_response()
        }
        Ok(_) | Err(_) => config_error(&state, "Could not generate questions. Please try again."),
    }
}

async fn review_page(State(state): State<AppState>, AdminGuard(_user): AdminGuard) -> Response {
    let questions = state.bank.pending();
    if questions.is_empty() {
        return Redirect::to(names::ADMIN_QUESTIONS_URL).into_response();
    }
    super::render(&state, Screen::QuestionReview { questions }).into_response()
}

async fn approve_questions(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
) -> Redirect {
    if state.bank.approve() {
        Redirect::to(names::ADMIN_URL)
    } else {
        Redirect::to(names::ADMIN_QUESTIONS_URL)
    }
}

// --- Result review ---

async fn results_recap(State(state): State<AppState>, AdminGuard(_user): AdminGuard) -> Response {
    let entries = state
        .store
        .results()
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            let display_name = state
                .store
                .find_user(&result.username)
                .map(|u| u.display_name().to_owned())
                .unwrap_or_else(|| result.username.clone());
            RecapEntry {
                index,
                display_name,
                date: result.date,
                score_mc: result.score_mc,
                total_mc: result.total_mc,
            }
        })
        .collect();

    super::render(&state, Screen::ResultsRecap { entries }).into_response()
}

async fn result_detail(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
    Path(index): Path<usize>,
) -> Result<Response, AppError> {
    let result = state.store.result_by_index(index).or_not_found()?;
    let student = state.store.find_user(&result.username);

    Ok(super::render(
        &state,
        Screen::ResultDetail {
            detail: ResultDetail { result, student },
        },
    )
    .into_response())
}

// --- Background management ---

async fn background_page(State(state): State<AppState>, AdminGuard(_user): AdminGuard) -> Response {
    super::render(
        &state,
        Screen::BackgroundManagement {
            current: state.store.background(),
        },
    )
    .into_response()
}

#[derive(Deserialize)]
struct BackgroundForm {
    #[serde(default)]
    url: String,
    #[serde(default)]
    clear: Option<String>,
}

async fn set_background(
    State(state): State<AppState>,
    AdminGuard(_user): AdminGuard,
    Form(body): Form<BackgroundForm>,
) -> Redirect {
    let url = if body.clear.is_some() { "" } else { body.url.trim() };
    state.store.set_background(url);
    Redirect::to(names::ADMIN_BACKGROUND_URL)
}

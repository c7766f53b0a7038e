use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::{
    extractors::{AuthGuard, SessionToken},
    models::Role,
    names,
    rejections::{AppError, ResultExt},
    services::auth::LoginOutcome,
    utils,
    views::Screen,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route(names::LOGIN_URL, post(login_post))
        .route(names::LOGOUT_URL, post(logout_post))
        .route(names::PROFILE_URL, get(profile_page).post(profile_post))
}

/// Landing page: the login screen, or straight to the right dashboard when
/// a session cookie is already valid.
async fn index(State(state): State<AppState>, SessionToken(token): SessionToken) -> Response {
    let user = token
        .and_then(|t| state.auth.username_for(&t))
        .and_then(|username| state.store.find_user(&username));

    match user {
        Some(user) => match user.role {
            Role::Admin => Redirect::to(names::ADMIN_URL).into_response(),
            Role::Student if !user.profile_complete() => {
                Redirect::to(names::PROFILE_URL).into_response()
            }
            Role::Student => Redirect::to(names::DASHBOARD_URL).into_response(),
        },
        None => super::render(&state, Screen::Login { error: None }).into_response(),
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login_post(
    State(state): State<AppState>,
    Form(body): Form<LoginForm>,
) -> Result<Response, AppError> {
    let (token, destination) = match state.auth.login(&state.store, &body.username, &body.password)
    {
        LoginOutcome::Admin(token) => (token, names::ADMIN_URL),
        LoginOutcome::Student(token) => (token, names::DASHBOARD_URL),
        LoginOutcome::ProfileIncomplete(token) => (token, names::PROFILE_URL),
        LoginOutcome::InvalidCredentials => {
            let page = super::render(
                &state,
                Screen::Login {
                    error: Some("Incorrect username or password."),
                },
            );
            return Ok(page.into_response());
        }
    };

    let cookie = utils::cookie(names::USER_SESSION_COOKIE_NAME, &token, state.secure_cookies);
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie.parse().reject("could not build cookie")?);

    Ok((headers, Redirect::to(destination)).into_response())
}

async fn logout_post(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Response {
    if let Some(token) = token {
        // Navigating away tears down any quiz session and its countdown.
        if let Some(username) = state.auth.username_for(&token) {
            state.sessions.abandon(&username);
        }
        state.auth.logout(&token);
    }

    let cookie = utils::clear_cookie(names::USER_SESSION_COOKIE_NAME, state.secure_cookies);
    let mut headers = HeaderMap::new();
    if let Ok(value) = cookie.parse() {
        headers.insert(SET_COOKIE, value);
    }

    (headers, Redirect::to("/")).into_response()
}

async fn profile_page(State(state): State<AppState>, AuthGuard(user): AuthGuard) -> Response {
    if user.role == Role::Admin {
        return Redirect::to(names::ADMIN_URL).into_response();
    }
    super::render(&state, Screen::ProfileCompletion { user }).into_response()
}

#[derive(Deserialize)]
struct ProfileForm {
    full_name: String,
    study_program: String,
    reg_number: String,
}

async fn profile_post(
    State(state): State<AppState>,
    AuthGuard(user): AuthGuard,
    Form(body): Form<ProfileForm>,
) -> Result<Redirect, AppError> {
    state
        .store
        .update_profile(
            &user.username,
            body.full_name.trim(),
            &body.study_program,
            body.reg_number.trim(),
        )
        .ok_or(AppError::NotFound)?;

    Ok(Redirect::to(names::DASHBOARD_URL))
}

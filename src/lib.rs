pub mod bank;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod report;
pub mod services;
pub mod session;
pub mod statics;
pub mod store;
pub mod utils;
pub mod views;

use std::sync::Arc;

use axum::{middleware, Router};

use crate::services::generate::GeminiGenerator;

#[derive(Clone)]
pub struct AppState {
    pub store: store::Store,
    pub auth: services::auth::AuthSessions,
    pub sessions: session::SessionRegistry,
    pub bank: bank::QuestionBank,
    pub generator: Arc<GeminiGenerator>,
    pub secure_cookies: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::auth::routes())
        .merge(handlers::student::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::admin::routes())
        .layer(middleware::from_fn(cross_site_check))
        .nest("/static", statics::routes())
        .with_state(state)
}

/// Reject state-changing requests issued from another site. All forms in the
/// app post same-origin, so a cross-site `Sec-Fetch-Site` is never legitimate.
async fn cross_site_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let cross_site = req
            .headers()
            .get("Sec-Fetch-Site")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "cross-site");

        if cross_site {
            return (StatusCode::FORBIDDEN, "cross-site request rejected").into_response();
        }
    }

    next.run(req).await
}

pub mod auth;
pub mod dashboard;

use askama::Template;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;

use crate::models::Role;
use crate::session::Session;
use crate::state::SharedState;

/// The screen a visitor lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    SignUp,
    Login,
    Dashboard(Role),
}

impl Screen {
    /// A live session always wins; otherwise the `page` menu choice picks
    /// between the public screens.
    pub fn resolve(session: Option<&Session>, page: Option<&str>) -> Screen {
        if let Some(session) = session {
            return Screen::Dashboard(session.role);
        }
        match page {
            Some("signup") => Screen::SignUp,
            Some("login") => Screen::Login,
            _ => Screen::Home,
        }
    }
}

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        // Public screens
        .route("/", get(auth::home))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Dashboards
        .route("/dashboard", get(dashboard::index))
        .route("/leave", post(dashboard::submit_leave))
        .route("/leave/{id}/approve", post(dashboard::approve))
        .route("/leave/{id}/reject", post(dashboard::reject))
}

pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render failed: {e}");
        String::new()
    }))
}

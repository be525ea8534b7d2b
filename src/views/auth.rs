use askama::Template;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::accounts::{self, NewAccount};
use crate::auth::extractor::current_session;
use crate::error::AppError;
use crate::models::{ManagerOption, Role};
use crate::session::SESSION_COOKIE;
use crate::state::SharedState;
use crate::views::{render, Screen};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[derive(Template)]
#[template(path = "auth/signup.html")]
struct SignupTemplate {
    error: Option<String>,
    name: String,
    email: String,
    is_manager: bool,
    managers: Vec<ManagerChoice>,
}

struct ManagerChoice {
    id: i64,
    name: String,
    selected: bool,
}

fn manager_choices(managers: Vec<ManagerOption>, selected: Option<i64>) -> Vec<ManagerChoice> {
    managers
        .into_iter()
        .map(|m| ManagerChoice {
            selected: selected == Some(m.id),
            id: m.id,
            name: m.name,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    error: Option<String>,
    notice: Option<String>,
    email: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
    pub manager_id: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn home(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(q): Query<PageQuery>,
) -> Result<Response, AppError> {
    let session = current_session(&jar, &state).await?;
    show(&state, Screen::resolve(session.as_ref(), q.page.as_deref())).await
}

pub async fn signup_page(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session = current_session(&jar, &state).await?;
    show(&state, Screen::resolve(session.as_ref(), Some("signup"))).await
}

pub async fn login_page(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let session = current_session(&jar, &state).await?;
    show(&state, Screen::resolve(session.as_ref(), Some("login"))).await
}

async fn show(state: &SharedState, screen: Screen) -> Result<Response, AppError> {
    match screen {
        Screen::Home => Ok(render(&HomeTemplate).into_response()),
        Screen::SignUp => {
            let template = SignupTemplate {
                error: None,
                name: String::new(),
                email: String::new(),
                is_manager: false,
                managers: manager_choices(accounts::list_managers(&state.pool).await?, None),
            };
            Ok(render(&template).into_response())
        }
        Screen::Login => Ok(render(&LoginTemplate {
            error: None,
            notice: None,
            email: String::new(),
        })
        .into_response()),
        Screen::Dashboard(_) => Ok(Redirect::to("/dashboard").into_response()),
    }
}

pub async fn signup(
    State(state): State<SharedState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let role = parse_role(form.role.as_deref());
    let is_manager = matches!(role, Ok(Role::Manager));
    let result = match (role, parse_manager_id(form.manager_id.as_deref())) {
        (Err(e), _) | (_, Err(e)) => Err(e),
        (Ok(role), Ok(manager_id)) => {
            accounts::signup(
                &state.pool,
                NewAccount {
                    name: form.name.clone(),
                    email: form.email.clone(),
                    password: form.password,
                    role,
                    manager_id,
                },
            )
            .await
        }
    };

    match result {
        Ok(user) => {
            let template = LoginTemplate {
                error: None,
                notice: Some("You have successfully signed up! Please log in.".to_string()),
                email: user.email,
            };
            Ok((StatusCode::CREATED, render(&template)).into_response())
        }
        Err(err) => {
            let template = SignupTemplate {
                error: Some(err.public_message()),
                name: form.name,
                email: form.email,
                is_manager,
                managers: manager_choices(
                    accounts::list_managers(&state.pool).await?,
                    form.manager_id.as_deref().and_then(|s| s.trim().parse().ok()),
                ),
            };
            Ok((err.status(), render(&template)).into_response())
        }
    }
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match accounts::login(&state.pool, &form.email, &form.password).await {
        Ok(session) => {
            // Replace any session this browser already held.
            if let Some(old) = jar.get(SESSION_COOKIE) {
                state.sessions.remove(old.value());
            }
            let token = state.sessions.create(session);
            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .secure(state.config.secure_cookies)
                .same_site(SameSite::Lax)
                .build();
            Ok((jar.add(cookie), Redirect::to("/dashboard")).into_response())
        }
        Err(err) => {
            let template = LoginTemplate {
                error: Some(err.public_message()),
                notice: None,
                email: form.email,
            };
            Ok((err.status(), render(&template)).into_response())
        }
    }
}

/// Clear the session before responding, then land on the login screen.
pub async fn logout(State(state): State<SharedState>, jar: CookieJar) -> impl IntoResponse {
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, Redirect::to("/login"));
    };

    if state.sessions.remove(&token) {
        tracing::info!("user logged out");
    }
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));
    (jar, Redirect::to("/login"))
}

fn parse_role(raw: Option<&str>) -> Result<Role, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Err(AppError::Validation("Please select a role.".to_string())),
        Some(s) => s.parse().map_err(AppError::Validation),
    }
}

fn parse_manager_id(raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AppError::Validation("Invalid manager selection".to_string())),
    }
}

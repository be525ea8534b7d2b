#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::{Client, StatusCode};
use sqlx::SqlitePool;
use tempfile::TempDir;

use leavedesk::accounts::{self, NewAccount};
use leavedesk::config::Config;
use leavedesk::db;
use leavedesk::models::{Role, User};
use leavedesk::session::SESSION_COOKIE;
use leavedesk::state::SharedState;

pub const PASSWORD: &str = "password123";

/// A running test server backed by its own SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
    pub state: SharedState,
    _dir: TempDir,
}

/// A plain HTTP response with the bits the tests look at.
pub struct Page {
    pub status: StatusCode,
    pub body: String,
    pub location: Option<String>,
    pub set_cookies: Vec<String>,
}

impl Page {
    /// The session token from a `Set-Cookie` header, if one was issued.
    pub fn session_token(&self) -> Option<String> {
        self.set_cookies.iter().find_map(|c| {
            let pair = c.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            (name.trim() == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn read(resp: reqwest::Response) -> Page {
        let status = resp.status();
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let set_cookies = resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = resp.text().await.unwrap_or_default();
        Page {
            status,
            body,
            location,
            set_cookies,
        }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Page {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
        }
        Self::read(req.send().await.expect("get request failed")).await
    }

    pub async fn post_form(&self, path: &str, token: Option<&str>, form: &[(&str, &str)]) -> Page {
        let mut req = self.client.post(self.url(path)).form(form);
        if let Some(token) = token {
            req = req.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
        }
        Self::read(req.send().await.expect("post request failed")).await
    }

    /// Sign up through the form.
    pub async fn signup(&self, name: &str, email: &str, role: &str, manager_id: Option<i64>) -> Page {
        let manager = manager_id.map(|id| id.to_string()).unwrap_or_default();
        self.post_form(
            "/signup",
            None,
            &[
                ("name", name),
                ("email", email),
                ("password", PASSWORD),
                ("role", role),
                ("manager_id", &manager),
            ],
        )
        .await
    }

    /// Log in through the form and return the session token.
    pub async fn login(&self, email: &str) -> String {
        let page = self
            .post_form("/login", None, &[("email", email), ("password", PASSWORD)])
            .await;
        assert_eq!(page.status, StatusCode::SEE_OTHER, "login failed: {}", page.body);
        page.session_token().expect("login set no session cookie")
    }

    pub async fn user_by_email(&self, email: &str) -> User {
        db::users::find_by_email(&self.pool, email)
            .await
            .unwrap()
            .expect("user not found")
    }
}

/// Open a fresh, initialized store in a temp dir.
pub async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite:{}", dir.path().join("leave_management.db").display());
    let pool = db::connect(&url, Duration::from_secs(5))
        .await
        .expect("Failed to open test database");
    db::init(&pool).await.expect("Failed to create schema");
    (dir, pool)
}

pub async fn create_manager(pool: &SqlitePool, name: &str, email: &str) -> User {
    accounts::signup(
        pool,
        NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            role: Role::Manager,
            manager_id: None,
        },
    )
    .await
    .expect("manager signup failed")
}

pub async fn create_employee(pool: &SqlitePool, name: &str, email: &str, manager_id: i64) -> User {
    accounts::signup(
        pool,
        NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            role: Role::Employee,
            manager_id: Some(manager_id),
        },
    )
    .await
    .expect("employee signup failed")
}

/// Spawn the app on a random port over a fresh store.
pub async fn spawn_app() -> TestApp {
    let (dir, pool) = test_pool().await;

    let config = Config {
        database_url: format!("sqlite:{}", dir.path().join("leave_management.db").display()),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        db_timeout: Duration::from_secs(5),
        request_timeout: Duration::from_secs(30),
        max_body_size: 65_536,
        secure_cookies: false,
    };

    let (app, state) = leavedesk::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        state,
        _dir: dir,
    }
}

mod common;

use chrono::{Local, NaiveDate};
use reqwest::StatusCode;

use leavedesk::maintenance;
use leavedesk::models::LeaveStatus;

// ── Health & public screens ─────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let page = app.get("/health", None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body, "ok");
}

#[tokio::test]
async fn home_menu_selects_public_screen() {
    let app = common::spawn_app().await;

    let home = app.get("/", None).await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Welcome to the Leave Management System"));

    let signup = app.get("/?page=signup", None).await;
    assert!(signup.body.contains("Create New Account"));
    assert!(signup.body.contains("No managers available"));

    let login = app.get("/?page=login", None).await;
    assert!(login.body.contains("Login Section"));
}

#[tokio::test]
async fn security_headers_are_set() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn dashboard_without_session_redirects_to_login() {
    let app = common::spawn_app().await;

    let page = app.get("/dashboard", None).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/login"));

    let page = app.get("/dashboard", Some("forged-token")).await;
    assert_eq!(page.location.as_deref(), Some("/login"));
}

// ── Signup & login ──────────────────────────────────────────────

#[tokio::test]
async fn signup_lists_managers_and_creates_account() {
    let app = common::spawn_app().await;

    let page = app.signup("Alice", "alice@x.com", "Manager", None).await;
    assert_eq!(page.status, StatusCode::CREATED);
    assert!(page.body.contains("successfully signed up"));

    let form = app.get("/signup", None).await;
    assert!(form.body.contains(">Alice</option>"));
    assert!(!form.body.contains("No managers available"));
}

#[tokio::test]
async fn employee_signup_without_manager_shows_inline_error() {
    let app = common::spawn_app().await;

    let page = app.signup("Bob", "bob@x.com", "Employee", None).await;
    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("No managers available. Please sign up as a manager first."));
    assert!(page.body.contains("value=\"bob@x.com\""));
}

#[tokio::test]
async fn duplicate_signup_shows_inline_error() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;

    let page = app.signup("Alice", "alice@x.com", "Manager", None).await;
    assert_eq!(page.status, StatusCode::CONFLICT);
    assert!(page.body.contains("already exists"));
}

#[tokio::test]
async fn wrong_password_renders_login_error() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;

    let page = app
        .post_form("/login", None, &[("email", "alice@x.com"), ("password", "nope")])
        .await;
    assert_eq!(page.status, StatusCode::UNAUTHORIZED);
    assert!(page.body.contains("Incorrect email or password"));
    assert!(page.session_token().is_none());
    assert!(app.state.sessions.is_empty());
}

#[tokio::test]
async fn logged_in_visitor_skips_public_screens() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;
    let token = app.login("alice@x.com").await;

    for path in ["/", "/?page=signup", "/login"] {
        let page = app.get(path, Some(&token)).await;
        assert_eq!(page.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(page.location.as_deref(), Some("/dashboard"));
    }
}

#[tokio::test]
async fn logout_clears_session() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;
    let token = app.login("alice@x.com").await;
    assert_eq!(app.state.sessions.len(), 1);

    let page = app.post_form("/logout", Some(&token), &[]).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/login"));
    assert!(page.set_cookies.iter().any(|c| c.starts_with("leave_session=;")));
    assert!(app.state.sessions.is_empty());

    let page = app.get("/dashboard", Some(&token)).await;
    assert_eq!(page.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn session_of_wiped_user_returns_to_login() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;
    let token = app.login("alice@x.com").await;

    maintenance::wipe(&app.pool).await.unwrap();

    let page = app.get("/dashboard", Some(&token)).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/login"));
    assert!(app.state.sessions.is_empty());

    let page = app.get("/login", Some(&token)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Login Section"));

    let page = app.signup("Alice", "alice@x.com", "Manager", None).await;
    assert_eq!(page.status, StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_role_shows_inline_error() {
    let app = common::spawn_app().await;

    let page = app.signup("Eve", "eve@x.com", "Admin", None).await;
    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("Create New Account"));
    assert!(page.body.contains("Invalid role: Admin"));
}

// ── Dashboards ──────────────────────────────────────────────────

#[tokio::test]
async fn end_to_end_approval() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;
    let alice = app.user_by_email("alice@x.com").await;
    let page = app.signup("Bob", "bob@x.com", "Employee", Some(alice.id)).await;
    assert_eq!(page.status, StatusCode::CREATED);

    let bob_token = app.login("bob@x.com").await;
    let dash = app.get("/dashboard", Some(&bob_token)).await;
    assert!(dash.body.contains("Welcome Bob"));
    assert!(dash.body.contains("No leave requests found."));

    let page = app
        .post_form("/leave", Some(&bob_token), &[("leave_type", "Sick"), ("comment", "flu")])
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Leave application submitted successfully!"));
    assert!(page.body.contains("<td>flu</td>"));
    assert!(page.body.contains("<td>Alice</td>"));

    let alice_token = app.login("alice@x.com").await;
    let dash = app.get("/dashboard", Some(&alice_token)).await;
    assert!(dash.body.contains("Manager Dashboard"));
    assert!(dash.body.contains("<td>Bob</td>"));

    let pending = leavedesk::leave::list_pending(&app.pool, alice.id).await.unwrap();
    assert_eq!(pending.len(), 1);
    let id = pending[0].id;

    let page = app
        .post_form(&format!("/leave/{id}/approve"), Some(&alice_token), &[])
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(&format!("Leave request {id} approved")));
    assert!(page.body.contains("No leave requests to review."));

    let page = app
        .post_form(&format!("/leave/{id}/reject"), Some(&alice_token), &[])
        .await;
    assert_eq!(page.status, StatusCode::CONFLICT);
    assert!(page.body.contains("has already been approved"));

    let own = leavedesk::leave::list_own(&app.pool, app.user_by_email("bob@x.com").await.id)
        .await
        .unwrap();
    assert_eq!(own[0].status, LeaveStatus::Approved);

    let dash = app.get("/dashboard", Some(&bob_token)).await;
    assert!(dash.body.contains("Approved"));
}

#[tokio::test]
async fn roles_are_enforced_on_commands() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;
    let alice = app.user_by_email("alice@x.com").await;
    app.signup("Bob", "bob@x.com", "Employee", Some(alice.id)).await;

    let bob_token = app.login("bob@x.com").await;
    let alice_token = app.login("alice@x.com").await;

    app.post_form("/leave", Some(&bob_token), &[("leave_type", "Personal")])
        .await;
    let id = leavedesk::leave::list_pending(&app.pool, alice.id).await.unwrap()[0].id;

    let page = app
        .post_form(&format!("/leave/{id}/approve"), Some(&bob_token), &[])
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);

    let page = app
        .post_form("/leave", Some(&alice_token), &[("leave_type", "Sick")])
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn other_managers_cannot_decide() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;
    app.signup("Carol", "carol@x.com", "Manager", None).await;
    let alice = app.user_by_email("alice@x.com").await;
    app.signup("Bob", "bob@x.com", "Employee", Some(alice.id)).await;

    let bob_token = app.login("bob@x.com").await;
    app.post_form("/leave", Some(&bob_token), &[("leave_type", "Official")])
        .await;
    let id = leavedesk::leave::list_pending(&app.pool, alice.id).await.unwrap()[0].id;

    let carol_token = app.login("carol@x.com").await;
    let page = app
        .post_form(&format!("/leave/{id}/reject"), Some(&carol_token), &[])
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("not found"));

    let pending = leavedesk::leave::list_pending(&app.pool, alice.id).await.unwrap();
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn leave_form_rejects_unknown_type_and_ignores_client_date() {
    let app = common::spawn_app().await;
    app.signup("Alice", "alice@x.com", "Manager", None).await;
    let alice = app.user_by_email("alice@x.com").await;
    app.signup("Bob", "bob@x.com", "Employee", Some(alice.id)).await;
    let bob = app.user_by_email("bob@x.com").await;
    let token = app.login("bob@x.com").await;

    let page = app
        .post_form("/leave", Some(&token), &[("leave_type", "Vacation")])
        .await;
    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("Invalid leave type: Vacation"));
    assert!(page.body.contains("No leave requests found."));

    let before = Local::now().date_naive();
    let page = app
        .post_form(
            "/leave",
            Some(&token),
            &[("leave_type", "Official"), ("application_date", "1999-01-01")],
        )
        .await;
    let after = Local::now().date_naive();
    assert_eq!(page.status, StatusCode::OK);

    let own = leavedesk::leave::list_own(&app.pool, bob.id).await.unwrap();
    assert_eq!(own.len(), 1);
    let date = own[0].application_date;
    assert_ne!(date, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap());
    assert!(before <= date && date <= after);
}

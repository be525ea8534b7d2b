use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::extract::Request;

/// Response marker set when a view needed a session and found none.
#[derive(Debug, Clone, Copy)]
pub struct LoginRequired;

/// Middleware that turns missing-session rejections into a redirect to the
/// login screen. Failed logins render inline and are left alone.
pub async fn redirect_unauthorized(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if response.extensions().get::<LoginRequired>().is_some() {
        Redirect::to("/login").into_response()
    } else {
        response
    }
}

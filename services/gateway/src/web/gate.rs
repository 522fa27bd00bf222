//! services/gateway/src/web/gate.rs
//!
//! Route-gating middleware for the page routes.
//!
//! Only the presence of a non-empty `authToken` cookie is checked; the token
//! itself is validated by the backend on the next API call.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use site_builder_core::ports::TOKEN_KEY;
use tracing::debug;

pub const PROTECTED_ROUTES: [&str; 3] = ["/dashboard", "/chat", "/preview"];
pub const AUTH_ROUTES: [&str; 2] = ["/login", "/register"];

/// Where a page request should go instead, if anywhere.
pub fn redirect_target(path: &str, has_token: bool) -> Option<String> {
    let is_protected = PROTECTED_ROUTES.iter().any(|route| path.starts_with(route));
    let is_auth = AUTH_ROUTES.iter().any(|route| path.starts_with(route));

    if is_protected && !has_token {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("callbackUrl", path)
            .finish();
        return Some(format!("/login?{}", query));
    }
    if is_auth && has_token {
        return Some("/dashboard".to_string());
    }
    None
}

/// Middleware that bounces anonymous visitors off protected pages and signed-in
/// visitors off the login and register pages.
pub async fn gate_pages(jar: CookieJar, req: Request, next: Next) -> Response {
    let has_token = jar
        .get(TOKEN_KEY)
        .map(|cookie| !cookie.value().is_empty())
        .unwrap_or(false);

    match redirect_target(req.uri().path(), has_token) {
        Some(target) => {
            debug!("Redirecting {} to {}", req.uri().path(), target);
            Redirect::temporary(&target).into_response()
        }
        None => next.run(req).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_visitor_is_sent_to_login_with_callback() {
        assert_eq!(
            redirect_target("/chat/abc", false).as_deref(),
            Some("/login?callbackUrl=%2Fchat%2Fabc")
        );
        assert_eq!(
            redirect_target("/dashboard", false).as_deref(),
            Some("/login?callbackUrl=%2Fdashboard")
        );
        assert_eq!(redirect_target("/chat/abc", true), None);
    }

    #[test]
    fn signed_in_visitor_skips_auth_pages() {
        assert_eq!(redirect_target("/login", true).as_deref(), Some("/dashboard"));
        assert_eq!(redirect_target("/register", true).as_deref(), Some("/dashboard"));
        assert_eq!(redirect_target("/login", false), None);
    }

    #[test]
    fn public_pages_are_never_redirected() {
        assert_eq!(redirect_target("/", false), None);
        assert_eq!(redirect_target("/", true), None);
    }
}

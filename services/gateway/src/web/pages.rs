//! services/gateway/src/web/pages.rs
//!
//! Minimal HTML shells for the page routes. The interactive views are driven
//! by the client; the server only provides the document and the navigation.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use site_builder_core::components::{nav_items, PreviewFrame};
use site_builder_core::markup::escape_html;
use std::sync::Arc;

/// Wraps `body` in the shared document layout.
pub fn render_shell(app_name: &str, page: &str, current_path: &str, body: &str) -> String {
    let nav: String = nav_items(current_path)
        .into_iter()
        .map(|item| {
            let class = if item.active { r#" class="active""# } else { "" };
            format!(r#"<a href="{}"{}>{}</a>"#, item.href, class, item.name)
        })
        .collect::<Vec<_>>()
        .join("");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{page} | {app}</title></head>\n<body>\n<header><nav>{nav}</nav></header>\n<main>{body}</main>\n</body>\n</html>\n",
        page = escape_html(page),
        app = escape_html(app_name),
        nav = nav,
        body = body,
    )
}

pub async fn home_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_shell(
        &state.config.app_name,
        "Home",
        "/",
        r#"<h1>Build web pages by chatting</h1><a href="/login">Sign in</a> <a href="/register">Create an account</a>"#,
    ))
}

pub async fn login_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_shell(
        &state.config.app_name,
        "Sign in",
        "/login",
        r#"<form id="login-form"><input name="email" type="email"><input name="password" type="password"><button type="submit">Sign in</button></form>"#,
    ))
}

pub async fn register_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_shell(
        &state.config.app_name,
        "Create account",
        "/register",
        r#"<form id="register-form"><input name="username"><input name="email" type="email"><input name="password" type="password"><button type="submit">Create account</button></form>"#,
    ))
}

pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_shell(
        &state.config.app_name,
        "Page Editor",
        "/dashboard",
        r#"<aside id="conversations"></aside><section id="editor"></section>"#,
    ))
}

/// `/chat` has no page of its own.
pub async fn chat_index() -> Redirect {
    Redirect::temporary("/dashboard")
}

pub async fn chat_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Html<String> {
    let body = format!(
        r#"<aside id="conversations"></aside><section id="chat" data-conversation-id="{}"></section>"#,
        escape_html(&id)
    );
    Html(render_shell(
        &state.config.app_name,
        "Conversation",
        &format!("/chat/{}", id),
        &body,
    ))
}

pub async fn preview_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let frame = PreviewFrame::from_state(false, "").to_html();
    Html(render_shell(
        &state.config.app_name,
        "Live Preview",
        "/preview",
        &format!(r#"<section id="preview">{}</section>"#, frame),
    ))
}

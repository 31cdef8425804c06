//! Minimal HTML pages
//!
//! Only enough markup for the page route class: the session gate redirects
//! these to `/login`, and `/employees` is closed to the EMPLOYEE role.

use axum::{
    Router,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use shared::models::Role;

use crate::auth::CurrentUser;
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login))
        .route("/signup", get(signup))
        .route("/", get(dashboard))
        .route("/employees", get(employees))
        .route("/settings", get(settings))
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title} | Staffdesk</title></head><body>{body}</body></html>"
    ))
}

fn user_badge(user: &CurrentUser) -> String {
    format!(
        "<p>Signed in as {} <span class=\"badge badge-{}\">{}</span></p>",
        escape_html(&user.email),
        user.role.badge_color(),
        user.role.label()
    )
}

/// Posts a form's fields to its `data-endpoint` as JSON, then follows `data-next`
const JSON_FORM_SCRIPT: &str = "<script>\
document.querySelector('form[data-endpoint]').addEventListener('submit', async (ev) => {\
  ev.preventDefault();\
  const form = ev.target;\
  const res = await fetch(form.dataset.endpoint, {\
    method: 'POST',\
    headers: { 'Content-Type': 'application/json' },\
    body: JSON.stringify(Object.fromEntries(new FormData(form))),\
  });\
  const body = await res.json().catch(() => ({}));\
  if (res.ok) { window.location.assign(form.dataset.next); }\
  else { form.querySelector('.error').textContent = body.message || 'Request failed'; }\
});\
</script>";

async fn login() -> Html<String> {
    page(
        "Sign in",
        &format!(
            "<form data-endpoint=\"/api/auth/login\" data-next=\"/\">\
             <input name=\"email\" type=\"email\"><input name=\"password\" type=\"password\">\
             <button>Sign in</button><p class=\"error\"></p></form>\
             <a href=\"/signup\">Create an account</a>{JSON_FORM_SCRIPT}"
        ),
    )
}

async fn signup() -> Html<String> {
    page(
        "Create account",
        &format!(
            "<form data-endpoint=\"/api/auth/signup\" data-next=\"/login\">\
             <input name=\"firstName\"><input name=\"lastName\"><input name=\"email\" type=\"email\">\
             <input name=\"username\"><input name=\"password\" type=\"password\">\
             <button>Sign up</button><p class=\"error\"></p></form>\
             <a href=\"/login\">Sign in</a>{JSON_FORM_SCRIPT}"
        ),
    )
}

async fn dashboard(user: CurrentUser) -> Html<String> {
    page("Dashboard", &format!("<h1>Dashboard</h1>{}", user_badge(&user)))
}

async fn employees(user: CurrentUser) -> Response {
    if user.role == Role::Employee {
        return Redirect::to("/").into_response();
    }
    page("Employees", &format!("<h1>Employees</h1>{}", user_badge(&user))).into_response()
}

async fn settings(user: CurrentUser) -> Html<String> {
    page("Settings", &format!("<h1>Settings</h1>{}", user_badge(&user)))
}

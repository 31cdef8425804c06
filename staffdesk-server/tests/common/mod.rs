//! Shared harness for HTTP-level tests
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use staffdesk_server::db::DbService;
use staffdesk_server::{AppState, Config, build_app};
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "secret123";

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut pairs = vec![
        ("ENVIRONMENT".to_string(), "test".to_string()),
        ("JWT_SECRET".to_string(), TEST_SECRET.to_string()),
    ];
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    Config::from_lookup(move |key| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config")
}

/// Router over a fresh file-backed database
pub struct TestApp {
    pub state: AppState,
    pub app: Router,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// Value of the `token` cookie set by this response
    pub fn session_token(&self) -> Option<String> {
        let cookie = self.set_cookie()?;
        let value = cookie.strip_prefix("token=")?.split(';').next()?;
        Some(value.to_string())
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn code(&self) -> u64 {
        self.body["code"].as_u64().unwrap_or_default()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config(&[])).await
    }

    pub async fn with_config(config: Config) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("staffdesk.db").display());
        let db = DbService::new(&url).await.expect("database");
        let state = AppState::from_parts(config, db.pool);
        let app = build_app(state.clone());
        Self {
            state,
            app,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("token={token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        };
        self.send(request.expect("request")).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Sign up `username` with email `{username}@example.com`
    pub async fn signup(&self, first: &str, last: &str, username: &str) -> TestResponse {
        self.post(
            "/api/auth/signup",
            None,
            json!({
                "firstName": first,
                "lastName": last,
                "email": format!("{username}@example.com"),
                "username": username,
                "password": PASSWORD,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Sign up, optionally change the stored role, then log in
    pub async fn member(&self, username: &str, role: &str) -> Member {
        let signup = self.signup("Test", username, username).await;
        assert_eq!(signup.status, StatusCode::CREATED, "{}", signup.text);
        let account_id = signup.body["user"]["id"].as_str().unwrap().to_string();
        let employee_id = signup.body["user"]["employee"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        if role != "EMPLOYEE" {
            self.set_role(&account_id, role).await;
        }

        let email = format!("{username}@example.com");
        let login = self.login(&email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.text);

        Member {
            account_id,
            employee_id,
            email,
            token: login.session_token().expect("session cookie"),
        }
    }

    pub async fn set_role(&self, account_id: &str, role: &str) {
        sqlx::query("UPDATE account SET role = ? WHERE id = ?")
            .bind(role)
            .bind(account_id)
            .execute(&self.state.pool)
            .await
            .unwrap();
    }

    pub async fn set_active(&self, account_id: &str, active: bool) {
        sqlx::query("UPDATE account SET is_active = ? WHERE id = ?")
            .bind(active)
            .bind(account_id)
            .execute(&self.state.pool)
            .await
            .unwrap();
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.pool)
            .await
            .unwrap()
    }

    pub async fn department_id(&self, code: &str) -> i64 {
        sqlx::query_scalar("SELECT id FROM department WHERE code = ?")
            .bind(code)
            .fetch_one(&self.state.pool)
            .await
            .unwrap()
    }
}

/// Logged-in account with its profile
pub struct Member {
    pub account_id: String,
    pub employee_id: String,
    pub email: String,
    pub token: String,
}

impl Member {
    pub fn token(&self) -> Option<&str> {
        Some(&self.token)
    }
}

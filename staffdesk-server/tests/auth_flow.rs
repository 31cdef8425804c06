mod common;

use axum::body::Body;
use common::{PASSWORD, TestApp};
use http::{Method, Request, StatusCode, header};
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn signup_creates_employee_with_sequential_code() {
    let app = TestApp::new().await;

    let res = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@x.com",
                "username": "janedoe",
                "password": "secret1",
            }),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED, "{}", res.text);
    assert_eq!(res.body["message"], "Account created successfully");
    let user = &res.body["user"];
    assert_eq!(user["email"], "jane@x.com");
    assert_eq!(user["role"], "EMPLOYEE");
    assert_eq!(user["isActive"], true);
    assert_eq!(user["employee"]["employeeCode"], "EMP001");
    assert_eq!(user["employee"]["position"], "Employee");
    assert_eq!(user["employee"]["department"]["code"], "HR");
    assert!(user.get("passwordHash").is_none());
    assert!(!res.text.contains("argon2"));

    let second = app.signup("John", "Roe", "johnroe").await;
    assert_eq!(second.body["user"]["employee"]["employeeCode"], "EMP002");

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM account WHERE email = ?")
        .bind("jane@x.com")
        .fetch_one(&app.state.pool)
        .await
        .unwrap();
    assert!(hash.starts_with("$argon2"));
    assert_ne!(hash, "secret1");
}

#[tokio::test]
async fn login_sets_session_cookie_with_matching_claims() {
    let app = TestApp::new().await;
    let signup = app.signup("Jane", "Doe", "janedoe").await;
    let account_id = signup.body["user"]["id"].as_str().unwrap().to_string();
    let employee_id = signup.body["user"]["employee"]["id"].as_str().unwrap().to_string();

    let res = app.login("janedoe@example.com", PASSWORD).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.text);
    assert_eq!(res.body["message"], "Login successful");
    assert_eq!(res.body["user"]["id"], account_id.as_str());

    let cookie = res.set_cookie().expect("Set-Cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));

    let token = res.session_token().unwrap();
    let claims = app.state.jwt_service.validate_token(&token).unwrap();
    assert_eq!(claims.sub, account_id);
    assert_eq!(claims.email, "janedoe@example.com");
    assert_eq!(claims.role, Role::Employee);
    assert_eq!(claims.employee_id.as_deref(), Some(employee_id.as_str()));
    assert_eq!(claims.exp - claims.iat, 86_400);
}

#[tokio::test]
async fn login_normalises_email() {
    let app = TestApp::new().await;
    app.signup("Jane", "Doe", "janedoe").await;

    let res = app.login("  JaneDoe@Example.COM ", PASSWORD).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.text);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_look_the_same() {
    let app = TestApp::new().await;
    app.signup("Jane", "Doe", "janedoe").await;

    let unknown = app.login("nobody@example.com", PASSWORD).await;
    let wrong = app.login("janedoe@example.com", "not-the-password").await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
    assert_eq!(unknown.code(), 1002);
    assert!(unknown.set_cookie().is_none());
    assert!(wrong.set_cookie().is_none());
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = TestApp::new().await;

    let res = app
        .post("/api/auth/login", None, json!({ "email": "jane@x.com" }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Email and password are required");

    let res = app
        .post("/api/auth/login", None, json!({ "password": "secret1" }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inactive_account_rejected_only_after_password_check() {
    let app = TestApp::new().await;
    let signup = app.signup("Jane", "Doe", "janedoe").await;
    let account_id = signup.body["user"]["id"].as_str().unwrap();
    app.set_active(account_id, false).await;

    let res = app.login("janedoe@example.com", PASSWORD).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.code(), 1007);
    assert!(res.set_cookie().is_none());

    // A wrong password must not reveal that the account exists but is inactive
    let res = app.login("janedoe@example.com", "wrong-password").await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.code(), 1002);
}

#[tokio::test]
async fn duplicate_email_checked_before_username() {
    let app = TestApp::new().await;
    app.signup("Jane", "Doe", "janedoe").await;

    let dup_email = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "firstName": "Other",
                "lastName": "Person",
                "email": "JANEDOE@example.com",
                "username": "someoneelse",
                "password": "secret1",
            }),
        )
        .await;
    assert_eq!(dup_email.status, StatusCode::CONFLICT);
    assert_eq!(dup_email.code(), 1009);

    let dup_username = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "firstName": "Other",
                "lastName": "Person",
                "email": "other@example.com",
                "username": "janedoe",
                "password": "secret1",
            }),
        )
        .await;
    assert_eq!(dup_username.status, StatusCode::CONFLICT);
    assert_eq!(dup_username.code(), 1010);

    let both = app.signup("Jane", "Again", "janedoe").await;
    assert_eq!(both.status, StatusCode::CONFLICT);
    assert_eq!(both.code(), 1009);

    assert_eq!(app.count("account").await, 1);
    assert_eq!(app.count("employee").await, 1);
}

#[tokio::test]
async fn signup_validation_errors() {
    let app = TestApp::new().await;

    let missing = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "firstName": "Jane", "email": "jane@x.com", "username": "jane", "password": "secret1" }),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["message"], "All fields are required");

    let bad_email = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "firstName": "Jane", "lastName": "Doe", "email": "jane@x", "username": "jane", "password": "secret1" }),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.body["message"], "Invalid email format");

    let short = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "firstName": "Jane", "lastName": "Doe", "email": "jane@x.com", "username": "jane", "password": "12345" }),
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);
    assert_eq!(short.code(), 1008);

    assert_eq!(app.count("account").await, 0);
}

#[tokio::test]
async fn me_returns_fresh_projection() {
    let app = TestApp::new().await;
    let jane = app.member("janedoe", "EMPLOYEE").await;

    let res = app.get("/api/auth/me", jane.token()).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.text);
    assert_eq!(res.body["id"], jane.account_id.as_str());
    assert_eq!(res.body["email"], jane.email.as_str());
    assert_eq!(res.body["employee"]["employeeCode"], "EMP001");
    assert_eq!(res.body["employee"]["department"]["name"], "Human Resources");

    // Role changes are visible without logging in again
    app.set_role(&jane.account_id, "MANAGER").await;
    let res = app.get("/api/auth/me", jane.token()).await;
    assert_eq!(res.body["role"], "MANAGER");
}

#[tokio::test]
async fn me_requires_session() {
    let app = TestApp::new().await;

    let res = app.get("/api/auth/me", None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.code(), 1001);
}

#[tokio::test]
async fn me_for_deactivated_account_is_forbidden() {
    let app = TestApp::new().await;
    let jane = app.member("janedoe", "EMPLOYEE").await;
    app.set_active(&jane.account_id, false).await;

    let res = app.get("/api/auth/me", jane.token()).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.code(), 1007);
}

#[tokio::test]
async fn me_for_vanished_account_is_not_found() {
    let app = TestApp::new().await;
    let jane = app.member("janedoe", "EMPLOYEE").await;

    sqlx::query("DELETE FROM employee WHERE account_id = ?")
        .bind(&jane.account_id)
        .execute(&app.state.pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM account WHERE id = ?")
        .bind(&jane.account_id)
        .execute(&app.state.pool)
        .await
        .unwrap();

    let res = app.get("/api/auth/me", jane.token()).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.code(), 1011);
}

#[tokio::test]
async fn logout_always_clears_cookie() {
    let app = TestApp::new().await;
    let jane = app.member("janedoe", "EMPLOYEE").await;

    for token in [jane.token(), None] {
        let res = app.post("/api/auth/logout", token, json!({})).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["message"], "Logged out successfully");
        let cookie = res.set_cookie().expect("Set-Cookie");
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}

#[tokio::test]
async fn malformed_bodies_get_json_validation_errors() {
    let app = TestApp::new().await;

    for uri in ["/api/auth/login", "/api/auth/signup"] {
        // Plain HTML form submission
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=jane%40x.com&password=secret1"))
            .unwrap();
        let res = app.send(request).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}: {}", res.text);
        assert_eq!(res.code(), 2);

        // Wrongly typed field
        let res = app.post(uri, None, json!({ "email": 5, "password": "secret1" })).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}: {}", res.text);
        assert_eq!(res.code(), 2);
        assert!(res.body["details"]["reason"].is_string());

        // Truncated JSON
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\":"))
            .unwrap();
        let res = app.send(request).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}: {}", res.text);
        assert_eq!(res.code(), 6);
    }

    assert_eq!(app.count("account").await, 0);
}

//! Authentication Handlers
//!
//! Login, signup, current-account lookup and logout

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use axum_extra::extract::cookie::CookieJar;
use shared::models::{LoginRequest, LoginResponse, Role, SignupRequest, SignupResponse, UserInfo};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::auth::cookie::{expired_session_cookie, session_cookie};
use crate::auth::password::{burn_verification, hash_password_async, verify_password_async};
use crate::auth::{CurrentUser, TokenSubject};
use crate::core::AppState;
use crate::db::repository::account::{self, Conflict};
use crate::db::repository::employee;
use crate::security_log;
use crate::services::profile::{load_user_info, to_user_info};
use crate::services::registration::{self, NewMember};
use crate::services::validation::{IdentityInput, normalize_email};

/// Login handler
///
/// Unknown email and wrong password produce the same 401. The active flag is
/// checked only after the password matched.
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::required("Email and password are required"));
    }

    let Some(stored) = account::find_by_email(&state.pool, &email).await? else {
        burn_verification(req.password).await?;
        security_log!("WARN", "login_failed", email = email.clone(), reason = "unknown_email");
        return Err(AppError::invalid_credentials());
    };

    if !verify_password_async(req.password, stored.password_hash.clone()).await? {
        security_log!("WARN", "login_failed", email = email.clone(), reason = "wrong_password");
        return Err(AppError::invalid_credentials());
    }

    if !stored.is_active {
        security_log!("WARN", "login_failed", email = email.clone(), reason = "inactive");
        return Err(AppError::account_disabled());
    }

    let profile = employee::find_summary(&state.pool, &stored.id).await?;
    let user = to_user_info(stored, profile)?;

    let token = state
        .get_jwt_service()
        .generate_token(TokenSubject {
            account_id: &user.id,
            email: &user.email,
            role: user.role,
            employee_id: user.employee.as_ref().map(|e| e.id.as_str()),
        })
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(account_id = %user.id, role = %user.role, "User logged in");

    let jar = CookieJar::new().add(session_cookie(
        token,
        state.config.secure_cookies(),
        state.config.session_max_age_secs(),
    ));

    Ok((
        jar,
        Json(LoginResponse {
            user,
            message: "Login successful".to_string(),
        }),
    ))
}

/// Self-service signup: EMPLOYEE account plus profile in the default department
pub async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<SignupRequest>, AppError>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let input = IdentityInput::parse(
        &req.first_name,
        &req.last_name,
        &req.email,
        &req.username,
        &req.password,
    )?;

    match account::find_conflict(&state.pool, &input.email, &input.username).await? {
        Some(Conflict::Email) => return Err(AppError::new(ErrorCode::EmailExists)),
        Some(Conflict::Username) => return Err(AppError::new(ErrorCode::UsernameExists)),
        None => {}
    }

    let password_hash = hash_password_async(req.password).await?;

    let enrolled = registration::enroll(
        &state.pool,
        &state.config,
        NewMember {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            username: input.username,
            password_hash,
            role: Role::Employee,
            position: None,
            phone: None,
            department_id: None,
            manager_id: None,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Account created successfully".to_string(),
            user: enrolled.into_user_info()?,
        }),
    ))
}

/// Current account, re-read from the store
pub async fn me(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<UserInfo>> {
    let stored = account::find_by_id(&state.pool, &user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;

    if !stored.is_active {
        return Err(AppError::account_disabled());
    }

    Ok(Json(load_user_info(&state.pool, stored).await?))
}

/// Clear the session cookie; succeeds with or without a session
pub async fn logout(State(state): State<AppState>) -> (CookieJar, ApiResponse<()>) {
    let jar = CookieJar::new().add(expired_session_cookie(state.config.secure_cookies()));
    (jar, ApiResponse::message("Logged out successfully"))
}

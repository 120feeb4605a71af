use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::{
    auth::{
        cookie::{cleared_cookie, session_cookie},
        dto::{
            normalize_email, LoginRequest, LoginResponse, LogoutResponse, MeResponse,
            RegisterRequest, RegisterResponse,
        },
        jwt::{AuthUser, JwtKeys},
        password::{hash_in_background, verify_in_background},
        repo_types::NewUser,
    },
    clock,
    db::StoreError,
    error::AppError,
    extract::JsonBody,
    leads::repo_types::NewLead,
    state::AppState,
};

const REGISTER_FAILED: &str = "Server error";
const LOGIN_FAILED: &str = "Server error during login";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let payload = payload.normalized();
    if let Err(errors) = payload.validate() {
        warn!(email = %payload.email, "registration rejected by validation");
        return Err(errors.into());
    }

    // Ensure email is not taken
    match state.users.find_by_email(&payload.email).await {
        Ok(Some(_)) => {
            warn!(email = %payload.email, "email already registered");
            return Err(AppError::EmailTaken);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AppError::Server(REGISTER_FAILED));
        }
    }

    let password_hash =
        match hash_in_background(payload.password.clone(), state.config.bcrypt_cost).await {
            Ok(h) => h,
            Err(e) => {
                error!(error = %e, "hash_password failed");
                return Err(AppError::Server(REGISTER_FAILED));
            }
        };

    let created_at = clock::ist_now();
    let new_user = NewUser {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        course: payload.course,
        university: payload.university,
        qualification: payload.qualification,
        experience: payload.experience,
        password_hash,
        created_at,
    };

    let user = match state.users.create(&new_user).await {
        Ok(u) => u,
        Err(StoreError::Conflict(_)) => {
            // lost the race against a concurrent registration
            warn!(email = %new_user.email, "email already registered");
            return Err(AppError::EmailTaken);
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(AppError::Server(REGISTER_FAILED));
        }
    };

    let lead = NewLead {
        name: new_user.name,
        email: new_user.email,
        phone: new_user.phone,
        course: new_user.course,
        university: new_user.university,
        qualification: new_user.qualification,
        experience: new_user.experience,
        created_at,
    };
    if let Err(e) = state.leads.create_lead(&lead).await {
        error!(error = %e, user_id = %user.id, "create lead failed after user was stored");
        return Err(AppError::Server(REGISTER_FAILED));
    }

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered and lead captured",
            user,
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::bad_request("Email and password are required"));
    }

    let user = match state.users.find_by_email(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AppError::Server(LOGIN_FAILED));
        }
    };

    if !user.active {
        warn!(user_id = %user.id, "login for deactivated account");
        return Err(AppError::AccountDeactivated);
    }

    let ok = match verify_in_background(payload.password.clone(), user.password_hash.clone())
        .await
    {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "verify_password failed");
            return Err(AppError::Server(LOGIN_FAILED));
        }
    };
    if !ok {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    if let Err(e) = state.users.record_login(user.id, clock::ist_now()).await {
        error!(error = %e, user_id = %user.id, "record_login failed");
        return Err(AppError::Server(LOGIN_FAILED));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = match keys.sign(user.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "jwt sign failed");
            return Err(AppError::Server(LOGIN_FAILED));
        }
    };

    let cookie = session_cookie(token.clone(), keys.ttl, state.config.production);
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    info!("session cookie cleared");
    (
        jar.add(cleared_cookie()),
        Json(LogoutResponse {
            success: true,
            message: "Logged out",
            logout_at: clock::format_ist(OffsetDateTime::now_utc()),
        }),
    )
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = match state.users.find_by_id(user_id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_id = %user_id, "session for unknown user");
            return Err(AppError::Unauthorized("User not found"));
        }
        Err(e) => {
            error!(error = %e, user_id = %user_id, "find_by_id failed");
            return Err(AppError::Server("Server error"));
        }
    };

    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}

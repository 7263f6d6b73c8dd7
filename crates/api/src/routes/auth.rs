//! Authentication route handlers: registration and the two login
//! namespaces.
//!
//! Login failures are reported uniformly as "invalid credentials" whether
//! the account is unknown or the password is wrong.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use souk_core::{Email, Role};

use crate::auth::{hash_password, verify_password};
use crate::db::{AdminRepository, SellerRepository, UserRepository};
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub is_seller: bool,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin login request body.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Token response for register/login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserSummary,
}

/// The user fields exposed after authentication.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub email: Email,
    pub name: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Admin token response.
#[derive(Debug, Serialize)]
pub struct AdminTokenResponse {
    pub token: String,
    pub username: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/register` - create a buyer or seller account.
///
/// Sellers get an empty profile stub; the setup step fills it in later.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::Validation(format!("invalid email: {e}")))?;
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if body.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let role = if body.is_seller { Role::Seller } else { Role::Buyer };
    let password_hash = hash_password(&body.password)?;

    let user = UserRepository::new(state.pool())
        .create(&email, body.name.trim(), &password_hash, role)
        .await?;

    if body.is_seller {
        SellerRepository::new(state.pool())
            .create(user.id, "", "")
            .await?;
    }

    tracing::info!(user_id = %user.id, role = ?user.role, "user registered");

    let token = state.tokens().issue_user(user.id, user.role)?;
    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            user: UserSummary::from(&user),
        }),
    ))
}

/// `POST /api/login` - user-namespace login.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let invalid = || AppError::Unauthorized("invalid credentials".to_string());

    let email = Email::parse(&body.email).map_err(|_| invalid())?;
    let (user, password_hash) = UserRepository::new(state.pool())
        .get_auth_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&password_hash, &body.password)? {
        return Err(invalid());
    }

    let token = state.tokens().issue_user(user.id, user.role)?;
    Ok(Json(TokenResponse {
        token,
        user: UserSummary::from(&user),
    }))
}

/// `POST /api/admin/login` - admin-namespace login.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(body): Json<AdminLoginRequest>,
) -> Result<Json<AdminTokenResponse>, AppError> {
    let invalid = || AppError::Unauthorized("invalid credentials".to_string());

    let (admin, password_hash) = AdminRepository::new(state.pool())
        .get_auth_by_username(&body.username)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&password_hash, &body.password)? {
        return Err(invalid());
    }

    let token = state.tokens().issue_admin(admin.id)?;
    Ok(Json(AdminTokenResponse {
        token,
        username: admin.username,
    }))
}

//! Admin route handlers: seller verification, category management, banner
//! moderation, and admin account management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use souk_core::{AdminId, BannerAction, BannerId, CategoryId, SellerId};

use crate::auth::hash_password;
use crate::db::{AdminRepository, BannerRepository, CategoryRepository, SellerRepository};
use crate::error::AppError;
use crate::middleware::CurrentAdmin;
use crate::models::{Admin, Banner, BannerWithShop, Category, Seller, SellerWithUser};
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Request Types
// =============================================================================

/// Category create/rename request body.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

/// Banner moderation request body.
#[derive(Debug, Deserialize)]
pub struct ModerateBannerRequest {
    pub action: BannerAction,
}

/// Admin account creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Sellers
// =============================================================================

/// `GET /api/admin/sellers` - all sellers with their owning users, unverified
/// first.
pub async fn list_sellers(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<SellerWithUser>>, AppError> {
    let sellers = SellerRepository::new(state.pool()).list_with_users().await?;
    Ok(Json(sellers))
}

/// `PATCH /api/admin/sellers/{id}/verify` - verify a seller.
///
/// One-way and idempotent. Also promotes the owning user's role to SELLER.
pub async fn verify_seller(
    CurrentAdmin(claims): CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<SellerId>,
) -> Result<Json<Seller>, AppError> {
    let seller = SellerRepository::new(state.pool()).verify(id).await?;

    tracing::info!(seller_id = %id, admin_id = %claims.sub, "seller verified");

    Ok(Json(seller))
}

// =============================================================================
// Categories
// =============================================================================

/// `GET /api/admin/categories` - category list.
pub async fn list_categories(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;
    Ok(Json(categories))
}

/// `POST /api/admin/categories` - create a category. Duplicate names
/// conflict.
pub async fn create_category(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("category name is required".to_string()));
    }

    let category = CategoryRepository::new(state.pool()).create(name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PATCH /api/admin/categories/{id}` - rename a category.
pub async fn rename_category(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("category name is required".to_string()));
    }

    let category = CategoryRepository::new(state.pool()).rename(id, name).await?;
    Ok(Json(category))
}

/// `DELETE /api/admin/categories/{id}` - delete a category. Fails with a
/// conflict while products still reference it.
pub async fn delete_category(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, AppError> {
    CategoryRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Banners
// =============================================================================

/// `GET /api/admin/banners` - non-deleted banners with shop names, for
/// moderation.
pub async fn list_banners(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<BannerWithShop>>, AppError> {
    let banners = BannerRepository::new(state.pool())
        .list_for_moderation()
        .await?;
    Ok(Json(banners))
}

/// `PATCH /api/admin/banners/{id}` - accept, deny, or disable a banner.
///
/// The current state is read first and the action is checked against it, so
/// a second accept (or an accept after a deny) conflicts instead of silently
/// rewriting the flags.
pub async fn moderate_banner(
    CurrentAdmin(claims): CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<BannerId>,
    Json(body): Json<ModerateBannerRequest>,
) -> Result<Json<Banner>, AppError> {
    let banners = BannerRepository::new(state.pool());

    let banner = banners
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("banner {id}")))?;

    let next = banner.state().moderate(body.action)?;
    let (is_active, is_deleted) = next.flags();

    let updated = banners.set_flags(id, is_active, is_deleted).await?;

    tracing::info!(banner_id = %id, admin_id = %claims.sub, action = ?body.action, "banner moderated");

    Ok(Json(updated))
}

/// `DELETE /api/admin/banners/{id}` - remove a banner row entirely.
pub async fn delete_banner(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<BannerId>,
) -> Result<StatusCode, AppError> {
    BannerRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Admin Accounts
// =============================================================================

/// `GET /api/admin/admins` - admin account list.
pub async fn list_admins(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = AdminRepository::new(state.pool()).list_all().await?;
    Ok(Json(admins))
}

/// `POST /api/admin/admins` - create an admin account.
pub async fn create_admin(
    CurrentAdmin(_): CurrentAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<Admin>), AppError> {
    let username = body.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }
    if body.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let password_hash = hash_password(&body.password)?;
    let admin = AdminRepository::new(state.pool())
        .create(username, &password_hash)
        .await?;

    Ok((StatusCode::CREATED, Json(admin)))
}

/// `DELETE /api/admin/admins/{id}` - delete an admin account.
///
/// An admin cannot delete their own account; that keeps at least the caller
/// alive and makes lockout require a second actor.
pub async fn delete_admin(
    CurrentAdmin(claims): CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<AdminId>,
) -> Result<StatusCode, AppError> {
    if claims.sub == id {
        return Err(AppError::Forbidden(
            "cannot delete your own admin account".to_string(),
        ));
    }

    AdminRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

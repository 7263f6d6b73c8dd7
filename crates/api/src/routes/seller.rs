//! Seller route handlers: onboarding, product management, order decisions,
//! and banner submission.
//!
//! Every handler runs through [`CurrentSeller`], so the seller id used for
//! scoping always comes from the authenticated subject's own profile row,
//! never from the request.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use souk_core::{CategoryId, OrderAction, OrderId, ProductId};

use crate::db::{
    BannerRepository, CategoryRepository, OrderRepository, ProductRepository, SellerRepository,
};
use crate::error::AppError;
use crate::middleware::{CurrentSeller, CurrentUser};
use crate::models::{Banner, Order, Product, Seller};
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Seller setup request body.
#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    pub shop_name: String,
    pub shop_description: String,
}

/// Product create/update request body.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category_id: CategoryId,
}

/// Order decision request body.
#[derive(Debug, Deserialize)]
pub struct OrderActionRequest {
    pub action: OrderAction,
}

/// Banner submission request body.
#[derive(Debug, Deserialize)]
pub struct BannerRequest {
    pub title: String,
    pub image_url: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl ProductRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("product name is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation(
                "product description is required".to_string(),
            ));
        }
        if self.price <= Decimal::ZERO {
            return Err(AppError::Validation(
                "price must be greater than zero".to_string(),
            ));
        }
        if self.image_url.trim().is_empty() {
            return Err(AppError::Validation("product image is required".to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// Onboarding
// =============================================================================

/// `POST /api/seller/setup` - create a seller profile for the caller.
///
/// Uses [`CurrentUser`] rather than [`CurrentSeller`]: the profile does not
/// exist yet. A second setup attempt conflicts.
pub async fn setup(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<SetupRequest>,
) -> Result<(StatusCode, Json<Seller>), AppError> {
    if body.shop_name.trim().is_empty() || body.shop_description.trim().is_empty() {
        return Err(AppError::Validation(
            "shop name and description are required".to_string(),
        ));
    }

    let seller = SellerRepository::new(state.pool())
        .create(claims.sub, body.shop_name.trim(), body.shop_description.trim())
        .await?;

    Ok((StatusCode::CREATED, Json(seller)))
}

/// `GET /api/seller` - the caller's own profile, including verification
/// state.
pub async fn profile(CurrentSeller(seller): CurrentSeller) -> Json<Seller> {
    Json(seller)
}

// =============================================================================
// Products
// =============================================================================

/// `GET /api/seller/products` - the caller's own products.
pub async fn list_products(
    CurrentSeller(seller): CurrentSeller,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool())
        .list_by_seller(seller.id)
        .await?;
    Ok(Json(products))
}

/// `POST /api/seller/products` - create a product in the caller's shop.
pub async fn create_product(
    CurrentSeller(seller): CurrentSeller,
    State(state): State<AppState>,
    Json(body): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    body.validate()?;

    CategoryRepository::new(state.pool())
        .get_by_id(body.category_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!("category {} does not exist", body.category_id))
        })?;

    let product = ProductRepository::new(state.pool())
        .create(
            seller.id,
            body.name.trim(),
            body.description.trim(),
            body.price,
            body.image_url.trim(),
            body.category_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Resolve a product and require that the caller owns it.
///
/// 404 when the id does not resolve; 403 when it resolves to another
/// seller's product. Nothing is mutated on either path.
async fn require_owned_product(
    state: &AppState,
    seller: &Seller,
    id: ProductId,
) -> Result<Product, AppError> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if product.seller_id != seller.id {
        return Err(AppError::Forbidden(
            "product belongs to another seller".to_string(),
        ));
    }
    Ok(product)
}

/// `PATCH /api/seller/products/{id}` - update an owned product.
pub async fn update_product(
    CurrentSeller(seller): CurrentSeller,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<Product>, AppError> {
    body.validate()?;
    require_owned_product(&state, &seller, id).await?;

    CategoryRepository::new(state.pool())
        .get_by_id(body.category_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!("category {} does not exist", body.category_id))
        })?;

    // scoped by seller id again at the SQL level
    let product = ProductRepository::new(state.pool())
        .update(
            id,
            seller.id,
            body.name.trim(),
            body.description.trim(),
            body.price,
            body.image_url.trim(),
            body.category_id,
        )
        .await?;

    Ok(Json(product))
}

/// `DELETE /api/seller/products/{id}` - delete an owned product.
pub async fn delete_product(
    CurrentSeller(seller): CurrentSeller,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    require_owned_product(&state, &seller, id).await?;

    ProductRepository::new(state.pool())
        .delete(id, seller.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Orders
// =============================================================================

/// `GET /api/seller/orders` - orders containing the caller's products.
pub async fn list_orders(
    CurrentSeller(seller): CurrentSeller,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_for_seller(seller.id)
        .await?;
    Ok(Json(orders))
}

/// `POST /api/seller/orders/{id}` - accept, deny, or mark delivered.
///
/// The transition function decides legality before anything is written;
/// the write itself is a compare-and-set on the status the decision was
/// made against, so a concurrent decision loses cleanly with a 409.
pub async fn order_action(
    CurrentSeller(seller): CurrentSeller,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<OrderActionRequest>,
) -> Result<Json<Order>, AppError> {
    let orders = OrderRepository::new(state.pool());

    let order = orders
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    if !orders.contains_seller_items(id, seller.id).await? {
        return Err(AppError::Forbidden(
            "order contains none of your products".to_string(),
        ));
    }

    let next = order.status.transition(body.action)?;

    let updated = orders
        .update_status(id, order.status, next)
        .await?
        .ok_or_else(|| AppError::Conflict("order status changed concurrently".to_string()))?;

    tracing::info!(order_id = %id, from = %order.status.as_str(), to = %next.as_str(), "order status updated");

    Ok(Json(updated))
}

// =============================================================================
// Banners
// =============================================================================

/// `GET /api/seller/banners` - the caller's banners and their moderation
/// outcomes.
pub async fn list_banners(
    CurrentSeller(seller): CurrentSeller,
    State(state): State<AppState>,
) -> Result<Json<Vec<Banner>>, AppError> {
    let banners = BannerRepository::new(state.pool())
        .list_by_seller(seller.id)
        .await?;
    Ok(Json(banners))
}

/// `POST /api/seller/banners` - submit a banner for moderation.
///
/// Banners start pending (inactive) until an admin accepts them.
pub async fn create_banner(
    CurrentSeller(seller): CurrentSeller,
    State(state): State<AppState>,
    Json(body): Json<BannerRequest>,
) -> Result<(StatusCode, Json<Banner>), AppError> {
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("banner title is required".to_string()));
    }
    if body.image_url.trim().is_empty() {
        return Err(AppError::Validation("banner image is required".to_string()));
    }
    if body.ends_at <= body.starts_at {
        return Err(AppError::Validation(
            "promotion end must be after its start".to_string(),
        ));
    }

    let banner = BannerRepository::new(state.pool())
        .create(
            seller.id,
            body.title.trim(),
            body.image_url.trim(),
            body.starts_at,
            body.ends_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(banner)))
}

//! Public catalog route handlers: products, categories, shops, banners.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use souk_core::{ProductId, SellerId};

use crate::db::{BannerRepository, CategoryRepository, ProductRepository, SellerRepository};
use crate::error::AppError;
use crate::models::{Banner, Category, Product, ProductDetail, Seller};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Public shop page: seller profile plus catalog.
#[derive(Debug, Serialize)]
pub struct ShopPage {
    pub shop: Seller,
    pub products: Vec<Product>,
}

/// `GET /api/products` - full catalog, newest first.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// `GET /api/products/search?q=` - substring search over name and
/// description. An empty query returns an empty result, not the catalog.
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let products = ProductRepository::new(state.pool()).search(q).await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}` - product detail with category and shop names.
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>, AppError> {
    let detail = ProductRepository::new(state.pool())
        .get_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(detail))
}

/// `GET /api/categories` - category list.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;
    Ok(Json(categories))
}

/// `GET /api/shops/{id}` - public shop page. Only verified sellers have a
/// public page; anything else is a 404.
pub async fn shop_page(
    State(state): State<AppState>,
    Path(id): Path<SellerId>,
) -> Result<Json<ShopPage>, AppError> {
    let shop = SellerRepository::new(state.pool())
        .get_verified_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;

    let products = ProductRepository::new(state.pool())
        .list_by_seller(shop.id)
        .await?;

    Ok(Json(ShopPage { shop, products }))
}

/// `GET /api/banners` - banners currently live on the storefront.
pub async fn live_banners(State(state): State<AppState>) -> Result<Json<Vec<Banner>>, AppError> {
    let banners = BannerRepository::new(state.pool()).list_live().await?;
    Ok(Json(banners))
}

//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure (all nested under `/api`)
//!
//! ```text
//! # Public
//! POST /register              - Create a buyer or seller account
//! POST /login                 - User login (buyer/seller namespace)
//! POST /admin/login           - Admin login (admin namespace)
//! GET  /products              - Full catalog
//! GET  /products/search?q=    - Catalog search
//! GET  /products/{id}         - Product detail
//! GET  /categories            - Category list
//! GET  /shops/{id}            - Public shop page (verified sellers)
//! GET  /banners               - Live promotional banners
//!
//! # Buyer (user token)
//! GET    /account             - Profile and recent orders
//! GET    /cart                - Cart lines
//! POST   /cart                - Add item (merge-on-add)
//! PATCH  /cart/{id}           - Set line quantity
//! DELETE /cart/{id}           - Remove line (idempotent)
//! POST   /checkout            - Place an order from a cart snapshot
//! GET    /orders/{id}         - Own order detail
//!
//! # Seller (user token + seller profile)
//! POST   /seller/setup        - Create seller profile
//! GET    /seller              - Own profile
//! GET    /seller/products     - Own products
//! POST   /seller/products     - Create product
//! PATCH  /seller/products/{id}  - Update own product
//! DELETE /seller/products/{id}  - Delete own product
//! GET    /seller/orders       - Orders containing own products
//! POST   /seller/orders/{id}  - accept / deny / deliver
//! GET    /seller/banners      - Own banners
//! POST   /seller/banners      - Submit banner for moderation
//!
//! # Admin (admin token)
//! GET    /admin/sellers             - Verification queue
//! PATCH  /admin/sellers/{id}/verify - Verify seller (one-way)
//! GET    /admin/categories          - Category list
//! POST   /admin/categories          - Create category
//! PATCH  /admin/categories/{id}     - Rename category
//! DELETE /admin/categories/{id}     - Delete category
//! GET    /admin/banners             - Moderation list
//! PATCH  /admin/banners/{id}        - accept / deny / disable
//! DELETE /admin/banners/{id}        - Hard delete
//! GET    /admin/admins              - Admin accounts
//! POST   /admin/admins              - Create admin account
//! DELETE /admin/admins/{id}         - Delete admin account
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod seller;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the public (unauthenticated) routes router.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/admin/login", post(auth::admin_login))
        .route("/products", get(catalog::list_products))
        .route("/products/search", get(catalog::search_products))
        .route("/products/{id}", get(catalog::product_detail))
        .route("/categories", get(catalog::list_categories))
        .route("/shops/{id}", get(catalog::shop_page))
        .route("/banners", get(catalog::live_banners))
}

/// Create the buyer routes router (user token required per handler).
pub fn buyer_routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(account::account))
        .route("/cart", get(cart::get_cart).post(cart::add_item))
        .route(
            "/cart/{id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .route("/checkout", post(orders::checkout))
        .route("/orders/{id}", get(orders::order_detail))
}

/// Create the seller routes router.
pub fn seller_routes() -> Router<AppState> {
    Router::new()
        .route("/seller/setup", post(seller::setup))
        .route("/seller", get(seller::profile))
        .route(
            "/seller/products",
            get(seller::list_products).post(seller::create_product),
        )
        .route(
            "/seller/products/{id}",
            patch(seller::update_product).delete(seller::delete_product),
        )
        .route("/seller/orders", get(seller::list_orders))
        .route("/seller/orders/{id}", post(seller::order_action))
        .route(
            "/seller/banners",
            get(seller::list_banners).post(seller::create_banner),
        )
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/sellers", get(admin::list_sellers))
        .route("/admin/sellers/{id}/verify", patch(admin::verify_seller))
        .route(
            "/admin/categories",
            get(admin::list_categories).post(admin::create_category),
        )
        .route(
            "/admin/categories/{id}",
            patch(admin::rename_category).delete(admin::delete_category),
        )
        .route("/admin/banners", get(admin::list_banners))
        .route(
            "/admin/banners/{id}",
            patch(admin::moderate_banner).delete(admin::delete_banner),
        )
        .route(
            "/admin/admins",
            get(admin::list_admins).post(admin::create_admin),
        )
        .route("/admin/admins/{id}", delete(admin::delete_admin))
}

/// Create the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(buyer_routes())
        .merge(seller_routes())
        .merge(admin_routes())
}

//! Domain models shared between the repository layer and route handlers.

pub mod banner;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod seller;
pub mod user;

pub use banner::{Banner, BannerWithShop};
pub use cart::CartLine;
pub use catalog::{Category, Product, ProductDetail};
pub use order::{Order, OrderDetail, OrderItem, OrderItemInput, ShippingAddress, order_total};
pub use seller::{Seller, SellerWithUser};
pub use user::{Admin, User};

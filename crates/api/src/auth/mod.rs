//! Authentication primitives: JWT token service and password hashing.

pub mod password;
pub mod tokens;

pub use password::{PasswordError, hash_password, verify_password};
pub use tokens::{AdminClaims, TokenError, TokenService, UserClaims};

//! Authorization extractors.
//!
//! Every protected route names one of these extractors in its handler
//! signature, so the guard runs before the handler body. The per-request
//! sequence is: extract bearer token (missing → 401), verify it in the
//! route's namespace (failure → 401), then, where the extractor requires
//! it, resolve the subject's own records (missing profile → 403).
//!
//! A verified token proves identity, not entitlement: handlers still scope
//! every query by the authenticated subject's ids, so ownership is
//! re-checked against the database on each mutating call.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn list_own_products(
//!     CurrentSeller(seller): CurrentSeller,
//!     State(state): State<AppState>,
//! ) -> Result<Json<Vec<Product>>, AppError> {
//!     // seller.id came from the token + seller table, never the request
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::{AdminClaims, UserClaims};
use crate::db::SellerRepository;
use crate::error::AppError;
use crate::models::Seller;
use crate::state::AppState;

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))
}

/// Extractor requiring a valid user-namespace token (buyer or seller).
pub struct CurrentUser(pub UserClaims);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.tokens().verify_user(token)?;
        Ok(Self(claims))
    }
}

/// Extractor requiring a user token whose subject owns a seller profile.
///
/// The seller row is re-read on every request; handlers scope their queries
/// by `seller.id` so a seller can never reach another seller's rows.
pub struct CurrentSeller(pub Seller);

impl FromRequestParts<AppState> for CurrentSeller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(claims) = CurrentUser::from_request_parts(parts, state).await?;
        let seller = SellerRepository::new(state.pool())
            .get_by_user_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Forbidden("no seller profile for this account".to_string()))?;
        Ok(Self(seller))
    }
}

/// Extractor requiring a valid admin-namespace token.
///
/// User tokens fail here even when their signature is valid; the namespaces
/// are verified through distinct paths. The rejection is 401, not 403:
/// verification reports every failure uniformly, so a wrong-namespace token
/// is indistinguishable from a forged or expired one.
pub struct CurrentAdmin(pub AdminClaims);

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.tokens().verify_admin(token)?;
        Ok(Self(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/cart");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).expect("valid request").into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_present() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).expect("token"), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let parts = parts_with_auth(None);
        assert!(matches!(bearer_token(&parts), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_wrong_scheme_is_unauthorized() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(bearer_token(&parts), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_empty_bearer_is_unauthorized() {
        let parts = parts_with_auth(Some("Bearer "));
        assert!(matches!(bearer_token(&parts), Err(AppError::Unauthorized(_))));
    }
}

//! Request extractors for identity forwarded by the host platform.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use serde_json::json;

use crate::domain::entities::RequestContext;
use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const SITE_ID_HEADER: &str = "x-site-id";
pub const FIRST_NAME_HEADER: &str = "x-user-first-name";
pub const LAST_NAME_HEADER: &str = "x-user-last-name";
pub const CAPABILITIES_HEADER: &str = "x-user-capabilities";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
}

fn header_id(headers: &HeaderMap, name: &str) -> Result<i64, AppError> {
    header_str(headers, name)
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": format!("{} header is missing or invalid", name) }),
            )
        })
}

/// Builds the [`RequestContext`] from the trusted headers set by the host.
///
/// # Headers
///
/// - `X-User-Id`, `X-Site-Id` - positive integers, required
/// - `X-User-First-Name`, `X-User-Last-Name` - optional
/// - `X-User-Capabilities` - comma separated, optional
///
/// # Errors
///
/// Rejects with [`AppError::Unauthorized`] if either id is missing or not a
/// positive integer.
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        let user_id = header_id(headers, USER_ID_HEADER)?;
        let site_id = header_id(headers, SITE_ID_HEADER)?;

        let capabilities = header_str(headers, CAPABILITIES_HEADER)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(RequestContext {
            user_id,
            site_id,
            first_name: header_str(headers, FIRST_NAME_HEADER)
                .unwrap_or_default()
                .to_string(),
            last_name: header_str(headers, LAST_NAME_HEADER)
                .unwrap_or_default()
                .to_string(),
            capabilities,
        })
    }
}

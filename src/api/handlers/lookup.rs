//! Handler for the vehicle lookup endpoint.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderName, HeaderValue, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::dto::lookup::LookupParams;
use crate::domain::{LookupQuery, QueryError};
use crate::error::AppError;
use crate::state::AppState;

/// Header reporting whether the body came from the cache.
pub static X_PROXY_CACHE: HeaderName = HeaderName::from_static("x-proxy-cache");

/// Content type of every lookup response.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Looks up a vehicle number through the caching proxy.
///
/// # Endpoint
///
/// `GET /api/lookup?query=<vehicle number>&key=<access key>`
///
/// `vehicle`, `number` and `vehicle_number` are accepted as aliases of `query`.
/// The access key is checked by [`crate::api::middleware::api_key`] before
/// this handler runs.
///
/// # Request Flow
///
/// 1. Pick the first non-empty lookup value
/// 2. Normalize it (trim, uppercase) and require at least 8 characters
/// 3. Serve from cache or fetch, sanitize and rebrand upstream data
/// 4. Return the body with `X-Proxy-Cache: HIT|MISS`
///
/// The body is returned exactly as stored, so repeated hits are
/// byte-identical. A non-JSON upstream body is passed through as cleaned text
/// under the same JSON content type.
///
/// # Errors
///
/// - 400 Bad Request if the lookup value is missing or too short
/// - 502 Bad Gateway if the upstream fails
pub async fn lookup_handler(
    State(state): State<AppState>,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|e| {
        AppError::bad_request("invalid query string", Some(e.body_text()))
    })?;

    let raw = params.lookup_value().ok_or(QueryError::Missing)?;
    let query = LookupQuery::parse(raw)?;

    let outcome = state.lookup_service.fetch_or_cached(&query).await?;
    debug!("Lookup {} served ({})", query, outcome.cache_status);

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8)),
            (
                X_PROXY_CACHE.clone(),
                HeaderValue::from_static(outcome.cache_status.as_str()),
            ),
        ],
        outcome.body,
    )
        .into_response())
}

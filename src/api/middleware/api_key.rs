//! Access-key middleware.

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::api::dto::lookup::KeyParam;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using the `key` query parameter.
///
/// # Query Format
///
/// ```text
/// GET /api/lookup?query=CH01AC9090&key=<access key>
/// ```
///
/// The key is trimmed and compared against the static allow-list in
/// [`AppState::api_keys`].
///
/// # Errors
///
/// Returns `403 Forbidden` with `{"error": "invalid key"}` if the key is
/// missing, empty, or not in the allow-list.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{routing::get, middleware};
/// use crate::api::middleware::api_key;
///
/// let lookup = get(lookup_handler)
///     .route_layer(middleware::from_fn_with_state(state.clone(), api_key::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = Query::<KeyParam>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(params)| params.key);

    match key {
        Some(key) if st.api_keys.allows(&key) => Ok(next.run(req).await),
        _ => {
            debug!("Rejected request with missing or unknown key");
            Err(AppError::forbidden("invalid key"))
        }
    }
}

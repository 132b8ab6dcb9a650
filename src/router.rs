use axum::{routing::get, Router};

use crate::handlers::{dispatch, handle_about, handle_root};
use crate::middleware::{self, Middleware};
use crate::types::AppState;

/// Static pages get their own routes; everything else goes through the
/// action/title matcher.
pub fn build_app(state: AppState, chain: &[Middleware]) -> Router {
    let router = Router::new()
        .route("/", get(handle_root))
        .route("/about", get(handle_about))
        .fallback(dispatch)
        .with_state(state);
    middleware::apply(router, chain)
}

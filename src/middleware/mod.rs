//! Request interceptors wrapped around the router.
//!
//! The chain is a plain ordered list, folded once when the app is built; the
//! first entry ends up outermost, seeing the request first and the response
//! last.

use axum::{middleware::from_fn, Router};

pub mod logging;
pub mod recovery;

pub use recovery::install_panic_hook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Middleware {
    /// Method, path, status and elapsed time of every request
    Logging,
    /// Turns a panicking handler into a 500
    Recovery,
}

/// Logging outermost so recovered panics are still timed and logged
pub const DEFAULT_CHAIN: [Middleware; 2] = [Middleware::Logging, Middleware::Recovery];

impl Middleware {
    fn wrap<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        match self {
            Middleware::Logging => router.layer(from_fn(logging::log_request)),
            Middleware::Recovery => router.layer(from_fn(recovery::recover)),
        }
    }
}

/// Compose `chain` around `router`. `Router::layer` makes the most recent
/// layer outermost, so the list is applied back to front.
pub fn apply<S>(router: Router<S>, chain: &[Middleware]) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    chain.iter().rev().fold(router, |router, middleware| middleware.wrap(router))
}

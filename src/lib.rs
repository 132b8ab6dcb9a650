//! Folio - a small wiki that keeps one text file per page
//!
//! Requests pass through an ordered middleware chain into a dispatcher that
//! validates `/<action>/<title>` paths before any page is touched.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod router;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use components::{TemplateData, TemplateSet};
pub use config::Config;
pub use errors::WikiError;
pub use middleware::{Middleware, DEFAULT_CHAIN};
pub use router::build_app;
pub use services::{match_path, PageStore};
pub use types::{Action, AppState, ListEntry, Page, RouteMatch};

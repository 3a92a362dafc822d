mod boundary;
mod error;
mod params;
mod shell;

pub use error::{AppError, DataError};

use axum::Router;
use axum::http::StatusCode;
use axum::response::{Redirect, Response};
use axum::routing::get;
use tower::ServiceBuilder;

use crate::middleware;
use crate::outcome::{Caught, FALLBACK_TITLE};

pub fn routes() -> Router {
    Router::new()
        .merge(params::routes())
        .route("/", get(page))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Routes wrapped in the request tracing and panic layers.
pub fn app() -> Router {
    let middleware = ServiceBuilder::new()
        .layer(axum::middleware::from_fn(middleware::trace::middleware))
        .layer(middleware::panic::middleware());

    routes().layer(middleware)
}

async fn page() -> Redirect {
    Redirect::to("/demos/params")
}

async fn not_found() -> Response {
    params::render_caught(&Caught::NotFound, FALLBACK_TITLE)
}

async fn method_not_allowed() -> Response {
    params::render_caught(&Caught::other(StatusCode::METHOD_NOT_ALLOWED), FALLBACK_TITLE)
}

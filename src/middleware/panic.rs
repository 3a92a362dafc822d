use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::routes::AppError;

fn panic_detail(error: &(dyn Any + Send)) -> &str {
    if let Some(s) = error.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = error.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

fn handle_panic(error: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_detail(&*error);
    AppError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

pub fn middleware() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic)
}

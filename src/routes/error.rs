use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::outcome::{FALLBACK_TITLE, LoaderError};
use crate::routes::{boundary, shell};

pub const BOUNDARY_HEADER: &str = "x-boundary";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("loader failed: {0}")]
    Loader(#[from] LoaderError),
    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn public_message(&self) -> String {
        match self {
            AppError::Loader(err) => err.to_string(),
            AppError::Internal(_) => "Internal Server Error".to_owned(),
        }
    }

    fn report(&self) {
        match self {
            AppError::Loader(err) => error!("loader failed: {}", err),
            AppError::Internal(err) => error!("internal server error: {:#}", err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        let markup = shell::document(boundary::error(&self.public_message()), FALLBACK_TITLE);
        (StatusCode::INTERNAL_SERVER_ERROR, markup).into_response()
    }
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct DataError(#[from] pub AppError);

impl From<LoaderError> for DataError {
    fn from(err: LoaderError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for DataError {
    fn into_response(self) -> Response {
        self.0.report();
        let body = json!({ "message": self.0.public_message() });
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(BOUNDARY_HEADER, "error")],
            Json(body),
        )
            .into_response()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::body::to_bytes;
    use tracing::subscriber::DefaultGuard;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Installs a thread-local subscriber counting error events.
    pub(crate) fn count_errors() -> (Arc<AtomicUsize>, DefaultGuard) {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
        let guard = tracing::subscriber::set_default(subscriber);
        (count, guard)
    }

    struct ErrorMessages(Arc<Mutex<Vec<String>>>);

    struct MessageVisitor(Option<String>);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = Some(format!("{:?}", value));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for ErrorMessages {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                let mut visitor = MessageVisitor(None);
                event.record(&mut visitor);
                if let Some(message) = visitor.0 {
                    self.0.lock().unwrap().push(message);
                }
            }
        }
    }

    fn capture_errors() -> (Arc<Mutex<Vec<String>>>, DefaultGuard) {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(ErrorMessages(messages.clone()));
        let guard = tracing::subscriber::set_default(subscriber);
        (messages, guard)
    }

    async fn body_string(response: Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn loader_error_is_logged_once_and_shows_message() {
        let (count, _guard) = count_errors();

        let response = AppError::from(LoaderError::UndefinedFunction("lol")).into_response();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_string(response).await;
        assert!(body.contains("Error!"));
        assert!(body.contains("undefined function invocation: lol is not defined"));
        assert!(body.contains("<title>Oops...</title>"));
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let (count, _guard) = count_errors();

        let response = AppError::from(anyhow::anyhow!("database password is hunter2")).into_response();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        let body = body_string(response).await;
        assert!(body.contains("Internal Server Error"));
        assert!(!body.contains("hunter2"));
    }

    #[tokio::test]
    async fn data_error_is_json_and_logged_once() {
        let (count, _guard) = count_errors();

        let response = DataError::from(LoaderError::UndefinedFunction("lol")).into_response();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[BOUNDARY_HEADER], "error");

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            body,
            json!({ "message": "undefined function invocation: lol is not defined" })
        );
    }

    #[test]
    fn internal_error_logs_the_whole_context_chain() {
        let (messages, _guard) = capture_errors();

        let err = anyhow::anyhow!("connection refused").context("loading record");
        let _ = AppError::from(err).into_response();

        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            "internal server error: loading record: connection refused"
        );
    }
}

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const MISSING_RECORD: &str = "this-record-does-not-exist";
pub const SECRET_RECORD: &str = "shh-its-a-secret";
pub const EXPLODING_RECORD: &str = "kaboom";

pub const WEBMASTER_EMAIL: &str = "hello@remix.run";

pub const FALLBACK_TITLE: &str = "Oops...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(String),
    Caught(Caught),
    Unhandled(LoaderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caught {
    NotFound,
    Unauthorized(AccessDenied),
    Other {
        status: StatusCode,
        status_text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDenied {
    pub contact_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    #[error("undefined function invocation: {0} is not defined")]
    UndefinedFunction(&'static str),
}

/// Pretends to look the record up and decides how the route renders.
pub fn resolve(id: &str) -> Outcome {
    match id {
        MISSING_RECORD => Outcome::Caught(Caught::NotFound),
        SECRET_RECORD => Outcome::Caught(Caught::Unauthorized(AccessDenied {
            contact_email: WEBMASTER_EMAIL.to_owned(),
        })),
        EXPLODING_RECORD => Outcome::Unhandled(LoaderError::UndefinedFunction("lol")),
        _ => Outcome::Found(id.to_owned()),
    }
}

impl Outcome {
    pub fn title(&self) -> String {
        match self {
            Outcome::Found(param) => format!("Param: {}", param),
            Outcome::Caught(_) | Outcome::Unhandled(_) => FALLBACK_TITLE.to_owned(),
        }
    }
}

impl Caught {
    pub fn other(status: StatusCode) -> Self {
        Caught::Other {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Caught::NotFound => StatusCode::NOT_FOUND,
            Caught::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Caught::Other { status, .. } => *status,
        }
    }

    pub fn status_text(&self) -> &str {
        match self {
            Caught::Other { status_text, .. } => status_text.as_str(),
            caught => caught.status().canonical_reason().unwrap_or_default(),
        }
    }

    /// JSON payload attached to the failure, if any.
    pub fn data(&self) -> Option<Value> {
        match self {
            Caught::Unauthorized(denied) => serde_json::to_value(denied).ok(),
            Caught::NotFound | Caught::Other { .. } => None,
        }
    }
}

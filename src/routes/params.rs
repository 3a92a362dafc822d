use axum::extract::{Path, RawQuery};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use url::form_urlencoded;

use crate::outcome::{self, Caught, Outcome};
use crate::routes::error::BOUNDARY_HEADER;
use crate::routes::{AppError, DataError, boundary, shell};

pub fn routes() -> Router {
    Router::new()
        .route("/demos/params", get(page_index))
        .route("/demos/params/{id}", get(page_param))
}

async fn page_index() -> maud::Markup {
    let links = [
        ("one", "a record that exists"),
        (outcome::MISSING_RECORD, "a record that does not exist"),
        (outcome::SECRET_RECORD, "a record you are not allowed to see"),
        (outcome::EXPLODING_RECORD, "a loader that blows up"),
    ];

    let markup = maud::html! {
        h2 { "Params" }
        p { "The last segment of the URL is handed to a loader which decides how the page renders." }
        ul {
            @for (id, label) in links {
                li {
                    a href={ "/demos/params/" (id) } { (id) }
                    " - " (label)
                }
            }
        }
    };

    shell::document(markup, "Params")
}

const DATA_KEY: &str = "_data";

fn wants_data(query: Option<&str>) -> bool {
    query.is_some_and(|query| {
        form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == DATA_KEY)
    })
}

async fn page_param(Path(id): Path<String>, RawQuery(query): RawQuery) -> Response {
    let outcome = outcome::resolve(&id);

    if wants_data(query.as_deref()) {
        loader_data(outcome).into_response()
    } else {
        render(outcome).into_response()
    }
}

fn render(outcome: Outcome) -> Result<Response, AppError> {
    let title = outcome.title();

    match outcome {
        Outcome::Found(param) => {
            let markup = maud::html! {
                h1 { "The param is " i style="color: red" { (param) } }
            };
            Ok(shell::document(markup, &title).into_response())
        }
        Outcome::Caught(caught) => Ok(render_caught(&caught, &title)),
        Outcome::Unhandled(err) => Err(err.into()),
    }
}

pub fn render_caught(caught: &Caught, title: &str) -> Response {
    let markup = shell::document(boundary::catch(caught), title);
    (caught.status(), markup).into_response()
}

fn loader_data(outcome: Outcome) -> Result<Response, DataError> {
    match outcome {
        Outcome::Found(param) => Ok((StatusCode::OK, Json(json!({ "param": param }))).into_response()),
        Outcome::Caught(caught) => {
            let status = caught.status();
            let headers = [(BOUNDARY_HEADER, "catch")];
            Ok(match caught.data() {
                Some(data) => (status, headers, Json(data)).into_response(),
                None => (status, headers, caught.status_text().to_owned()).into_response(),
            })
        }
        Outcome::Unhandled(err) => Err(err.into()),
    }
}

use axum::routing::get;
use axum::Router;

mod delete;
mod editor;
mod index;
mod new_document;
mod users;
mod viewer;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(index::handler))
        .route("/new", get(new_document::form).post(new_document::create))
        .route("/users/signin", get(users::signin_form).post(users::signin))
        .route("/users/signout", axum::routing::post(users::signout))
        .route("/:name", get(viewer::handler))
        .route("/:name/edit", get(editor::form).post(editor::submit))
        // GET kept for plain links; the list view submits a POST
        .route("/:name/delete", get(delete::handler).post(delete::handler))
        .with_state(state)
}

/// Names the handlers are willing to pass to the document store: a single
/// visible path component.
pub fn valid_document_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && !name.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
}

pub(crate) fn does_not_exist(name: &str) -> String {
    format!("{} does not exist.", name)
}

pub(crate) fn invalid_name(name: &str) -> String {
    format!("{} is not a valid document name.", name)
}

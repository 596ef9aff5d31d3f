use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::Response;
use tracing::instrument;

use crate::response::HtmlError;
use crate::session::{PageContext, RequestContext};
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub page: PageContext,
    pub documents: Vec<String>,
}

#[instrument(skip_all)]
pub async fn handler(
    State(state): State<ServiceState>,
    ctx: RequestContext,
) -> Result<Response, HtmlError> {
    let documents = state.documents().list().await?;
    tracing::debug!(count = documents.len(), "listing documents");

    let template = IndexTemplate {
        page: ctx.page().await?,
        documents,
    };
    Ok(template.into_response())
}

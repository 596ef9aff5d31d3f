use askama::Template;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use super::{does_not_exist, valid_document_name};
use crate::content::{self, ContentKind};
use crate::documents::DocumentStoreError;
use crate::response::{redirect_home, HtmlError};
use crate::session::{PageContext, RequestContext};
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/document.html")]
pub struct DocumentTemplate {
    pub page: PageContext,
    pub name: String,
    pub body: String,
}

#[instrument(skip(state, ctx))]
pub async fn handler(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    ctx: RequestContext,
) -> Result<Response, HtmlError> {
    if !valid_document_name(&name) || !state.documents().exists(&name).await? {
        ctx.flash(does_not_exist(&name)).await?;
        return Ok(redirect_home());
    }

    let raw = match state.documents().read(&name).await {
        Ok(raw) => raw,
        // removed between the existence check and the read
        Err(DocumentStoreError::NotFound(_)) => {
            ctx.flash(does_not_exist(&name)).await?;
            return Ok(redirect_home());
        }
        Err(e) => return Err(e.into()),
    };

    let rendered = match content::render(&name, &raw) {
        Ok(rendered) => rendered,
        Err(unsupported) => {
            tracing::debug!(document = %name, "unsupported content type");
            ctx.flash(unsupported.to_string()).await?;
            return Ok(redirect_home());
        }
    };

    let content_type = rendered.content_type;
    let body = match rendered.kind {
        ContentKind::Html => DocumentTemplate {
            page: ctx.page().await?,
            name,
            body: rendered.body,
        }
        .render()?,
        _ => rendered.body,
    };

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

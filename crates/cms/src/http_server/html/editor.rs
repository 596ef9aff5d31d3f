use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use tracing::instrument;

use super::{does_not_exist, invalid_name, valid_document_name};
use crate::documents::DocumentStoreError;
use crate::gate;
use crate::response::{redirect_home, HtmlError};
use crate::session::{PageContext, RequestContext};
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/edit_document.html")]
pub struct EditDocumentTemplate {
    pub page: PageContext,
    pub name: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub file_content: String,
}

#[instrument(skip(state, ctx))]
pub async fn form(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    ctx: RequestContext,
) -> Result<Response, HtmlError> {
    gate::require_authenticated(&ctx, || render_editor(&state, &ctx, &name)).await
}

#[instrument(skip(state, ctx, form))]
pub async fn submit(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    ctx: RequestContext,
    Form(form): Form<EditForm>,
) -> Result<Response, HtmlError> {
    gate::require_authenticated(&ctx, || save_document(&state, &ctx, &name, &form)).await
}

async fn render_editor(
    state: &ServiceState,
    ctx: &RequestContext,
    name: &str,
) -> Result<Response, HtmlError> {
    let raw = if valid_document_name(name) {
        match state.documents().read(name).await {
            Ok(raw) => Some(raw),
            Err(DocumentStoreError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        }
    } else {
        None
    };

    let Some(raw) = raw else {
        ctx.flash(does_not_exist(name)).await?;
        return Ok(redirect_home());
    };

    let template = EditDocumentTemplate {
        page: ctx.page().await?,
        name: name.to_string(),
        content: String::from_utf8_lossy(&raw).into_owned(),
    };
    Ok(template.into_response())
}

/// Replace the document with the submitted text. A missing document is
/// created rather than rejected.
async fn save_document(
    state: &ServiceState,
    ctx: &RequestContext,
    name: &str,
    form: &EditForm,
) -> Result<Response, HtmlError> {
    if !valid_document_name(name) {
        ctx.flash(invalid_name(name)).await?;
        return Ok(redirect_home());
    }

    state
        .documents()
        .write(name, form.file_content.as_bytes())
        .await?;
    tracing::info!(document = name, bytes = form.file_content.len(), "document updated");

    ctx.flash(format!("{} has been updated.", name)).await?;
    Ok(redirect_home())
}

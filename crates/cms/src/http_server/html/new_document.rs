use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use tracing::instrument;

use super::{invalid_name, valid_document_name};
use crate::gate;
use crate::response::{redirect_home, HtmlError};
use crate::session::{PageContext, RequestContext};
use crate::ServiceState;

const NAME_REQUIRED: &str = "A name is required.";

#[derive(Template)]
#[template(path = "pages/new_document.html")]
pub struct NewDocumentTemplate {
    pub page: PageContext,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NewDocumentForm {
    #[serde(default)]
    pub name: String,
}

#[instrument(skip_all)]
pub async fn form(ctx: RequestContext) -> Result<Response, HtmlError> {
    gate::require_authenticated(&ctx, || render_form(&ctx, String::new())).await
}

#[instrument(skip_all)]
pub async fn create(
    State(state): State<ServiceState>,
    ctx: RequestContext,
    Form(form): Form<NewDocumentForm>,
) -> Result<Response, HtmlError> {
    gate::require_authenticated(&ctx, || create_document(&state, &ctx, &form)).await
}

async fn create_document(
    state: &ServiceState,
    ctx: &RequestContext,
    form: &NewDocumentForm,
) -> Result<Response, HtmlError> {
    let name = form.name.trim();

    if name.is_empty() {
        return reject(ctx, NAME_REQUIRED.to_string(), String::new()).await;
    }
    if !valid_document_name(name) {
        return reject(ctx, invalid_name(name), name.to_string()).await;
    }

    state.documents().write(name, b"").await?;
    tracing::info!(document = name, "document created");

    ctx.flash(format!("{} was created.", name)).await?;
    Ok(redirect_home())
}

async fn render_form(ctx: &RequestContext, name: String) -> Result<Response, HtmlError> {
    let template = NewDocumentTemplate {
        page: ctx.page().await?,
        name,
    };
    Ok(template.into_response())
}

/// Re-render the form with `message` shown inline.
async fn reject(
    ctx: &RequestContext,
    message: String,
    name: String,
) -> Result<Response, HtmlError> {
    ctx.flash(message).await?;
    let template = NewDocumentTemplate {
        page: ctx.page().await?,
        name,
    };
    Ok((StatusCode::NOT_FOUND, template).into_response())
}

use axum::extract::{Path, State};
use axum::response::Response;
use tracing::instrument;

use super::{does_not_exist, valid_document_name};
use crate::documents::DocumentStoreError;
use crate::gate;
use crate::response::{redirect_home, HtmlError};
use crate::session::RequestContext;
use crate::ServiceState;

#[instrument(skip(state, ctx))]
pub async fn handler(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
    ctx: RequestContext,
) -> Result<Response, HtmlError> {
    gate::require_authenticated(&ctx, || delete_document(&state, &ctx, &name)).await
}

async fn delete_document(
    state: &ServiceState,
    ctx: &RequestContext,
    name: &str,
) -> Result<Response, HtmlError> {
    if !valid_document_name(name) {
        ctx.flash(does_not_exist(name)).await?;
        return Ok(redirect_home());
    }

    match state.documents().delete(name).await {
        Ok(()) => {
            tracing::info!(document = name, "document deleted");
            ctx.flash(format!("{} has been deleted.", name)).await?;
        }
        Err(DocumentStoreError::NotFound(_)) => {
            tracing::warn!(document = name, "delete of missing document");
            ctx.flash(does_not_exist(name)).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(redirect_home())
}

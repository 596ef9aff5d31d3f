use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use tracing::instrument;

use crate::gate::{self, SignInOutcome};
use crate::response::{redirect_home, HtmlError};
use crate::session::{PageContext, RequestContext};
use crate::ServiceState;

#[derive(Template)]
#[template(path = "pages/signin.html")]
pub struct SigninTemplate {
    pub page: PageContext,
    pub attempted_username: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[instrument(skip_all)]
pub async fn signin_form(ctx: RequestContext) -> Result<Response, HtmlError> {
    let template = SigninTemplate {
        page: ctx.page().await?,
        attempted_username: String::new(),
    };
    Ok(template.into_response())
}

#[instrument(skip_all)]
pub async fn signin(
    State(state): State<ServiceState>,
    ctx: RequestContext,
    Form(form): Form<SigninForm>,
) -> Result<Response, HtmlError> {
    let outcome = gate::sign_in(&ctx, state.credentials(), &form.username, &form.password).await?;

    match outcome {
        SignInOutcome::Redirect => Ok(redirect_home()),
        SignInOutcome::RenderSigninForm => {
            let template = SigninTemplate {
                page: ctx.page().await?,
                attempted_username: form.username,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
    }
}

#[instrument(skip_all)]
pub async fn signout(ctx: RequestContext) -> Result<Response, HtmlError> {
    gate::sign_out(&ctx).await?;
    tracing::info!("user signed out");
    Ok(redirect_home())
}

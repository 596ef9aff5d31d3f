//! Authorization chokepoint for every mutating route, plus the sign-in and
//! sign-out transitions that move a session between states.

use std::future::Future;

use axum::response::Response;

use crate::credentials::CredentialStore;
use crate::response::{redirect_home, HtmlError};
use crate::session::RequestContext;

pub const SIGN_IN_REQUIRED: &str = "You must be signed in to do that.";
pub const WELCOME: &str = "Welcome!";
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";
pub const SIGNED_OUT: &str = "You have been signed out.";

pub fn is_authenticated(ctx: &RequestContext) -> bool {
    ctx.username().is_some()
}

/// Run `action` only for a signed-in caller; everyone else is sent back to
/// the document list with a flash and `action` never runs.
pub async fn require_authenticated<F, Fut>(
    ctx: &RequestContext,
    action: F,
) -> Result<Response, HtmlError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Response, HtmlError>>,
{
    if is_authenticated(ctx) {
        return action().await;
    }

    tracing::info!("rejected unauthenticated request");
    ctx.flash(SIGN_IN_REQUIRED).await?;
    Ok(redirect_home())
}

/// Where a sign-in attempt leaves the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    Redirect,
    RenderSigninForm,
}

pub async fn sign_in(
    ctx: &RequestContext,
    credentials: &CredentialStore,
    username: &str,
    password: &str,
) -> Result<SignInOutcome, HtmlError> {
    let store = credentials.clone();
    let (user, pass) = (username.to_string(), password.to_string());
    // bcrypt verification blocks for tens of milliseconds
    let valid = tokio::task::spawn_blocking(move || store.verify(&user, &pass)).await??;

    if valid {
        ctx.set_username(username).await?;
        ctx.flash(WELCOME).await?;
        tracing::info!(username, "user signed in");
        Ok(SignInOutcome::Redirect)
    } else {
        ctx.flash(INVALID_CREDENTIALS).await?;
        tracing::info!(username, "rejected sign-in");
        Ok(SignInOutcome::RenderSigninForm)
    }
}

/// Clear the signed-in user. Safe to call when nobody is signed in.
pub async fn sign_out(ctx: &RequestContext) -> Result<(), HtmlError> {
    ctx.clear_username().await?;
    ctx.flash(SIGNED_OUT).await?;
    Ok(())
}

use std::time::Duration;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tokio::time::timeout;

use crate::ServiceState;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Ready once the document root can be listed and the credential file is
/// present.
#[tracing::instrument(skip(state))]
pub async fn handler(State(state): State<ServiceState>) -> Response {
    let check = async {
        state.documents().list().await.map_err(|e| e.to_string())?;
        match tokio::fs::try_exists(state.credentials().path()).await {
            Ok(true) => Ok::<(), String>(()),
            Ok(false) => Err("credential file is missing".to_string()),
            Err(e) => Err(e.to_string()),
        }
    };

    match timeout(HEALTH_CHECK_TIMEOUT, check).await {
        Ok(Ok(())) => {
            let msg = serde_json::json!({"status": "ok"});
            (StatusCode::OK, Json(msg)).into_response()
        }
        Ok(Err(message)) => {
            tracing::warn!(%message, "readiness check failed");
            let msg = serde_json::json!({"status": "failure", "message": message});
            (StatusCode::SERVICE_UNAVAILABLE, Json(msg)).into_response()
        }
        Err(_) => {
            let msg = serde_json::json!({
                "status": "failure",
                "message": "health check timed out"
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(msg)).into_response()
        }
    }
}

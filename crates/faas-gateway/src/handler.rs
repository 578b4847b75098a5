//! Function update endpoint
//!
//! `PUT /system/functions` takes a function deployment request, reads the
//! function's Deployment, reconciles it and writes it back. A write that loses
//! a race with another writer re-runs the whole read/reconcile/write sequence.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use tracing::{info, warn};

use faas_common::{Error, FunctionDeployment};
use faas_update::UpdateReconciler;

use crate::client::DeploymentClient;
use crate::retry::{retry_with_backoff, RetryConfig};

/// Shared state for the update handler
pub struct GatewayState {
    client: Arc<dyn DeploymentClient>,
    reconciler: UpdateReconciler,
    retry: RetryConfig,
}

impl GatewayState {
    /// Create handler state
    pub fn new(client: Arc<dyn DeploymentClient>, retry: RetryConfig) -> Self {
        Self {
            client,
            reconciler: UpdateReconciler::new(),
            retry,
        }
    }
}

/// HTTP error carrying the failed update's cause
#[derive(Debug)]
pub struct UpdateError(pub Error);

impl From<Error> for UpdateError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl UpdateError {
    /// Status code reported to the caller
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        (self.status(), self.0.to_string()).into_response()
    }
}

/// Build the gateway router
pub fn router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/system/functions", put(update_handler))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

async fn update_handler(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Result<StatusCode, UpdateError> {
    let request = FunctionDeployment::from_json(&body)?;

    match apply_update(&state, &request).await {
        Ok(()) => {
            info!(service = %request.service, image = %request.image, "function updated");
            Ok(StatusCode::OK)
        }
        Err(e) => {
            warn!(service = %request.service, error = %e, "function update failed");
            Err(e.into())
        }
    }
}

/// Read, reconcile and write back the Deployment for `request`
pub async fn apply_update(state: &GatewayState, request: &FunctionDeployment) -> Result<(), Error> {
    request.validate()?;

    retry_with_backoff(&state.retry, "update_function", Error::is_retryable, || async move {
        let current = state
            .client
            .get_deployment(&request.service)
            .await?
            .ok_or_else(|| Error::not_found(&request.service))?;

        let updated = state.reconciler.reconcile(request, current)?;
        state.client.replace_deployment(&updated).await
    })
    .await
}

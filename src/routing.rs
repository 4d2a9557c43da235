use crate::{
    application::ApplicationState,
    dto::{input, output},
    error::Error,
    service::broadcast_service::BroadcastService,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub const LIVENESS_MESSAGE: &str = "push-broadcaster is live and working!";

pub fn routing() -> Router<ApplicationState> {
    Router::new()
        .route("/", get(liveness))
        .route("/sendNotification", post(send_notification))
}

async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

async fn send_notification(
    State(broadcast_service): State<Arc<dyn BroadcastService>>,
    request: Result<Json<input::NotificationRequest>, JsonRejection>,
) -> Result<Response, Error> {
    // body that is not a JSON object is treated as an empty one,
    // so it ends with the same validation error as missing fields
    let request = match request {
        Ok(Json(request)) => request,
        Err(JsonRejection::BytesRejection(rejection)) => return Ok(rejection.into_response()),
        Err(rejection) => {
            tracing::debug!(%rejection, "request body is not a notification");
            input::NotificationRequest::default()
        }
    };

    let result: output::BroadcastResult = broadcast_service.broadcast(request).await?;

    Ok(Json(result).into_response())
}

use super::{ApplicationMiddleware, ApplicationState};
use crate::routing::routing;
use axum::Router;
use tower::ServiceBuilder;

pub fn create_application(
    application_state: ApplicationState,
    application_middleware: ApplicationMiddleware,
) -> Router {
    // cors must wrap the route directly,
    // it requires a response body that implements Default
    routing().with_state(application_state).layer(
        ServiceBuilder::new()
            .layer(application_middleware.trace)
            .layer(application_middleware.body_limit)
            .layer(application_middleware.cors),
    )
}

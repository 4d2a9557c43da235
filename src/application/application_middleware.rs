use super::ApplicationEnv;
use anyhow::Context;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub struct ApplicationMiddleware {
    pub trace: TraceLayer<SharedClassifier<ServerErrorsAsFailures>>,
    pub cors: CorsLayer,
    pub body_limit: RequestBodyLimitLayer,
}

pub fn create_middleware(env: &ApplicationEnv) -> anyhow::Result<ApplicationMiddleware> {
    let trace = TraceLayer::new_for_http();

    let cors = match &env.cors_allowed_origins {
        Some(origins) => create_restricted_cors(origins)?,
        None => {
            tracing::warn!("CORS allow-list not configured, allowing any origin");
            CorsLayer::permissive()
        }
    };

    let body_limit = RequestBodyLimitLayer::new(env.max_http_content_len);

    Ok(ApplicationMiddleware {
        trace,
        cors,
        body_limit,
    })
}

fn create_restricted_cors(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(?origins, "CORS restricted to allowed origins");

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Ok(cors)
}

use super::DispatchService;
use crate::{
    error::Error,
    gateway::{DispatchResult, PushGateway, PushMessage},
};
use axum::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;

pub struct PerTokenDispatchService {
    gateway: Arc<dyn PushGateway>,
}

impl PerTokenDispatchService {
    pub fn new(gateway: Arc<dyn PushGateway>) -> Self {
        Self { gateway }
    }

    async fn send(&self, token: &str, message: &PushMessage) -> DispatchResult {
        match self.gateway.send(token, message).await {
            Ok(()) => DispatchResult::succeeded(token),
            Err(err) => {
                tracing::warn!(token, %err, "failed to send notification");
                DispatchResult::failed(token, err)
            }
        }
    }
}

#[async_trait]
impl DispatchService for PerTokenDispatchService {
    async fn dispatch(&self, tokens: &[String], message: &PushMessage) -> Result<usize, Error> {
        tracing::info!(tokens = tokens.len(), "sending notifications");

        let sends = tokens.iter().map(|token| self.send(token, message));
        let results = join_all(sends).await;

        let success_count = results.iter().filter(|result| result.success).count();
        tracing::info!(
            success_count,
            failure_count = results.len() - success_count,
            "sent notifications"
        );

        Ok(success_count)
    }
}

use super::DispatchService;
use crate::{
    error::Error,
    gateway::{PushGateway, PushMessage},
};
use axum::async_trait;
use std::sync::Arc;

pub struct MulticastDispatchService {
    gateway: Arc<dyn PushGateway>,
}

impl MulticastDispatchService {
    pub fn new(gateway: Arc<dyn PushGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl DispatchService for MulticastDispatchService {
    async fn dispatch(&self, tokens: &[String], message: &PushMessage) -> Result<usize, Error> {
        tracing::info!(tokens = tokens.len(), "sending multicast");

        let batch_response = self.gateway.send_multicast(tokens, message).await?;

        for failed in batch_response.responses.iter().filter(|result| !result.success) {
            tracing::warn!(
                token = failed.token,
                err = failed.error.as_deref().unwrap_or_default(),
                "failed to send notification"
            );
        }
        tracing::info!(
            success_count = batch_response.success_count,
            failure_count = batch_response.failure_count,
            "sent multicast"
        );

        Ok(batch_response.success_count)
    }
}

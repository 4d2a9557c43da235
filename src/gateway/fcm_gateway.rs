use super::{
    dto::{FcmErrorResponse, FcmSendRequest},
    fcm_access_token_provider::FcmAccessTokenProvider,
    BatchResponse, DispatchResult, Error, FcmGatewayConfig, PushGateway, PushMessage,
};
use axum::async_trait;
use futures_util::future::join_all;

/// FCM rejects multicast requests with more tokens
pub const MAX_MULTICAST_TOKENS: usize = 500;

pub struct FcmGateway {
    send_url: String,
    http_client: reqwest::Client,
    access_token_provider: FcmAccessTokenProvider,
}

impl FcmGateway {
    ///
    /// ### Errors
    /// - [Error::Credentials] when credentials are invalid
    ///
    pub fn new(config: FcmGatewayConfig) -> Result<Self, Error> {
        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            config.api_url, config.credentials.project_id
        );
        let http_client = reqwest::Client::new();
        let access_token_provider =
            FcmAccessTokenProvider::new(config.credentials, http_client.clone())?;

        Ok(Self {
            send_url,
            http_client,
            access_token_provider,
        })
    }

    async fn send_with_access_token(
        &self,
        access_token: &str,
        token: &str,
        message: &PushMessage,
    ) -> Result<(), Error> {
        let response = self
            .http_client
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&FcmSendRequest::new(token, message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<FcmErrorResponse>(&body) {
            Ok(error_response) => error_response.error.message,
            Err(_) => body,
        };

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_chunk(
        &self,
        access_token: &str,
        tokens: &[String],
        message: &PushMessage,
    ) -> Vec<DispatchResult> {
        let sends = tokens.iter().map(|token| async move {
            match self.send_with_access_token(access_token, token, message).await {
                Ok(()) => DispatchResult::succeeded(token.as_str()),
                Err(err) => DispatchResult::failed(token.as_str(), err),
            }
        });

        join_all(sends).await
    }
}

#[async_trait]
impl PushGateway for FcmGateway {
    async fn send(&self, token: &str, message: &PushMessage) -> Result<(), Error> {
        let access_token = self.access_token_provider.access_token().await?;

        self.send_with_access_token(&access_token, token, message)
            .await
    }

    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> Result<BatchResponse, Error> {
        let access_token = self.access_token_provider.access_token().await?;

        let mut batch_response = BatchResponse::default();
        for chunk in tokens.chunks(MAX_MULTICAST_TOKENS) {
            tracing::debug!(tokens = chunk.len(), "sending multicast chunk");
            let results = self.send_chunk(&access_token, chunk, message).await;
            batch_response.extend(results);
        }

        Ok(batch_response)
    }
}

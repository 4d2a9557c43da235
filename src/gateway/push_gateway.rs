use super::{BatchResponse, Error, PushMessage};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushGateway: Send + Sync {
    ///
    /// Send message to a single device
    ///
    /// ### Errors
    /// - [Error::Api] when gateway rejected the message,
    ///   e.g. token is not registered anymore
    /// - any other variant when request could not be made
    ///
    async fn send(&self, token: &str, message: &PushMessage) -> Result<(), Error>;

    ///
    /// Send the same message to many devices.
    /// Failure of a single device does not fail the whole call.
    ///
    /// ### Returns
    /// [BatchResponse] with one entry per token, in order of `tokens`
    ///
    /// ### Errors
    /// Only when none of the messages could be sent,
    /// e.g. when access token cannot be obtained
    ///
    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> Result<BatchResponse, Error>;
}

use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BroadcastService: Send + Sync {
    ///
    /// Send notification to every registered device.
    ///
    /// ### Returns
    /// Number of devices the notification was delivered to
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - title or body is missing or empty
    ///     - key is missing and it is required
    /// - [Error::Unauthorized] when key does not match
    /// - [Error::NoRecipients] when there is no valid device token
    /// - [Error::Database] when tokens could not be read
    /// - [Error::Gateway] when gateway failed as a whole
    ///
    async fn broadcast(
        &self,
        request: input::NotificationRequest,
    ) -> Result<output::BroadcastResult, Error>;
}

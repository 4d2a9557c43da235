use crate::{error::Error, gateway::PushMessage};
use axum::async_trait;

///
/// Strategy of fanning message out to devices
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DispatchService: Send + Sync {
    ///
    /// Send message to all tokens.
    /// Failure of a single token is logged and does not
    /// prevent delivery to the remaining ones.
    ///
    /// ### Returns
    /// Number of tokens the message was delivered to
    ///
    /// ### Errors
    /// - [Error::Gateway] when gateway failed as a whole
    ///
    async fn dispatch(&self, tokens: &[String], message: &PushMessage) -> Result<usize, Error>;
}

use super::error::Error;
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    ///
    /// Reads device token field of every user record.
    ///
    /// ### Returns
    /// One entry per user. Entry is `None` when the field
    /// is missing or is not a string.
    ///
    async fn find_device_tokens(&self) -> Result<Vec<Option<String>>, Error>;
}

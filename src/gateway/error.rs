#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("access token error: {0}")]
    AccessToken(String),

    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("fcm error {status}: {message}")]
    Api { status: u16, message: String },
}

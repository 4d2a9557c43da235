use super::{
    dto::{GoogleJwtClaims, GoogleTokenResponse, FIREBASE_MESSAGING_SCOPE},
    Error, ServiceAccountKey,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use time::OffsetDateTime;
use tokio::sync::Mutex;

const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const JWT_LIFESPAN_SECONDS: i64 = 3600;

/// Cached token is refreshed when it's that close to expiration
const EXPIRATION_MARGIN_SECONDS: i64 = 60;

struct CachedAccessToken {
    access_token: String,
    expire_at: i64,
}

///
/// Obtains OAuth2 access tokens for the service account
/// using the JWT bearer grant and caches them until they expire.
///
pub struct FcmAccessTokenProvider {
    credentials: ServiceAccountKey,
    encoding_key: EncodingKey,
    http_client: reqwest::Client,
    cache: Mutex<Option<CachedAccessToken>>,
}

impl FcmAccessTokenProvider {
    ///
    /// ### Errors
    /// - [Error::Credentials] when private key is not a valid RSA PEM
    ///
    pub fn new(
        credentials: ServiceAccountKey,
        http_client: reqwest::Client,
    ) -> Result<Self, Error> {
        let encoding_key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|err| Error::Credentials(format!("invalid private key: {err}")))?;

        Ok(Self {
            credentials,
            encoding_key,
            http_client,
            cache: Mutex::new(None),
        })
    }

    pub async fn access_token(&self) -> Result<String, Error> {
        // lock is held during refresh so concurrent
        // senders don't request multiple tokens at once
        let mut cache = self.cache.lock().await;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        if let Some(cached) = cache.as_ref() {
            if cached.expire_at > now + EXPIRATION_MARGIN_SECONDS {
                return Ok(cached.access_token.clone());
            }
        }

        tracing::debug!("requesting new access token");
        let token_response = self.request_access_token(now).await?;

        let access_token = token_response.access_token;
        *cache = Some(CachedAccessToken {
            access_token: access_token.clone(),
            expire_at: now + token_response.expires_in,
        });
        tracing::debug!(expires_in = token_response.expires_in, "received access token");

        Ok(access_token)
    }

    async fn request_access_token(&self, now: i64) -> Result<GoogleTokenResponse, Error> {
        let claims = GoogleJwtClaims {
            iss: &self.credentials.client_email,
            scope: FIREBASE_MESSAGING_SCOPE,
            aud: &self.credentials.token_uri,
            iat: now,
            exp: now + JWT_LIFESPAN_SECONDS,
        };
        let assertion =
            jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?;

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::AccessToken(format!(
                "token request failed with status {status}: {body}"
            )));
        }

        let token_response = response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|err| Error::AccessToken(format!("invalid token response: {err}")))?;

        Ok(token_response)
    }
}

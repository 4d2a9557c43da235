use crate::{
    gateway::{ServiceAccountKey, FCM_API_URL},
    service::dispatch_service::DispatchStrategy,
};
use anyhow::{anyhow, Context};
use std::net::SocketAddr;

const DEFAULT_DB_USERS_COLLECTION: &str = "user";
const DEFAULT_DB_DEVICE_TOKEN_FIELD: &str = "fcmToken";

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_name: String,
    pub db_users_collection: String,
    pub db_device_token_field: String,

    pub max_http_content_len: usize,

    pub admin_key: String,
    pub admin_key_required: bool,

    pub dispatch_strategy: DispatchStrategy,

    /// None allows any origin
    pub cors_allowed_origins: Option<Vec<String>>,

    pub notification_image_url: Option<String>,

    pub fcm_api_url: String,
    pub fcm_credentials: ServiceAccountKey,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("PUSH_BROADCASTER_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("PUSH_BROADCASTER_LOG_FILENAME")?;
        let bind_address = Self::env_var("PUSH_BROADCASTER_BIND_ADDRESS")?.parse()?;
        let db_connection_string = Self::env_var("PUSH_BROADCASTER_DB_CONNECTION_STRING")?;
        let db_name = Self::env_var("PUSH_BROADCASTER_DB_NAME")?;
        let db_users_collection = Self::env_var_optional("PUSH_BROADCASTER_DB_USERS_COLLECTION")
            .unwrap_or_else(|| DEFAULT_DB_USERS_COLLECTION.to_string());
        let db_device_token_field =
            Self::env_var_optional("PUSH_BROADCASTER_DB_DEVICE_TOKEN_FIELD")
                .unwrap_or_else(|| DEFAULT_DB_DEVICE_TOKEN_FIELD.to_string());
        let max_http_content_len =
            Self::env_var("PUSH_BROADCASTER_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let admin_key = Self::env_var("PUSH_BROADCASTER_ADMIN_KEY")?;
        let admin_key_required = Self::env_var_optional("PUSH_BROADCASTER_ADMIN_KEY_REQUIRED")
            .map(|value| value.parse::<bool>())
            .transpose()?
            .unwrap_or(false);
        let dispatch_strategy = Self::env_var_optional("PUSH_BROADCASTER_DISPATCH_STRATEGY")
            .map(|value| value.parse::<DispatchStrategy>())
            .transpose()
            .context("PUSH_BROADCASTER_DISPATCH_STRATEGY must be one of: multicast, per_token")?
            .unwrap_or(DispatchStrategy::Multicast);
        let cors_allowed_origins = Self::env_var_optional("PUSH_BROADCASTER_CORS_ALLOWED_ORIGINS")
            .map(|value| parse_list(&value));
        let notification_image_url =
            Self::env_var_optional("PUSH_BROADCASTER_NOTIFICATION_IMAGE_URL");
        let fcm_api_url = Self::env_var_optional("PUSH_BROADCASTER_FCM_API_URL")
            .unwrap_or_else(|| FCM_API_URL.to_string());
        let fcm_credentials = Self::parse_fcm_credentials()?;

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            db_connection_string,
            db_name,
            db_users_collection,
            db_device_token_field,
            max_http_content_len,
            admin_key,
            admin_key_required,
            dispatch_strategy,
            cors_allowed_origins,
            notification_image_url,
            fcm_api_url,
            fcm_credentials,
        })
    }

    ///
    /// Credentials are read from service account file when
    /// PUSH_BROADCASTER_FCM_CREDENTIALS_FILE is set,
    /// otherwise from separate variables.
    ///
    fn parse_fcm_credentials() -> anyhow::Result<ServiceAccountKey> {
        if let Some(path) = Self::env_var_optional("PUSH_BROADCASTER_FCM_CREDENTIALS_FILE") {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read credentials file {path}"))?;
            let credentials = serde_json::from_str::<ServiceAccountKey>(&content)
                .with_context(|| format!("invalid credentials file {path}"))?;

            return Ok(credentials);
        }

        let project_id = Self::env_var("PUSH_BROADCASTER_FCM_PROJECT_ID")?;
        let private_key = Self::env_var("PUSH_BROADCASTER_FCM_PRIVATE_KEY")?;
        let client_email = Self::env_var("PUSH_BROADCASTER_FCM_CLIENT_EMAIL")?;

        Ok(ServiceAccountKey::from_parts(
            project_id,
            &private_key,
            client_email,
        ))
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn env_var_optional(name: &'static str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

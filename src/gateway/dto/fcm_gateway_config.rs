use super::ServiceAccountKey;

pub const FCM_API_URL: &str = "https://fcm.googleapis.com";

pub struct FcmGatewayConfig {
    /// Base URL of the FCM HTTP v1 API, without trailing slash
    pub api_url: String,
    pub credentials: ServiceAccountKey,
}

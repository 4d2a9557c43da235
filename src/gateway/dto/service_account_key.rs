use serde::Deserialize;

pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

///
/// Subset of the Google service account JSON key
/// required to authorize against FCM
///
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    ///
    /// Create key from values kept in environment variables.
    ///
    /// Private keys stored in env files usually have
    /// their newlines escaped, so literal `\n` sequences
    /// are turned back into newlines.
    ///
    pub fn from_parts(project_id: String, private_key: &str, client_email: String) -> Self {
        Self {
            project_id,
            private_key: private_key.replace("\\n", "\n"),
            client_email,
            token_uri: default_token_uri(),
        }
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key", &"***")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

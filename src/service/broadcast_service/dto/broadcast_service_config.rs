pub struct BroadcastServiceConfig {
    /// Shared secret compared verbatim with request key
    pub admin_key: String,

    /// When false, requests without key skip authorization
    pub admin_key_required: bool,

    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub title: String,
    pub body: String,

    /// Used as notification image and icon
    pub image_url: Option<String>,
}

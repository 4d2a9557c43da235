use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BroadcastResult {
    pub success: bool,
    pub sent: usize,
}

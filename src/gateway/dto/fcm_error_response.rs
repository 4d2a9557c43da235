use serde::Deserialize;

///
/// Error body returned by FCM, e.g.
/// `{ "error": { "code": 404, "message": "...", "status": "NOT_FOUND" } }`
///
#[derive(Debug, Deserialize)]
pub struct FcmErrorResponse {
    pub error: FcmErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct FcmErrorBody {
    pub message: String,
}

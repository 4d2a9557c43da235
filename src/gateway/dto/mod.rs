mod batch_response;
mod fcm_error_response;
mod fcm_gateway_config;
mod fcm_send_request;
mod google_token;
mod push_message;
mod service_account_key;

pub use batch_response::*;
pub use fcm_error_response::*;
pub use fcm_gateway_config::*;
pub use fcm_send_request::*;
pub use google_token::*;
pub use push_message::*;
pub use service_account_key::*;

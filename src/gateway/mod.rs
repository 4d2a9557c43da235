//!
//! Push notifications gateway.
//!
//! Delivery is delegated to Firebase Cloud Messaging.
//!

mod dto;
mod error;
mod fcm_access_token_provider;
mod fcm_gateway;
mod push_gateway;

pub use dto::{
    BatchResponse, DispatchResult, FcmGatewayConfig, PushMessage, ServiceAccountKey, FCM_API_URL,
};
pub use error::*;
pub use fcm_gateway::*;
pub use push_gateway::*;

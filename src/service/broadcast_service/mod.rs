mod broadcast_service;
mod broadcast_service_impl;
mod dto;

pub use broadcast_service::*;
pub use broadcast_service_impl::*;
pub use dto::BroadcastServiceConfig;

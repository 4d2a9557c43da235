mod broadcast_service_config;

pub use broadcast_service_config::*;

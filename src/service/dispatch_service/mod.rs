mod dispatch_service;
mod dispatch_strategy;
mod multicast_dispatch_service;
mod per_token_dispatch_service;

pub use dispatch_service::*;
pub use dispatch_strategy::*;
pub use multicast_dispatch_service::*;
pub use per_token_dispatch_service::*;

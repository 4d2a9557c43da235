pub mod broadcast_service;
pub mod dispatch_service;

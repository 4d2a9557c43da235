use super::{DispatchService, MulticastDispatchService, PerTokenDispatchService};
use crate::gateway::PushGateway;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DispatchStrategy {
    /// Single multicast call carrying all tokens
    Multicast,

    /// Independent concurrent call per token
    PerToken,
}

pub fn create_dispatch_service(
    strategy: DispatchStrategy,
    gateway: Arc<dyn PushGateway>,
) -> Arc<dyn DispatchService> {
    match strategy {
        DispatchStrategy::Multicast => Arc::new(MulticastDispatchService::new(gateway)),
        DispatchStrategy::PerToken => Arc::new(PerTokenDispatchService::new(gateway)),
    }
}

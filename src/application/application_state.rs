use super::ApplicationEnv;
use crate::{
    gateway::{FcmGateway, FcmGatewayConfig},
    repository::{UsersRepositoryConfig, UsersRepositoryImpl},
    service::{
        broadcast_service::{BroadcastService, BroadcastServiceConfig, BroadcastServiceImpl},
        dispatch_service::create_dispatch_service,
    },
};
use axum::extract::FromRef;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub broadcast_service: Arc<dyn BroadcastService>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let config = UsersRepositoryConfig {
        collection: env.db_users_collection.clone(),
        device_token_field: env.db_device_token_field.clone(),
    };
    let users_repository = UsersRepositoryImpl::new(config, db);
    let users_repository = Arc::new(users_repository);

    tracing::info!(project_id = env.fcm_credentials.project_id, "creating fcm gateway");
    let config = FcmGatewayConfig {
        api_url: env.fcm_api_url.clone(),
        credentials: env.fcm_credentials.clone(),
    };
    let fcm_gateway = FcmGateway::new(config)?;
    let fcm_gateway = Arc::new(fcm_gateway);

    tracing::info!(strategy = %env.dispatch_strategy, "creating services");
    let dispatch_service = create_dispatch_service(env.dispatch_strategy, fcm_gateway);

    let config = BroadcastServiceConfig {
        admin_key: env.admin_key.clone(),
        admin_key_required: env.admin_key_required,
        image_url: env.notification_image_url.clone(),
    };
    let broadcast_service =
        BroadcastServiceImpl::new(config, users_repository, dispatch_service);
    let broadcast_service = Arc::new(broadcast_service);

    Ok((
        ApplicationState { broadcast_service },
        ApplicationStateToClose { db_client },
    ))
}

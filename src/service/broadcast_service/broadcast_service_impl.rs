use super::{BroadcastService, BroadcastServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    gateway::PushMessage,
    repository::UsersRepository,
    service::dispatch_service::DispatchService,
};
use axum::async_trait;
use serde_json::Value;
use std::sync::Arc;

const MISSING_TITLE_OR_BODY: &str = "Missing title or body";
const MISSING_TITLE_BODY_OR_KEY: &str = "Missing title, body, or key";

pub struct BroadcastServiceImpl {
    config: BroadcastServiceConfig,
    repository: Arc<dyn UsersRepository>,
    dispatch_service: Arc<dyn DispatchService>,
}

impl BroadcastServiceImpl {
    pub fn new(
        config: BroadcastServiceConfig,
        repository: Arc<dyn UsersRepository>,
        dispatch_service: Arc<dyn DispatchService>,
    ) -> Self {
        Self {
            config,
            repository,
            dispatch_service,
        }
    }

    fn validate(&self, request: input::NotificationRequest) -> Result<PushMessage, Error> {
        let error_message = match self.config.admin_key_required {
            true => MISSING_TITLE_BODY_OR_KEY,
            false => MISSING_TITLE_OR_BODY,
        };

        let title = request
            .title_text()
            .ok_or(Error::Validation(error_message))?;
        let body = request
            .body_text()
            .ok_or(Error::Validation(error_message))?;

        match request.key {
            Some(key) if self.config.admin_key_required && input::text(&key).is_none() => {
                return Err(Error::Validation(error_message))
            }
            Some(key) => self.authorize(&key)?,
            None if self.config.admin_key_required => {
                return Err(Error::Validation(error_message))
            }
            None => tracing::debug!("key not present, skipping authorization"),
        }

        Ok(PushMessage {
            title,
            body,
            image_url: self.config.image_url.clone(),
        })
    }

    /// Only the exact secret string is accepted, a key of any other type is rejected
    fn authorize(&self, key: &Value) -> Result<(), Error> {
        match key.as_str() == Some(self.config.admin_key.as_str()) {
            true => Ok(()),
            false => Err(Error::Unauthorized),
        }
    }

    async fn find_device_tokens(&self) -> Result<Vec<String>, Error> {
        let tokens = self
            .repository
            .find_device_tokens()
            .await?
            .into_iter()
            .flatten()
            .filter(|token| !token.trim().is_empty())
            .collect::<Vec<_>>();

        Ok(tokens)
    }
}

#[async_trait]
impl BroadcastService for BroadcastServiceImpl {
    async fn broadcast(
        &self,
        request: input::NotificationRequest,
    ) -> Result<output::BroadcastResult, Error> {
        tracing::info!("broadcasting notification");
        tracing::trace!(title = ?request.title, body = ?request.body);

        let message = self.validate(request)?;

        let tokens = self.find_device_tokens().await?;
        if tokens.is_empty() {
            return Err(Error::NoRecipients);
        }
        tracing::info!(count = tokens.len(), "found device tokens");

        let sent = self.dispatch_service.dispatch(&tokens, &message).await?;
        tracing::info!(sent, "broadcasted notification");

        Ok(output::BroadcastResult { success: true, sent })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        gateway::{self, MockPushGateway},
        repository::{self, MockUsersRepository},
        service::dispatch_service::{
            MockDispatchService, MulticastDispatchService, PerTokenDispatchService,
        },
    };
    use gateway::{BatchResponse, DispatchResult};
    use mongodb::error::ErrorKind;
    use serde_json::json;

    const ADMIN_KEY: &str = "super_secret_123";

    fn config(admin_key_required: bool) -> BroadcastServiceConfig {
        BroadcastServiceConfig {
            admin_key: ADMIN_KEY.to_string(),
            admin_key_required,
            image_url: None,
        }
    }

    fn request(
        title: Option<&str>,
        body: Option<&str>,
        key: Option<&str>,
    ) -> input::NotificationRequest {
        input::NotificationRequest {
            title: title.map(Value::from),
            body: body.map(Value::from),
            key: key.map(Value::from),
        }
    }

    fn sale_request() -> input::NotificationRequest {
        request(Some("Sale"), Some("50% off"), None)
    }

    fn repository_returning(tokens: Vec<Option<&'static str>>) -> MockUsersRepository {
        let mut repository = MockUsersRepository::new();
        repository.expect_find_device_tokens().returning(move || {
            Ok(tokens
                .iter()
                .map(|token| token.map(String::from))
                .collect())
        });

        repository
    }

    fn untouched_repository() -> MockUsersRepository {
        let mut repository = MockUsersRepository::new();
        repository.expect_find_device_tokens().never();

        repository
    }

    fn untouched_dispatch_service() -> MockDispatchService {
        let mut dispatch_service = MockDispatchService::new();
        dispatch_service.expect_dispatch().never();

        dispatch_service
    }

    fn service(
        admin_key_required: bool,
        repository: MockUsersRepository,
        dispatch_service: Arc<dyn DispatchService>,
    ) -> BroadcastServiceImpl {
        BroadcastServiceImpl::new(
            config(admin_key_required),
            Arc::new(repository),
            dispatch_service,
        )
    }

    fn failing_for(failing_tokens: &'static [&'static str]) -> MockPushGateway {
        let mut gateway = MockPushGateway::new();
        gateway.expect_send().returning(move |token, _| {
            match failing_tokens.iter().any(|failing| *failing == token) {
                true => Err(gateway::Error::Api {
                    status: 404,
                    message: "Requested entity was not found.".to_string(),
                }),
                false => Ok(()),
            }
        });
        gateway.expect_send_multicast().returning(move |tokens, _| {
            Ok(tokens
                .iter()
                .map(|token| match failing_tokens.iter().any(|failing| failing == token) {
                    true => DispatchResult::failed(token.as_str(), "not registered"),
                    false => DispatchResult::succeeded(token.as_str()),
                })
                .collect::<BatchResponse>())
        });

        gateway
    }

    #[tokio::test]
    async fn broadcast_missing_title() {
        let service = service(
            false,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service
            .broadcast(request(None, Some("50% off"), None))
            .await;

        assert!(matches!(result, Err(Error::Validation(MISSING_TITLE_OR_BODY))));
    }

    #[tokio::test]
    async fn broadcast_empty_body() {
        let service = service(
            false,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service
            .broadcast(request(Some("Sale"), Some(""), Some(ADMIN_KEY)))
            .await;

        assert!(matches!(result, Err(Error::Validation(MISSING_TITLE_OR_BODY))));
    }

    #[tokio::test]
    async fn broadcast_missing_title_key_required() {
        let service = service(
            true,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service
            .broadcast(request(None, Some("50% off"), Some(ADMIN_KEY)))
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(MISSING_TITLE_BODY_OR_KEY))
        ));
    }

    #[tokio::test]
    async fn broadcast_missing_key_required() {
        let service = service(
            true,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service.broadcast(sale_request()).await;

        assert!(matches!(
            result,
            Err(Error::Validation(MISSING_TITLE_BODY_OR_KEY))
        ));
    }

    #[tokio::test]
    async fn broadcast_empty_key_required() {
        let service = service(
            true,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service
            .broadcast(request(Some("Sale"), Some("50% off"), Some("")))
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(MISSING_TITLE_BODY_OR_KEY))
        ));
    }

    #[tokio::test]
    async fn broadcast_wrong_key() {
        let service = service(
            false,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service
            .broadcast(request(Some("Sale"), Some("50% off"), Some("guess")))
            .await;

        assert!(matches!(result, Err(Error::Unauthorized)));
    }

    #[tokio::test]
    async fn broadcast_wrong_key_required() {
        let service = service(
            true,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service
            .broadcast(request(Some("Sale"), Some("50% off"), Some("guess")))
            .await;

        assert!(matches!(result, Err(Error::Unauthorized)));
    }

    #[tokio::test]
    async fn broadcast_empty_key_not_required_is_checked() {
        let service = service(
            false,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service
            .broadcast(request(Some("Sale"), Some("50% off"), Some("")))
            .await;

        assert!(matches!(result, Err(Error::Unauthorized)));
    }

    #[tokio::test]
    async fn broadcast_non_string_key() {
        for admin_key_required in [false, true] {
            for key in [json!(123), json!(true), json!(["super_secret_123"])] {
                let service = service(
                    admin_key_required,
                    untouched_repository(),
                    Arc::new(untouched_dispatch_service()),
                );
                let mut request = sale_request();
                request.key = Some(key);

                let result = service.broadcast(request).await;

                assert!(matches!(result, Err(Error::Unauthorized)));
            }
        }
    }

    #[tokio::test]
    async fn broadcast_null_key_not_required_is_checked() {
        for key in [json!(null), json!(false), json!(0)] {
            let service = service(
                false,
                untouched_repository(),
                Arc::new(untouched_dispatch_service()),
            );
            let mut request = sale_request();
            request.key = Some(key);

            let result = service.broadcast(request).await;

            assert!(matches!(result, Err(Error::Unauthorized)));
        }
    }

    #[tokio::test]
    async fn broadcast_null_key_required() {
        let service = service(
            true,
            untouched_repository(),
            Arc::new(untouched_dispatch_service()),
        );
        let mut request = sale_request();
        request.key = Some(json!(null));

        let result = service.broadcast(request).await;

        assert!(matches!(
            result,
            Err(Error::Validation(MISSING_TITLE_BODY_OR_KEY))
        ));
    }

    #[tokio::test]
    async fn broadcast_falsy_title() {
        for title in [json!(null), json!(false), json!(0)] {
            let service = service(
                false,
                untouched_repository(),
                Arc::new(untouched_dispatch_service()),
            );
            let mut request = sale_request();
            request.title = Some(title);

            let result = service.broadcast(request).await;

            assert!(matches!(result, Err(Error::Validation(MISSING_TITLE_OR_BODY))));
        }
    }

    #[tokio::test]
    async fn broadcast_non_string_title_and_body() {
        let mut dispatch_service = MockDispatchService::new();
        dispatch_service
            .expect_dispatch()
            .withf(|_, message| message.title == "42" && message.body == "true")
            .times(1)
            .returning(|tokens, _| Ok(tokens.len()));
        let service = service(
            false,
            repository_returning(vec![Some("t1")]),
            Arc::new(dispatch_service),
        );
        let request = input::NotificationRequest {
            title: Some(json!(42)),
            body: Some(json!(true)),
            key: None,
        };

        let result = service.broadcast(request).await.unwrap();

        assert_eq!(result.sent, 1);
    }

    #[tokio::test]
    async fn broadcast_without_key_skips_authorization() {
        let mut dispatch_service = MockDispatchService::new();
        dispatch_service
            .expect_dispatch()
            .times(1)
            .returning(|tokens, _| Ok(tokens.len()));
        let service = service(
            false,
            repository_returning(vec![Some("t1")]),
            Arc::new(dispatch_service),
        );

        let result = service.broadcast(sale_request()).await.unwrap();

        assert!(result.success);
        assert_eq!(result.sent, 1);
    }

    #[tokio::test]
    async fn broadcast_correct_key() {
        let mut dispatch_service = MockDispatchService::new();
        dispatch_service
            .expect_dispatch()
            .times(1)
            .returning(|tokens, _| Ok(tokens.len()));
        let service = service(
            true,
            repository_returning(vec![Some("t1"), Some("t2")]),
            Arc::new(dispatch_service),
        );

        let result = service
            .broadcast(request(Some("Sale"), Some("50% off"), Some(ADMIN_KEY)))
            .await
            .unwrap();

        assert_eq!(result.sent, 2);
    }

    #[tokio::test]
    async fn broadcast_filters_invalid_tokens() {
        let mut dispatch_service = MockDispatchService::new();
        dispatch_service
            .expect_dispatch()
            .withf(|tokens, _| tokens.len() == 2 && tokens[0] == "t1" && tokens[1] == " t2 ")
            .times(1)
            .returning(|tokens, _| Ok(tokens.len()));
        let service = service(
            false,
            repository_returning(vec![Some("t1"), None, Some(""), Some("   "), Some(" t2 ")]),
            Arc::new(dispatch_service),
        );

        let result = service.broadcast(sale_request()).await.unwrap();

        assert_eq!(result.sent, 2);
    }

    #[tokio::test]
    async fn broadcast_message_built_from_request_and_config() {
        let mut dispatch_service = MockDispatchService::new();
        dispatch_service
            .expect_dispatch()
            .withf(|_, message| {
                *message
                    == PushMessage {
                        title: "Sale".to_string(),
                        body: "50% off".to_string(),
                        image_url: Some("https://example.com/logo.jpg".to_string()),
                    }
            })
            .times(1)
            .returning(|tokens, _| Ok(tokens.len()));
        let service = BroadcastServiceImpl::new(
            BroadcastServiceConfig {
                admin_key: ADMIN_KEY.to_string(),
                admin_key_required: false,
                image_url: Some("https://example.com/logo.jpg".to_string()),
            },
            Arc::new(repository_returning(vec![Some("t1")])),
            Arc::new(dispatch_service),
        );

        let result = service.broadcast(sale_request()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn broadcast_no_tokens() {
        let service = service(
            false,
            repository_returning(vec![]),
            Arc::new(untouched_dispatch_service()),
        );

        let result = service.broadcast(sale_request()).await;

        assert!(matches!(result, Err(Error::NoRecipients)));
    }

    #[tokio::test]
    async fn broadcast_only_blank_tokens() {
        for dispatch_service in [
            Arc::new(MulticastDispatchService::new(Arc::new(failing_for(&[]))))
                as Arc<dyn DispatchService>,
            Arc::new(PerTokenDispatchService::new(Arc::new(failing_for(&[])))),
        ] {
            let service = service(
                false,
                repository_returning(vec![Some(""), None, Some("  ")]),
                dispatch_service,
            );

            let result = service.broadcast(sale_request()).await;

            assert!(matches!(result, Err(Error::NoRecipients)));
        }
    }

    #[tokio::test]
    async fn broadcast_database_error() {
        let mut repository = MockUsersRepository::new();
        repository.expect_find_device_tokens().returning(|| {
            Err(repository::Error::Mongo(
                ErrorKind::Custom(Arc::new("connection refused")).into(),
            ))
        });
        let service = service(
            false,
            repository,
            Arc::new(untouched_dispatch_service()),
        );

        let result = service.broadcast(sale_request()).await;

        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn broadcast_all_succeeded_both_strategies() {
        for dispatch_service in [
            Arc::new(MulticastDispatchService::new(Arc::new(failing_for(&[]))))
                as Arc<dyn DispatchService>,
            Arc::new(PerTokenDispatchService::new(Arc::new(failing_for(&[])))),
        ] {
            let service = service(
                false,
                repository_returning(vec![Some("t1"), Some("t2")]),
                dispatch_service,
            );

            let result = service.broadcast(sale_request()).await.unwrap();

            assert!(result.success);
            assert_eq!(result.sent, 2);
        }
    }

    #[tokio::test]
    async fn broadcast_partial_failure_both_strategies() {
        for dispatch_service in [
            Arc::new(MulticastDispatchService::new(Arc::new(failing_for(&["t2"]))))
                as Arc<dyn DispatchService>,
            Arc::new(PerTokenDispatchService::new(Arc::new(failing_for(&["t2"])))),
        ] {
            let service = service(
                false,
                repository_returning(vec![Some("t1"), Some("t2")]),
                dispatch_service,
            );

            let result = service.broadcast(sale_request()).await.unwrap();

            assert!(result.success);
            assert_eq!(result.sent, 1);
        }
    }

    #[tokio::test]
    async fn broadcast_sent_is_tokens_minus_failures() {
        let failing: &'static [&'static str] = &["t2", "t5", "t7"];
        let tokens = vec![
            Some("t1"),
            Some("t2"),
            Some("t3"),
            Some("t4"),
            Some("t5"),
            Some("t6"),
            Some("t7"),
        ];

        for dispatch_service in [
            Arc::new(MulticastDispatchService::new(Arc::new(failing_for(failing))))
                as Arc<dyn DispatchService>,
            Arc::new(PerTokenDispatchService::new(Arc::new(failing_for(failing)))),
        ] {
            let service = service(false, repository_returning(tokens.clone()), dispatch_service);

            let result = service.broadcast(sale_request()).await.unwrap();

            assert_eq!(result.sent, tokens.len() - failing.len());
        }
    }
}
